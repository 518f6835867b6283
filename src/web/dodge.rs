//! Dodge-the-blocks page

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlSelectElement, KeyboardEvent};

use super::{by_id, drive, finish_session, navigate, on, open_store, place, seed, set_text};
use crate::consts::HOME_PAGE;
use crate::settings::{Difficulty, Settings};
use crate::sim::{DodgeConfig, DodgeGame, GameEvent, GameKind};
use crate::ui;

struct DodgePage {
    game: DodgeGame,
    area: Element,
    player: HtmlElement,
    /// DOM node for each live obstacle
    blocks: HashMap<u32, HtmlElement>,
}

impl DodgePage {
    /// Mirror spawn/dodge events into block elements
    fn sync_blocks(&mut self, document: &Document, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::ObstacleSpawned { id } => {
                    let block = document
                        .create_element("div")
                        .ok()
                        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
                    if let Some(block) = block {
                        block.set_class_name("block");
                        if self.area.append_child(&block).is_err() {
                            log::warn!("Could not add block {}", id);
                        }
                        self.blocks.insert(id, block);
                    }
                }
                GameEvent::ObstacleDodged { id } => {
                    if let Some(block) = self.blocks.remove(&id) {
                        block.remove();
                    }
                }
                _ => {}
            }
        }
        for obstacle in self.game.obstacles() {
            if let Some(block) = self.blocks.get(&obstacle.id) {
                place(block, obstacle.rect.pos);
            }
        }
    }

    fn clear_blocks(&mut self) {
        for (_, block) in self.blocks.drain() {
            block.remove();
        }
    }

    fn render(&self, document: &Document) {
        set_text(document, "score", &self.game.score().to_string());
        set_text(document, "time", &self.game.time_left().to_string());
        place(&self.player, self.game.player().pos);
    }
}

pub(super) fn run(document: &Document) {
    let (Some(area), Some(player)) = (
        by_id::<Element>(document, "game-area"),
        by_id::<HtmlElement>(document, "player"),
    ) else {
        return;
    };

    let config = DodgeConfig::default()
        .with_arena(area.client_width() as f32, area.client_height() as f32)
        .with_player_size(player.offset_width() as f32, player.offset_height() as f32);

    let (high_score, settings) = match open_store() {
        Some(users) => (
            users.player().high_score(GameKind::Dodge),
            Settings::load(users.store()),
        ),
        None => (0, Settings::default()),
    };
    set_text(document, "high-score", &high_score.to_string());

    let select = by_id::<HtmlSelectElement>(document, "difficulty");
    if let Some(select) = &select {
        select.set_value(settings.difficulty.as_str());
    }

    let game = DodgeGame::new(config, settings.difficulty, seed());
    let page = Rc::new(RefCell::new(DodgePage {
        game,
        area,
        player,
        blocks: HashMap::new(),
    }));
    page.borrow().render(document);

    if let Some(select) = select.clone() {
        let page = page.clone();
        on(&select.clone(), "change", move |_| {
            let Some(difficulty) = Difficulty::from_str(&select.value()) else {
                return;
            };
            page.borrow_mut().game.set_difficulty(difficulty);
            if let Some(mut users) = open_store() {
                let settings = Settings { difficulty };
                if let Err(e) = settings.save(users.store_mut()) {
                    log::warn!("Could not save difficulty: {}", e);
                }
            }
        });
    }

    if let Some(button) = by_id::<Element>(document, "start-btn") {
        let page = page.clone();
        on(&button, "click", move |_| {
            let Some(document) = super::document() else {
                return;
            };
            let mut p = page.borrow_mut();
            if let Some(difficulty) = select.as_ref().and_then(|s| Difficulty::from_str(&s.value())) {
                p.game.set_difficulty(difficulty);
            }
            p.clear_blocks();
            p.game.start();
            p.render(&document);
            set_text(&document, "pause-button", ui::PAUSE_LABEL);
        });
    }

    if let Some(button) = by_id::<Element>(document, "pause-button") {
        let page = page.clone();
        let label = button.clone();
        on(&button, "click", move |_| {
            let mut p = page.borrow_mut();
            if p.game.session().is_running() || p.game.session().is_paused() {
                let paused = p.game.toggle_pause();
                label.set_text_content(Some(ui::pause_button_label(paused)));
            }
        });
    }

    if let Some(button) = by_id::<Element>(document, "home-button") {
        on(&button, "click", |_| navigate(HOME_PAGE));
    }

    {
        let page = page.clone();
        on(document, "keydown", move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            let Some(document) = super::document() else {
                return;
            };
            let mut p = page.borrow_mut();
            let moved = match key.as_str() {
                "ArrowLeft" => p.game.move_left(),
                "ArrowRight" => p.game.move_right(),
                _ => false,
            };
            if moved {
                p.render(&document);
            }
        });
    }

    drive(move |dt| {
        let Some(document) = super::document() else {
            return;
        };
        let (ended, score) = {
            let mut p = page.borrow_mut();
            let events = p.game.advance(dt);
            if events.is_empty() && !p.game.session().is_running() {
                return;
            }
            p.sync_blocks(&document, &events);
            p.render(&document);
            let ended = events.iter().any(|e| matches!(e, GameEvent::Ended(_)));
            (ended, p.game.score())
        };
        if ended {
            set_text(&document, "pause-button", ui::PAUSE_LABEL);
            if let Some(best) = finish_session(GameKind::Dodge, score) {
                set_text(&document, "high-score", &best.to_string());
            }
        }
    });
}
