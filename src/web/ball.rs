//! Catch-the-ball page

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Document, Element, HtmlElement};

use super::{
    by_id, drive, finish_session, navigate, on, open_store, place, seed, set_style, set_text,
};
use crate::consts::HOME_PAGE;
use crate::sim::{BallConfig, BallGame, GameEvent, GameKind};
use crate::ui;

struct BallPage {
    game: BallGame,
    ball: HtmlElement,
}

impl BallPage {
    fn render(&self, document: &Document) {
        set_text(document, "score", &self.game.score().to_string());
        set_text(document, "time", &self.game.time_left().to_string());
        place(&self.ball, self.game.target().pos);
        let color = if self.game.is_flashing() { "green" } else { "red" };
        set_style(&self.ball, "background-color", color);
    }
}

pub(super) fn run(document: &Document) {
    let Some(ball) = by_id::<HtmlElement>(document, "ball") else {
        return;
    };

    let mut config = BallConfig::default()
        .with_target_size(ball.client_width() as f32, ball.client_height() as f32);
    if let Some(area) = by_id::<Element>(document, "game-area") {
        config = config.with_arena(area.client_width() as f32, area.client_height() as f32);
    }

    let high_score = open_store()
        .map(|users| users.player().high_score(GameKind::Ball))
        .unwrap_or_default();
    if document.get_element_by_id("high-score").is_none() {
        if let Some(body) = document.body() {
            let html = format!("<p>High Score: <span id=\"high-score\">{}</span></p>", high_score);
            if body.insert_adjacent_html("beforeend", &html).is_err() {
                log::warn!("Could not add the high score readout");
            }
        }
    } else {
        set_text(document, "high-score", &high_score.to_string());
    }

    let mut game = BallGame::new(config, seed());
    game.start();
    let page = Rc::new(RefCell::new(BallPage { game, ball }));
    page.borrow().render(document);

    {
        let page = page.clone();
        let ball = page.borrow().ball.clone();
        on(&ball, "click", move |_| {
            let Some(document) = super::document() else {
                return;
            };
            let mut p = page.borrow_mut();
            if p.game.hit().is_some() {
                p.render(&document);
            }
        });
    }

    if let Some(button) = by_id::<Element>(document, "pause-button") {
        let page = page.clone();
        let label = button.clone();
        on(&button, "click", move |_| {
            let paused = page.borrow_mut().game.toggle_pause();
            label.set_text_content(Some(ui::pause_button_label(paused)));
        });
    }

    if let Some(button) = by_id::<Element>(document, "again-button") {
        let page = page.clone();
        on(&button, "click", move |_| {
            let Some(document) = super::document() else {
                return;
            };
            let mut p = page.borrow_mut();
            p.game.start();
            p.render(&document);
            set_text(&document, "pause-button", ui::PAUSE_LABEL);
        });
    }

    if let Some(button) = by_id::<Element>(document, "home-button") {
        on(&button, "click", |_| navigate(HOME_PAGE));
    }

    drive(move |dt| {
        let Some(document) = super::document() else {
            return;
        };
        let (events, score) = {
            let mut p = page.borrow_mut();
            let events = p.game.advance(dt);
            if !events.is_empty() {
                p.render(&document);
            }
            (events, p.game.score())
        };
        if events.iter().any(|e| matches!(e, GameEvent::Ended(_))) {
            if let Some(best) = finish_session(GameKind::Ball, score) {
                set_text(&document, "high-score", &best.to_string());
            }
        }
    });
}
