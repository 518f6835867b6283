//! DOM wiring for the four pages (wasm32 only)
//!
//! Each page owns its engine in an `Rc<RefCell<_>>` shared by the event
//! handlers. Games are driven by one page-lifetime 20ms interval that feeds
//! elapsed wall time into `advance`; the engines own every game timer.

mod ball;
mod dodge;
mod home;
mod login;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, HtmlElement};

use crate::consts::DODGE_FALL_TICK_MS;
use crate::sim::{GameKind, ScoreOutcome};
use crate::storage::LocalStore;
use crate::ui;
use crate::users::UserStore;

/// Detect which page we are on and wire it up
pub fn start() {
    let Some(document) = document() else {
        log::error!("No document, nothing to run");
        return;
    };

    if document.get_element_by_id("leaderboard-body").is_some() {
        home::run(&document);
    } else if document.get_element_by_id("login").is_some() {
        login::run(&document);
    } else if document.get_element_by_id("ball").is_some() {
        ball::run(&document);
    } else if document.get_element_by_id("player").is_some() {
        dodge::run(&document);
    } else {
        log::warn!("Unknown page, no handlers installed");
    }
}

pub(crate) fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// Element by id, cast to the requested type
pub(crate) fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub(crate) fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// Position an element at a play-area offset
pub(crate) fn place(el: &HtmlElement, pos: Vec2) {
    set_style(el, "left", &format!("{}px", pos.x));
    set_style(el, "top", &format!("{}px", pos.y));
}

pub(crate) fn set_style(el: &HtmlElement, property: &str, value: &str) {
    if el.style().set_property(property, value).is_err() {
        log::warn!("Could not set {} to {}", property, value);
    }
}

/// Blocking notification
pub(crate) fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        if window.alert_with_message(message).is_err() {
            log::warn!("Alert failed: {}", message);
        }
    }
}

pub(crate) fn navigate(page: &str) {
    if let Some(window) = web_sys::window() {
        if window.location().set_href(page).is_err() {
            log::error!("Navigation to {} failed", page);
        }
    }
}

pub(crate) fn open_store() -> Option<UserStore<LocalStore>> {
    match LocalStore::open() {
        Ok(store) => Some(UserStore::new(store)),
        Err(e) => {
            log::error!("LocalStorage unavailable: {}", e);
            None
        }
    }
}

/// Listen for `event` for the rest of the page's life
pub(crate) fn on(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .is_err()
    {
        log::error!("Could not listen for {}", event);
    }
    closure.forget();
}

/// Page-lifetime game driver; `frame` receives elapsed milliseconds
pub(crate) fn drive(mut frame: impl FnMut(u32) + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let mut last = js_sys::Date::now();
    let closure = Closure::<dyn FnMut()>::new(move || {
        let now = js_sys::Date::now();
        let dt = (now - last).max(0.0) as u32;
        last += dt as f64;
        frame(dt);
    });
    if window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            DODGE_FALL_TICK_MS as i32,
        )
        .is_err()
    {
        log::error!("Could not start the game driver");
    }
    closure.forget();
}

/// Seed for target placement and spawn offsets
pub(crate) fn seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Persist the final score and tell the player; returns the high score to show
pub(crate) fn finish_session(kind: GameKind, score: u32) -> Option<u32> {
    let recorded = match open_store() {
        Some(mut users) => users.record_score(kind, score).map_err(|e| e.to_string()),
        None => Err("no storage".to_string()),
    };
    match recorded {
        Ok(outcome) => {
            alert(&ui::end_of_game_message(&outcome));
            Some(outcome.best())
        }
        Err(e) => {
            log::error!("Could not record {} score: {}", kind.as_str(), e);
            alert(&ui::end_of_game_message(&ScoreOutcome::unrecorded(kind, score)));
            None
        }
    }
}
