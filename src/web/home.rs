//! Home page: greeting, leaderboard, game links and logout

use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use super::{alert, by_id, navigate, on, open_store, set_text};
use crate::consts::LOGIN_PAGE;
use crate::{AuthFlow, leaderboard, ui};

pub(super) fn run(document: &Document) {
    let Some(users) = open_store() else {
        return;
    };

    let rows = leaderboard::render(&users.load_or_default());
    if let Some(tbody) = by_id::<Element>(document, "leaderboard-body") {
        tbody.set_inner_html(&leaderboard::to_html(&rows));
    }
    log::info!("Leaderboard shows {} players", rows.len());

    if let Ok(Some(user)) = users.current() {
        if let Some(text) = ui::greeting(&user.name) {
            set_text(document, "header", &text);
        }
    }

    // <button data-game="ball.html">
    if let Ok(links) = document.query_selector_all("[data-game]") {
        for i in 0..links.length() {
            let Some(link) = links.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(target) = link.get_attribute("data-game") else {
                continue;
            };
            on(&link, "click", move |_| navigate(&target));
        }
    }

    if let Some(button) = by_id::<Element>(document, "logout-button") {
        on(&button, "click", |_| {
            let Some(users) = open_store() else {
                return;
            };
            if let Err(e) = AuthFlow::new(users).logout() {
                log::error!("Logout failed: {}", e);
                alert(ui::auth_error_message(&e));
                return;
            }
            alert(ui::LOGGED_OUT);
            navigate(LOGIN_PAGE);
        });
    }
}
