//! Login and registration page

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlDocument, HtmlInputElement};

use super::{alert, by_id, navigate, on, open_store};
use crate::consts::HOME_PAGE;
use crate::errors::AuthError;
use crate::storage::LocalStore;
use crate::{AuthFlow, cookies, ui};

type Auth = Rc<RefCell<AuthFlow<LocalStore>>>;

pub(super) fn run(document: &Document) {
    let Some(users) = open_store() else {
        return;
    };
    let auth: Auth = Rc::new(RefCell::new(AuthFlow::new(users)));

    if let Some(saved) = read_cookies(document).and_then(|jar| cookies::remembered(&jar)) {
        fill_login(document, &saved.email, &saved.password);
    }

    if let Some(link) = by_id::<Element>(document, "show-register") {
        on(&link, "click", |_| show_form("register"));
    }
    if let Some(link) = by_id::<Element>(document, "show-login") {
        on(&link, "click", |_| show_form("login"));
    }

    if let Some(form) = by_id::<Element>(document, "login") {
        let auth = auth.clone();
        on(&form, "submit", move |event| {
            event.prevent_default();
            submit_login(&auth);
        });
    }

    if let Some(form) = by_id::<Element>(document, "register") {
        on(&form, "submit", move |event| {
            event.prevent_default();
            submit_register(&auth);
        });
    }
}

fn submit_login(auth: &Auth) {
    let Some(document) = super::document() else {
        return;
    };
    let email = input_value(&document, "login-email");
    let password = input_value(&document, "login-password");
    let now = Utc::now();

    let result = auth.borrow_mut().login(&email, &password, now);
    match result {
        Ok(_) => {
            remember(&document, &email, &password);
            navigate(HOME_PAGE);
        }
        Err(e) => {
            alert(ui::auth_error_message(&e));
            if matches!(e, AuthError::InvalidCredentials) && auth.borrow().is_locked(&email, now) {
                alert(ui::LOCKED_OUT);
            }
        }
    }
}

fn submit_register(auth: &Auth) {
    let Some(document) = super::document() else {
        return;
    };
    let name = input_value(&document, "register-name");
    let email = input_value(&document, "register-email");
    let password = input_value(&document, "register-password");

    let result = auth.borrow_mut().register(&name, &email, &password);
    match result {
        Ok(_) => {
            remember(&document, &email, &password);
            alert(ui::REGISTERED);
            show_form("login");
            fill_login(&document, &email, &password);
        }
        Err(e) => alert(ui::auth_error_message(&e)),
    }
}

/// Show one of the two forms and hide the other
fn show_form(form: &str) {
    let Some(document) = super::document() else {
        return;
    };
    for (id, name) in [("login-form", "login"), ("register-form", "register")] {
        if let Some(el) = document.get_element_by_id(id) {
            if el.class_list().toggle_with_force("hidden", form != name).is_err() {
                log::warn!("Could not toggle {}", id);
            }
        }
    }
}

fn fill_login(document: &Document, email: &str, password: &str) {
    if let Some(input) = by_id::<HtmlInputElement>(document, "login-email") {
        input.set_value(email);
    }
    if let Some(input) = by_id::<HtmlInputElement>(document, "login-password") {
        input.set_value(password);
    }
}

fn input_value(document: &Document, id: &str) -> String {
    by_id::<HtmlInputElement>(document, id)
        .map(|input| input.value())
        .unwrap_or_default()
}

fn read_cookies(document: &Document) -> Option<String> {
    document.dyn_ref::<HtmlDocument>()?.cookie().ok()
}

fn remember(document: &Document, email: &str, password: &str) {
    let Some(html) = document.dyn_ref::<HtmlDocument>() else {
        return;
    };
    for assignment in cookies::remember(email, password, Utc::now()) {
        if html.set_cookie(&assignment).is_err() {
            log::warn!("Could not store credential cookie");
        }
    }
}
