//! Login-form pre-fill cookies
//!
//! After a registration or login the page remembers the credentials for 12
//! hours so the login form can be filled in on the next visit. Values are
//! stored as typed, in clear text.

use chrono::{DateTime, TimeDelta, Utc};

use crate::consts::REMEMBER_HOURS;

pub const EMAIL_COOKIE: &str = "user_email";
pub const PASSWORD_COOKIE: &str = "user_password";

/// Credentials recovered from `document.cookie`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RememberedCredentials {
    pub email: String,
    pub password: String,
}

/// One `document.cookie` assignment, site-wide
pub fn cookie_assignment(name: &str, value: &str, expires: DateTime<Utc>) -> String {
    format!(
        "{}={}; expires={}; path=/",
        name,
        value,
        expires.format("%a, %d %b %Y %H:%M:%S GMT")
    )
}

/// Both assignments needed to remember a login made at `now`
pub fn remember(email: &str, password: &str, now: DateTime<Utc>) -> [String; 2] {
    let expires = now + TimeDelta::hours(REMEMBER_HOURS);
    [
        cookie_assignment(EMAIL_COOKIE, email, expires),
        cookie_assignment(PASSWORD_COOKIE, password, expires),
    ]
}

/// Look up `name` in a `document.cookie` string (`k1=v1; k2=v2`)
pub fn get_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// Remembered credentials, only when both cookies are present and non-empty
pub fn remembered(cookies: &str) -> Option<RememberedCredentials> {
    let email = get_cookie(cookies, EMAIL_COOKIE).filter(|v| !v.is_empty())?;
    let password = get_cookie(cookies, PASSWORD_COOKIE).filter(|v| !v.is_empty())?;
    Some(RememberedCredentials { email, password })
}
