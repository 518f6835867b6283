//! Mini Arcade - two browser mini-games with a shared local leaderboard
//!
//! Core modules:
//! - `sim`: Deterministic game engines (catch-the-ball, dodge-the-blocks)
//! - `storage`: Key-value document store (LocalStorage on web, JSON file on native)
//! - `users`: Registered users, the current-user pointer and high scores
//! - `auth`: Registration, login and the failed-attempt lockout
//! - `leaderboard`: Ranked display rows derived from the users table
//! - `web`: DOM wiring for the four pages (wasm32 only)

pub mod auth;
pub mod cookies;
pub mod errors;
pub mod leaderboard;
pub mod settings;
pub mod sim;
pub mod storage;
pub mod ui;
pub mod users;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use auth::AuthFlow;
pub use errors::{AuthError, StoreError};
pub use settings::{Difficulty, Settings};
pub use storage::{KvStore, MemoryStore};
pub use users::{Player, User, UserStore, UserTable};

/// Game configuration constants
pub mod consts {
    /// Storage key holding the JSON array of registered users
    pub const USERS_KEY: &str = "users";
    /// Storage key holding the current user record
    pub const CURRENT_USER_KEY: &str = "current user";
    /// Storage key holding player preferences
    pub const SETTINGS_KEY: &str = "mini_arcade_settings";

    /// Navigation targets
    pub const HOME_PAGE: &str = "home.html";
    pub const LOGIN_PAGE: &str = "login.html";

    /// Failed logins before an email is locked
    pub const MAX_LOGIN_ATTEMPTS: u32 = 3;
    /// Lockout duration in seconds (5 minutes)
    pub const LOCKOUT_SECS: i64 = 5 * 60;
    /// Lifetime of the credential pre-fill cookies
    pub const REMEMBER_HOURS: i64 = 12;

    /// Both games last 30 seconds
    pub const SESSION_SECS: u32 = 30;
    /// Countdown resolution
    pub const COUNTDOWN_MS: u32 = 1000;

    /// Catch-the-ball: the target jumps once per second
    pub const BALL_MOVE_MS: u32 = 1000;
    /// Catch-the-ball: green flash after a hit
    pub const BALL_FLASH_MS: u32 = 200;
    pub const BALL_TARGET_SIZE: f32 = 50.0;
    pub const BALL_ARENA_WIDTH: f32 = 600.0;
    pub const BALL_ARENA_HEIGHT: f32 = 400.0;

    /// Dodge: obstacles fall on a fast fixed tick
    pub const DODGE_FALL_TICK_MS: u32 = 20;
    /// Dodge: horizontal player step per key press
    pub const DODGE_MOVE_STEP: f32 = 20.0;
    pub const DODGE_OBSTACLE_SIZE: f32 = 40.0;
    pub const DODGE_PLAYER_WIDTH: f32 = 60.0;
    pub const DODGE_PLAYER_HEIGHT: f32 = 20.0;
    pub const DODGE_ARENA_WIDTH: f32 = 400.0;
    pub const DODGE_ARENA_HEIGHT: f32 = 600.0;
}
