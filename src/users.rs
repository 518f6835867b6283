//! Registered users, the current-user pointer and per-game high scores
//!
//! Persisted to LocalStorage as two JSON documents: the `users` array and the
//! `current user` record. The table is the source of truth; the pointer is a
//! denormalized copy that is rewritten from the same record on every update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::consts::{CURRENT_USER_KEY, USERS_KEY};
use crate::errors::StoreError;
use crate::sim::{GameKind, ScoreOutcome};
use crate::storage::{KvStore, read_json, write_json};

/// Display name of the unauthenticated player
pub const GUEST_NAME: &str = "Guest";

/// A registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique key (case-sensitive, exact match)
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Stored in clear text
    #[serde(default, deserialize_with = "lenient_string")]
    pub password: String,
    #[serde(
        rename = "HighScoreBall",
        default,
        deserialize_with = "lenient_score"
    )]
    pub high_score_ball: u32,
    #[serde(
        rename = "HighScoreDodge",
        default,
        deserialize_with = "lenient_score"
    )]
    pub high_score_dodge: u32,
    /// Login instants, most recent last
    #[serde(default, deserialize_with = "lenient_timestamps")]
    pub timestamps: Vec<DateTime<Utc>>,
    /// Fields written by other versions of the pages, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// A freshly registered user with zero high scores and no logins
    pub fn new(name: &str, email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            name: name.to_string(),
            password: password.to_string(),
            high_score_ball: 0,
            high_score_dodge: 0,
            timestamps: Vec::new(),
            extra: Map::new(),
        }
    }

    /// The record used when nobody is logged in
    pub fn guest() -> Self {
        Self::new(GUEST_NAME, "", "")
    }

    pub fn high_score(&self, kind: GameKind) -> u32 {
        match kind {
            GameKind::Ball => self.high_score_ball,
            GameKind::Dodge => self.high_score_dodge,
        }
    }

    /// Raise the high score for `kind`; never lowers it
    pub fn raise_high_score(&mut self, kind: GameKind, score: u32) {
        let field = match kind {
            GameKind::Ball => &mut self.high_score_ball,
            GameKind::Dodge => &mut self.high_score_dodge,
        };
        *field = (*field).max(score);
    }

    /// Best score across both games
    pub fn best(&self) -> u32 {
        self.high_score_ball.max(self.high_score_dodge)
    }

    pub fn last_login(&self) -> Option<&DateTime<Utc>> {
        self.timestamps.last()
    }
}

/// Scores written by hand or by older pages may be missing, negative,
/// fractional or not numbers at all; anything unusable reads as 0.
fn lenient_score<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value.as_f64() {
        Some(n) if n.is_finite() && n >= 0.0 => n.min(u32::MAX as f64) as u32,
        _ => 0,
    })
}

/// Null or non-string text fields read as empty
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// A missing or non-array login history is empty; unparseable instants are dropped
fn lenient_timestamps<'de, D>(deserializer: D) -> Result<Vec<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    let total = items.len();
    let parsed: Vec<DateTime<Utc>> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if parsed.len() < total {
        log::warn!("Dropped {} unreadable login timestamps", total - parsed.len());
    }
    Ok(parsed)
}

/// All registered users in registration order, at most one per email
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserTable {
    users: Vec<User>,
}

impl UserTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn find_mut(&mut self, email: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.email == email)
    }

    pub fn contains(&self, email: &str) -> bool {
        self.find(email).is_some()
    }

    /// Append `user` unless its email is already taken
    pub fn insert(&mut self, user: User) -> bool {
        if self.contains(&user.email) {
            return false;
        }
        self.users.push(user);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Who is playing, resolved from the current-user pointer
#[derive(Debug, Clone, PartialEq)]
pub enum Player {
    /// No pointer, or a pointer without an email
    Guest(User),
    /// A pointer naming an email
    Registered(User),
}

impl Player {
    pub fn user(&self) -> &User {
        match self {
            Player::Guest(user) | Player::Registered(user) => user,
        }
    }

    pub fn name(&self) -> &str {
        &self.user().name
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            Player::Guest(_) => None,
            Player::Registered(user) => Some(&user.email),
        }
    }

    pub fn high_score(&self, kind: GameKind) -> u32 {
        self.user().high_score(kind)
    }
}

/// Whole-document access to the users table and the current-user pointer
pub struct UserStore<S> {
    store: S,
}

impl<S: KvStore> UserStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Load the users table; an absent document is an empty table
    pub fn load(&self) -> Result<UserTable, StoreError> {
        Ok(read_json(&self.store, USERS_KEY)?.unwrap_or_default())
    }

    /// Load the users table for display, treating corrupt data as empty
    pub fn load_or_default(&self) -> UserTable {
        self.load().unwrap_or_else(|e| {
            log::warn!("Users table unreadable, showing empty table: {}", e);
            UserTable::new()
        })
    }

    pub fn save(&mut self, table: &UserTable) -> Result<(), StoreError> {
        write_json(&mut self.store, USERS_KEY, table)?;
        log::info!("Users table saved ({} users)", table.len());
        Ok(())
    }

    /// The raw current-user snapshot, if any
    pub fn current(&self) -> Result<Option<User>, StoreError> {
        read_json(&self.store, CURRENT_USER_KEY)
    }

    pub fn set_current(&mut self, user: &User) -> Result<(), StoreError> {
        write_json(&mut self.store, CURRENT_USER_KEY, user)
    }

    pub fn clear_current(&mut self) -> Result<(), StoreError> {
        self.store.remove_item(CURRENT_USER_KEY)
    }

    /// Resolve the pointer against the table
    ///
    /// A registered pointer whose row has vanished still resolves to its
    /// snapshot, the way the pages always trusted the pointer.
    pub fn resolve_player(&self) -> Result<Player, StoreError> {
        let Some(snapshot) = self.current()? else {
            return Ok(Player::Guest(User::guest()));
        };
        if snapshot.email.is_empty() {
            return Ok(Player::Guest(snapshot));
        }
        let table = self.load()?;
        match table.find(&snapshot.email) {
            Some(row) => Ok(Player::Registered(row.clone())),
            None => {
                log::warn!(
                    "Current user {} is not in the users table, using stored copy",
                    snapshot.email
                );
                Ok(Player::Registered(snapshot))
            }
        }
    }

    /// Like `resolve_player`, but unreadable storage means Guest
    pub fn player(&self) -> Player {
        self.resolve_player().unwrap_or_else(|e| {
            log::warn!("Could not resolve current user, playing as guest: {}", e);
            Player::Guest(User::guest())
        })
    }

    /// End-of-session update for the current player
    ///
    /// Raises the high score for `kind` when `score` beats it, writing the
    /// table row and the pointer from the same record.
    pub fn record_score(&mut self, kind: GameKind, score: u32) -> Result<ScoreOutcome, StoreError> {
        let player = self.resolve_player()?;
        let outcome = ScoreOutcome::new(kind, score, player.high_score(kind));
        if !outcome.new_high_score {
            return Ok(outcome);
        }

        match player {
            Player::Guest(mut user) => {
                user.raise_high_score(kind, score);
                self.set_current(&user)?;
            }
            Player::Registered(mut user) => {
                user.raise_high_score(kind, score);
                let mut table = self.load()?;
                if let Some(row) = table.find_mut(&user.email) {
                    *row = user.clone();
                    self.save(&table)?;
                }
                self.set_current(&user)?;
            }
        }
        log::info!("New {} high score: {}", kind.as_str(), score);
        Ok(outcome)
    }
}
