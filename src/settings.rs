//! Game settings and preferences
//!
//! Persisted separately from the users table.

use serde::{Deserialize, Serialize};

use crate::consts::SETTINGS_KEY;
use crate::errors::StoreError;
use crate::storage::{KvStore, read_json, write_json};

/// Dodge difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Value used by the difficulty `<select>`
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Pixels a block falls per tick
    pub fn fall_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 3.0,
            Difficulty::Medium => 5.0,
            Difficulty::Hard => 7.0,
        }
    }

    /// Time between block spawns
    pub fn spawn_interval_ms(&self) -> u32 {
        match self {
            Difficulty::Easy => 1600,
            Difficulty::Medium => 1100,
            Difficulty::Hard => 800,
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Last difficulty picked on the dodge page
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl Settings {
    /// Load settings, falling back to defaults on missing or unreadable data
    pub fn load<S: KvStore + ?Sized>(store: &S) -> Self {
        match read_json(store, SETTINGS_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn save<S: KvStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        write_json(store, SETTINGS_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
