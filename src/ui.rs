//! Text shown to the player
//!
//! Page chrome is in Hebrew; the end-of-game messages and the greeting are in
//! English.

use crate::errors::AuthError;
use crate::sim::{GameKind, ScoreOutcome};

/// Pause button while the game runs ("stop")
pub const PAUSE_LABEL: &str = "עצור";
/// Pause button while the game is paused ("continue")
pub const RESUME_LABEL: &str = "המשך";

pub const REGISTERED: &str = "הרישום הצליח!";
pub const LOCKED_OUT: &str = "החשבון נחסם ל-5 דקות עקב מספר ניסיונות כושלים.";
pub const LOGGED_OUT: &str = "התנתקת בהצלחה";
pub const STORAGE_FAILED: &str = "שגיאה בשמירת הנתונים";

pub fn pause_button_label(paused: bool) -> &'static str {
    if paused { RESUME_LABEL } else { PAUSE_LABEL }
}

/// Blocking notification for a failed register/login
pub fn auth_error_message(err: &AuthError) -> &'static str {
    match err {
        AuthError::DuplicateEmail => "האימייל כבר רשום במערכת",
        AuthError::InvalidCredentials => "אימייל או סיסמה שגויים",
        AuthError::AccountLocked { .. } => "החשבון נחסם זמנית. נסה שוב מאוחר לאחר.",
        AuthError::Store(_) => STORAGE_FAILED,
    }
}

/// Final-score notification, distinct for a new high score
pub fn end_of_game_message(outcome: &ScoreOutcome) -> String {
    let score = outcome.score;
    match (outcome.kind, outcome.new_high_score) {
        (GameKind::Ball, true) => format!("New High Score! Your final score is {}", score),
        (GameKind::Ball, false) => format!("Time's up! Your final score is {}", score),
        (GameKind::Dodge, true) => format!("New High Score! Score: {}", score),
        (GameKind::Dodge, false) => format!("Game Over! Score: {}", score),
    }
}

/// Home-page header for a named current user
pub fn greeting(name: &str) -> Option<String> {
    (!name.is_empty()).then(|| format!("🎮 Let's Start Playing, {}! 🎮", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_label_toggles() {
        assert_eq!(pause_button_label(false), PAUSE_LABEL);
        assert_eq!(pause_button_label(true), RESUME_LABEL);
    }

    #[test]
    fn test_end_of_game_messages() {
        let ball_best = ScoreOutcome::new(GameKind::Ball, 12, 5);
        assert_eq!(
            end_of_game_message(&ball_best),
            "New High Score! Your final score is 12"
        );
        let ball = ScoreOutcome::new(GameKind::Ball, 3, 5);
        assert_eq!(end_of_game_message(&ball), "Time's up! Your final score is 3");
        let dodge_best = ScoreOutcome::new(GameKind::Dodge, 8, 0);
        assert_eq!(end_of_game_message(&dodge_best), "New High Score! Score: 8");
        let dodge = ScoreOutcome::new(GameKind::Dodge, 0, 0);
        assert_eq!(end_of_game_message(&dodge), "Game Over! Score: 0");
    }

    #[test]
    fn test_unrecorded_score_is_still_reported() {
        let ball = ScoreOutcome::unrecorded(GameKind::Ball, 9);
        assert!(!ball.new_high_score);
        assert_eq!(end_of_game_message(&ball), "Time's up! Your final score is 9");
        let dodge = ScoreOutcome::unrecorded(GameKind::Dodge, 4);
        assert_eq!(end_of_game_message(&dodge), "Game Over! Score: 4");
    }

    #[test]
    fn test_greeting() {
        assert_eq!(
            greeting("Dana").as_deref(),
            Some("🎮 Let's Start Playing, Dana! 🎮")
        );
        assert_eq!(greeting(""), None);
    }

    #[test]
    fn test_auth_messages_are_distinct() {
        let dup = auth_error_message(&AuthError::DuplicateEmail);
        let bad = auth_error_message(&AuthError::InvalidCredentials);
        assert_ne!(dup, bad);
    }
}
