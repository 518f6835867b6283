//! Session state shared by both games

use serde::{Deserialize, Serialize};

/// Lifecycle of one play-through
///
/// `Idle -> Running -> {Paused <-> Running} -> Ended`; a restart begins a
/// fresh session from any phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Not started yet
    Idle,
    /// Timers armed, input accepted
    Running,
    /// All timers cancelled, state frozen
    Paused,
    /// Final score is in
    Ended,
}

/// Which game a score belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameKind {
    Ball,
    Dodge,
}

impl GameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Ball => "ball",
            GameKind::Dodge => "dodge",
        }
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Countdown reached zero
    TimeUp,
    /// An obstacle touched the player
    Collision { obstacle: u32 },
}

/// Things that happened during `advance`/input, for the host to mirror
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball target jumped to a new position
    TargetMoved,
    /// Ball target was clicked while running
    TargetHit,
    /// Hit feedback is over
    FlashEnded,
    ObstacleSpawned { id: u32 },
    /// Obstacle left the bottom edge and scored
    ObstacleDodged { id: u32 },
    /// Countdown decremented
    Countdown { time_left: u32 },
    Ended(EndReason),
}

/// Transient per-session counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub score: u32,
    pub time_left: u32,
    phase: GamePhase,
}

impl GameSession {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            score: 0,
            time_left: duration_secs,
            phase: GamePhase::Idle,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Zero the counters and enter `Running`
    pub fn begin(&mut self, duration_secs: u32) {
        *self = Self::new(duration_secs);
        self.phase = GamePhase::Running;
    }

    pub fn pause(&mut self) -> bool {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
            true
        } else {
            false
        }
    }

    pub fn resume(&mut self) -> bool {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
            true
        } else {
            false
        }
    }

    /// Returns false if there was no live session to end
    pub fn end(&mut self) -> bool {
        match self.phase {
            GamePhase::Running | GamePhase::Paused => {
                self.phase = GamePhase::Ended;
                true
            }
            GamePhase::Idle | GamePhase::Ended => false,
        }
    }

    /// One countdown step; true when time has run out
    pub fn count_down(&mut self) -> bool {
        self.time_left = self.time_left.saturating_sub(1);
        self.time_left == 0
    }
}

/// Result of comparing a final score with the stored high score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOutcome {
    pub kind: GameKind,
    pub score: u32,
    pub previous_best: u32,
    pub new_high_score: bool,
}

impl ScoreOutcome {
    pub fn new(kind: GameKind, score: u32, previous_best: u32) -> Self {
        Self {
            kind,
            score,
            previous_best,
            new_high_score: score > previous_best,
        }
    }

    /// Outcome shown when the score could not be stored
    pub fn unrecorded(kind: GameKind, score: u32) -> Self {
        Self::new(kind, score, score)
    }

    /// High score after this session
    pub fn best(&self) -> u32 {
        self.score.max(self.previous_best)
    }
}
