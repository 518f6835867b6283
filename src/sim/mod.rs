//! Deterministic game engines
//!
//! All gameplay logic lives here. Engines are pure state machines:
//! - Time only advances through `advance(dt_ms)`
//! - Seeded RNG only
//! - Timers are owned values; cancelling a timer is dropping it
//! - No DOM or storage dependencies

pub mod ball;
pub mod collision;
pub mod dodge;
pub mod session;
pub mod timer;

pub use ball::{BallConfig, BallGame};
pub use collision::Rect;
pub use dodge::{DodgeConfig, DodgeGame, Obstacle};
pub use session::{EndReason, GameEvent, GameKind, GamePhase, GameSession, ScoreOutcome};
pub use timer::Interval;
