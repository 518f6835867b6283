//! Catch the ball
//!
//! A target jumps to a random spot once per second; every click on it scores.
//! The session lasts 30 seconds.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{Rect, max_offset, measured};
use super::session::{EndReason, GameEvent, GamePhase, GameSession};
use super::timer::{Interval, advance_armed, next_deadline};
use crate::consts::*;

/// Geometry and timing for one ball game
#[derive(Debug, Clone, PartialEq)]
pub struct BallConfig {
    pub arena: Vec2,
    pub target_size: Vec2,
    pub duration_secs: u32,
    pub move_ms: u32,
    pub countdown_ms: u32,
    pub flash_ms: u32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            arena: Vec2::new(BALL_ARENA_WIDTH, BALL_ARENA_HEIGHT),
            target_size: Vec2::splat(BALL_TARGET_SIZE),
            duration_secs: SESSION_SECS,
            move_ms: BALL_MOVE_MS,
            countdown_ms: COUNTDOWN_MS,
            flash_ms: BALL_FLASH_MS,
        }
    }
}

impl BallConfig {
    /// Use measured play-area bounds; unusable measurements keep the default
    pub fn with_arena(mut self, width: f32, height: f32) -> Self {
        if let Some(arena) = measured(width, height) {
            self.arena = arena;
        }
        self
    }

    pub fn with_target_size(mut self, width: f32, height: f32) -> Self {
        if let Some(size) = measured(width, height) {
            self.target_size = size;
        }
        self
    }
}

pub struct BallGame {
    config: BallConfig,
    session: GameSession,
    target: Rect,
    rng: Pcg32,
    move_timer: Option<Interval>,
    countdown: Option<Interval>,
    flash: Option<Interval>,
}

impl BallGame {
    pub fn new(config: BallConfig, seed: u64) -> Self {
        let target = Rect {
            pos: Vec2::ZERO,
            size: config.target_size,
        };
        let mut game = Self {
            session: GameSession::new(config.duration_secs),
            config,
            target,
            rng: Pcg32::seed_from_u64(seed),
            move_timer: None,
            countdown: None,
            flash: None,
        };
        game.relocate_target();
        game
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn time_left(&self) -> u32 {
        self.session.time_left
    }

    pub fn target(&self) -> &Rect {
        &self.target
    }

    /// Hit feedback is showing
    pub fn is_flashing(&self) -> bool {
        self.flash.is_some()
    }

    /// Start (or restart) with zero score and a full clock
    pub fn start(&mut self) {
        self.cancel_timers();
        self.session.begin(self.config.duration_secs);
        self.arm_timers();
        log::info!("Ball game started ({}s)", self.config.duration_secs);
    }

    pub fn pause(&mut self) -> bool {
        if self.session.pause() {
            self.cancel_timers();
            log::info!("Ball game paused at {}s", self.session.time_left);
            true
        } else {
            false
        }
    }

    /// Resume with fresh move and countdown timers; score and time are kept
    pub fn resume(&mut self) -> bool {
        if self.session.resume() {
            self.arm_timers();
            log::info!("Ball game resumed");
            true
        } else {
            false
        }
    }

    /// Returns whether the game is now paused
    pub fn toggle_pause(&mut self) -> bool {
        if self.session.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
        self.session.is_paused()
    }

    /// Player clicked the target
    pub fn hit(&mut self) -> Option<GameEvent> {
        if !self.session.is_running() {
            return None;
        }
        self.session.score += 1;
        self.flash = Some(Interval::new(self.config.flash_ms));
        Some(GameEvent::TargetHit)
    }

    /// Run the clock forward by `dt_ms`
    pub fn advance(&mut self, dt_ms: u32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let mut budget = dt_ms;
        while budget > 0 && self.session.is_running() {
            let timers = [self.flash, self.move_timer, self.countdown];
            let Some(deadline) = next_deadline(&timers) else {
                break;
            };
            let step = deadline.min(budget);
            self.step(step, &mut events);
            budget -= step;
        }
        events
    }

    fn step(&mut self, step_ms: u32, events: &mut Vec<GameEvent>) {
        let flash_due = advance_armed(&mut self.flash, step_ms);
        let move_due = advance_armed(&mut self.move_timer, step_ms);
        let countdown_due = advance_armed(&mut self.countdown, step_ms);

        if flash_due {
            self.flash = None;
            events.push(GameEvent::FlashEnded);
        }
        if move_due {
            self.relocate_target();
            events.push(GameEvent::TargetMoved);
        }
        if countdown_due {
            let out_of_time = self.session.count_down();
            events.push(GameEvent::Countdown {
                time_left: self.session.time_left,
            });
            if out_of_time {
                self.finish(events);
            }
        }
    }

    /// Uniform position with the whole target inside the arena
    fn relocate_target(&mut self) {
        let max = max_offset(self.config.arena, self.target.size);
        self.target.pos = Vec2::new(
            self.rng.random::<f32>() * max.x,
            self.rng.random::<f32>() * max.y,
        );
    }

    fn arm_timers(&mut self) {
        self.move_timer = Some(Interval::new(self.config.move_ms));
        self.countdown = Some(Interval::new(self.config.countdown_ms));
    }

    fn cancel_timers(&mut self) {
        self.move_timer = None;
        self.countdown = None;
        self.flash = None;
    }

    fn finish(&mut self, events: &mut Vec<GameEvent>) {
        if self.session.end() {
            self.cancel_timers();
            events.push(GameEvent::Ended(EndReason::TimeUp));
            log::info!("Ball game over, score {}", self.session.score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_game() -> BallGame {
        let mut game = BallGame::new(BallConfig::default(), 7);
        game.start();
        game
    }

    #[test]
    fn test_idle_until_started() {
        let mut game = BallGame::new(BallConfig::default(), 7);
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.hit(), None);
        assert!(game.advance(5000).is_empty());
        assert_eq!(game.time_left(), SESSION_SECS);
    }

    #[test]
    fn test_target_stays_inside_arena() {
        let mut game = running_game();
        for _ in 0..200 {
            game.advance(1000);
            game.start();
            let t = *game.target();
            assert!(t.left() >= 0.0 && t.top() >= 0.0);
            assert!(t.right() <= BALL_ARENA_WIDTH);
            assert!(t.bottom() <= BALL_ARENA_HEIGHT);
        }
    }

    #[test]
    fn test_target_moves_every_second() {
        let mut game = running_game();
        let events = game.advance(3000);
        let moves = events
            .iter()
            .filter(|e| **e == GameEvent::TargetMoved)
            .count();
        assert_eq!(moves, 3);
        assert_eq!(game.time_left(), SESSION_SECS - 3);
    }

    #[test]
    fn test_hit_scores_and_flashes() {
        let mut game = running_game();
        assert_eq!(game.hit(), Some(GameEvent::TargetHit));
        assert_eq!(game.score(), 1);
        assert!(game.is_flashing());

        let events = game.advance(199);
        assert!(events.is_empty());
        assert!(game.is_flashing());
        let events = game.advance(1);
        assert_eq!(events, vec![GameEvent::FlashEnded]);
        assert!(!game.is_flashing());
    }

    #[test]
    fn test_time_up_ends_session() {
        let mut game = running_game();
        game.hit();
        game.hit();
        let events = game.advance(60_000);
        assert_eq!(events.last(), Some(&GameEvent::Ended(EndReason::TimeUp)));
        assert_eq!(game.phase(), GamePhase::Ended);
        assert_eq!(game.time_left(), 0);
        assert_eq!(game.score(), 2);
        // Nothing fires after the end
        assert!(game.advance(10_000).is_empty());
        assert_eq!(game.hit(), None);
    }

    #[test]
    fn test_pause_freezes_and_resume_restarts_timers() {
        let mut game = running_game();
        game.hit();
        game.advance(1500);
        assert_eq!(game.time_left(), SESSION_SECS - 1);

        assert!(game.toggle_pause());
        assert!(!game.is_flashing());
        let pos = game.target().pos;
        assert!(game.advance(10_000).is_empty());
        assert_eq!(game.hit(), None);
        assert_eq!(game.target().pos, pos);

        assert!(!game.toggle_pause());
        assert_eq!(game.score(), 1);
        assert_eq!(game.time_left(), SESSION_SECS - 1);
        // The half-second spent before pausing is forgotten
        game.advance(999);
        assert_eq!(game.time_left(), SESSION_SECS - 1);
        game.advance(1);
        assert_eq!(game.time_left(), SESSION_SECS - 2);
    }

    #[test]
    fn test_restart_resets_score_and_clock() {
        let mut game = running_game();
        game.hit();
        game.advance(5000);
        game.start();
        assert_eq!(game.score(), 0);
        assert_eq!(game.time_left(), SESSION_SECS);
        assert!(game.session().is_running());
    }

    #[test]
    fn test_bad_bounds_fall_back_to_defaults() {
        let config = BallConfig::default()
            .with_arena(0.0, -5.0)
            .with_target_size(30.0, 30.0);
        assert_eq!(config.arena, Vec2::new(BALL_ARENA_WIDTH, BALL_ARENA_HEIGHT));
        assert_eq!(config.target_size, Vec2::splat(30.0));
    }
}
