//! Dodge the blocks
//!
//! Blocks spawn at the top and fall on a 20ms tick. A block that leaves the
//! bottom scores a point; a block that touches the player ends the run.
//! The session lasts 30 seconds.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{Rect, max_offset, measured};
use super::session::{EndReason, GameEvent, GamePhase, GameSession};
use super::timer::{Interval, advance_armed, next_deadline};
use crate::consts::*;
use crate::settings::Difficulty;

/// Geometry and timing for one dodge game
#[derive(Debug, Clone, PartialEq)]
pub struct DodgeConfig {
    pub arena: Vec2,
    pub player_size: Vec2,
    pub obstacle_size: Vec2,
    /// Horizontal distance per key press
    pub move_step: f32,
    pub duration_secs: u32,
    pub fall_tick_ms: u32,
    pub countdown_ms: u32,
}

impl Default for DodgeConfig {
    fn default() -> Self {
        Self {
            arena: Vec2::new(DODGE_ARENA_WIDTH, DODGE_ARENA_HEIGHT),
            player_size: Vec2::new(DODGE_PLAYER_WIDTH, DODGE_PLAYER_HEIGHT),
            obstacle_size: Vec2::splat(DODGE_OBSTACLE_SIZE),
            move_step: DODGE_MOVE_STEP,
            duration_secs: SESSION_SECS,
            fall_tick_ms: DODGE_FALL_TICK_MS,
            countdown_ms: COUNTDOWN_MS,
        }
    }
}

impl DodgeConfig {
    /// Use measured play-area bounds; unusable measurements keep the default
    pub fn with_arena(mut self, width: f32, height: f32) -> Self {
        if let Some(arena) = measured(width, height) {
            self.arena = arena;
        }
        self
    }

    pub fn with_player_size(mut self, width: f32, height: f32) -> Self {
        if let Some(size) = measured(width, height) {
            self.player_size = size;
        }
        self
    }
}

/// A falling block
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
    fall: Option<Interval>,
}

impl Obstacle {
    pub fn is_falling(&self) -> bool {
        self.fall.is_some()
    }
}

pub struct DodgeGame {
    config: DodgeConfig,
    /// Selected difficulty, applied at the next start
    difficulty: Difficulty,
    /// Pixels per fall tick for the current session
    fall_speed: f32,
    session: GameSession,
    player: Rect,
    /// Sorted by id (spawn order)
    obstacles: Vec<Obstacle>,
    spawn: Option<Interval>,
    countdown: Option<Interval>,
    rng: Pcg32,
    next_id: u32,
}

impl DodgeGame {
    pub fn new(config: DodgeConfig, difficulty: Difficulty, seed: u64) -> Self {
        let player = Rect {
            pos: Vec2::ZERO,
            size: config.player_size,
        };
        let mut game = Self {
            session: GameSession::new(config.duration_secs),
            fall_speed: difficulty.fall_speed(),
            config,
            difficulty,
            player,
            obstacles: Vec::new(),
            spawn: None,
            countdown: None,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        game.center_player();
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

    pub fn player(&self) -> &Rect {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn fall_speed(&self) -> f32 {
        self.fall_speed
    }

    /// Choose the difficulty for the next start
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Start (or restart): clear the field, center the player, apply difficulty
    pub fn start(&mut self) {
        self.cancel_timers();
        self.session.begin(self.config.duration_secs);
        self.obstacles.clear();
        self.center_player();
        self.fall_speed = self.difficulty.fall_speed();
        self.spawn = Some(Interval::new(self.difficulty.spawn_interval_ms()));
        self.countdown = Some(Interval::new(self.config.countdown_ms));
        log::info!(
            "Dodge game started on {} (speed {}, spawn every {}ms)",
            self.difficulty.as_str(),
            self.fall_speed,
            self.difficulty.spawn_interval_ms()
        );
    }

    /// Suspend spawning, falling and the countdown; positions are kept
    pub fn pause(&mut self) -> bool {
        if self.session.pause() {
            self.cancel_timers();
            log::info!("Dodge game paused at {}s", self.session.time_left);
            true
        } else {
            false
        }
    }

    /// Re-arm every timer from a fresh period
    pub fn resume(&mut self) -> bool {
        if !self.session.resume() {
            return false;
        }
        self.spawn = Some(Interval::new(self.difficulty.spawn_interval_ms()));
        self.countdown = Some(Interval::new(self.config.countdown_ms));
        let fall_tick = self.config.fall_tick_ms;
        for obstacle in &mut self.obstacles {
            obstacle.fall = Some(Interval::new(fall_tick));
        }
        log::info!("Dodge game resumed");
        true
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

    pub fn move_left(&mut self) -> bool {
        self.move_player(-self.config.move_step)
    }

    pub fn move_right(&mut self) -> bool {
        self.move_player(self.config.move_step)
    }

    /// Run the clock forward by `dt_ms`
    pub fn advance(&mut self, dt_ms: u32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let mut budget = dt_ms;
        while budget > 0 && self.session.is_running() {
            let Some(deadline) = self.next_deadline() else {
                break;
            };
            let step = deadline.min(budget);
            self.step(step, &mut events);
            budget -= step;
        }
        events
    }

    fn next_deadline(&self) -> Option<u32> {
        let falls = self.obstacles.iter().map(|o| &o.fall);
        next_deadline(falls.chain([&self.spawn, &self.countdown]))
    }

    fn step(&mut self, step_ms: u32, events: &mut Vec<GameEvent>) {
        let mut falling = Vec::new();
        for obstacle in &mut self.obstacles {
            if advance_armed(&mut obstacle.fall, step_ms) {
                falling.push(obstacle.id);
            }
        }
        let spawn_due = advance_armed(&mut self.spawn, step_ms);
        let countdown_due = advance_armed(&mut self.countdown, step_ms);

        for id in falling {
            if !self.session.is_running() {
                return;
            }
            self.fall(id, events);
        }
        if spawn_due && self.session.is_running() {
            self.spawn_obstacle(events);
        }
        if countdown_due && self.session.is_running() {
            let out_of_time = self.session.count_down();
            events.push(GameEvent::Countdown {
                time_left: self.session.time_left,
            });
            if out_of_time {
                self.finish(EndReason::TimeUp, events);
            }
        }
    }

    /// One fall tick: move, then collide, then leave through the bottom
    fn fall(&mut self, id: u32, events: &mut Vec<GameEvent>) {
        let Some(idx) = self.obstacles.iter().position(|o| o.id == id) else {
            return;
        };
        let obstacle = &mut self.obstacles[idx];
        obstacle.rect.pos.y += self.fall_speed;

        if obstacle.rect.overlaps(&self.player) {
            self.finish(EndReason::Collision { obstacle: id }, events);
            return;
        }

        if obstacle.rect.top() > self.config.arena.y {
            self.obstacles.remove(idx);
            self.session.score += 1;
            events.push(GameEvent::ObstacleDodged { id });
        }
    }

    fn spawn_obstacle(&mut self, events: &mut Vec<GameEvent>) {
        let id = self.next_id;
        self.next_id += 1;
        let max_x = max_offset(self.config.arena, self.config.obstacle_size).x;
        let x = self.rng.random::<f32>() * max_x;
        self.obstacles.push(Obstacle {
            id,
            rect: Rect {
                pos: Vec2::new(x, 0.0),
                size: self.config.obstacle_size,
            },
            fall: Some(Interval::new(self.config.fall_tick_ms)),
        });
        log::debug!("Spawned block {} at x={:.0}", id, x);
        events.push(GameEvent::ObstacleSpawned { id });
    }

    fn move_player(&mut self, dx: f32) -> bool {
        if !self.session.is_running() {
            return false;
        }
        let max_x = max_offset(self.config.arena, self.player.size).x;
        self.player.pos.x = (self.player.pos.x + dx).clamp(0.0, max_x);
        true
    }

    /// Centered horizontally, resting on the bottom edge
    fn center_player(&mut self) {
        let arena = self.config.arena;
        let size = self.player.size;
        self.player.pos = Vec2::new(arena.x / 2.0 - size.x / 2.0, (arena.y - size.y).max(0.0));
    }

    fn cancel_timers(&mut self) {
        self.spawn = None;
        self.countdown = None;
        for obstacle in &mut self.obstacles {
            obstacle.fall = None;
        }
    }

    fn finish(&mut self, reason: EndReason, events: &mut Vec<GameEvent>) {
        if self.session.end() {
            self.cancel_timers();
            events.push(GameEvent::Ended(reason));
            log::info!("Dodge game over ({:?}), score {}", reason, self.session.score);
        }
    }
}
