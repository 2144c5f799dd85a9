//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to enter a name
    NameEntry,
    /// Active gameplay
    Playing,
    /// Run ended, ball left the bottom of the playfield
    GameOver,
}

/// How paddle contact is detected and scored.
///
/// `Simple` re-fires on every frame of overlap, so a slow grazing contact
/// can count several times. It is kept selectable for parity with the
/// original behavior; `Latched` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionPolicy {
    Simple,
    #[default]
    Latched,
}

/// The bouncing ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Velocity in pixels per frame
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BALL_START_X, BALL_START_Y),
            vel: Vec2::new(BALL_BASE_SPEED, -BALL_BASE_SPEED),
            radius: BALL_RADIUS,
        }
    }
}

impl Ball {
    /// Top edge y coordinate
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    /// Bottom edge y coordinate
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// The player's paddle. Only `x` ever changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: PADDLE_START_X,
            y: PADDLE_Y,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }
}

impl Paddle {
    /// Right edge x coordinate
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Complete game state advanced by [`super::step`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Successful catches this run
    pub score: u32,
    /// Scoring latch: false while the ball is still in paddle contact from
    /// the last catch, re-armed once it clears the paddle by a margin
    pub can_score: bool,
    pub policy: CollisionPolicy,
}

impl GameState {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            phase: GamePhase::NameEntry,
            ball: Ball::default(),
            paddle: Paddle::default(),
            score: 0,
            can_score: true,
            policy,
        }
    }

    /// Return ball, paddle, score and latch to their construction-time
    /// values. The collision policy is kept.
    pub fn reset(&mut self) {
        let policy = self.policy;
        *self = Self::new(policy);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(CollisionPolicy::default())
    }
}
