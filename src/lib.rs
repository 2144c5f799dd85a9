//! Catch Ball - a browser arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `session`: Phase sequencing and leaderboard hand-off
//! - `leaderboard`: Persisted top-10 scores
//! - `assets`/`audio`/`render`: Browser I/O (images, sound, canvas 2D)

pub mod assets;
pub mod audio;
pub mod leaderboard;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;

pub use leaderboard::Leaderboard;
pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical canvas size in pixels
    pub const CANVAS_WIDTH: f32 = 330.0;
    pub const CANVAS_HEIGHT: f32 = 580.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 28.0;
    pub const BALL_START_X: f32 = 165.0;
    pub const BALL_START_Y: f32 = 280.0;
    /// Base speed per axis (pixels per frame)
    pub const BALL_BASE_SPEED: f32 = 2.5;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 90.0;
    pub const PADDLE_HEIGHT: f32 = 18.0;
    pub const PADDLE_Y: f32 = 540.0;
    pub const PADDLE_START_X: f32 = 115.0;
    /// Pixels moved per frame while an arrow key is held
    pub const PADDLE_KEY_STEP: f32 = 6.0;

    /// Speed gain per point of score (1% per catch)
    pub const SPEED_GAIN_PER_POINT: f32 = 0.01;
    /// Clearance above the paddle top before scoring re-arms
    pub const RESCORE_MARGIN: f32 = 10.0;

    /// The ball image rotates every this many points
    pub const IMAGE_CYCLE_POINTS: u32 = 10;
    /// Maximum player name length accepted from the entry form
    pub const MAX_NAME_LEN: usize = 20;
}

/// Clamp a paddle x position to the playfield
#[inline]
pub fn clamp_paddle_x(x: f32) -> f32 {
    x.clamp(0.0, consts::CANVAS_WIDTH - consts::PADDLE_WIDTH)
}
