//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One step per animation frame, no wall-clock time
//! - Stable, single-threaded state mutation
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod step;

pub use collision::{WallHit, ball_paddle_overlap, past_bottom};
pub use state::{Ball, CollisionPolicy, GamePhase, GameState, Paddle};
pub use step::{FrameInput, StepEvents, step};
