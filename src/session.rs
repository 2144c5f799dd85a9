//! Session controller
//!
//! Sequences the NameEntry → Playing → GameOver → reset cycle and owns the
//! single point where the leaderboard is written. UI code never touches
//! score or leaderboard state directly.

use crate::Leaderboard;
use crate::consts::MAX_NAME_LEN;
use crate::sim::{self, FrameInput, GamePhase, GameState, StepEvents};

/// One player session: game state plus the surrounding bookkeeping
#[derive(Debug, Clone)]
pub struct Session {
    pub state: GameState,
    pub leaderboard: Leaderboard,
    player_name: String,
    /// Set once the terminal handler has written the leaderboard this run
    saved: bool,
}

impl Session {
    pub fn new(leaderboard: Leaderboard) -> Self {
        Self {
            state: GameState::default(),
            leaderboard,
            player_name: String::new(),
            saved: false,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Accept a name and start playing. An empty trimmed name blocks the
    /// transition and leaves the phase untouched.
    pub fn submit_name(&mut self, name: &str) -> bool {
        if self.state.phase != GamePhase::NameEntry {
            return false;
        }
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.player_name = trimmed.chars().take(MAX_NAME_LEN).collect();
        self.state.phase = GamePhase::Playing;
        log::info!("Starting run for {}", self.player_name);
        true
    }

    /// Advance one frame. On the Playing → GameOver edge, write the
    /// leaderboard exactly once (only if the run scored and a name exists).
    pub fn frame(&mut self, input: &FrameInput, now_ms: f64) -> StepEvents {
        let events = sim::step(&mut self.state, input);

        if events.game_over {
            self.finish_run(now_ms);
        }

        events
    }

    fn finish_run(&mut self, now_ms: f64) {
        if self.saved {
            return;
        }
        self.saved = true;

        let score = self.state.score;
        if score == 0 || self.player_name.is_empty() {
            return;
        }

        if let Some(rank) = self.leaderboard.add_entry(&self.player_name, score, now_ms) {
            log::info!("Run ended: {score} catches, rank {rank}");
            self.leaderboard.save();
        }
    }

    /// Back to name entry with a fresh ball, paddle and score
    pub fn reset(&mut self) {
        self.state.reset();
        self.saved = false;
    }
}
