//! Local leaderboard
//!
//! Persisted to LocalStorage as one JSON blob, tracks the top 10 runs.

use serde::{Deserialize, Serialize};

/// Maximum number of entries to keep
pub const MAX_ENTRIES: usize = 10;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player name, trimmed by the entry form
    pub name: String,
    /// Catches achieved that run
    pub score: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Score-descending, size-capped leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "ball-game-rankings";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Insert a run in descending-score order (ties rank below existing
    /// entries) and trim to the cap. Returns the 1-indexed rank achieved,
    /// or None if the score didn't qualify.
    pub fn add_entry(&mut self, name: &str, score: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = LeaderboardEntry {
            name: name.to_string(),
            score,
            timestamp,
        };

        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_ENTRIES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load the leaderboard from LocalStorage (WASM only). Missing key,
    /// malformed payload and unavailable storage all yield an empty board.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<Leaderboard>(&json) {
                    Ok(board) => {
                        log::info!("Loaded {} leaderboard entries", board.entries.len());
                        return board;
                    }
                    Err(err) => {
                        log::warn!("Discarding malformed leaderboard: {err}");
                    }
                }
            }
        }

        log::info!("No leaderboard found, starting fresh");
        Self::new()
    }

    /// Save the leaderboard to LocalStorage (WASM only). Failures are
    /// logged and otherwise ignored.
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::warn!("LocalStorage unavailable, leaderboard not saved");
            return;
        };

        if let Ok(json) = serde_json::to_string(self) {
            if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                log::warn!("Failed to write leaderboard");
            } else {
                log::info!("Leaderboard saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(scores: &[(&str, u32)]) -> Leaderboard {
        let mut board = Leaderboard::new();
        for (i, (name, score)) in scores.iter().enumerate() {
            board.add_entry(name, *score, i as f64);
        }
        board
    }

    #[test]
    fn inserts_in_descending_order() {
        let mut board = board_with(&[("A", 50), ("B", 30)]);
        let rank = board.add_entry("C", 40, 0.0);

        assert_eq!(rank, Some(2));
        let order: Vec<_> = board
            .entries
            .iter()
            .map(|e| (e.name.as_str(), e.score))
            .collect();
        assert_eq!(order, vec![("A", 50), ("C", 40), ("B", 30)]);
    }

    #[test]
    fn ties_rank_below_existing_entries() {
        let mut board = board_with(&[("A", 40)]);
        let rank = board.add_entry("B", 40, 0.0);
        assert_eq!(rank, Some(2));
        assert_eq!(board.entries[0].name, "A");
    }

    #[test]
    fn truncates_to_cap() {
        let mut board = Leaderboard::new();
        for i in 0..MAX_ENTRIES as u32 {
            board.add_entry("p", 100 - i, 0.0);
        }
        assert_eq!(board.entries.len(), MAX_ENTRIES);

        // Beats the lowest entry: inserted, tail trimmed
        assert_eq!(board.add_entry("q", 95, 0.0), Some(7));
        assert_eq!(board.entries.len(), MAX_ENTRIES);

        // Doesn't beat the (new) lowest entry: rejected
        assert_eq!(board.add_entry("r", 91, 0.0), None);
    }

    #[test]
    fn zero_score_never_qualifies() {
        let mut board = Leaderboard::new();
        assert!(!board.qualifies(0));
        assert_eq!(board.add_entry("A", 0, 0.0), None);
        assert!(board.is_empty());
    }

    #[test]
    fn json_round_trip() {
        let board = board_with(&[("A", 50), ("B", 30)]);
        let json = serde_json::to_string(&board).unwrap();
        let restored: Leaderboard = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.entries, board.entries);
    }
}
