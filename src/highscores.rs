//! High score leaderboard
//!
//! A bounded table kept sorted by descending score. Persisted by
//! [`crate::persistence::ScoreStore`].

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;
/// Longest accepted player name
pub const MAX_NAME_LEN: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<ScoreEntry>,
    /// Fixed by the game, never taken from a file
    #[serde(skip, default = "default_capacity")]
    capacity: usize,
}

fn default_capacity() -> usize {
    MAX_HIGH_SCORES
}

impl Default for HighScores {
    fn default() -> Self {
        Self::new()
    }
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::with_capacity(MAX_HIGH_SCORES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "leaderboard needs room for at least one entry");
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if a score would make it onto the board
    pub fn qualifies(&self, score: u32) -> bool {
        if self.entries.len() < self.capacity {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a score, keeping the table sorted and bounded.
    /// Equal scores rank below the ones already present.
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn add_score(&mut self, name: &str, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = ScoreEntry {
            name: name.chars().take(MAX_NAME_LEN).collect(),
            score,
        };

        // Find insertion point (sorted descending by score)
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

        // Lowest entry falls off
        self.entries.truncate(self.capacity);

        Some(rank)
    }

    /// Repair a table read from disk: sort, clamp names, drop the overflow
    pub fn normalize(&mut self) {
        self.capacity = self.capacity.clamp(1, MAX_HIGH_SCORES);
        for e in &mut self.entries {
            if e.name.chars().count() > MAX_NAME_LEN {
                e.name = e.name.chars().take(MAX_NAME_LEN).collect();
            }
        }
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(self.capacity);
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}
