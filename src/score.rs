use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::log;
use crate::store::HighScoreStore;
use Difficulty::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    #[cfg(test)]
    pub const ALL: [Difficulty; 4] = [Easy, Medium, Hard, Extreme];

    pub fn tick_interval(self) -> Duration {
        let ms = match self {
            Easy => 180,
            Medium => 130,
            Hard => 80,
            Extreme => 50,
        };
        Duration::from_millis(ms)
    }

    pub fn next(self) -> Difficulty {
        match self {
            Easy => Medium,
            Medium => Hard,
            Hard => Extreme,
            Extreme => Easy,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Easy => "Easy",
            Medium => "Medium",
            Hard => "Hard",
            Extreme => "Extreme",
        };
        f.write_str(name)
    }
}

/// Current score, persisted high score and the selected difficulty.
///
/// Only the game's phase machine decides when `select` is legal; this type
/// just records the choice.
pub struct ScoreBoard {
    score: u32,
    high_score: u32,
    difficulty: Difficulty,
    store: HighScoreStore,
}

impl ScoreBoard {
    /// Reads the stored high score once.
    pub fn new(store: HighScoreStore, difficulty: Difficulty) -> Self {
        let high_score = store.load();
        log!("Loaded high score {}", high_score);
        ScoreBoard { score: 0, high_score, difficulty, store }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn select(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn effective_interval(&self) -> Duration {
        self.difficulty.tick_interval()
    }

    pub fn reset_score(&mut self) {
        self.score = 0;
    }

    pub fn add_point(&mut self) {
        self.score += 1;
    }

    /// Returns true when `score` set a new record. The store is only written
    /// in that case; a failed write keeps the in-memory record.
    pub fn record_death(&mut self, score: u32) -> bool {
        if score <= self.high_score {
            return false;
        }

        self.high_score = score;
        if let Err(e) = self.store.save(score) {
            log!("Could not persist high score {}: {}", score, e);
        }
        true
    }
}
