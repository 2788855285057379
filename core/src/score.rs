use serde::{Deserialize, Serialize};

use crate::*;

/// Scoring knobs. `time_bonus_threshold` is configured but the formula
/// does not apply it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTable {
    pub min_score: Points,
    pub move_penalty: Points,
    pub time_bonus_threshold: u32,
}

impl ScoreTable {
    pub const DEFAULT: ScoreTable = ScoreTable {
        min_score: 50,
        move_penalty: 10,
        time_bonus_threshold: 120,
    };

    /// Base points minus a penalty per move beyond the perfect count,
    /// floored at `min_score`.
    pub fn score(self, difficulty: Difficulty, moves: MoveCount) -> Points {
        let extra = moves.saturating_sub(difficulty.perfect_moves());
        difficulty
            .base_score()
            .saturating_sub(extra.saturating_mul(self.move_penalty))
            .max(self.min_score)
    }
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Summary of a completed game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinalStats {
    pub score: Points,
    pub moves: MoveCount,
    pub elapsed_secs: u32,
    pub pair_count: PairCount,
    pub difficulty: Difficulty,
    /// Perfect moves over actual moves, as a percentage.
    pub efficiency: f32,
    pub avg_secs_per_pair: f32,
}

impl FinalStats {
    /// Elapsed time the way the UI shows it, `N min SS sec` or `N sec`.
    pub fn formatted_time(&self) -> String {
        let minutes = self.elapsed_secs / 60;
        let seconds = self.elapsed_secs % 60;
        if minutes > 0 {
            format!("{} min {:02} sec", minutes, seconds)
        } else {
            format!("{} sec", seconds)
        }
    }
}
