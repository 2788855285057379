use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

pub use card::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use score::*;
pub use snapshot::*;
pub use types::*;

mod card;
mod engine;
mod error;
mod generator;
mod score;
mod snapshot;
mod types;

/// Board sizes a game can be created with, each mapping to a fixed pair
/// count and base score.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Small,
    Large,
}

impl Difficulty {
    pub const fn pair_count(self) -> PairCount {
        match self {
            Self::Small => 3,
            Self::Large => 6,
        }
    }

    pub const fn card_count(self) -> usize {
        pair_to_card_count(self.pair_count())
    }

    pub const fn base_score(self) -> Points {
        match self {
            Self::Small => 300,
            Self::Large => 600,
        }
    }

    /// Minimum number of turns that can complete a game of this size.
    pub const fn perfect_moves(self) -> MoveCount {
        (self.pair_count() as MoveCount) * 2
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Large => "large",
        }
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "large" => Ok(Self::Large),
            _ => Err(GameError::InvalidDifficulty),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
