use crate::*;
pub use random::*;

mod random;

/// Builds the shuffled deck a new game starts from.
pub trait DeckGenerator {
    fn generate(self, difficulty: Difficulty) -> Vec<Card>;
}
