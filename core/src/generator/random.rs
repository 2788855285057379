use crate::*;

/// Purely random deck order from a caller-supplied seed, so tests can pin
/// the permutation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomDeckGenerator {
    seed: u64,
}

impl RandomDeckGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from ambient entropy, for callers that do not carry one.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(self, difficulty: Difficulty) -> Vec<Card> {
        use rand::prelude::*;

        let mut deck = Vec::with_capacity(difficulty.card_count());
        let mut id: CardId = 0;
        for face in FaceImage::for_game(difficulty.pair_count()) {
            deck.push(Card::new_unchecked(id, face));
            deck.push(Card::new_unchecked(id + 1, face));
            id += 2;
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        deck.shuffle(&mut rng);
        deck
    }
}
