/// Identifier of a single card, unique within one deck.
pub type CardId = u16;

/// Validated position of a card in the deck.
pub type Slot = usize;

/// Raw caller-supplied position, may be negative or out of range.
pub type RawSlot = i64;

/// Count of pairs within one game.
pub type PairCount = u8;

/// Count of completed two-card turns.
pub type MoveCount = u32;

/// External player identifier, opaque to the engine.
pub type PlayerId = i64;

/// Points as computed by the scoring rules.
pub type Points = u32;

pub const fn pair_to_card_count(pairs: PairCount) -> usize {
    (pairs as usize) * 2
}
