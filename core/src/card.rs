use core::fmt;

use crate::*;

/// Face designs a card may carry. Two cards with the same face form a pair.
pub const FACE_IMAGES: [&str; 12] = [
    "roi-david.svg",
    "dame-pallas.svg",
    "valet-ogier.svg",
    "roi-charles.svg",
    "dame-judith.svg",
    "valet-lahire.svg",
    "roi-césar.svg",
    "dame-rachel.svg",
    "valet-hector.svg",
    "roi-alexandre.svg",
    "dame-argine.svg",
    "valet-lancelot.svg",
];

/// A whitelisted face design.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FaceImage(&'static str);

impl FaceImage {
    /// Match `raw` against the whitelist, falling back to the first entry.
    pub fn sanitize(raw: &str) -> FaceImage {
        let name = raw.trim();
        match FACE_IMAGES.iter().find(|&&face| face == name) {
            Some(&face) => FaceImage(face),
            None => {
                log::warn!(
                    "Unknown face image {:?}, falling back to {:?}",
                    raw,
                    FACE_IMAGES[0]
                );
                FaceImage(FACE_IMAGES[0])
            }
        }
    }

    /// First `pairs` faces of the whitelist, clamped to what exists.
    pub fn for_game(pairs: PairCount) -> impl Iterator<Item = FaceImage> {
        let mut count = pairs as usize;
        if count > FACE_IMAGES.len() {
            log::warn!(
                "Requested {} pairs but only {} faces exist",
                count,
                FACE_IMAGES.len()
            );
            count = FACE_IMAGES.len();
        }
        FACE_IMAGES[..count].iter().map(|&name| FaceImage(name))
    }

    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FaceImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// One physical card: immutable identity, mutable face-up/matched state.
///
/// A matched card is always shown and can never be re-hidden or re-flipped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Card {
    id: CardId,
    image: FaceImage,
    revealed: bool,
    matched: bool,
}

impl Card {
    /// Build a face-down card. The id must fit the deck range; the image is
    /// sanitized against the whitelist.
    pub fn new(id: i64, image: &str) -> Result<Card> {
        let id = CardId::try_from(id).map_err(|_| GameError::InvalidId)?;
        Ok(Self::new_unchecked(id, FaceImage::sanitize(image)))
    }

    pub(crate) const fn new_unchecked(id: CardId, image: FaceImage) -> Card {
        Card {
            id,
            image,
            revealed: false,
            matched: false,
        }
    }

    /// Rebuild a card from persisted state.
    pub fn restore(id: i64, image: &str, revealed: bool, matched: bool) -> Result<Card> {
        let mut card = Card::new(id, image)?;
        card.matched = matched;
        card.revealed = revealed || matched;
        Ok(card)
    }

    pub const fn id(self) -> CardId {
        self.id
    }

    pub const fn image(self) -> FaceImage {
        self.image
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_matched(self) -> bool {
        self.matched
    }

    /// Whether a player-initiated flip may target this card.
    pub const fn is_flippable(self) -> bool {
        !self.matched && !self.revealed
    }

    /// Turn face-up. Matched cards are inert, not an error.
    pub fn reveal(&mut self) -> bool {
        if self.matched {
            return false;
        }
        self.revealed = true;
        true
    }

    /// Turn face-down. Matched cards are inert, not an error.
    pub fn conceal(&mut self) -> bool {
        if self.matched {
            return false;
        }
        self.revealed = false;
        true
    }

    /// Permanently resolve this card as part of a found pair.
    pub fn mark_matched(&mut self) {
        self.matched = true;
        self.revealed = true;
    }

    pub fn matches(self, other: Card) -> bool {
        self.image == other.image
    }
}
