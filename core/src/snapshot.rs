use serde::{Deserialize, Serialize};

use crate::*;

/// Persisted state of a single card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub id: i64,
    pub image: String,
    pub revealed: bool,
    pub matched: bool,
}

/// Complete serialized state of a game, the contract exchanged with session
/// storage between requests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub difficulty: Difficulty,
    pub owner_id: Option<PlayerId>,
    pub cards: Vec<CardSnapshot>,
    pub revealed_slots: Vec<Slot>,
    pub found_pairs: PairCount,
    pub moves: MoveCount,
    pub started_at: i64,
    pub completed: bool,
}

impl GameSnapshot {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|err| {
            log::warn!("Failed to serialize game snapshot: {err}");
            GameError::InvalidSnapshot("serialization failed")
        })
    }

    pub fn from_json(raw: &str) -> Result<GameSnapshot> {
        serde_json::from_str(raw).map_err(|err| {
            log::warn!("Rejected malformed game snapshot: {err}");
            GameError::InvalidSnapshot("missing or malformed fields")
        })
    }

    /// Structural checks beyond what the types enforce.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.cards.is_empty() {
            return Err(GameError::InvalidSnapshot("empty card list"));
        }
        if self.cards.len() != self.difficulty.card_count() {
            return Err(GameError::InvalidSnapshot(
                "deck size does not match difficulty",
            ));
        }
        if self.started_at <= 0 {
            return Err(GameError::InvalidSnapshot("start timestamp must be positive"));
        }
        if matches!(self.owner_id, Some(id) if id <= 0) {
            return Err(GameError::InvalidSnapshot("owner id must be positive"));
        }
        if self.revealed_slots.len() > 2 {
            return Err(GameError::InvalidSnapshot("more than two pending slots"));
        }
        if self
            .revealed_slots
            .iter()
            .any(|&slot| slot >= self.cards.len())
        {
            return Err(GameError::InvalidSnapshot("pending slot outside the deck"));
        }
        if self.found_pairs > self.difficulty.pair_count() {
            return Err(GameError::InvalidSnapshot("found pairs exceed the pair count"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GameSnapshot {
        Game::new(
            Difficulty::Small,
            Some(3),
            RandomDeckGenerator::new(21),
        )
        .unwrap()
        .to_snapshot()
    }

    #[test]
    fn json_round_trip() {
        let snapshot = sample();
        let json = snapshot.to_json().unwrap();
        assert_eq!(GameSnapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn json_uses_the_session_field_names() {
        let json = sample().to_json().unwrap();
        for key in [
            "\"difficulty\"",
            "\"ownerId\"",
            "\"cards\"",
            "\"revealedSlots\"",
            "\"foundPairs\"",
            "\"moves\"",
            "\"startedAt\"",
            "\"completed\"",
        ] {
            assert!(json.contains(key), "missing {key} in {json}");
        }
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert_eq!(
            GameSnapshot::from_json("{not json").unwrap_err(),
            GameError::InvalidSnapshot("missing or malformed fields")
        );
        assert_eq!(
            GameSnapshot::from_json("{}").unwrap_err(),
            GameError::InvalidSnapshot("missing or malformed fields")
        );
    }

    #[test]
    fn truncated_snapshot_is_rejected() {
        let json = sample().to_json().unwrap().replace("\"moves\":0", "\"moves\":-1");
        assert!(GameSnapshot::from_json(&json).is_err());
    }

    #[test]
    fn empty_deck_is_rejected() {
        let mut snapshot = sample();
        snapshot.cards.clear();
        assert_eq!(
            Game::from_snapshot(snapshot).unwrap_err(),
            GameError::InvalidSnapshot("empty card list")
        );
    }

    #[test]
    fn deck_size_must_match_difficulty() {
        let mut snapshot = sample();
        snapshot.cards.pop();
        assert_eq!(
            Game::from_snapshot(snapshot).unwrap_err(),
            GameError::InvalidSnapshot("deck size does not match difficulty")
        );
    }

    #[test]
    fn start_timestamp_must_be_positive() {
        let mut snapshot = sample();
        snapshot.started_at = 0;
        assert_eq!(
            Game::from_snapshot(snapshot).unwrap_err(),
            GameError::InvalidSnapshot("start timestamp must be positive")
        );
    }

    #[test]
    fn pending_slots_are_bounded_and_in_range() {
        let mut snapshot = sample();
        snapshot.revealed_slots = vec![0, 1, 2];
        assert_eq!(
            Game::from_snapshot(snapshot).unwrap_err(),
            GameError::InvalidSnapshot("more than two pending slots")
        );

        let mut snapshot = sample();
        snapshot.revealed_slots = vec![99];
        assert_eq!(
            Game::from_snapshot(snapshot).unwrap_err(),
            GameError::InvalidSnapshot("pending slot outside the deck")
        );
    }

    #[test]
    fn found_pairs_cannot_exceed_the_pair_count() {
        let mut snapshot = sample();
        snapshot.found_pairs = 4;
        assert_eq!(
            Game::from_snapshot(snapshot).unwrap_err(),
            GameError::InvalidSnapshot("found pairs exceed the pair count")
        );
    }

    #[test]
    fn negative_card_id_is_rejected() {
        let mut snapshot = sample();
        snapshot.cards[0].id = -7;
        assert_eq!(
            Game::from_snapshot(snapshot).unwrap_err(),
            GameError::InvalidSnapshot("card id out of range")
        );
    }

    #[test]
    fn non_positive_owner_is_rejected() {
        let mut snapshot = sample();
        snapshot.owner_id = Some(0);
        assert_eq!(
            Game::from_snapshot(snapshot).unwrap_err(),
            GameError::InvalidSnapshot("owner id must be positive")
        );
    }
}
