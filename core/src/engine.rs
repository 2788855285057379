use chrono::prelude::*;
use smallvec::SmallVec;

use crate::*;

/// Phase of the two-cards-per-turn protocol, derived from the pending
/// buffer.
///
/// Valid transitions:
/// - Idle -> OneRevealed (first flip)
/// - OneRevealed -> Idle (second flip matched)
/// - OneRevealed -> AwaitingConceal (second flip mismatched)
/// - AwaitingConceal -> Idle (conceal_pending)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    /// No card revealed this turn.
    Idle,
    /// One card face-up, waiting for the second flip.
    OneRevealed,
    /// Two mismatched cards face-up, waiting for `conceal_pending`.
    AwaitingConceal,
}

impl TurnPhase {
    pub const fn accepts_flip(self) -> bool {
        !matches!(self, Self::AwaitingConceal)
    }
}

/// Outcome of a resolved two-card turn.
#[derive(Clone, Debug, PartialEq)]
pub enum TurnOutcome {
    /// Pair found, more remain.
    Matched {
        slots: [Slot; 2],
        pairs_found: PairCount,
        pairs_remaining: PairCount,
    },
    /// Pair found and it was the last one.
    Completed {
        slots: [Slot; 2],
        score: Points,
        moves: MoveCount,
        elapsed_secs: u32,
    },
    /// No pair; both cards stay face-up until concealed.
    NoMatch { slots: [Slot; 2] },
}

impl TurnOutcome {
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Matched { .. } | Self::Completed { .. })
    }
}

/// Result of a single accepted flip.
#[derive(Clone, Debug, PartialEq)]
pub struct FlipReport {
    pub slot: Slot,
    pub card_id: CardId,
    pub image: FaceImage,
    pub pending_count: u8,
    /// Present when this flip was the second of a turn.
    pub turn: Option<TurnOutcome>,
}

/// Outcome of concealing the pending buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConcealOutcome {
    NoChange,
    Concealed,
}

impl ConcealOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Concealed)
    }
}

/// One game from deal to completion.
///
/// The engine performs no I/O and is never shared: callers reconstruct a
/// private instance from a snapshot per request, mutate it, and persist the
/// snapshot back.
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    difficulty: Difficulty,
    owner: Option<PlayerId>,
    deck: Vec<Card>,
    pending: SmallVec<[Slot; 2]>,
    found_pairs: PairCount,
    moves: MoveCount,
    started_at: DateTime<Utc>,
    completed: bool,
}

impl Game {
    /// Deal a fresh shuffled game.
    pub fn new<G: DeckGenerator>(
        difficulty: Difficulty,
        owner: Option<PlayerId>,
        generator: G,
    ) -> Result<Game> {
        if matches!(owner, Some(id) if id <= 0) {
            return Err(GameError::InvalidOwner);
        }

        Ok(Game {
            difficulty,
            owner,
            deck: generator.generate(difficulty),
            pending: SmallVec::new(),
            found_pairs: 0,
            moves: 0,
            started_at: Utc::now(),
            completed: false,
        })
    }

    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub const fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    pub fn cards(&self) -> &[Card] {
        &self.deck
    }

    pub fn card_at(&self, slot: Slot) -> Option<Card> {
        self.deck.get(slot).copied()
    }

    /// Slots currently face-up and unresolved, in flip order.
    pub fn pending_slots(&self) -> &[Slot] {
        &self.pending
    }

    pub const fn found_pairs(&self) -> PairCount {
        self.found_pairs
    }

    pub const fn pair_count(&self) -> PairCount {
        self.difficulty.pair_count()
    }

    pub const fn pairs_remaining(&self) -> PairCount {
        self.pair_count() - self.found_pairs
    }

    pub const fn moves(&self) -> MoveCount {
        self.moves
    }

    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn turn_phase(&self) -> TurnPhase {
        match self.pending.len() {
            0 => TurnPhase::Idle,
            1 => TurnPhase::OneRevealed,
            _ => TurnPhase::AwaitingConceal,
        }
    }

    /// How many seconds have passed since the game was dealt.
    pub fn elapsed_secs(&self) -> u32 {
        (Utc::now() - self.started_at).num_seconds().max(0) as u32
    }

    pub fn progress_percentage(&self) -> f32 {
        round1(self.found_pairs as f32 / self.pair_count() as f32 * 100.0)
    }

    /// Current score, recomputable at any time, not only at completion.
    pub fn score(&self) -> Points {
        ScoreTable::DEFAULT.score(self.difficulty, self.moves)
    }

    /// Reveal the card at `position` and, when it is the second of the turn,
    /// resolve the match immediately.
    ///
    /// The game state is unchanged on every error path.
    pub fn flip_card(&mut self, position: RawSlot) -> Result<FlipReport> {
        if position < 0 {
            return Err(GameError::NegativePosition);
        }
        let slot = Slot::try_from(position).map_err(|_| GameError::InvalidPosition)?;
        if slot >= self.deck.len() {
            return Err(GameError::InvalidPosition);
        }
        if self.completed {
            return Err(GameError::GameCompleted);
        }
        if !self.deck[slot].is_flippable() {
            return Err(GameError::CardNotFlippable);
        }
        if self.pending.len() >= 2 {
            return Err(GameError::TooManyFlipped);
        }

        self.deck[slot].reveal();
        self.pending.push(slot);

        let card = self.deck[slot];
        let mut report = FlipReport {
            slot,
            card_id: card.id(),
            image: card.image(),
            pending_count: self.pending.len() as u8,
            turn: None,
        };
        if self.pending.len() == 2 {
            report.turn = Some(self.resolve_turn());
        }
        Ok(report)
    }

    /// Compare the two pending cards. One turn is one move, whatever the
    /// outcome.
    fn resolve_turn(&mut self) -> TurnOutcome {
        self.moves += 1;

        let slots = [self.pending[0], self.pending[1]];
        if !self.deck[slots[0]].matches(self.deck[slots[1]]) {
            // cards stay face-up until conceal_pending
            return TurnOutcome::NoMatch { slots };
        }

        self.deck[slots[0]].mark_matched();
        self.deck[slots[1]].mark_matched();
        self.found_pairs += 1;
        self.pending.clear();

        if self.found_pairs == self.pair_count() {
            self.completed = true;
            log::debug!("game completed after {} moves", self.moves);
            TurnOutcome::Completed {
                slots,
                score: self.score(),
                moves: self.moves,
                elapsed_secs: self.elapsed_secs(),
            }
        } else {
            TurnOutcome::Matched {
                slots,
                pairs_found: self.found_pairs,
                pairs_remaining: self.pairs_remaining(),
            }
        }
    }

    /// Conceal whatever the pending buffer holds and clear it. Harmless on
    /// an empty or single-card buffer; never touches moves or pair counts.
    pub fn conceal_pending(&mut self) -> ConcealOutcome {
        let mut concealed = false;
        for &slot in &self.pending {
            if self.deck[slot].conceal() {
                concealed = true;
            }
        }
        self.pending.clear();

        if concealed {
            ConcealOutcome::Concealed
        } else {
            ConcealOutcome::NoChange
        }
    }

    /// Summary of a finished game; fails until the last pair is found.
    pub fn final_stats(&self) -> Result<FinalStats> {
        if !self.completed {
            return Err(GameError::NotCompleted);
        }

        let elapsed_secs = self.elapsed_secs();
        let perfect = self.difficulty.perfect_moves();
        Ok(FinalStats {
            score: self.score(),
            moves: self.moves,
            elapsed_secs,
            pair_count: self.pair_count(),
            difficulty: self.difficulty,
            efficiency: round1(perfect as f32 / self.moves as f32 * 100.0),
            avg_secs_per_pair: round1(elapsed_secs as f32 / self.pair_count() as f32),
        })
    }

    /// Full serialized state, sufficient to reconstruct this game exactly.
    pub fn to_snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            difficulty: self.difficulty,
            owner_id: self.owner,
            cards: self
                .deck
                .iter()
                .map(|card| CardSnapshot {
                    id: card.id() as i64,
                    image: card.image().as_str().to_owned(),
                    revealed: card.is_revealed(),
                    matched: card.is_matched(),
                })
                .collect(),
            revealed_slots: self.pending.to_vec(),
            found_pairs: self.found_pairs,
            moves: self.moves,
            started_at: self.started_at.timestamp(),
            completed: self.completed,
        }
    }

    /// Rebuild a game from a previously produced snapshot. The session
    /// loader is expected to discard the snapshot and deal fresh on error.
    pub fn from_snapshot(snapshot: GameSnapshot) -> Result<Game> {
        snapshot.validate()?;

        let started_at = DateTime::from_timestamp(snapshot.started_at, 0)
            .ok_or(GameError::InvalidSnapshot("start timestamp out of range"))?;

        let mut deck = Vec::with_capacity(snapshot.cards.len());
        for card in &snapshot.cards {
            if card.id < 0 || card.id > CardId::MAX as i64 {
                return Err(GameError::InvalidSnapshot("card id out of range"));
            }
            deck.push(Card::restore(card.id, &card.image, card.revealed, card.matched)?);
        }

        Ok(Game {
            difficulty: snapshot.difficulty,
            owner: snapshot.owner_id,
            deck,
            pending: snapshot.revealed_slots.iter().copied().collect(),
            found_pairs: snapshot.found_pairs,
            moves: snapshot.moves,
            started_at,
            completed: snapshot.completed,
        })
    }
}

fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
