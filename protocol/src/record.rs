use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const USERNAME_MAX_LEN: usize = 50;
pub const MIN_PAIRS: u8 = 3;
pub const MAX_PAIRS: u8 = 6;
pub const MIN_SCORE: u32 = 50;
pub const MAX_SCORE: u32 = 600;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Player id must be a positive integer")]
    InvalidPlayer,
    #[error("Username must be 1 to 50 characters")]
    InvalidUsername,
    #[error("Pair count out of range")]
    InvalidPairs,
    #[error("Too few moves for the pair count")]
    InvalidMoves,
    #[error("Score out of range")]
    InvalidScore,
}

/// One finished game, as persisted to the leaderboard store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player_id: i64,
    pub username: String,
    pub pairs_count: u8,
    pub moves_count: u32,
    pub time_seconds: u32,
    pub score: u32,
    pub achieved_at: DateTime<Utc>,
}

impl ScoreRecord {
    /// Validate and timestamp a record; rejects anything the engine could
    /// not have produced.
    pub fn new(
        player_id: i64,
        username: &str,
        pairs_count: u8,
        moves_count: u32,
        time_seconds: u32,
        score: u32,
    ) -> Result<ScoreRecord, RecordError> {
        let username = username.trim();
        if player_id <= 0 {
            return Err(RecordError::InvalidPlayer);
        }
        if username.is_empty() || username.chars().count() > USERNAME_MAX_LEN {
            return Err(RecordError::InvalidUsername);
        }
        if !(MIN_PAIRS..=MAX_PAIRS).contains(&pairs_count) {
            return Err(RecordError::InvalidPairs);
        }
        if moves_count < u32::from(pairs_count) {
            return Err(RecordError::InvalidMoves);
        }
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(RecordError::InvalidScore);
        }

        Ok(ScoreRecord {
            player_id,
            username: username.to_owned(),
            pairs_count,
            moves_count,
            time_seconds,
            score,
            achieved_at: Utc::now(),
        })
    }
}

/// One row of the ranked leaderboard query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub username: String,
    pub score: u32,
    pub moves_count: u32,
    pub time_seconds: u32,
}

/// Persistence collaborator for finished games: keyed by player, queried
/// top-N.
pub trait ScoreStore {
    fn save(&mut self, record: ScoreRecord);

    /// Best scores first, newer entries winning ties.
    fn top_n(&self, limit: usize) -> Vec<LeaderboardEntry>;
}

/// In-memory leaderboard, for tests and single-process tools.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryScoreStore {
    records: Vec<ScoreRecord>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn save(&mut self, record: ScoreRecord) {
        self.records.push(record);
    }

    fn top_n(&self, limit: usize) -> Vec<LeaderboardEntry> {
        let mut ranked: Vec<&ScoreRecord> = self.records.iter().collect();
        ranked.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(b.achieved_at.cmp(&a.achieved_at))
        });

        ranked
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(index, record)| LeaderboardEntry {
                rank: index as u32 + 1,
                username: record.username.clone(),
                score: record.score,
                moves_count: record.moves_count,
                time_seconds: record.time_seconds,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(player_id: i64, username: &str, score: u32) -> ScoreRecord {
        ScoreRecord::new(player_id, username, 3, 8, 45, score).unwrap()
    }

    #[test]
    fn valid_record_is_accepted_and_trimmed() {
        let record = ScoreRecord::new(7, "  ada  ", 6, 14, 95, 580).unwrap();
        assert_eq!(record.username, "ada");
        assert_eq!(record.pairs_count, 6);
    }

    #[test]
    fn player_id_must_be_positive() {
        assert_eq!(
            ScoreRecord::new(0, "ada", 3, 8, 45, 280).unwrap_err(),
            RecordError::InvalidPlayer
        );
    }

    #[test]
    fn username_bounds_are_enforced() {
        assert_eq!(
            ScoreRecord::new(1, "   ", 3, 8, 45, 280).unwrap_err(),
            RecordError::InvalidUsername
        );
        let long = "x".repeat(USERNAME_MAX_LEN + 1);
        assert_eq!(
            ScoreRecord::new(1, &long, 3, 8, 45, 280).unwrap_err(),
            RecordError::InvalidUsername
        );
    }

    #[test]
    fn pair_move_and_score_ranges_are_enforced() {
        assert_eq!(
            ScoreRecord::new(1, "ada", 2, 8, 45, 280).unwrap_err(),
            RecordError::InvalidPairs
        );
        assert_eq!(
            ScoreRecord::new(1, "ada", 3, 2, 45, 280).unwrap_err(),
            RecordError::InvalidMoves
        );
        assert_eq!(
            ScoreRecord::new(1, "ada", 3, 8, 45, 20).unwrap_err(),
            RecordError::InvalidScore
        );
        assert_eq!(
            ScoreRecord::new(1, "ada", 3, 8, 45, 900).unwrap_err(),
            RecordError::InvalidScore
        );
    }

    #[test]
    fn top_n_ranks_by_score_descending() {
        let mut store = MemoryScoreStore::new();
        store.save(record(1, "low", 120));
        store.save(record(2, "high", 580));
        store.save(record(3, "mid", 300));

        let top = store.top_n(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].rank, 1);
        assert_eq!(top[0].username, "high");
        assert_eq!(top[1].rank, 2);
        assert_eq!(top[1].username, "mid");
    }

    #[test]
    fn newer_entries_win_ties() {
        let mut store = MemoryScoreStore::new();
        let older = record(1, "older", 300);
        let mut newer = record(2, "newer", 300);
        newer.achieved_at = older.achieved_at + chrono::Duration::seconds(5);

        store.save(older);
        store.save(newer);

        let top = store.top_n(10);
        assert_eq!(top[0].username, "newer");
        assert_eq!(top[1].username, "older");
    }

    #[test]
    fn top_n_respects_the_limit() {
        let mut store = MemoryScoreStore::new();
        for id in 1..=10 {
            store.save(record(id, "player", 100 + id as u32));
        }
        assert_eq!(store.len(), 10);
        assert_eq!(store.top_n(3).len(), 3);
    }

    #[test]
    fn record_serde_round_trip() {
        let record = record(4, "ada", 260);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(serde_json::from_str::<ScoreRecord>(&json).unwrap(), record);
    }
}
