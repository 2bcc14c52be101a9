//! Persisted session record
//!
//! The serialized capture of an in-progress round. Written on every
//! meaningful state change, consumed by resumption, deleted on finish or
//! restart. Validation on load is the typed parse: records with unknown
//! difficulty/theme keys or a malformed shape fail deserialization and are
//! treated as absent.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::types::{Card, CardId, Difficulty, GameStatus, Theme};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub difficulty: Difficulty,
    pub theme: Theme,
    pub cards: Vec<Card>,
    pub flipped_ids: Vec<CardId>,
    pub matched_pairs: u8,
    pub score: u32,
    pub remaining_time_ms: Option<u32>,
    pub hint_used: bool,
    pub status: GameStatus,
    /// Unix epoch milliseconds.
    pub saved_at: u64,
}

impl PersistedSession {
    /// The short form the resume prompt shows.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            difficulty: self.difficulty,
            theme: self.theme,
            saved_at: self.saved_at,
            score: self.score,
            matched_pairs: self.matched_pairs,
            total_pairs: (self.cards.len() / 2) as u8,
            remaining_time_ms: self.remaining_time_ms,
        }
    }
}

/// Resume-prompt metadata for a pending session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub difficulty: Difficulty,
    pub theme: Theme,
    pub saved_at: u64,
    pub score: u32,
    pub matched_pairs: u8,
    pub total_pairs: u8,
    pub remaining_time_ms: Option<u32>,
}

/// Wall clock in unix milliseconds; 0 if the clock is before the epoch.
pub fn now_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::deck::build_deck;
    use crate::core::rng::SimpleRng;

    fn sample_session() -> PersistedSession {
        let mut rng = SimpleRng::new(3);
        PersistedSession {
            difficulty: Difficulty::Normal,
            theme: Theme::Emoji,
            cards: build_deck(&mut rng, 6, Theme::Emoji),
            flipped_ids: vec![1, 4],
            matched_pairs: 2,
            score: 55,
            remaining_time_ms: Some(42_000),
            hint_used: false,
            status: GameStatus::Running,
            saved_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_session_round_trips_through_json() {
        let session = sample_session();
        let json = serde_json::to_string(&session).unwrap();
        let parsed: PersistedSession = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, session);
    }

    #[test]
    fn test_unknown_difficulty_fails_to_parse() {
        let mut value: serde_json::Value =
            serde_json::to_value(sample_session()).unwrap();
        value["difficulty"] = serde_json::json!("nightmare");
        assert!(serde_json::from_value::<PersistedSession>(value).is_err());
    }

    #[test]
    fn test_summary_reports_total_pairs_from_deck() {
        let summary = sample_session().summary();
        assert_eq!(summary.total_pairs, 6);
        assert_eq!(summary.matched_pairs, 2);
        assert_eq!(summary.score, 55);
        assert_eq!(summary.remaining_time_ms, Some(42_000));
    }
}
