//! Read-only snapshot the presentation layer renders from.

use crate::core::session::SessionSummary;
use crate::storage::BestScores;
use crate::types::{Card, Difficulty, GameStatus, Theme};

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub cards: Vec<Card>,
    pub score: u32,
    /// Best score for the active difficulty, derived from `best_scores`.
    pub best_score: u32,
    pub best_scores: BestScores,
    pub matched_pairs: u8,
    pub total_pairs: u8,
    pub status: GameStatus,
    pub is_resolving: bool,
    pub remaining_time_ms: Option<u32>,
    pub difficulty: Difficulty,
    pub theme: Theme,
    pub hint_available: bool,
    pub hint_used: bool,
    pub is_hint_previewing: bool,
    pub resume_available: bool,
    pub has_new_best: bool,
    pub pending_session: Option<SessionSummary>,
}
