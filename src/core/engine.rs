//! Game session engine - owns all mutable round state
//!
//! The heart of the game: deck lifecycle, the flip-resolution protocol, the
//! countdown clock, hint handling, scoring, best-score tracking, and session
//! persistence triggers. Single-threaded and tick-driven: timers are
//! millisecond budgets advanced by `tick(elapsed_ms)` from the caller's loop,
//! and every lifecycle transition cancels outstanding timers synchronously
//! before mutating state, so no delayed effect from a prior round can land on
//! a new one.

use arrayvec::ArrayVec;

use crate::core::catalog::{difficulty_config, DifficultyConfig};
use crate::core::deck::{build_deck, card_by_id};
use crate::core::rng::SimpleRng;
use crate::core::session::{now_unix_ms, PersistedSession};
use crate::core::snapshot::GameSnapshot;
use crate::storage::{prefs, BestScores, KeyValueStore};
use crate::types::{
    Card, CardId, CardStatus, Difficulty, GameStatus, Theme, COUNTDOWN_INTERVAL_MS,
    HINT_REVEAL_MS, MATCH_REWARD, MISMATCH_HIDE_MS, MISMATCH_PENALTY,
};

/// Status-transition hooks for the presentation layer (sound cues, modals).
/// The engine records them; it never produces audio or output itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    RoundStarted,
    PairMatched,
    PairMismatched,
    RoundWon { new_best: bool },
    TimeExpired,
}

pub struct GameEngine {
    store: Box<dyn KeyValueStore>,
    rng: SimpleRng,
    difficulty: Difficulty,
    theme: Theme,
    cards: Vec<Card>,
    /// Ids of the cards currently face-up awaiting resolution (0..=2).
    flipped: ArrayVec<CardId, 2>,
    matched_pairs: u8,
    score: u32,
    status: GameStatus,
    /// `None` when the difficulty has no time limit.
    remaining_time_ms: Option<u32>,
    /// Sub-second progress toward the next countdown decrement.
    countdown_accum_ms: u32,
    /// Pending mismatch-hide delay; `Some` means `is_resolving`.
    mismatch_hide_ms: Option<u32>,
    /// Open hint-preview window; `Some` means `is_hint_previewing`.
    hint_preview_ms: Option<u32>,
    hint_used: bool,
    has_new_best: bool,
    best_scores: BestScores,
    /// Loaded or just-written session record; its presence is `resume_available`.
    pending_session: Option<PersistedSession>,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// Build an engine over `store`: last-used preferences are loaded, a
    /// fresh deck is dealt, and a previously persisted session (if valid) is
    /// exposed as a resumable candidate without being applied.
    pub fn new(seed: u32, store: Box<dyn KeyValueStore>) -> Self {
        let difficulty = prefs::load_last_difficulty(&*store);
        let theme = prefs::load_last_theme(&*store);
        let best_scores = prefs::load_best_scores(&*store);
        let pending_session = prefs::load_session(&*store);

        let mut rng = SimpleRng::new(seed);
        let config = difficulty_config(difficulty);
        let cards = build_deck(&mut rng, config.total_pairs, theme);

        Self {
            store,
            rng,
            difficulty,
            theme,
            cards,
            flipped: ArrayVec::new(),
            matched_pairs: 0,
            score: 0,
            status: GameStatus::Ready,
            remaining_time_ms: config.time_limit_ms,
            countdown_accum_ms: 0,
            mismatch_hide_ms: None,
            hint_preview_ms: None,
            hint_used: false,
            has_new_best: false,
            best_scores,
            pending_session,
            events: Vec::new(),
        }
    }

    fn config(&self) -> DifficultyConfig {
        difficulty_config(self.difficulty)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn matched_pairs(&self) -> u8 {
        self.matched_pairs
    }

    pub fn total_pairs(&self) -> u8 {
        self.config().total_pairs
    }

    pub fn is_resolving(&self) -> bool {
        self.mismatch_hide_ms.is_some()
    }

    pub fn is_hint_previewing(&self) -> bool {
        self.hint_preview_ms.is_some()
    }

    pub fn remaining_time_ms(&self) -> Option<u32> {
        self.remaining_time_ms
    }

    pub fn hint_used(&self) -> bool {
        self.hint_used
    }

    pub fn has_new_best(&self) -> bool {
        self.has_new_best
    }

    pub fn resume_available(&self) -> bool {
        self.pending_session.is_some()
    }

    /// Best score for the active difficulty, computed on read.
    pub fn best_score(&self) -> u32 {
        self.best_scores.get(self.difficulty)
    }

    pub fn best_scores(&self) -> BestScores {
        self.best_scores
    }

    /// Drain the status-transition events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let config = self.config();
        GameSnapshot {
            cards: self.cards.clone(),
            score: self.score,
            best_score: self.best_score(),
            best_scores: self.best_scores,
            matched_pairs: self.matched_pairs,
            total_pairs: config.total_pairs,
            status: self.status,
            is_resolving: self.is_resolving(),
            remaining_time_ms: self.remaining_time_ms,
            difficulty: self.difficulty,
            theme: self.theme,
            hint_available: config.hint_available,
            hint_used: self.hint_used,
            is_hint_previewing: self.is_hint_previewing(),
            resume_available: self.resume_available(),
            has_new_best: self.has_new_best,
            pending_session: self.pending_session.as_ref().map(|s| s.summary()),
        }
    }

    /// Flip a card face-up. Benign no-op when the round is finished, a
    /// resolution or hint window is open, two cards are already face-up, or
    /// the card is not hidden (UI race conditions, not errors).
    pub fn flip_card(&mut self, id: CardId) {
        if self.status == GameStatus::Finished
            || self.is_resolving()
            || self.is_hint_previewing()
            || self.flipped.len() == 2
        {
            return;
        }
        let Some(card) = self.cards.iter_mut().find(|c| c.id == id) else {
            return;
        };
        if card.status != CardStatus::Hidden {
            return;
        }

        card.status = CardStatus::Flipped;
        if !self.flipped.contains(&id) {
            self.flipped.push(id);
        }

        if self.status == GameStatus::Ready {
            // First flip of the round arms the countdown; the ready->running
            // transition happens at most once, so the clock start is
            // idempotent by construction.
            self.status = GameStatus::Running;
            self.countdown_accum_ms = 0;
            self.events.push(GameEvent::RoundStarted);
        }

        if self.flipped.len() == 2 {
            self.resolve_flipped();
        }
        self.sync_session();
    }

    /// Resolution protocol entry: exactly two cards are face-up. A match
    /// resolves synchronously; a mismatch opens the timed hide window.
    fn resolve_flipped(&mut self) {
        let first_id = self.flipped[0];
        let second_id = self.flipped[1];
        let first_pair = card_by_id(&self.cards, first_id).map(|c| c.pair_id.clone());
        let second_pair = card_by_id(&self.cards, second_id).map(|c| c.pair_id.clone());
        let (Some(first_pair), Some(second_pair)) = (first_pair, second_pair) else {
            // Ids that match no card (incoherent resumed record): drop them
            // rather than wedging the board.
            self.flipped.clear();
            return;
        };

        if first_pair == second_pair {
            for card in self
                .cards
                .iter_mut()
                .filter(|c| c.id == first_id || c.id == second_id)
            {
                card.status = CardStatus::Matched;
            }
            self.score += MATCH_REWARD;
            self.matched_pairs += 1;
            self.flipped.clear();
            self.events.push(GameEvent::PairMatched);

            if self.matched_pairs == self.config().total_pairs {
                let final_score = self.score;
                self.finalize(true, final_score);
            }
        } else {
            self.mismatch_hide_ms = Some(MISMATCH_HIDE_MS);
        }
    }

    /// Advance all engine-owned timers by `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.status == GameStatus::Finished {
            return;
        }
        let mut changed = false;

        if let Some(remaining) = self.mismatch_hide_ms {
            let remaining = remaining.saturating_sub(elapsed_ms);
            if remaining == 0 {
                self.hide_mismatched();
                changed = true;
            } else {
                self.mismatch_hide_ms = Some(remaining);
            }
        }

        if let Some(remaining) = self.hint_preview_ms {
            let remaining = remaining.saturating_sub(elapsed_ms);
            if remaining == 0 {
                self.hint_preview_ms = None;
                changed = true;
            } else {
                self.hint_preview_ms = Some(remaining);
            }
        }

        if self.status == GameStatus::Running {
            if let Some(mut remaining) = self.remaining_time_ms {
                if remaining > 0 {
                    self.countdown_accum_ms += elapsed_ms;
                    while self.countdown_accum_ms >= COUNTDOWN_INTERVAL_MS && remaining > 0 {
                        self.countdown_accum_ms -= COUNTDOWN_INTERVAL_MS;
                        remaining = remaining.saturating_sub(COUNTDOWN_INTERVAL_MS);
                        changed = true;
                    }
                    self.remaining_time_ms = Some(remaining);
                    if remaining == 0 {
                        self.events.push(GameEvent::TimeExpired);
                        let final_score = self.score;
                        self.finalize(false, final_score);
                        return;
                    }
                }
            }
        }

        if changed {
            self.sync_session();
        }
    }

    /// The mismatch-hide delay fired: revert both cards, apply the penalty.
    fn hide_mismatched(&mut self) {
        let ids = self.flipped.clone();
        for id in ids {
            if let Some(card) = self.cards.iter_mut().find(|c| c.id == id) {
                if card.status == CardStatus::Flipped {
                    card.status = CardStatus::Hidden;
                }
            }
        }
        self.score = self.score.saturating_sub(MISMATCH_PENALTY);
        self.flipped.clear();
        self.mismatch_hide_ms = None;
        self.events.push(GameEvent::PairMismatched);
    }

    /// Open the hint-preview window. At most once per round, only while
    /// running, only when the difficulty grants hints.
    pub fn use_hint(&mut self) {
        if !self.config().hint_available || self.hint_used || self.status != GameStatus::Running {
            return;
        }
        self.hint_used = true;
        self.hint_preview_ms = Some(HINT_REVEAL_MS);
        self.sync_session();
    }

    pub fn restart(&mut self) {
        self.start_new_round(self.difficulty, self.theme);
    }

    /// Selecting the current difficulty again still deals a fresh round.
    pub fn change_difficulty(&mut self, difficulty: Difficulty) {
        self.start_new_round(difficulty, self.theme);
    }

    pub fn change_theme(&mut self, theme: Theme) {
        self.start_new_round(self.difficulty, theme);
    }

    /// Synchronously drop every outstanding timer. Must run before any
    /// lifecycle transition mutates state.
    fn cancel_timers(&mut self) {
        self.mismatch_hide_ms = None;
        self.hint_preview_ms = None;
        self.countdown_accum_ms = 0;
    }

    fn start_new_round(&mut self, difficulty: Difficulty, theme: Theme) {
        self.cancel_timers();
        self.difficulty = difficulty;
        self.theme = theme;
        prefs::save_last_difficulty(&mut *self.store, difficulty);
        prefs::save_last_theme(&mut *self.store, theme);

        let config = difficulty_config(difficulty);
        self.cards = build_deck(&mut self.rng, config.total_pairs, theme);
        self.flipped.clear();
        self.matched_pairs = 0;
        self.score = 0;
        self.status = GameStatus::Ready;
        self.hint_used = false;
        self.remaining_time_ms = config.time_limit_ms;
        self.has_new_best = false;
        self.clear_persisted();
    }

    fn clear_persisted(&mut self) {
        prefs::clear_session(&mut *self.store);
        self.pending_session = None;
    }

    /// Terminal transition of a round. `completed` decides best-score
    /// eligibility: a timeout never updates the record.
    fn finalize(&mut self, completed: bool, final_score: u32) {
        self.cancel_timers();
        self.status = GameStatus::Finished;
        self.flipped.clear();
        self.clear_persisted();

        if !completed {
            self.has_new_best = false;
            return;
        }

        let new_best = final_score > self.best_scores.get(self.difficulty);
        if new_best {
            self.best_scores.set(self.difficulty, final_score);
            prefs::save_best_scores(&mut *self.store, &self.best_scores);
        }
        self.has_new_best = new_best;
        self.events.push(GameEvent::RoundWon { new_best });
    }

    /// Apply the pending session verbatim and consume its persisted record.
    /// No-op when nothing is pending.
    pub fn resume_session(&mut self) {
        let Some(session) = self.pending_session.take() else {
            return;
        };
        self.cancel_timers();

        self.difficulty = session.difficulty;
        self.theme = session.theme;
        prefs::save_last_difficulty(&mut *self.store, session.difficulty);
        prefs::save_last_theme(&mut *self.store, session.theme);

        self.cards = session.cards;
        self.flipped.clear();
        for id in session.flipped_ids.into_iter().take(2) {
            self.flipped.push(id);
        }
        self.matched_pairs = session.matched_pairs;
        self.score = session.score;
        self.hint_used = session.hint_used;
        // A finished session must never resume into a finished state.
        self.status = if session.status == GameStatus::Finished {
            GameStatus::Ready
        } else {
            session.status
        };
        self.remaining_time_ms = session
            .remaining_time_ms
            .or(difficulty_config(session.difficulty).time_limit_ms);
        self.has_new_best = false;
        prefs::clear_session(&mut *self.store);

        // A record saved mid-resolution holds two face-up cards; re-enter
        // the protocol so the board cannot deadlock.
        if self.flipped.len() == 2 {
            self.resolve_flipped();
        }
    }

    /// Delete the persisted session without applying it. The in-progress
    /// round is untouched.
    pub fn discard_session(&mut self) {
        self.clear_persisted();
    }

    /// Zero every best score and drop any persisted session. The current
    /// round keeps playing.
    pub fn reset_progress(&mut self) {
        self.best_scores = BestScores::default();
        prefs::save_best_scores(&mut *self.store, &self.best_scores);
        self.clear_persisted();
        self.has_new_best = false;
    }

    /// Persist a snapshot when the round shows meaningful progress. A fresh,
    /// untouched board is never written, so a reload does not offer to
    /// "resume" a blank round.
    fn sync_session(&mut self) {
        if self.status == GameStatus::Finished {
            return;
        }
        let config = self.config();
        let clock_touched = match (self.remaining_time_ms, config.time_limit_ms) {
            (Some(remaining), Some(limit)) => remaining != limit,
            _ => false,
        };
        let should_persist = self.status == GameStatus::Running
            || self.matched_pairs > 0
            || !self.flipped.is_empty()
            || clock_touched;
        if !should_persist {
            return;
        }

        let record = PersistedSession {
            difficulty: self.difficulty,
            theme: self.theme,
            cards: self.cards.clone(),
            flipped_ids: self.flipped.iter().copied().collect(),
            matched_pairs: self.matched_pairs,
            score: self.score,
            remaining_time_ms: self.remaining_time_ms,
            hint_used: self.hint_used,
            status: self.status,
            saved_at: now_unix_ms(),
        };
        prefs::save_session(&mut *self.store, &record);
        // Mirror what actually landed: an unavailable backend keeps nothing,
        // so it must not advertise a resumable round either.
        self.pending_session = prefs::load_session(&*self.store);
    }
}
