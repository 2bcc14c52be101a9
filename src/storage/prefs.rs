//! Typed preference records over the key-value store
//!
//! Owns the record keys and the JSON encoding of every preference the game
//! persists: last difficulty/theme, the best-scores mapping, the session
//! snapshot, the onboarding flag, and sound settings. Loads fall back to
//! defaults on anything missing or malformed.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::KeyValueStore;
use crate::core::session::PersistedSession;
use crate::types::{Difficulty, Theme};

pub const LAST_DIFFICULTY_KEY: &str = "memory-card-game:last-difficulty";
pub const LAST_THEME_KEY: &str = "memory-card-game:last-theme";
pub const HIGH_SCORE_KEY: &str = "memory-card-game:high-scores";
pub const SESSION_KEY: &str = "memory-card-game:session";
pub const ONBOARDING_KEY: &str = "memory-card-game:onboarding";
pub const SOUND_SETTINGS_KEY: &str = "memory-card-game:sound-settings";

fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    store
        .get(key)
        .and_then(|raw| serde_json::from_str(&raw).ok())
}

fn save_json<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) {
    if let Ok(raw) = serde_json::to_string(value) {
        store.set(key, &raw);
    }
}

pub fn load_last_difficulty(store: &dyn KeyValueStore) -> Difficulty {
    load_json(store, LAST_DIFFICULTY_KEY).unwrap_or(Difficulty::Easy)
}

pub fn save_last_difficulty(store: &mut dyn KeyValueStore, difficulty: Difficulty) {
    save_json(store, LAST_DIFFICULTY_KEY, &difficulty);
}

pub fn load_last_theme(store: &dyn KeyValueStore) -> Theme {
    load_json(store, LAST_THEME_KEY).unwrap_or(Theme::Emoji)
}

pub fn save_last_theme(store: &mut dyn KeyValueStore, theme: Theme) {
    save_json(store, LAST_THEME_KEY, &theme);
}

/// Highest score ever finalized as a completed round, per difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BestScores {
    #[serde(default)]
    pub easy: u32,
    #[serde(default)]
    pub normal: u32,
    #[serde(default)]
    pub hard: u32,
}

impl BestScores {
    pub fn get(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
        }
    }

    pub fn set(&mut self, difficulty: Difficulty, score: u32) {
        match difficulty {
            Difficulty::Easy => self.easy = score,
            Difficulty::Normal => self.normal = score,
            Difficulty::Hard => self.hard = score,
        }
    }
}

pub fn load_best_scores(store: &dyn KeyValueStore) -> BestScores {
    load_json(store, HIGH_SCORE_KEY).unwrap_or_default()
}

pub fn save_best_scores(store: &mut dyn KeyValueStore, scores: &BestScores) {
    save_json(store, HIGH_SCORE_KEY, scores);
}

/// Validated session load: malformed records or unknown difficulty/theme
/// keys parse as absent.
pub fn load_session(store: &dyn KeyValueStore) -> Option<PersistedSession> {
    load_json(store, SESSION_KEY)
}

pub fn save_session(store: &mut dyn KeyValueStore, session: &PersistedSession) {
    save_json(store, SESSION_KEY, session);
}

pub fn clear_session(store: &mut dyn KeyValueStore) {
    store.remove(SESSION_KEY);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
struct OnboardingState {
    has_seen_tutorial: bool,
}

pub fn load_onboarding_seen(store: &dyn KeyValueStore) -> bool {
    load_json::<OnboardingState>(store, ONBOARDING_KEY)
        .unwrap_or_default()
        .has_seen_tutorial
}

pub fn save_onboarding_seen(store: &mut dyn KeyValueStore, seen: bool) {
    save_json(
        store,
        ONBOARDING_KEY,
        &OnboardingState {
            has_seen_tutorial: seen,
        },
    );
}

/// Sound preference flags consumed by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundSettings {
    pub sfx: bool,
    pub bgm: bool,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            sfx: true,
            bgm: false,
        }
    }
}

pub fn load_sound_settings(store: &dyn KeyValueStore) -> SoundSettings {
    load_json(store, SOUND_SETTINGS_KEY).unwrap_or_default()
}

pub fn save_sound_settings(store: &mut dyn KeyValueStore, settings: &SoundSettings) {
    save_json(store, SOUND_SETTINGS_KEY, settings);
}
