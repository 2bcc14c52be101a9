//! Core types shared across the application
//!
//! Pure data types plus the gameplay constants. Everything that travels
//! inside a persisted session record derives serde here; the engine owns all
//! mutation.

use serde::{Deserialize, Serialize};

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 50;
pub const MISMATCH_HIDE_MS: u32 = 900;
pub const HINT_REVEAL_MS: u32 = 1000;
pub const COUNTDOWN_INTERVAL_MS: u32 = 1000;

/// Scoring constants
pub const MATCH_REWARD: u32 = 30;
pub const MISMATCH_PENALTY: u32 = 5;

/// Index of a card within a deck, unique for one round.
pub type CardId = u8;

/// Difficulty tiers. Fixed configuration, not user-editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

/// Visual themes. Each theme owns a card back and a blueprint pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Emoji,
    Storybook,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Emoji, Theme::Storybook];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "emoji" => Some(Theme::Emoji),
            "storybook" => Some(Theme::Storybook),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Emoji => "emoji",
            Theme::Storybook => "storybook",
        }
    }

    /// Next theme in selection order (wraps around).
    pub fn next(&self) -> Self {
        match self {
            Theme::Emoji => Theme::Storybook,
            Theme::Storybook => Theme::Emoji,
        }
    }
}

/// Round lifecycle. Transitions are strictly forward within one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Ready,
    Running,
    Finished,
}

/// Face state of a single card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    Hidden,
    Flipped,
    Matched,
}

/// Card face artwork. Polymorphic over rendering, opaque to game logic:
/// the engine only ever reads `pair_id` and `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Artwork {
    Emoji {
        glyph: String,
        label: String,
    },
    Image {
        source: String,
        alt: String,
        label: String,
    },
}

impl Artwork {
    /// Display label, independent of the rendering mode.
    pub fn label(&self) -> &str {
        match self {
            Artwork::Emoji { label, .. } => label,
            Artwork::Image { label, .. } => label,
        }
    }
}

/// One card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    /// Shared by exactly two cards in a deck.
    pub pair_id: String,
    pub front: Artwork,
    pub back: Artwork,
    pub theme: Theme,
    pub status: CardStatus,
}
