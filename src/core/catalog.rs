//! Difficulty and theme catalogs
//!
//! Static configuration: difficulty tiers and per-theme card artwork pools.
//! Kept separate from the engine so balance/content tweaks stay isolated from
//! gameplay logic. The catalogs must guarantee that every theme can supply
//! `MAX_TOTAL_PAIRS` distinct blueprint keys across its fallback chain; the
//! deck builder asserts this rather than recovering at runtime.

use crate::types::{Artwork, Difficulty, Theme};

/// Per-difficulty round configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyConfig {
    pub total_pairs: u8,
    /// `None` means the round has no countdown.
    pub time_limit_ms: Option<u32>,
    pub hint_available: bool,
}

/// Largest `total_pairs` any difficulty demands.
pub const MAX_TOTAL_PAIRS: u8 = 7;

pub const fn difficulty_config(difficulty: Difficulty) -> DifficultyConfig {
    match difficulty {
        Difficulty::Easy => DifficultyConfig {
            total_pairs: 5,
            time_limit_ms: None,
            hint_available: true,
        },
        Difficulty::Normal => DifficultyConfig {
            total_pairs: 6,
            time_limit_ms: Some(90_000),
            hint_available: false,
        },
        Difficulty::Hard => DifficultyConfig {
            total_pairs: 7,
            time_limit_ms: Some(60_000),
            hint_available: false,
        },
    }
}

/// A candidate card front: a stable dedup key plus the artwork it produces.
/// Not yet bound to any card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blueprint {
    pub key: &'static str,
    pub front: Artwork,
}

struct EmojiSpec {
    key: &'static str,
    glyph: &'static str,
}

const EMOJI_POOL: [EmojiSpec; 13] = [
    EmojiSpec { key: "dog", glyph: "🐶" },
    EmojiSpec { key: "cat", glyph: "🐱" },
    EmojiSpec { key: "fox", glyph: "🦊" },
    EmojiSpec { key: "panda", glyph: "🐼" },
    EmojiSpec { key: "rabbit", glyph: "🐰" },
    EmojiSpec { key: "frog", glyph: "🐸" },
    EmojiSpec { key: "lion", glyph: "🦁" },
    EmojiSpec { key: "monkey", glyph: "🐵" },
    EmojiSpec { key: "tiger", glyph: "🐯" },
    EmojiSpec { key: "unicorn", glyph: "🦄" },
    EmojiSpec { key: "octopus", glyph: "🐙" },
    EmojiSpec { key: "zebra", glyph: "🦓" },
    EmojiSpec { key: "turtle", glyph: "🐢" },
];

struct ImageSpec {
    key: &'static str,
    source: &'static str,
    alt: &'static str,
}

// The storybook pool alone is smaller than MAX_TOTAL_PAIRS; it relies on its
// fallback chain. Note the deliberate key overlap with the emoji pool
// ("fox"): dedup keys are global across a draw, so a storybook deck never
// contains both the illustrated fox and the emoji fox.
const STORYBOOK_POOL: [ImageSpec; 4] = [
    ImageSpec {
        key: "fox",
        source: "assets/card-fox.svg",
        alt: "a quick fox glancing over its shoulder",
    },
    ImageSpec {
        key: "penguin",
        source: "assets/card-penguin.svg",
        alt: "a penguin waddling across the ice",
    },
    ImageSpec {
        key: "strawberry",
        source: "assets/card-strawberry.svg",
        alt: "a ripe strawberry with a leafy crown",
    },
    ImageSpec {
        key: "star",
        source: "assets/card-star.svg",
        alt: "a bright five-pointed star",
    },
];

/// Ordered pool of candidate front blueprints for a theme.
pub fn blueprint_pool(theme: Theme) -> Vec<Blueprint> {
    match theme {
        Theme::Emoji => EMOJI_POOL
            .iter()
            .map(|spec| Blueprint {
                key: spec.key,
                front: Artwork::Emoji {
                    glyph: spec.glyph.to_string(),
                    label: spec.key.to_string(),
                },
            })
            .collect(),
        Theme::Storybook => STORYBOOK_POOL
            .iter()
            .map(|spec| Blueprint {
                key: spec.key,
                front: Artwork::Image {
                    source: spec.source.to_string(),
                    alt: spec.alt.to_string(),
                    label: spec.key.to_string(),
                },
            })
            .collect(),
    }
}

/// The fixed back artwork every card of a theme shares.
pub fn card_back(theme: Theme) -> Artwork {
    match theme {
        Theme::Emoji => Artwork::Emoji {
            glyph: "🎴".to_string(),
            label: "card back".to_string(),
        },
        Theme::Storybook => Artwork::Image {
            source: "assets/card-back.svg".to_string(),
            alt: "a patterned card back".to_string(),
            label: "card back".to_string(),
        },
    }
}

/// Themes to draw extra blueprints from when a theme's own pool runs out,
/// in traversal order.
pub fn fallback_chain(theme: Theme) -> &'static [Theme] {
    match theme {
        Theme::Emoji => &[],
        Theme::Storybook => &[Theme::Emoji],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_difficulty_configs() {
        let easy = difficulty_config(Difficulty::Easy);
        assert_eq!(easy.total_pairs, 5);
        assert_eq!(easy.time_limit_ms, None);
        assert!(easy.hint_available);

        let normal = difficulty_config(Difficulty::Normal);
        assert_eq!(normal.total_pairs, 6);
        assert_eq!(normal.time_limit_ms, Some(90_000));
        assert!(!normal.hint_available);

        let hard = difficulty_config(Difficulty::Hard);
        assert_eq!(hard.total_pairs, 7);
        assert_eq!(hard.time_limit_ms, Some(60_000));
        assert!(!hard.hint_available);
    }

    #[test]
    fn test_max_total_pairs_matches_catalog() {
        let max = Difficulty::ALL
            .iter()
            .map(|d| difficulty_config(*d).total_pairs)
            .max()
            .unwrap();
        assert_eq!(max, MAX_TOTAL_PAIRS);
    }

    #[test]
    fn test_pool_keys_are_unique_within_each_theme() {
        for theme in Theme::ALL {
            let pool = blueprint_pool(theme);
            let keys: HashSet<&str> = pool.iter().map(|b| b.key).collect();
            assert_eq!(keys.len(), pool.len(), "duplicate key in {theme:?} pool");
        }
    }

    #[test]
    fn test_every_theme_covers_max_pairs_across_fallback_chain() {
        // The authoring guarantee the deck builder asserts on: distinct keys
        // across a theme's whole chain must reach MAX_TOTAL_PAIRS.
        for theme in Theme::ALL {
            let mut keys: HashSet<&str> =
                blueprint_pool(theme).iter().map(|b| b.key).collect();
            for fallback in fallback_chain(theme) {
                for blueprint in blueprint_pool(*fallback) {
                    keys.insert(blueprint.key);
                }
            }
            assert!(
                keys.len() >= MAX_TOTAL_PAIRS as usize,
                "{theme:?} chain supplies only {} distinct keys",
                keys.len()
            );
        }
    }

    #[test]
    fn test_storybook_and_emoji_share_the_fox_key() {
        let storybook: HashSet<&str> =
            blueprint_pool(Theme::Storybook).iter().map(|b| b.key).collect();
        let emoji: HashSet<&str> = blueprint_pool(Theme::Emoji).iter().map(|b| b.key).collect();
        assert!(storybook.contains("fox") && emoji.contains("fox"));
    }

    #[test]
    fn test_card_backs_match_theme_rendering_mode() {
        assert!(matches!(card_back(Theme::Emoji), Artwork::Emoji { .. }));
        assert!(matches!(card_back(Theme::Storybook), Artwork::Image { .. }));
    }
}
