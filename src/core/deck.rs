//! Deck builder
//!
//! Composes a difficulty's pair count with a theme's blueprint pool into a
//! concrete shuffled card list. Blueprint selection shuffles the theme's own
//! pool first and walks the fallback chain only if that pool runs dry; dedup
//! keys are tracked globally across the whole draw so no front appears twice
//! even when themes share keys.

use std::collections::HashSet;

use crate::core::catalog::{blueprint_pool, card_back, fallback_chain, Blueprint};
use crate::core::rng::SimpleRng;
use crate::types::{Card, CardId, CardStatus, Theme};

/// Build a shuffled deck of `2 * total_pairs` cards for `theme`.
///
/// Guarantees exactly `total_pairs` distinct pairs, each with exactly two
/// members, all `hidden`, in random order. Panics if the theme's pool plus
/// its fallback chain cannot supply enough distinct blueprints; that is an
/// authoring defect in the catalogs, not a runtime condition (catalogs must
/// cover `MAX_TOTAL_PAIRS`).
pub fn build_deck(rng: &mut SimpleRng, total_pairs: u8, theme: Theme) -> Vec<Card> {
    let wanted = total_pairs as usize;
    let mut selected: Vec<Blueprint> = Vec::with_capacity(wanted);
    let mut used_keys: HashSet<&'static str> = HashSet::new();

    let sources = std::iter::once(theme).chain(fallback_chain(theme).iter().copied());
    for source in sources {
        if selected.len() == wanted {
            break;
        }
        for blueprint in rng.shuffled(&blueprint_pool(source)) {
            if selected.len() == wanted {
                break;
            }
            if used_keys.insert(blueprint.key) {
                selected.push(blueprint);
            }
        }
    }

    assert_eq!(
        selected.len(),
        wanted,
        "theme {theme:?} cannot supply {total_pairs} distinct fronts even via its fallback chain"
    );

    let back = card_back(theme);
    let mut cards: Vec<Card> = Vec::with_capacity(wanted * 2);
    for (i, blueprint) in selected.iter().enumerate() {
        let pair_id = format!("pair-{i}-{}", blueprint.key);
        for half in 0..2u8 {
            cards.push(Card {
                id: (i as u8) * 2 + half,
                pair_id: pair_id.clone(),
                // Independent artwork copy per card; no shared state.
                front: blueprint.front.clone(),
                back: back.clone(),
                theme,
                status: CardStatus::Hidden,
            });
        }
    }

    rng.shuffle(&mut cards);
    cards
}

/// Look up a card by id.
pub fn card_by_id(cards: &[Card], id: CardId) -> Option<&Card> {
    cards.iter().find(|card| card.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn pair_counts(cards: &[Card]) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for card in cards {
            *counts.entry(card.pair_id.as_str()).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_deck_has_exact_pair_structure() {
        let mut rng = SimpleRng::new(12345);
        let cards = build_deck(&mut rng, 5, Theme::Emoji);

        assert_eq!(cards.len(), 10);
        let counts = pair_counts(&cards);
        assert_eq!(counts.len(), 5);
        assert!(counts.values().all(|&n| n == 2));
        assert!(cards.iter().all(|c| c.status == CardStatus::Hidden));
    }

    #[test]
    fn test_card_ids_are_unique() {
        let mut rng = SimpleRng::new(2);
        let cards = build_deck(&mut rng, 7, Theme::Emoji);
        let mut ids: Vec<CardId> = cards.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 14);
    }

    #[test]
    fn test_pair_partners_share_front_artwork() {
        let mut rng = SimpleRng::new(7);
        let cards = build_deck(&mut rng, 6, Theme::Emoji);
        for card in &cards {
            let partner = cards
                .iter()
                .find(|c| c.pair_id == card.pair_id && c.id != card.id)
                .expect("every card has a partner");
            assert_eq!(partner.front, card.front);
        }
    }

    #[test]
    fn test_storybook_falls_back_without_duplicate_keys() {
        // 7 pairs from a 4-blueprint pool forces the fallback chain; the
        // shared "fox" key must not be drawn twice.
        let mut rng = SimpleRng::new(99);
        let cards = build_deck(&mut rng, 7, Theme::Storybook);

        assert_eq!(cards.len(), 14);
        let counts = pair_counts(&cards);
        assert_eq!(counts.len(), 7);

        let fox_pairs = counts.keys().filter(|k| k.ends_with("-fox")).count();
        assert!(fox_pairs <= 1, "fox drawn from both pools");

        // The whole storybook pool fits inside 7 pairs, so all 4 image
        // blueprints are present and the remaining 3 come from the fallback.
        let image_pairs = cards
            .iter()
            .filter(|c| matches!(c.front, crate::types::Artwork::Image { .. }))
            .count();
        assert_eq!(image_pairs, 8);
    }

    #[test]
    fn test_deck_order_varies_with_seed() {
        let mut rng_a = SimpleRng::new(1);
        let mut rng_b = SimpleRng::new(2);
        let a = build_deck(&mut rng_a, 7, Theme::Emoji);
        let b = build_deck(&mut rng_b, 7, Theme::Emoji);
        let order_a: Vec<&str> = a.iter().map(|c| c.pair_id.as_str()).collect();
        let order_b: Vec<&str> = b.iter().map(|c| c.pair_id.as_str()).collect();
        assert_ne!(order_a, order_b);
    }

    #[test]
    fn test_card_by_id() {
        let mut rng = SimpleRng::new(5);
        let cards = build_deck(&mut rng, 5, Theme::Emoji);
        let first = cards[3].id;
        assert_eq!(card_by_id(&cards, first).unwrap().id, first);
        assert!(card_by_id(&cards, 200).is_none());
    }
}
