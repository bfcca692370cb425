//! Weighted card selection.
//!
//! The sampler is a cumulative-weight inverse-CDF walk: probability of a
//! card is `weight / total` for any fair uniform source. Selection is pure;
//! callers inject the source, so a seeded generator reproduces a draw
//! exactly.

use rand::Rng;

use super::{packs, Category, MessageCard, PackId, Tone};

/// Picks one card from `cards`, proportionally to weight.
///
/// `rng` must yield uniform values in `[0, 1)`. Empty input returns `None`.
/// A non-positive total weight degenerates to the first element; if the
/// threshold survives the walk on a floating-point edge, the last element
/// wins.
pub fn pick_weighted<F>(cards: &[MessageCard], mut rng: F) -> Option<&MessageCard>
where
    F: FnMut() -> f64,
{
    if cards.is_empty() {
        return None;
    }

    let total_weight: f64 = cards.iter().map(|card| card.weight).sum();
    if total_weight <= 0.0 {
        return cards.first();
    }

    let mut threshold = rng() * total_weight;
    for card in cards {
        threshold -= card.weight;
        if threshold <= 0.0 {
            return Some(card);
        }
    }
    cards.last()
}

/// `pick_weighted` with the process-default uniform source.
pub fn pick_random(cards: &[MessageCard]) -> Option<&MessageCard> {
    let mut rng = rand::thread_rng();
    pick_weighted(cards, || rng.gen::<f64>())
}

/// Optional narrowing for a ritual draw.
#[derive(Debug, Clone, Default)]
pub struct IntentFilter {
    pub intent: Option<Category>,
    pub tone: Option<Tone>,
    pub pack_ids: Vec<PackId>,
}

/// Draws one card matching the filter, weighted, from the allowed packs
/// (default: all of them).
pub fn pick_for_intent(filter: &IntentFilter) -> Option<MessageCard> {
    let ids: &[PackId] = if filter.pack_ids.is_empty() {
        &PackId::ALL
    } else {
        &filter.pack_ids
    };
    let filtered: Vec<MessageCard> = ids
        .iter()
        .flat_map(|id| packs::load_pack(*id))
        .filter(|card| {
            filter.intent.map_or(true, |intent| card.category == intent)
                && filter.tone.map_or(true, |tone| card.tone == tone)
        })
        .collect();
    pick_random(&filtered).cloned()
}

/// Draws `count` distinct cards from the full pool by repeated weighted
/// picks with removal. Returns fewer cards only if the pool runs dry.
pub fn pick_unique_cards(count: usize) -> Vec<MessageCard> {
    let mut pool: Vec<MessageCard> = PackId::ALL
        .iter()
        .flat_map(|id| packs::load_pack(*id))
        .collect();
    let mut rng = rand::thread_rng();
    let mut selected = Vec::new();

    while !pool.is_empty() && selected.len() < count {
        let Some(card) = pick_weighted(&pool, || rng.gen::<f64>()) else {
            break;
        };
        let id = card.id.clone();
        match pool.iter().position(|c| c.id == id) {
            Some(index) => selected.push(pool.remove(index)),
            None => break,
        }
    }
    selected
}

/// Linear scan over the default packs for a card id.
pub fn find_card_by_id(card_id: &str) -> Option<MessageCard> {
    PackId::ALL
        .iter()
        .flat_map(|id| packs::load_pack(*id))
        .find(|card| card.id == card_id)
}
