//! Seeded, reproducible daily picks.
//!
//! The daily card must be byte-for-byte stable for a given date, user seed
//! and pack set, across calls and process restarts. Stored records depend
//! on this exact bit-level pipeline (FNV-1a into mulberry32), so the
//! generator is fixed here rather than delegated to a pluggable rng crate.

use super::{packs, select, MessageCard, PackId};

const SEED_SEPARATOR: char = '|';

/// 32-bit FNV-1a over the seed string bytes.
fn fnv1a(input: &str) -> u32 {
    let mut hash: u32 = 2_166_136_261;
    for byte in input.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(16_777_619);
    }
    hash
}

/// Deterministic PRNG (mulberry32). All arithmetic is wrapping 32-bit;
/// outputs are uniform in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        f64::from(t ^ (t >> 14)) / 4_294_967_296.0
    }
}

/// Picks the card of the day for `(date_iso, user_seed, allowed_packs)`.
///
/// The pack list is normalized before seeding: an empty list falls back to
/// the full default set, anything else is sorted by pack id string. The
/// result is therefore independent of the caller's pack ordering.
pub fn deterministic_daily_pick(
    date_iso: &str,
    user_seed: &str,
    allowed_packs: &[PackId],
) -> Option<MessageCard> {
    let normalized: Vec<PackId> = if allowed_packs.is_empty() {
        PackId::ALL.to_vec()
    } else {
        let mut ids = allowed_packs.to_vec();
        ids.sort_by_key(|id| id.as_str());
        ids
    };

    let joined = normalized
        .iter()
        .map(PackId::as_str)
        .collect::<Vec<_>>()
        .join(",");
    let seed_input =
        format!("{date_iso}{SEED_SEPARATOR}{user_seed}{SEED_SEPARATOR}{joined}");

    let mut rng = Mulberry32::new(fnv1a(&seed_input));
    let cards: Vec<MessageCard> = normalized
        .iter()
        .flat_map(|id| packs::load_pack(*id))
        .collect();
    select::pick_weighted(&cards, || rng.next_f64()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1a_matches_reference_vectors() {
        assert_eq!(fnv1a(""), 2_166_136_261);
        assert_eq!(fnv1a("a"), 0xe40c_292c);
        assert_eq!(fnv1a("foobar"), 0xbf9c_f968);
    }

    #[test]
    fn mulberry32_is_deterministic_and_in_range() {
        let mut a = Mulberry32::new(7);
        let mut b = Mulberry32::new(7);
        let mut distinct = std::collections::HashSet::new();
        for _ in 0..100 {
            let value = a.next_f64();
            assert_eq!(value, b.next_f64());
            assert!((0.0..1.0).contains(&value));
            distinct.insert(value.to_bits());
        }
        assert!(distinct.len() > 90, "sequence should not stall");
    }

    #[test]
    fn daily_pick_is_stable_for_identical_inputs() {
        let first = deterministic_daily_pick("2025-01-20", "user-123", &[PackId::Free, PackId::Love]);
        let second = deterministic_daily_pick("2025-01-20", "user-123", &[PackId::Free, PackId::Love]);
        assert_eq!(first, second);
        assert!(first.is_some());
    }

    #[test]
    fn daily_pick_ignores_pack_ordering() {
        let sorted = deterministic_daily_pick("2025-01-20", "user-123", &[PackId::Career, PackId::Love]);
        let reversed = deterministic_daily_pick("2025-01-20", "user-123", &[PackId::Love, PackId::Career]);
        assert_eq!(sorted, reversed);
    }

    #[test]
    fn empty_pack_list_falls_back_to_all_packs() {
        assert!(deterministic_daily_pick("2025-01-20", "user-123", &[]).is_some());
    }
}
