//! The daily pick: per-installation seed, streak counters, and the
//! orchestration that ties the deterministic pick to the journal.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::content::{self, deterministic_daily_pick, find_card_by_id, MessageCard, PackId};
use crate::date::{is_yesterday, local_date_of_millis, to_local_date_iso};
use crate::error::Result;
use crate::storage::{journal, Database, DrawMode, DrawRecord, KvStore, ListDrawsOptions};

const DAILY_SEED_KEY: &str = "daily_seed";
const DAILY_STREAK_KEY: &str = "daily_streak";
const DAILY_LAST_DATE_KEY: &str = "daily_last_date";

/// How many recent journal entries to scan for today's daily draw.
const DAILY_SCAN_LIMIT: usize = 50;

/// Seed and streak counters over an injected kv port.
pub struct DailyTracker<'a, S: KvStore> {
    store: &'a S,
}

impl<'a, S: KvStore> DailyTracker<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// The per-installation seed; generated and persisted on first use.
    pub fn ensure_seed(&self) -> Result<String> {
        if let Some(seed) = self.store.kv_get(DAILY_SEED_KEY)? {
            if !seed.is_empty() {
                return Ok(seed);
            }
        }
        let seed = format!("seed_{}", Uuid::new_v4().simple());
        self.store.kv_set(DAILY_SEED_KEY, &seed)?;
        debug!("generated daily seed");
        Ok(seed)
    }

    /// Current streak; absent or malformed storage reads as zero.
    pub fn streak(&self) -> Result<u32> {
        Ok(self
            .store
            .kv_get(DAILY_STREAK_KEY)?
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0))
    }

    /// Advance the streak machine for a visit on `today` and persist it.
    ///
    /// Same day keeps the streak, an exactly-consecutive day increments it,
    /// anything else (gap, future-dated, absent) resets it to 1.
    pub fn record_visit(&self, today: NaiveDate) -> Result<u32> {
        let today_iso = to_local_date_iso(today);
        let last_date = self.store.kv_get(DAILY_LAST_DATE_KEY)?;
        let stored = self.streak()?;

        let next = match last_date.as_deref() {
            Some(last) if last == today_iso => stored,
            Some(last) if is_yesterday(last, &today_iso) => stored.saturating_add(1),
            _ => 1,
        };

        self.store.kv_set(DAILY_LAST_DATE_KEY, &today_iso)?;
        self.store.kv_set(DAILY_STREAK_KEY, &next.to_string())?;
        Ok(next)
    }
}

/// Result of the daily flow.
#[derive(Debug, Clone, Serialize)]
pub struct DailyDraw {
    pub card: MessageCard,
    pub streak: u32,
    /// Whether this call appended a new journal entry.
    pub fresh: bool,
}

/// Resolve today's card, recording it in the journal the first time.
///
/// The pick is deterministic per (date, installation seed, full pack set),
/// so repeated calls on one day agree even if the journal scan misses.
pub fn daily_card(db: &Database, today: NaiveDate) -> Result<Option<DailyDraw>> {
    let tracker = DailyTracker::new(db);
    let seed = tracker.ensure_seed()?;
    let today_iso = to_local_date_iso(today);

    let recent = db.list_draws(&ListDrawsOptions {
        limit: Some(DAILY_SCAN_LIMIT),
        ..Default::default()
    })?;
    let existing = recent.into_iter().find(|draw| {
        draw.is_daily
            && local_date_of_millis(draw.created_at).map(to_local_date_iso).as_deref()
                == Some(today_iso.as_str())
    });

    let (card, fresh) = match existing {
        Some(draw) => {
            match draw.card_ids.first().and_then(|id| find_card_by_id(id)) {
                Some(card) => (card, false),
                // The journal references a card no longer in the packs;
                // re-derive the day's pick without appending a second row.
                None => match deterministic_daily_pick(&today_iso, &seed, &PackId::ALL) {
                    Some(card) => (card, false),
                    None => return Ok(None),
                },
            }
        }
        None => {
            let Some(card) = deterministic_daily_pick(&today_iso, &seed, &PackId::ALL) else {
                return Ok(None);
            };
            let record = DrawRecord {
                id: journal::generate_draw_id(),
                created_at: journal::now_millis(),
                mode: DrawMode::Daily,
                card_ids: vec![card.id.clone()],
                pack_ids: vec![content::pack_prefix(&card.id).to_string()],
                card_text: None,
                question: None,
                note: None,
                is_daily: true,
            };
            db.add_draw(&record)?;
            debug!(card = %card.id, "recorded daily draw");
            (card, true)
        }
    };

    let streak = tracker.record_visit(today)?;
    Ok(Some(DailyDraw { card, streak, fresh }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::local_today;
    use crate::storage::MemoryKv;

    #[test]
    fn seed_is_generated_once_and_reused() {
        let kv = MemoryKv::new();
        let tracker = DailyTracker::new(&kv);
        let first = tracker.ensure_seed().unwrap();
        let second = tracker.ensure_seed().unwrap();
        assert!(first.starts_with("seed_"));
        assert_eq!(first, second);
    }

    #[test]
    fn first_visit_starts_the_streak_at_one() {
        let kv = MemoryKv::new();
        let tracker = DailyTracker::new(&kv);
        assert_eq!(tracker.record_visit(local_today()).unwrap(), 1);
    }

    #[test]
    fn same_day_revisit_keeps_the_streak() {
        let kv = MemoryKv::new();
        let tracker = DailyTracker::new(&kv);
        let today = local_today();
        assert_eq!(tracker.record_visit(today).unwrap(), 1);
        assert_eq!(tracker.record_visit(today).unwrap(), 1);
    }

    #[test]
    fn consecutive_day_increments_the_streak() {
        let kv = MemoryKv::new();
        let tracker = DailyTracker::new(&kv);
        let today = local_today();
        let yesterday = today.pred_opt().unwrap();
        kv.kv_set(DAILY_LAST_DATE_KEY, &to_local_date_iso(yesterday))
            .unwrap();
        kv.kv_set(DAILY_STREAK_KEY, "6").unwrap();

        assert_eq!(tracker.record_visit(today).unwrap(), 7);
    }

    #[test]
    fn gaps_and_garbage_reset_the_streak() {
        let kv = MemoryKv::new();
        let tracker = DailyTracker::new(&kv);
        let today = local_today();
        let last_week = today - chrono::Days::new(7);
        kv.kv_set(DAILY_LAST_DATE_KEY, &to_local_date_iso(last_week))
            .unwrap();
        kv.kv_set(DAILY_STREAK_KEY, "12").unwrap();
        assert_eq!(tracker.record_visit(today).unwrap(), 1);

        kv.kv_set(DAILY_STREAK_KEY, "not a number").unwrap();
        assert_eq!(tracker.streak().unwrap(), 0);
    }

    #[test]
    fn daily_card_records_once_per_day() {
        let db = Database::open_memory().unwrap();
        let today = local_today();

        let first = daily_card(&db, today).unwrap().unwrap();
        assert!(first.fresh);
        assert_eq!(first.streak, 1);

        let second = daily_card(&db, today).unwrap().unwrap();
        assert!(!second.fresh);
        assert_eq!(second.card.id, first.card.id);

        let draws = db.list_draws(&ListDrawsOptions::default()).unwrap();
        assert_eq!(draws.len(), 1);
        assert!(draws[0].is_daily);
        assert_eq!(draws[0].mode, DrawMode::Daily);
    }
}
