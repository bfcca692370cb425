//! Integration tests for the daily flow: seed, deterministic pick, journal
//! recording, streaks and the energy quota working against one database.

use omen_core::daily::{daily_card, DailyTracker};
use omen_core::date::{local_today, to_local_date_iso};
use omen_core::{Database, EnergyMeter, KvStore, ListDrawsOptions, MAX_ENERGY};

#[test]
fn daily_flow_records_once_and_stays_stable() {
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
    assert_eq!(draws[0].card_ids, vec![first.card.id.clone()]);
}

#[test]
fn daily_pick_survives_process_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("omen.db");
    let today = local_today();

    let picked = {
        let db = Database::open_at(&path).unwrap();
        daily_card(&db, today).unwrap().unwrap()
    };

    let db = Database::open_at(&path).unwrap();
    let again = daily_card(&db, today).unwrap().unwrap();
    assert_eq!(again.card.id, picked.card.id);
    assert!(!again.fresh);
    assert_eq!(db.list_draws(&ListDrawsOptions::default()).unwrap().len(), 1);
}

#[test]
fn streak_continues_from_a_consecutive_day() {
    let db = Database::open_memory().unwrap();
    let today = local_today();
    let yesterday = today.pred_opt().unwrap();

    db.kv_set("daily_last_date", &to_local_date_iso(yesterday))
        .unwrap();
    db.kv_set("daily_streak", "6").unwrap();

    let draw = daily_card(&db, today).unwrap().unwrap();
    assert_eq!(draw.streak, 7);

    let tracker = DailyTracker::new(&db);
    assert_eq!(tracker.streak().unwrap(), 7);
}

#[test]
fn energy_quota_runs_down_and_restores_alongside_draws() {
    let db = Database::open_memory().unwrap();
    let meter = EnergyMeter::new(&db);
    let today = local_today();

    assert_eq!(meter.reset_if_new_day(today).unwrap().remaining, MAX_ENERGY);

    for expected in (0..MAX_ENERGY).rev() {
        assert_eq!(meter.consume_on(today).unwrap().remaining, expected);
    }
    assert_eq!(meter.consume_on(today).unwrap().remaining, 0);

    assert_eq!(meter.restore_one_on(today).unwrap().remaining, 1);
}
