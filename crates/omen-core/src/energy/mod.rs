//! Daily draw quota ("energy").
//!
//! A singleton state blob under one kv key, mutated only through validated
//! read-modify-write cycles. The quota refills on the first touch of each
//! local calendar day; premium installs ignore it entirely.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::date::{local_today, to_local_date_iso};
use crate::error::Result;
use crate::storage::KvStore;

/// Free-tier draws per day.
pub const MAX_ENERGY: u32 = 3;

const ENERGY_KEY: &str = "energy";

/// Persisted quota state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyState {
    pub remaining: u32,
    /// Local calendar date (`YYYY-MM-DD`) of the last refill.
    pub last_reset_date_iso: String,
    pub is_premium: bool,
}

impl EnergyState {
    fn fresh(today: NaiveDate) -> Self {
        Self {
            remaining: MAX_ENERGY,
            last_reset_date_iso: to_local_date_iso(today),
            is_premium: false,
        }
    }
}

/// Quota state machine over an injected kv port.
pub struct EnergyMeter<'a, S: KvStore> {
    store: &'a S,
}

impl<'a, S: KvStore> EnergyMeter<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    fn read_state(&self, today: NaiveDate) -> Result<EnergyState> {
        if let Some(raw) = self.store.kv_get(ENERGY_KEY)? {
            if let Ok(state) = serde_json::from_str::<EnergyState>(&raw) {
                return Ok(state);
            }
            info!("discarding malformed energy state");
        }
        let fallback = EnergyState::fresh(today);
        self.write_state(&fallback)?;
        Ok(fallback)
    }

    fn write_state(&self, state: &EnergyState) -> Result<()> {
        self.store.kv_set(ENERGY_KEY, &serde_json::to_string(state)?)
    }

    /// Current state; absent or malformed storage yields a fresh default.
    pub fn state(&self) -> Result<EnergyState> {
        self.read_state(local_today())
    }

    /// Refill the quota when the stored date is not `today`.
    ///
    /// This is the only place the quota resets. Idempotent within a day;
    /// every quota mutation calls it first.
    pub fn reset_if_new_day(&self, today: NaiveDate) -> Result<EnergyState> {
        let state = self.read_state(today)?;
        let today_iso = to_local_date_iso(today);
        if state.last_reset_date_iso != today_iso {
            let updated = EnergyState {
                remaining: MAX_ENERGY,
                last_reset_date_iso: today_iso,
                ..state
            };
            self.write_state(&updated)?;
            debug!("energy refilled for new day");
            return Ok(updated);
        }
        Ok(state)
    }

    /// Spend one unit of today's quota; never goes below zero.
    pub fn consume(&self) -> Result<EnergyState> {
        self.consume_on(local_today())
    }

    pub fn consume_on(&self, today: NaiveDate) -> Result<EnergyState> {
        let state = self.reset_if_new_day(today)?;
        if state.is_premium || state.remaining == 0 {
            return Ok(state);
        }
        let updated = EnergyState {
            remaining: state.remaining - 1,
            ..state
        };
        self.write_state(&updated)?;
        Ok(updated)
    }

    /// Grant one unit back (reward flow); never exceeds [`MAX_ENERGY`].
    pub fn restore_one(&self) -> Result<EnergyState> {
        self.restore_one_on(local_today())
    }

    pub fn restore_one_on(&self, today: NaiveDate) -> Result<EnergyState> {
        let state = self.reset_if_new_day(today)?;
        if state.is_premium {
            return Ok(state);
        }
        let updated = EnergyState {
            remaining: (state.remaining + 1).min(MAX_ENERGY),
            ..state
        };
        self.write_state(&updated)?;
        Ok(updated)
    }

    /// Flip the premium flag (purchase/restore flow).
    pub fn set_premium(&self, is_premium: bool) -> Result<EnergyState> {
        let state = self.read_state(local_today())?;
        let updated = EnergyState {
            is_premium,
            ..state
        };
        self.write_state(&updated)?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKv;

    fn date(iso: &str) -> NaiveDate {
        crate::date::parse_date_iso(iso).unwrap()
    }

    #[test]
    fn provides_defaults_on_first_run() {
        let kv = MemoryKv::new();
        let meter = EnergyMeter::new(&kv);
        let state = meter.state().unwrap();
        assert_eq!(state.remaining, 3);
        assert!(!state.is_premium);
        assert_eq!(state.last_reset_date_iso, to_local_date_iso(local_today()));
    }

    #[test]
    fn heals_malformed_state() {
        let kv = MemoryKv::new();
        kv.kv_set(ENERGY_KEY, "{not json").unwrap();
        let meter = EnergyMeter::new(&kv);
        assert_eq!(meter.state().unwrap().remaining, MAX_ENERGY);

        // Wrong shape is also discarded.
        kv.kv_set(ENERGY_KEY, r#"{"remaining":"lots"}"#).unwrap();
        assert_eq!(meter.state().unwrap().remaining, MAX_ENERGY);
    }

    #[test]
    fn resets_when_the_date_changes() {
        let kv = MemoryKv::new();
        let meter = EnergyMeter::new(&kv);
        kv.kv_set(
            ENERGY_KEY,
            r#"{"remaining":0,"last_reset_date_iso":"2025-02-01","is_premium":false}"#,
        )
        .unwrap();

        let updated = meter.reset_if_new_day(date("2025-02-02")).unwrap();
        assert_eq!(updated.remaining, 3);
        assert_eq!(updated.last_reset_date_iso, "2025-02-02");
    }

    #[test]
    fn same_day_reset_is_a_no_op() {
        let kv = MemoryKv::new();
        let meter = EnergyMeter::new(&kv);
        kv.kv_set(
            ENERGY_KEY,
            r#"{"remaining":1,"last_reset_date_iso":"2025-02-02","is_premium":false}"#,
        )
        .unwrap();

        let state = meter.reset_if_new_day(date("2025-02-02")).unwrap();
        assert_eq!(state.remaining, 1);
    }

    #[test]
    fn consume_never_goes_negative() {
        let kv = MemoryKv::new();
        let meter = EnergyMeter::new(&kv);
        let today = date("2025-02-02");
        kv.kv_set(
            ENERGY_KEY,
            r#"{"remaining":1,"last_reset_date_iso":"2025-02-02","is_premium":false}"#,
        )
        .unwrap();

        assert_eq!(meter.consume_on(today).unwrap().remaining, 0);
        assert_eq!(meter.consume_on(today).unwrap().remaining, 0);
    }

    #[test]
    fn restore_caps_at_max() {
        let kv = MemoryKv::new();
        let meter = EnergyMeter::new(&kv);
        let today = date("2025-02-02");
        kv.kv_set(
            ENERGY_KEY,
            r#"{"remaining":2,"last_reset_date_iso":"2025-02-02","is_premium":false}"#,
        )
        .unwrap();

        assert_eq!(meter.restore_one_on(today).unwrap().remaining, 3);
        assert_eq!(meter.restore_one_on(today).unwrap().remaining, 3);
    }

    #[test]
    fn premium_ignores_the_quota() {
        let kv = MemoryKv::new();
        let meter = EnergyMeter::new(&kv);
        let today = date("2025-02-02");
        kv.kv_set(
            ENERGY_KEY,
            r#"{"remaining":2,"last_reset_date_iso":"2025-02-02","is_premium":true}"#,
        )
        .unwrap();

        assert_eq!(meter.consume_on(today).unwrap().remaining, 2);
        assert_eq!(meter.restore_one_on(today).unwrap().remaining, 2);
    }
}
