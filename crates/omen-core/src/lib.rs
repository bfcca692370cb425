//! # Omen Core Library
//!
//! This library provides the core business logic for Omen, a guidance-card
//! journal. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with any GUI shell being a thin
//! layer over the same core library.
//!
//! ## Architecture
//!
//! - **Content engine**: built-in weighted card packs, a pure inverse-CDF
//!   sampler over pluggable uniform sources, and a seeded deterministic
//!   daily pick
//! - **State machines**: the energy quota and the daily seed/streak
//!   counters, both over an injected key-value port
//! - **Storage**: SQLite journal of draw events plus a kv table, with
//!   versioned migrations
//!
//! ## Key Components
//!
//! - [`EnergyMeter`]: daily quota state machine
//! - [`DailyTracker`] / [`daily_card`]: seed, streak and the daily flow
//! - [`Database`]: journal and key-value persistence
//! - [`deterministic_daily_pick`]: reproducible card-of-the-day selection

pub mod content;
pub mod daily;
pub mod date;
pub mod energy;
pub mod error;
pub mod reminder;
pub mod settings;
pub mod storage;

pub use content::{
    deterministic_daily_pick, find_card_by_id, get_builtin_packs, pick_for_intent, pick_random,
    pick_unique_cards, pick_weighted, Category, IntentFilter, MessageCard, Mulberry32, Pack,
    PackId, Tone,
};
pub use daily::{daily_card, DailyDraw, DailyTracker};
pub use energy::{EnergyMeter, EnergyState, MAX_ENERGY};
pub use error::{CoreError, DatabaseError, Result, ValidationError};
pub use reminder::{
    parse_time_hhmm, PermissionStatus, ReminderScheduler, ReminderService, ReminderStatus,
};
pub use settings::{Settings, SettingsStore};
pub use storage::{Database, DrawMode, DrawRecord, KvStore, ListDrawsOptions, MemoryKv};
