//! User settings blob.
//!
//! Stored as one JSON value in the kv store. Partial or malformed blobs
//! never error: missing fields take their defaults, garbage is discarded
//! wholesale.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, ValidationError};
use crate::reminder::parse_time_hhmm;
use crate::storage::KvStore;

const SETTINGS_KEY: &str = "settings";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    /// Playback volume in `[0, 1]`.
    #[serde(default = "default_sound_volume")]
    pub sound_volume: f64,
    #[serde(default = "default_true")]
    pub haptics_enabled: bool,
    #[serde(default)]
    pub daily_notification_enabled: bool,
    #[serde(default = "default_notification_time")]
    pub daily_notification_time: String,
}

fn default_true() -> bool {
    true
}
fn default_sound_volume() -> f64 {
    0.4
}
fn default_notification_time() -> String {
    "20:00".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            sound_volume: default_sound_volume(),
            haptics_enabled: true,
            daily_notification_enabled: false,
            daily_notification_time: default_notification_time(),
        }
    }
}

/// Settings persistence over an injected kv port.
pub struct SettingsStore<'a, S: KvStore> {
    store: &'a S,
}

impl<'a, S: KvStore> SettingsStore<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Load settings; absent or malformed storage yields defaults.
    pub fn load(&self) -> Result<Settings> {
        match self.store.kv_get(SETTINGS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw).unwrap_or_default()),
            None => Ok(Settings::default()),
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        self.store
            .kv_set(SETTINGS_KEY, &serde_json::to_string(settings)?)
    }

    /// String view of one field, by its serialized name.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let json = serde_json::to_value(self.load()?)?;
        Ok(json.get(key).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }))
    }

    /// Parse and store one field by its serialized name.
    ///
    /// Rejects unknown keys, unparseable values, volumes outside `[0, 1]`
    /// and notification times that are not `HH:MM`.
    pub fn set(&self, key: &str, value: &str) -> Result<Settings> {
        let mut settings = self.load()?;
        match key {
            "sound_enabled" => settings.sound_enabled = parse_bool(key, value)?,
            "haptics_enabled" => settings.haptics_enabled = parse_bool(key, value)?,
            "daily_notification_enabled" => {
                settings.daily_notification_enabled = parse_bool(key, value)?;
            }
            "sound_volume" => {
                let volume: f64 = value
                    .parse()
                    .map_err(|_| invalid(key, "expected a number"))?;
                if !(0.0..=1.0).contains(&volume) {
                    return Err(invalid(key, "must be between 0 and 1").into());
                }
                settings.sound_volume = volume;
            }
            "daily_notification_time" => {
                parse_time_hhmm(value)?;
                settings.daily_notification_time = value.to_string();
            }
            _ => return Err(invalid(key, "unknown settings key").into()),
        }
        self.save(&settings)?;
        Ok(settings)
    }
}

fn invalid(field: &str, message: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn parse_bool(field: &str, value: &str) -> Result<bool, ValidationError> {
    value
        .parse()
        .map_err(|_| invalid(field, "expected true or false"))
}
