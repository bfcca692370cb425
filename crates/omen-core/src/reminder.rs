//! Daily reminder scheduling.
//!
//! The core validates the time and tracks what is scheduled; the actual
//! OS-level delivery belongs to whatever implements [`ReminderScheduler`].

use serde::Serialize;
use tracing::debug;

use crate::error::{Result, ValidationError};
use crate::storage::KvStore;

const REMINDER_ID_KEY: &str = "daily_notification_id";
const REMINDER_TIME_KEY: &str = "daily_notification_time";

/// Parses an `HH:MM` wall-clock time. Both parts must be numeric and in
/// range (hour 0-23, minute 0-59).
pub fn parse_time_hhmm(value: &str) -> Result<(u32, u32), ValidationError> {
    let invalid = |message: &str| ValidationError::InvalidValue {
        field: "time".to_string(),
        message: message.to_string(),
    };

    let (hour_part, minute_part) = value
        .split_once(':')
        .ok_or_else(|| invalid("expected HH:MM"))?;
    let hour: u32 = hour_part
        .parse()
        .map_err(|_| invalid("hour is not a number"))?;
    let minute: u32 = minute_part
        .parse()
        .map_err(|_| invalid("minute is not a number"))?;
    if hour > 23 {
        return Err(invalid("hour out of range"));
    }
    if minute > 59 {
        return Err(invalid("minute out of range"));
    }
    Ok((hour, minute))
}

/// Permission state of the scheduling backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
    Unavailable,
}

/// The external scheduling collaborator.
pub trait ReminderScheduler {
    /// Whether this environment can deliver reminders at all.
    fn is_supported(&self) -> bool {
        true
    }

    fn permission_status(&self) -> PermissionStatus;

    /// Ask the backend for permission; may prompt the user.
    fn request_permission(&mut self) -> Result<PermissionStatus>;

    /// Register a repeating daily reminder; returns a backend id.
    fn schedule_daily(&mut self, hour: u32, minute: u32) -> Result<String>;

    /// Remove a previously registered reminder.
    fn cancel(&mut self, id: &str) -> Result<()>;
}

/// What the caller can display about the reminder state.
#[derive(Debug, Clone, Serialize)]
pub struct ReminderStatus {
    pub supported: bool,
    pub scheduled_time: Option<String>,
    pub permission: PermissionStatus,
}

/// Reminder state over an injected kv port and scheduling backend.
pub struct ReminderService<'a, S: KvStore, N: ReminderScheduler> {
    store: &'a S,
    scheduler: &'a mut N,
}

impl<'a, S: KvStore, N: ReminderScheduler> ReminderService<'a, S, N> {
    pub fn new(store: &'a S, scheduler: &'a mut N) -> Self {
        Self { store, scheduler }
    }

    /// Request permission if it is not already granted.
    pub fn request_permission(&mut self) -> Result<PermissionStatus> {
        if !self.scheduler.is_supported() {
            return Ok(PermissionStatus::Unavailable);
        }
        match self.scheduler.permission_status() {
            PermissionStatus::Granted => Ok(PermissionStatus::Granted),
            _ => self.scheduler.request_permission(),
        }
    }

    /// Schedule the daily reminder at `time` (`HH:MM`).
    ///
    /// Unsupported environments return `Ok(None)`; an invalid time is a
    /// rejected operation.
    pub fn schedule_daily(&mut self, time: &str) -> Result<Option<String>> {
        if !self.scheduler.is_supported() {
            return Ok(None);
        }
        let (hour, minute) = parse_time_hhmm(time)?;
        let id = self.scheduler.schedule_daily(hour, minute)?;
        self.store.kv_set(REMINDER_ID_KEY, &id)?;
        self.store.kv_set(REMINDER_TIME_KEY, time)?;
        debug!(time, "scheduled daily reminder");
        Ok(Some(id))
    }

    /// Cancel any scheduled reminder and clear the stored state.
    pub fn cancel(&mut self) -> Result<()> {
        if self.scheduler.is_supported() {
            if let Some(id) = self.store.kv_get(REMINDER_ID_KEY)? {
                self.scheduler.cancel(&id)?;
            }
        }
        self.store.kv_remove(REMINDER_ID_KEY)?;
        self.store.kv_remove(REMINDER_TIME_KEY)?;
        Ok(())
    }

    pub fn status(&self) -> Result<ReminderStatus> {
        if !self.scheduler.is_supported() {
            return Ok(ReminderStatus {
                supported: false,
                scheduled_time: None,
                permission: PermissionStatus::Unavailable,
            });
        }
        Ok(ReminderStatus {
            supported: true,
            scheduled_time: self.store.kv_get(REMINDER_TIME_KEY)?,
            permission: self.scheduler.permission_status(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKv;

    #[derive(Default)]
    struct MockScheduler {
        unsupported: bool,
        granted: bool,
        scheduled: Vec<(u32, u32)>,
        cancelled: Vec<String>,
    }

    impl ReminderScheduler for MockScheduler {
        fn is_supported(&self) -> bool {
            !self.unsupported
        }

        fn permission_status(&self) -> PermissionStatus {
            if self.granted {
                PermissionStatus::Granted
            } else {
                PermissionStatus::Undetermined
            }
        }

        fn request_permission(&mut self) -> Result<PermissionStatus> {
            self.granted = true;
            Ok(PermissionStatus::Granted)
        }

        fn schedule_daily(&mut self, hour: u32, minute: u32) -> Result<String> {
            self.scheduled.push((hour, minute));
            Ok(format!("sched_{}", self.scheduled.len()))
        }

        fn cancel(&mut self, id: &str) -> Result<()> {
            self.cancelled.push(id.to_string());
            Ok(())
        }
    }

    #[test]
    fn parses_valid_times() {
        assert_eq!(parse_time_hhmm("20:00").unwrap(), (20, 0));
        assert_eq!(parse_time_hhmm("07:30").unwrap(), (7, 30));
        assert_eq!(parse_time_hhmm("7:5").unwrap(), (7, 5));
    }

    #[test]
    fn rejects_invalid_times() {
        assert!(parse_time_hhmm("2000").is_err());
        assert!(parse_time_hhmm("ab:30").is_err());
        assert!(parse_time_hhmm("12:cd").is_err());
        assert!(parse_time_hhmm("24:00").is_err());
        assert!(parse_time_hhmm("12:60").is_err());
        assert!(parse_time_hhmm("").is_err());
    }

    #[test]
    fn schedule_persists_id_and_time() {
        let kv = MemoryKv::new();
        let mut scheduler = MockScheduler {
            granted: true,
            ..Default::default()
        };
        let mut service = ReminderService::new(&kv, &mut scheduler);

        let id = service.schedule_daily("08:15").unwrap();
        assert!(id.is_some());
        assert_eq!(
            kv.kv_get(REMINDER_TIME_KEY).unwrap().as_deref(),
            Some("08:15")
        );
        assert_eq!(scheduler.scheduled, vec![(8, 15)]);
    }

    #[test]
    fn schedule_rejects_bad_time_without_touching_storage() {
        let kv = MemoryKv::new();
        let mut scheduler = MockScheduler::default();
        let mut service = ReminderService::new(&kv, &mut scheduler);

        assert!(service.schedule_daily("25:99").is_err());
        assert!(kv.kv_get(REMINDER_TIME_KEY).unwrap().is_none());
        assert!(scheduler.scheduled.is_empty());
    }

    #[test]
    fn cancel_clears_stored_schedule() {
        let kv = MemoryKv::new();
        let mut scheduler = MockScheduler {
            granted: true,
            ..Default::default()
        };
        {
            let mut service = ReminderService::new(&kv, &mut scheduler);
            service.schedule_daily("21:00").unwrap();
            service.cancel().unwrap();
            let status = service.status().unwrap();
            assert!(status.supported);
            assert!(status.scheduled_time.is_none());
        }
        assert_eq!(scheduler.cancelled.len(), 1);
        assert!(kv.kv_get(REMINDER_ID_KEY).unwrap().is_none());
    }

    #[test]
    fn unsupported_backend_degrades_quietly() {
        let kv = MemoryKv::new();
        let mut scheduler = MockScheduler {
            unsupported: true,
            ..Default::default()
        };
        let mut service = ReminderService::new(&kv, &mut scheduler);

        assert!(service.schedule_daily("20:00").unwrap().is_none());
        assert_eq!(
            service.request_permission().unwrap(),
            PermissionStatus::Unavailable
        );
        let status = service.status().unwrap();
        assert!(!status.supported);
        assert_eq!(status.permission, PermissionStatus::Unavailable);
    }

    #[test]
    fn request_permission_prompts_once_needed() {
        let kv = MemoryKv::new();
        let mut scheduler = MockScheduler::default();
        let mut service = ReminderService::new(&kv, &mut scheduler);
        assert_eq!(
            service.request_permission().unwrap(),
            PermissionStatus::Granted
        );
    }
}
