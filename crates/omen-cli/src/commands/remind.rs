use clap::Subcommand;
use omen_core::{Database, PermissionStatus, ReminderScheduler, ReminderService};
use tracing::info;
use uuid::Uuid;

/// Scheduler for a terminal environment: it records the schedule in the
/// store and leaves OS-level delivery to a desktop shell.
struct LocalScheduler;

impl ReminderScheduler for LocalScheduler {
    fn permission_status(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    fn request_permission(&mut self) -> omen_core::Result<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    fn schedule_daily(&mut self, hour: u32, minute: u32) -> omen_core::Result<String> {
        info!("daily reminder registered for {hour:02}:{minute:02}");
        Ok(format!("sched_{}", Uuid::new_v4().simple()))
    }

    fn cancel(&mut self, _id: &str) -> omen_core::Result<()> {
        Ok(())
    }
}

#[derive(Subcommand)]
pub enum RemindAction {
    /// Schedule the daily reminder at HH:MM
    Set { time: String },
    /// Cancel the daily reminder
    Cancel,
    /// Show the reminder state
    Status,
}

pub fn run(action: RemindAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut scheduler = LocalScheduler;
    let mut service = ReminderService::new(&db, &mut scheduler);

    match action {
        RemindAction::Set { time } => {
            service.request_permission()?;
            let id = service.schedule_daily(&time)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "scheduled": id.is_some(),
                    "time": time,
                }))?
            );
        }
        RemindAction::Cancel => {
            service.cancel()?;
            println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "scheduled": false }))?);
        }
        RemindAction::Status => {
            println!("{}", serde_json::to_string_pretty(&service.status()?)?);
        }
    }
    Ok(())
}
