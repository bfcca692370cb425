use clap::Subcommand;
use omen_core::date::local_today;
use omen_core::{Database, EnergyMeter};

#[derive(Subcommand)]
pub enum EnergyAction {
    /// Today's quota state
    Status,
    /// Restore one energy (reward flow)
    Restore,
    /// Set the premium flag
    Premium { enabled: bool },
}

pub fn run(action: EnergyAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let meter = EnergyMeter::new(&db);

    let state = match action {
        EnergyAction::Status => meter.reset_if_new_day(local_today())?,
        EnergyAction::Restore => meter.restore_one()?,
        EnergyAction::Premium { enabled } => meter.set_premium(enabled)?,
    };
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}
