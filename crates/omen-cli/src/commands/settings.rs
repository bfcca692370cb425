use clap::Subcommand;
use omen_core::{Database, SettingsStore};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show all settings
    List,
    /// Show one setting
    Get { key: String },
    /// Change one setting
    Set { key: String, value: String },
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let store = SettingsStore::new(&db);

    match action {
        SettingsAction::List => {
            println!("{}", serde_json::to_string_pretty(&store.load()?)?);
        }
        SettingsAction::Get { key } => match store.get(&key)? {
            Some(value) => println!("{value}"),
            None => return Err(format!("unknown settings key: {key}").into()),
        },
        SettingsAction::Set { key, value } => {
            let settings = store.set(&key, &value)?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }
    Ok(())
}
