use omen_core::daily::daily_card;
use omen_core::date::local_today;
use omen_core::Database;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    match daily_card(&db, local_today())? {
        Some(draw) => {
            println!("{}", serde_json::to_string_pretty(&draw)?);
            Ok(())
        }
        None => Err("no cards available for the daily pick".into()),
    }
}
