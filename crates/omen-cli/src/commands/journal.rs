use clap::Subcommand;
use omen_core::{Database, ListDrawsOptions};

#[derive(Subcommand)]
pub enum JournalAction {
    /// List recent draws, newest first
    List {
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        offset: Option<usize>,
        /// Substring match against question and note
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one draw
    Show { id: String },
    /// Set or clear the note on a draw
    Note {
        id: String,
        text: Option<String>,
        #[arg(long, conflicts_with = "text")]
        clear: bool,
    },
    /// Toggle the favorite mark on a draw
    Favorite { id: String },
    /// List favorited draws, newest favorite first
    Favorites,
}

pub fn run(action: JournalAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        JournalAction::List {
            limit,
            offset,
            search,
        } => {
            let draws = db.list_draws(&ListDrawsOptions {
                limit,
                offset,
                search_text: search,
            })?;
            println!("{}", serde_json::to_string_pretty(&draws)?);
        }
        JournalAction::Show { id } => match db.get_draw(&id)? {
            Some(draw) => {
                let favorited = db.is_favorite(&id)?;
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "draw": draw,
                        "favorited": favorited,
                    }))?
                );
            }
            None => return Err(format!("no draw with id {id}").into()),
        },
        JournalAction::Note { id, text, clear } => {
            if text.is_none() && !clear {
                return Err("provide note text or --clear".into());
            }
            let note = if clear { None } else { text.as_deref() };
            db.update_draw_note(&id, note)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "draw_id": id,
                    "note": note,
                }))?
            );
        }
        JournalAction::Favorite { id } => {
            let favorited = db.toggle_favorite(&id)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "draw_id": id,
                    "favorited": favorited,
                }))?
            );
        }
        JournalAction::Favorites => {
            let draws = db.list_favorites()?;
            println!("{}", serde_json::to_string_pretty(&draws)?);
        }
    }
    Ok(())
}
