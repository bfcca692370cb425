use clap::Subcommand;
use omen_core::content::{find_pack, get_builtin_packs, PackId};

#[derive(Subcommand)]
pub enum PacksAction {
    /// List the built-in packs
    List,
    /// Show one pack with its cards
    Show { id: String },
}

pub fn run(action: PacksAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PacksAction::List => {
            let summaries: Vec<serde_json::Value> = get_builtin_packs()
                .into_iter()
                .map(|pack| {
                    serde_json::json!({
                        "id": pack.id,
                        "name": pack.name,
                        "description": pack.description,
                        "cards": pack.cards.len(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        PacksAction::Show { id } => {
            let pack_id: PackId = id.parse()?;
            println!("{}", serde_json::to_string_pretty(&find_pack(pack_id))?);
        }
    }
    Ok(())
}
