use omen_core::content::pack_prefix;
use omen_core::date::local_today;
use omen_core::storage::journal::{generate_draw_id, now_millis};
use omen_core::{
    pick_for_intent, pick_unique_cards, Category, Database, DrawMode, DrawRecord, EnergyMeter,
    IntentFilter, PackId, Tone,
};

fn blocked(meter: &EnergyMeter<'_, Database>) -> Result<bool, Box<dyn std::error::Error>> {
    let state = meter.reset_if_new_day(local_today())?;
    Ok(!state.is_premium && state.remaining == 0)
}

pub fn run_ritual(
    intent: Option<String>,
    tone: Option<String>,
    packs: Vec<String>,
    question: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let meter = EnergyMeter::new(&db);
    if blocked(&meter)? {
        return Err("no energy remaining today; try `omen energy restore`".into());
    }

    let filter = IntentFilter {
        intent: intent.as_deref().map(str::parse::<Category>).transpose()?,
        tone: tone.as_deref().map(str::parse::<Tone>).transpose()?,
        pack_ids: packs
            .iter()
            .map(|p| p.parse::<PackId>())
            .collect::<Result<Vec<_>, _>>()?,
    };
    let Some(card) = pick_for_intent(&filter) else {
        return Err("no card matches that intent".into());
    };

    let state = meter.consume()?;
    let record = DrawRecord {
        id: generate_draw_id(),
        created_at: now_millis(),
        mode: DrawMode::Ritual,
        card_ids: vec![card.id.clone()],
        pack_ids: vec![pack_prefix(&card.id).to_string()],
        card_text: None,
        question,
        note: None,
        is_daily: false,
    };
    db.add_draw(&record)?;

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "draw_id": record.id,
            "card": card,
            "energy_remaining": state.remaining,
        }))?
    );
    Ok(())
}

pub fn run_spread(count: usize) -> Result<(), Box<dyn std::error::Error>> {
    if count != 1 && count != 3 {
        return Err("spread count must be 1 or 3".into());
    }

    let db = Database::open()?;
    let meter = EnergyMeter::new(&db);
    if blocked(&meter)? {
        return Err("no energy remaining today; try `omen energy restore`".into());
    }

    let cards = pick_unique_cards(count);
    if cards.is_empty() {
        return Err("no cards available".into());
    }

    let mut pack_ids: Vec<String> = Vec::new();
    for card in &cards {
        let prefix = pack_prefix(&card.id).to_string();
        if !pack_ids.contains(&prefix) {
            pack_ids.push(prefix);
        }
    }

    let record = DrawRecord {
        id: generate_draw_id(),
        created_at: now_millis(),
        mode: if count == 1 {
            DrawMode::Spread1
        } else {
            DrawMode::Spread3
        },
        card_ids: cards.iter().map(|card| card.id.clone()).collect(),
        pack_ids,
        card_text: Some(
            cards
                .iter()
                .map(|card| card.text.as_str())
                .collect::<Vec<_>>()
                .join(" | "),
        ),
        question: None,
        note: None,
        is_daily: false,
    };
    db.add_draw(&record)?;

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "draw_id": record.id,
            "cards": cards,
        }))?
    );
    Ok(())
}
