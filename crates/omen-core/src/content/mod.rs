//! Static message-card content and the selection engine.
//!
//! Packs are built into the binary; cards are immutable for the process
//! lifetime. Selection comes in two flavors: weighted random draws fed by
//! any uniform source, and a seeded deterministic daily pick.

pub mod packs;
pub mod seed;
pub mod select;

pub use packs::{find_pack, get_builtin_packs, load_pack, Pack};
pub use seed::{deterministic_daily_pick, Mulberry32};
pub use select::{
    find_card_by_id, pick_for_intent, pick_random, pick_unique_cards, pick_weighted, IntentFilter,
};

use serde::{Deserialize, Serialize};

/// Identifier of a built-in card pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackId {
    Free,
    Love,
    Career,
    Finance,
}

impl PackId {
    /// The full default pack set, in declaration order.
    pub const ALL: [PackId; 4] = [PackId::Free, PackId::Love, PackId::Career, PackId::Finance];

    pub fn as_str(&self) -> &'static str {
        match self {
            PackId::Free => "free",
            PackId::Love => "love",
            PackId::Career => "career",
            PackId::Finance => "finance",
        }
    }
}

impl std::fmt::Display for PackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PackId {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "free" => Ok(PackId::Free),
            "love" => Ok(PackId::Love),
            "career" => Ok(PackId::Career),
            "finance" => Ok(PackId::Finance),
            other => Err(format!("unknown pack id: {other}")),
        }
    }
}

/// Thematic category of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Ritual,
    Reflection,
    Action,
    Grounding,
    Connection,
    Focus,
    Growth,
    Clarity,
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ritual" => Ok(Category::Ritual),
            "reflection" => Ok(Category::Reflection),
            "action" => Ok(Category::Action),
            "grounding" => Ok(Category::Grounding),
            "connection" => Ok(Category::Connection),
            "focus" => Ok(Category::Focus),
            "growth" => Ok(Category::Growth),
            "clarity" => Ok(Category::Clarity),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// Voice a card is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Soft,
    Bold,
    Neutral,
    Uplifting,
    Steady,
}

impl std::str::FromStr for Tone {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "soft" => Ok(Tone::Soft),
            "bold" => Ok(Tone::Bold),
            "neutral" => Ok(Tone::Neutral),
            "uplifting" => Ok(Tone::Uplifting),
            "steady" => Ok(Tone::Steady),
            other => Err(format!("unknown tone: {other}")),
        }
    }
}

fn default_weight() -> f64 {
    1.0
}

/// One guidance message. Ids are `<pack>-<slug>` and unique across packs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageCard {
    pub id: String,
    pub text: String,
    pub category: Category,
    pub tone: Tone,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

/// Pack prefix of a card id (`"free-first-step"` -> `"free"`).
pub fn pack_prefix(card_id: &str) -> &str {
    card_id.split('-').next().unwrap_or(card_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_ids_round_trip_through_strings() {
        for id in PackId::ALL {
            assert_eq!(id.as_str().parse::<PackId>().unwrap(), id);
        }
        assert!("tarot".parse::<PackId>().is_err());
    }

    #[test]
    fn card_weight_defaults_to_one() {
        let card: MessageCard = serde_json::from_str(
            r#"{"id":"free-x","text":"x","category":"clarity","tone":"neutral"}"#,
        )
        .unwrap();
        assert_eq!(card.weight, 1.0);
    }

    #[test]
    fn pack_prefix_splits_on_first_dash() {
        assert_eq!(pack_prefix("free-first-step"), "free");
        assert_eq!(pack_prefix("nodash"), "nodash");
    }
}
