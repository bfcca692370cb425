//! Built-in card packs.
//!
//! Content ships with the binary; nothing is loaded at runtime. Weights
//! bias the draw toward a pack's anchor cards and are not required to sum
//! to anything in particular.

use serde::Serialize;

use super::{Category, MessageCard, PackId, Tone};

/// A named, ordered collection of message cards.
#[derive(Debug, Clone, Serialize)]
pub struct Pack {
    pub id: PackId,
    pub name: String,
    pub description: String,
    pub cards: Vec<MessageCard>,
}

/// Returns all built-in packs, in default order.
pub fn get_builtin_packs() -> Vec<Pack> {
    vec![free_pack(), love_pack(), career_pack(), finance_pack()]
}

/// The built-in pack for an id.
pub fn find_pack(id: PackId) -> Pack {
    match id {
        PackId::Free => free_pack(),
        PackId::Love => love_pack(),
        PackId::Career => career_pack(),
        PackId::Finance => finance_pack(),
    }
}

/// Cards of a pack, in storage order.
pub fn load_pack(id: PackId) -> Vec<MessageCard> {
    find_pack(id).cards
}

fn card(id: &str, text: &str, category: Category, tone: Tone, weight: f64) -> MessageCard {
    MessageCard {
        id: id.to_string(),
        text: text.to_string(),
        category,
        tone,
        weight,
    }
}

fn free_pack() -> Pack {
    Pack {
        id: PackId::Free,
        name: "Signs".to_string(),
        description: "Everyday guidance, free for every reader".to_string(),
        cards: vec![
            card(
                "free-first-step",
                "Begin before you feel ready; the first small step clears the fog.",
                Category::Action,
                Tone::Steady,
                2.0,
            ),
            card(
                "free-quiet-hour",
                "Guard one quiet hour today and let it belong only to you.",
                Category::Grounding,
                Tone::Soft,
                1.0,
            ),
            card(
                "free-open-hand",
                "Hold today's plan with an open hand; room is how luck arrives.",
                Category::Reflection,
                Tone::Neutral,
                1.0,
            ),
            card(
                "free-small-spark",
                "Tend the small spark you already carry before borrowing fire.",
                Category::Growth,
                Tone::Uplifting,
                1.0,
            ),
            card(
                "free-steady-breath",
                "When the pace quickens, let your breath be the steadiest clock in the room.",
                Category::Grounding,
                Tone::Steady,
                1.5,
            ),
            card(
                "free-honest-line",
                "Write the honest sentence first; the rest of the page will follow it.",
                Category::Clarity,
                Tone::Bold,
                1.0,
            ),
            card(
                "free-kind-word",
                "One kind word placed well travels farther than a page of advice.",
                Category::Connection,
                Tone::Soft,
                1.0,
            ),
            card(
                "free-turn-page",
                "You are allowed to close a chapter that no longer reads true.",
                Category::Ritual,
                Tone::Neutral,
                0.5,
            ),
        ],
    }
}

fn love_pack() -> Pack {
    Pack {
        id: PackId::Love,
        name: "Love".to_string(),
        description: "Messages for matters of the heart".to_string(),
        cards: vec![
            card(
                "love-first-listen",
                "Listen once more before you answer; most arguments are unfinished sentences.",
                Category::Connection,
                Tone::Soft,
                2.0,
            ),
            card(
                "love-own-weather",
                "Bring your own weather to the relationship instead of forecasting theirs.",
                Category::Reflection,
                Tone::Steady,
                1.0,
            ),
            card(
                "love-small-ritual",
                "Repeat the small ritual you both love; repetition is how homes are built.",
                Category::Ritual,
                Tone::Uplifting,
                1.0,
            ),
            card(
                "love-brave-ask",
                "Ask plainly for what you want; hints are a tax on both of you.",
                Category::Action,
                Tone::Bold,
                1.0,
            ),
            card(
                "love-old-letter",
                "Reread the old letter kindly; you were both younger then.",
                Category::Reflection,
                Tone::Soft,
                1.0,
            ),
            card(
                "love-shared-silence",
                "A shared silence you can rest in is worth a thousand clever replies.",
                Category::Grounding,
                Tone::Neutral,
                1.0,
            ),
            card(
                "love-open-door",
                "Leave the door open behind your apology; let them choose to walk through.",
                Category::Connection,
                Tone::Steady,
                1.0,
            ),
            card(
                "love-new-eyes",
                "Look at a familiar face with new eyes tonight.",
                Category::Growth,
                Tone::Uplifting,
                0.5,
            ),
        ],
    }
}

fn career_pack() -> Pack {
    Pack {
        id: PackId::Career,
        name: "Career".to_string(),
        description: "Messages for work and ambition".to_string(),
        cards: vec![
            card(
                "career-deep-block",
                "Protect one deep block of work; the shallow tasks will still be there after.",
                Category::Focus,
                Tone::Steady,
                2.0,
            ),
            card(
                "career-name-win",
                "Name yesterday's win out loud before chasing today's.",
                Category::Reflection,
                Tone::Uplifting,
                1.0,
            ),
            card(
                "career-ask-scope",
                "Before you say yes, ask what done looks like.",
                Category::Clarity,
                Tone::Bold,
                1.0,
            ),
            card(
                "career-quiet-craft",
                "Let the quality of the quiet work speak where you cannot.",
                Category::Growth,
                Tone::Neutral,
                1.0,
            ),
            card(
                "career-one-thread",
                "Pull one thread all the way through instead of starting three.",
                Category::Focus,
                Tone::Steady,
                1.5,
            ),
            card(
                "career-borrowed-eyes",
                "Borrow a colleague's eyes early; pride is expensive late.",
                Category::Connection,
                Tone::Soft,
                1.0,
            ),
            card(
                "career-own-pace",
                "A career is a long walk; keep a pace you can hold for years.",
                Category::Grounding,
                Tone::Steady,
                1.0,
            ),
            card(
                "career-close-loop",
                "Close one open loop today, however small.",
                Category::Action,
                Tone::Neutral,
                0.5,
            ),
        ],
    }
}

fn finance_pack() -> Pack {
    Pack {
        id: PackId::Finance,
        name: "Finance".to_string(),
        description: "Messages for money and means".to_string(),
        cards: vec![
            card(
                "finance-count-calm",
                "Count what you have calmly before counting what you lack.",
                Category::Grounding,
                Tone::Steady,
                2.0,
            ),
            card(
                "finance-small-leak",
                "Mend the small leak before admiring the big sail.",
                Category::Action,
                Tone::Neutral,
                1.0,
            ),
            card(
                "finance-future-self",
                "Set aside a coin for the person you will be in ten winters.",
                Category::Growth,
                Tone::Soft,
                1.0,
            ),
            card(
                "finance-honest-ledger",
                "An honest ledger is a kind of courage; open it.",
                Category::Clarity,
                Tone::Bold,
                1.0,
            ),
            card(
                "finance-enough-line",
                "Draw the line called enough and visit it often.",
                Category::Reflection,
                Tone::Steady,
                1.5,
            ),
            card(
                "finance-slow-yes",
                "Give expensive decisions a slow yes or a fast no.",
                Category::Focus,
                Tone::Neutral,
                1.0,
            ),
            card(
                "finance-shared-table",
                "Money talks best at a shared table, not in a held breath.",
                Category::Connection,
                Tone::Soft,
                1.0,
            ),
            card(
                "finance-plant-seed",
                "Plant one seed whose shade you may never sit in.",
                Category::Ritual,
                Tone::Uplifting,
                0.5,
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn all_packs_have_valid_cards() {
        let packs = get_builtin_packs();
        assert_eq!(packs.len(), PackId::ALL.len());

        for pack in &packs {
            assert!(!pack.name.is_empty());
            assert!(!pack.description.is_empty());
            assert!(!pack.cards.is_empty());
            for card in &pack.cards {
                assert!(!card.text.is_empty());
                assert!(card.weight > 0.0);
                assert!(
                    card.id.starts_with(pack.id.as_str()),
                    "card {} does not carry its pack prefix",
                    card.id
                );
            }
        }
    }

    #[test]
    fn card_ids_are_unique_across_packs() {
        let mut seen = HashSet::new();
        for pack in get_builtin_packs() {
            for card in pack.cards {
                assert!(seen.insert(card.id.clone()), "duplicate card id {}", card.id);
            }
        }
    }

    #[test]
    fn load_pack_returns_cards_in_storage_order() {
        let cards = load_pack(PackId::Free);
        assert_eq!(cards.first().map(|c| c.id.as_str()), Some("free-first-step"));
        assert_eq!(cards.last().map(|c| c.id.as_str()), Some("free-turn-page"));
    }
}
