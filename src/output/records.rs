//! Renderer interchange records and deck statistics.
//!
//! Field names are camelCase on the wire. A manipulation card serializes
//! with `goal: null`, `reward: null`, and `manipulation: true`; the
//! renderer shows those as goal-less market cards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::Color;
use crate::score::{FinalCard, RewardEffect, RewardTier};
use crate::GeneratedDeck;

/// One card as the renderer sees it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub stock_change: StockChangeRecord,
    /// `None` for manipulation cards.
    pub goal: Option<GoalRecord>,
    /// `None` for manipulation cards.
    pub reward: Option<RewardRecord>,
    /// True for goal-less market-manipulation cards.
    pub manipulation: bool,
    pub metadata: CardMetadata,
}

/// The stock change a card carries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockChangeRecord {
    /// Stable kind identifier, e.g. `"single_up"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Display text, e.g. `"Blue +1, Orange -1"`.
    pub text: String,
    /// Per-color signed deltas, only touched colors present.
    pub changes: BTreeMap<Color, i8>,
}

/// A card's goal, as text plus identifiers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRecord {
    /// Display text, e.g. `"2 Blue + 1 Orange"`.
    pub text: String,
    /// Stable goal-kind identifier, e.g. `"pair"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Base difficulty score of the goal.
    pub difficulty: i32,
}

/// A card's reward: text plus the typed interpretation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardRecord {
    pub text: String,
    pub effect: RewardEffect,
    pub tier: RewardTier,
    pub requires_target_player: bool,
    pub requires_player_choice: bool,
}

/// Bookkeeping the renderer doesn't draw but tooling wants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMetadata {
    /// Score penalty of the carried stock change.
    pub penalty: i32,
    /// Final score; `None` for manipulation cards.
    pub score: Option<i32>,
}

/// Build the interchange records for a generated deck, in deck order.
#[must_use]
pub fn to_records(deck: &GeneratedDeck) -> Vec<CardRecord> {
    deck.cards
        .iter()
        .map(|card| card_record(card, &deck.palette))
        .collect()
}

/// Serialize records as pretty-printed JSON.
pub fn to_json(records: &[CardRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

fn card_record(card: &FinalCard, palette: &[Color]) -> CardRecord {
    let changes: BTreeMap<Color, i8> = card.change.touched().collect();

    CardRecord {
        stock_change: StockChangeRecord {
            kind: card.change.kind.name().to_string(),
            text: card.change.text(),
            changes,
        },
        goal: card.card.kind.text(palette).map(|text| GoalRecord {
            text,
            kind: card.card.kind.name().to_string(),
            difficulty: card.card.difficulty,
        }),
        reward: card.reward.map(|reward| RewardRecord {
            text: reward.text(),
            effect: reward.effect,
            tier: reward.tier,
            requires_target_player: reward.effect.requires_target_player(),
            requires_player_choice: reward.effect.requires_player_choice(),
        }),
        manipulation: !card.card.kind.has_goal(),
        metadata: CardMetadata {
            penalty: card.penalty,
            score: card.score,
        },
    }
}

/// Deck-level statistics for the diagnostic channel.
#[derive(Clone, Debug, Serialize)]
pub struct DeckStats {
    pub total_cards: usize,
    pub tier_counts: BTreeMap<RewardTier, usize>,
    pub goal_kind_counts: BTreeMap<String, usize>,
    pub net: BTreeMap<Color, i64>,
    pub frequency_spread: u32,
    pub balanced: bool,
}

impl DeckStats {
    /// Collect statistics from a generated deck.
    #[must_use]
    pub fn from_deck(deck: &GeneratedDeck) -> Self {
        let mut tier_counts = BTreeMap::new();
        let mut goal_kind_counts = BTreeMap::new();
        for card in &deck.cards {
            if let Some(reward) = card.reward {
                *tier_counts.entry(reward.tier).or_insert(0) += 1;
            }
            *goal_kind_counts
                .entry(card.card.kind.name().to_string())
                .or_insert(0) += 1;
        }

        let net: BTreeMap<Color, i64> = deck
            .palette
            .iter()
            .map(|&c| (c, deck.net[c]))
            .collect();
        let balanced = net.values().all(|&n| n == 0);
        let frequency_spread =
            deck.frequency.max_over(&deck.palette) - deck.frequency.min_over(&deck.palette);

        Self {
            total_cards: deck.cards.len(),
            tier_counts,
            goal_kind_counts,
            net,
            frequency_spread,
            balanced,
        }
    }
}

impl std::fmt::Display for DeckStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "total cards: {}", self.total_cards)?;

        let tiers: Vec<String> = self
            .tier_counts
            .iter()
            .map(|(tier, count)| format!("{tier}: {count}"))
            .collect();
        writeln!(f, "reward tiers: {}", tiers.join(", "))?;

        let kinds: Vec<String> = self
            .goal_kind_counts
            .iter()
            .map(|(kind, count)| format!("{kind}: {count}"))
            .collect();
        writeln!(f, "goal kinds: {}", kinds.join(", "))?;

        let net: Vec<String> = self
            .net
            .iter()
            .map(|(color, n)| format!("{color} {n:+}"))
            .collect();
        writeln!(f, "net changes: {}", net.join(", "))?;
        writeln!(f, "frequency spread: {}", self.frequency_spread)?;
        write!(f, "balanced: {}", self.balanced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign::EngineConfig;
    use crate::catalog::DeckCatalog;

    fn deck(seed: u64, manipulation: usize) -> GeneratedDeck {
        let mut catalog = DeckCatalog::standard();
        if manipulation > 0 {
            catalog = catalog.with_manipulation(manipulation).unwrap();
        }
        crate::generate(&catalog, &EngineConfig::default(), seed).unwrap()
    }

    #[test]
    fn test_records_shape() {
        let records = to_records(&deck(42, 0));

        assert_eq!(records.len(), 26);
        for record in &records {
            let goal = record.goal.as_ref().expect("standard deck has no goal-less cards");
            assert!(!goal.text.is_empty());
            assert!(record.reward.is_some());
            assert!(!record.manipulation);
            assert!(!record.stock_change.changes.is_empty());
        }
    }

    #[test]
    fn test_manipulation_record_is_null_goal() {
        let records = to_records(&deck(8, 2));

        let manipulation: Vec<_> = records.iter().filter(|r| r.manipulation).collect();
        assert_eq!(manipulation.len(), 2);
        for record in manipulation {
            assert!(record.goal.is_none());
            assert!(record.reward.is_none());
            assert_eq!(record.metadata.score, None);
        }
    }

    #[test]
    fn test_json_uses_camel_case_wire_names() {
        let records = to_records(&deck(42, 0));
        let json = serde_json::to_value(&records).unwrap();

        let first = &json[0];
        assert!(first.get("stockChange").is_some());
        assert!(first["stockChange"].get("type").is_some());
        assert!(first["stockChange"].get("text").is_some());
        assert!(first["reward"].get("requiresTargetPlayer").is_some());
        assert!(first["reward"].get("requiresPlayerChoice").is_some());
        assert!(first["goal"].get("difficulty").is_some());
    }

    #[test]
    fn test_changes_keyed_by_color_name() {
        let records = to_records(&deck(42, 0));
        let json = serde_json::to_value(&records).unwrap();

        let changes = json[0]["stockChange"]["changes"]
            .as_object()
            .expect("changes is a map");
        for key in changes.keys() {
            assert!(Color::ALL.iter().any(|c| c.name() == key), "bad key {key}");
        }
    }

    #[test]
    fn test_round_trip() {
        let records = to_records(&deck(4, 0));
        let json = to_json(&records).unwrap();
        let back: Vec<CardRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(records, back);
    }

    #[test]
    fn test_stats() {
        let generated = deck(42, 0);
        let stats = DeckStats::from_deck(&generated);

        assert_eq!(stats.total_cards, 26);
        assert!(stats.balanced);
        assert_eq!(stats.tier_counts.values().sum::<usize>(), 26);

        let text = stats.to_string();
        assert!(text.contains("total cards: 26"));
        assert!(text.contains("balanced: true"));
    }
}
