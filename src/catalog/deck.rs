//! Deck configuration: the card list, the palette, and per-kind quotas.
//!
//! `DeckCatalog` is validated at construction. A quota table that cannot
//! cover the card list exactly is a configuration error and is rejected
//! here, never absorbed into the assignment retry loop.

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::core::Color;

use super::goal::{CardId, GoalCard, GoalKind};
use super::stock::StockChangeKind;

/// Deck configuration errors. All of these fail fast, before any
/// assignment attempt begins.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The quota table does not cover the card list exactly.
    #[error("quota table covers {quota_total} cards but the catalog has {card_count}")]
    QuotaMismatch { quota_total: usize, card_count: usize },

    /// A catalog with no cards cannot be assigned.
    #[error("catalog has no cards")]
    EmptyCatalog,

    /// A palette with no colors cannot carry stock changes.
    #[error("palette has no colors")]
    EmptyPalette,

    /// Two cards share an ID.
    #[error("duplicate card id {0}")]
    DuplicateCard(CardId),

    /// Manipulation cards are added in canceling +2/-2 pairs, so the
    /// count must be even.
    #[error("manipulation card count {0} must be even")]
    OddManipulationCount(usize),
}

/// Exact per-kind card counts for the whole deck.
///
/// Quotas are exact, not minimums: once a kind's quota is consumed in an
/// attempt it is never offered again, even if it would score best.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuotaTable {
    counts: FxHashMap<StockChangeKind, usize>,
}

impl QuotaTable {
    /// An empty table (every quota 0).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard 26-card distribution: 4 of every kind, with the two
    /// big-swing kinds at 3. That puts 18 points of rises against 18
    /// points of falls, so per-color zero-sum is actually reachable under
    /// exact quotas.
    #[must_use]
    pub fn standard() -> Self {
        let mut table = Self::new();
        for kind in StockChangeKind::ALL {
            table.set(kind, 4);
        }
        table.set(StockChangeKind::SingleUpTwice, 3);
        table.set(StockChangeKind::SingleDownTwice, 3);
        table
    }

    /// Set a kind's quota (builder pattern).
    #[must_use]
    pub fn with_quota(mut self, kind: StockChangeKind, count: usize) -> Self {
        self.set(kind, count);
        self
    }

    /// Set a kind's quota.
    pub fn set(&mut self, kind: StockChangeKind, count: usize) {
        self.counts.insert(kind, count);
    }

    /// The quota for a kind (0 if never set).
    #[must_use]
    pub fn quota(&self, kind: StockChangeKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Total cards the table covers.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// A validated deck configuration: palette, cards, quotas.
///
/// Read-only once constructed; the assignment engine never mutates it.
#[derive(Clone, Debug)]
pub struct DeckCatalog {
    palette: Vec<Color>,
    cards: Vec<GoalCard>,
    quotas: QuotaTable,
}

impl DeckCatalog {
    /// Build a catalog, validating the configuration.
    pub fn new(
        palette: Vec<Color>,
        cards: Vec<GoalCard>,
        quotas: QuotaTable,
    ) -> Result<Self, CatalogError> {
        if palette.is_empty() {
            return Err(CatalogError::EmptyPalette);
        }
        if cards.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        let mut seen = FxHashSet::default();
        for card in &cards {
            if !seen.insert(card.id) {
                return Err(CatalogError::DuplicateCard(card.id));
            }
        }

        let quota_total = quotas.total();
        if quota_total != cards.len() {
            return Err(CatalogError::QuotaMismatch {
                quota_total,
                card_count: cards.len(),
            });
        }

        Ok(Self { palette, cards, quotas })
    }

    /// The standard 26-card deck over the full palette.
    ///
    /// Per color: one three-of-a-kind and one pair and one none-of; the
    /// four adjacent color pairs each get a pair-plus-specific and a
    /// two-pair; every 3-color combination gets a three-different; plus
    /// two one-of-every cards.
    #[must_use]
    pub fn standard() -> Self {
        let palette = Color::ALL.to_vec();
        let mut cards = Vec::new();
        let mut next_id = 0u32;
        let mut push = |cards: &mut Vec<GoalCard>, kind: GoalKind| {
            cards.push(GoalCard::new(CardId::new(next_id), kind));
            next_id += 1;
        };

        for &color in &palette {
            push(&mut cards, GoalKind::ThreeOfAKind(color));
        }
        for &color in &palette {
            push(&mut cards, GoalKind::Pair(color));
        }

        let adjacent = [
            (Color::Blue, Color::Orange),
            (Color::Orange, Color::Yellow),
            (Color::Yellow, Color::Purple),
            (Color::Purple, Color::Blue),
        ];
        for (pair, single) in adjacent {
            push(&mut cards, GoalKind::PairPlusSpecific { pair, single });
        }

        let triples = [
            [Color::Blue, Color::Orange, Color::Yellow],
            [Color::Blue, Color::Orange, Color::Purple],
            [Color::Blue, Color::Yellow, Color::Purple],
            [Color::Orange, Color::Yellow, Color::Purple],
        ];
        for triple in triples {
            push(&mut cards, GoalKind::ThreeDifferent(triple));
        }

        for &color in &palette {
            push(&mut cards, GoalKind::NoneOf(color));
        }
        for (a, b) in adjacent {
            push(&mut cards, GoalKind::TwoPair(a, b));
        }
        for _ in 0..2 {
            push(&mut cards, GoalKind::OneOfEvery);
        }

        Self::new(palette, cards, QuotaTable::standard())
            .expect("standard catalog is internally consistent")
    }

    /// Append goal-less manipulation cards.
    ///
    /// Each pair of cards grows the +2 and -2 quotas by one each, so the
    /// added swings cancel and zero-sum stays reachable. `count` must be
    /// even.
    pub fn with_manipulation(mut self, count: usize) -> Result<Self, CatalogError> {
        if count % 2 != 0 {
            return Err(CatalogError::OddManipulationCount(count));
        }

        let mut next_id = self.cards.iter().map(|c| c.id.raw()).max().unwrap_or(0) + 1;
        for _ in 0..count {
            self.cards.push(GoalCard::new(CardId::new(next_id), GoalKind::Manipulation));
            next_id += 1;
        }

        let up = self.quotas.quota(StockChangeKind::SingleUpTwice);
        let down = self.quotas.quota(StockChangeKind::SingleDownTwice);
        self.quotas.set(StockChangeKind::SingleUpTwice, up + count / 2);
        self.quotas.set(StockChangeKind::SingleDownTwice, down + count / 2);

        Self::new(self.palette, self.cards, self.quotas)
    }

    /// Colors this deck plays with.
    #[must_use]
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// The cards, in catalog order.
    #[must_use]
    pub fn cards(&self) -> &[GoalCard] {
        &self.cards
    }

    /// The quota table.
    #[must_use]
    pub fn quotas(&self) -> &QuotaTable {
        &self.quotas
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True if the catalog has no cards. Unreachable for validated
    /// catalogs; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
