//! # goal-deck
//!
//! Generates the goal-card deck for a stock-trading board game: each card
//! pairs a goal (a pattern of colored resources the holder must collect)
//! with a stock-price change, and the deck as a whole is balanced so that
//! no color drifts up or down over a full play-through.
//!
//! ## Design Principles
//!
//! 1. **Exact quotas**: every stock-change kind appears on a fixed number
//!    of cards, no more and no fewer.
//!
//! 2. **Anti-synergy**: a card's stock change may never trivially help the
//!    goal printed on the same card.
//!
//! 3. **Deterministic**: the whole generation run is driven by one seed.
//!    Identical catalog + identical seed produce byte-identical output.
//!
//! ## Architecture
//!
//! Assignment is a bounded-retry randomized search: each attempt draws
//! candidate changes per card, keeps the legal ones, scores them by how
//! much they pull the per-color net totals toward zero, and commits one
//! from the best third. Attempts that end unbalanced are discarded and
//! re-run with a fresh card order, up to a cap. Attempt state is local to
//! the attempt; nothing mutable is shared between attempts.
//!
//! ## Modules
//!
//! - `core`: colors, per-color storage, seeded RNG
//! - `catalog`: goal cards, stock-change kinds, quotas, deck configuration
//! - `assign`: legality rules, candidate generation, scoring, the engine
//! - `score`: card scores, reward tiers, the reward catalog
//! - `output`: renderer interchange records, JSON, deck statistics

pub mod core;
pub mod catalog;
pub mod assign;
pub mod score;
pub mod output;

// Re-export commonly used types
pub use crate::core::{Color, ColorMap, DeckRng};

pub use crate::catalog::{
    CardId, GoalKind, GoalCard,
    StockChangeKind, StockChangeInstance,
    QuotaTable, DeckCatalog, CatalogError,
};

pub use crate::assign::{
    legal_for, generate_instance,
    balance_score, skew_penalty,
    AssignmentEngine, EngineConfig, Assignment, AssignedCard,
    AssignError, ImbalanceWarning,
};

pub use crate::score::{Reward, RewardEffect, RewardTier, FinalCard};

pub use crate::output::{CardRecord, DeckStats};

use crate::score::assign_rewards;

/// A fully generated deck: scored, rewarded cards plus balance bookkeeping.
#[derive(Clone, Debug)]
pub struct GeneratedDeck {
    /// Cards in output order: goal cards ascending by score, then
    /// manipulation cards.
    pub cards: Vec<FinalCard>,
    /// Net signed delta per color across the deck.
    pub net: ColorMap<i64>,
    /// How many assigned instances touch each color.
    pub frequency: ColorMap<u32>,
    /// Colors the catalog plays with.
    pub palette: Vec<Color>,
    /// Present when the retry cap was exhausted and the deck is imperfect.
    pub warning: Option<ImbalanceWarning>,
}

/// Run the full pipeline: assign stock changes, derive scores, draw rewards.
///
/// Rewards are drawn from an RNG stream independent of the assignment
/// stream, so enabling or disabling assignment features never shifts which
/// rewards come up for a given seed.
pub fn generate(
    catalog: &DeckCatalog,
    config: &EngineConfig,
    seed: u64,
) -> Result<GeneratedDeck, AssignError> {
    let engine = AssignmentEngine::new(config.clone());
    let assignment = engine.assign(catalog, seed)?;

    let mut reward_rng = DeckRng::new(seed).for_context("rewards");
    let cards = assign_rewards(&assignment, &mut reward_rng);

    Ok(GeneratedDeck {
        cards,
        net: assignment.net,
        frequency: assignment.frequency,
        palette: catalog.palette().to_vec(),
        warning: assignment.warning,
    })
}
