//! Downstream scoring: derive a score per card and draw a tiered reward.
//!
//! A card's score is its goal difficulty plus the penalty of the stock
//! change it carries. The scored deck is split into thirds - the cheapest
//! third draws low rewards, the middle third medium, the top third high.
//! Manipulation cards have no goal, so they get neither score nor reward.

pub mod rewards;

pub use rewards::{tier_table, Reward, RewardEffect, RewardTier};

use crate::assign::{AssignedCard, Assignment};
use crate::core::DeckRng;

/// A finished card: goal, stock change, score, and reward.
#[derive(Clone, Debug)]
pub struct FinalCard {
    pub card: crate::catalog::GoalCard,
    pub change: crate::catalog::StockChangeInstance,
    /// Stock-change penalty folded into the score.
    pub penalty: i32,
    /// `None` for manipulation cards.
    pub score: Option<i32>,
    /// `None` for manipulation cards.
    pub reward: Option<Reward>,
}

impl FinalCard {
    fn from_assigned(assigned: &AssignedCard, reward: Option<Reward>) -> Self {
        Self {
            card: assigned.card.clone(),
            change: assigned.change.clone(),
            penalty: assigned.penalty(),
            score: assigned.score(),
            reward,
        }
    }
}

/// Score every card and draw its reward.
///
/// Output order: goal cards ascending by score (stable within ties),
/// then manipulation cards in assignment order. Deterministic for a
/// given assignment and RNG stream.
#[must_use]
pub fn assign_rewards(assignment: &Assignment, rng: &mut DeckRng) -> Vec<FinalCard> {
    let mut goal_cards: Vec<&AssignedCard> = assignment
        .cards
        .iter()
        .filter(|a| a.card.kind.has_goal())
        .collect();
    goal_cards.sort_by_key(|a| a.score().unwrap_or(i32::MAX));

    let total = goal_cards.len();
    let low_end = total / 3;
    let medium_end = 2 * total / 3;

    let mut deck = Vec::with_capacity(assignment.cards.len());
    for (position, assigned) in goal_cards.into_iter().enumerate() {
        let tier = if position < low_end {
            RewardTier::Low
        } else if position < medium_end {
            RewardTier::Medium
        } else {
            RewardTier::High
        };

        let table = tier_table(tier);
        let effect = table[rng.gen_range_usize(0..table.len())];
        deck.push(FinalCard::from_assigned(assigned, Some(Reward { effect, tier })));
    }

    for assigned in assignment.cards.iter().filter(|a| !a.card.kind.has_goal()) {
        deck.push(FinalCard::from_assigned(assigned, None));
    }

    deck
}
