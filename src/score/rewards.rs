//! The reward catalog.
//!
//! Rewards are authored as structured data: every effect carries its
//! amounts and targeting flags directly, and the printed card text is
//! rendered from the structure. Nothing downstream ever parses reward
//! text to recover semantics.

use serde::{Deserialize, Serialize};

/// Reward tier, decided by the card's final score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardTier {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RewardTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RewardTier::Low => "low",
            RewardTier::Medium => "medium",
            RewardTier::High => "high",
        })
    }
}

/// What completing a goal earns, in typed form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RewardEffect {
    /// Take cash from the bank.
    GainCash { amount: u8 },
    /// Take cash from another player.
    StealCash { amount: u8 },
    /// Peek at the top deck card and put it back on top or bottom.
    PeekTopCard,
    /// See all of another player's resource cards.
    PeekHand,
    /// Swap one of your resources with the top card of the deck.
    SwapWithDeck,
    /// Peek at the top cards of the resource deck and reorder them.
    RearrangeTop { count: u8 },
    /// Buy the lowest-priced stock at a discount.
    DiscountLowest { amount: u8 },
    /// Buy any stock at a discount.
    DiscountAny { amount: u8 },
    /// Adjust any one stock price before the selling phase.
    AdjustPrice { magnitude: u8 },
    /// Every card you sell this round pays a bonus.
    SaleBonus { amount: u8 },
    /// Take a random resource from another player, give one of yours back.
    TradeResource,
    /// Take the lowest-value stock from the bank.
    GainLowestStock,
}

impl RewardEffect {
    /// Does resolving this reward involve another player?
    #[must_use]
    pub const fn requires_target_player(&self) -> bool {
        matches!(
            self,
            RewardEffect::StealCash { .. } | RewardEffect::PeekHand | RewardEffect::TradeResource
        )
    }

    /// Does resolving this reward ask its owner to make a choice beyond
    /// picking a target?
    #[must_use]
    pub const fn requires_player_choice(&self) -> bool {
        matches!(
            self,
            RewardEffect::PeekTopCard
                | RewardEffect::SwapWithDeck
                | RewardEffect::RearrangeTop { .. }
                | RewardEffect::DiscountAny { .. }
                | RewardEffect::AdjustPrice { .. }
                | RewardEffect::TradeResource
        )
    }
}

impl std::fmt::Display for RewardEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RewardEffect::GainCash { amount } => write!(f, "Gain ${amount}"),
            RewardEffect::StealCash { amount } => {
                write!(f, "Steal ${amount} from another player")
            }
            RewardEffect::PeekTopCard => {
                write!(f, "Peek at top card, choose to put it on top or bottom of deck")
            }
            RewardEffect::PeekHand => {
                write!(f, "Look at another player's hand (see all their resource cards)")
            }
            RewardEffect::SwapWithDeck => {
                write!(f, "Swap 1 of your resource cards with the top card of the deck")
            }
            RewardEffect::RearrangeTop { count } => write!(
                f,
                "Peek at top {count} cards of the resource deck, and rearrange them in any order"
            ),
            RewardEffect::DiscountLowest { amount } => {
                write!(f, "Buy the lowest-priced stock for ${amount} discount")
            }
            RewardEffect::DiscountAny { amount } => {
                write!(f, "Buy any stock for ${amount} discount")
            }
            RewardEffect::AdjustPrice { magnitude } => write!(
                f,
                "Adjust any one stock price by \u{b1}{magnitude} (before selling phase)"
            ),
            RewardEffect::SaleBonus { amount } => {
                write!(f, "All cards you sell this round get +${amount} bonus")
            }
            RewardEffect::TradeResource => write!(
                f,
                "Take a random resource from another player and give them one of your choice"
            ),
            RewardEffect::GainLowestStock => write!(f, "Gain the lowest value stock"),
        }
    }
}

/// The effects a tier can hand out.
#[must_use]
pub const fn tier_table(tier: RewardTier) -> &'static [RewardEffect] {
    match tier {
        RewardTier::Low => &[
            RewardEffect::GainCash { amount: 1 },
            RewardEffect::PeekTopCard,
            RewardEffect::PeekHand,
        ],
        RewardTier::Medium => &[
            RewardEffect::GainCash { amount: 2 },
            RewardEffect::SwapWithDeck,
            RewardEffect::DiscountLowest { amount: 1 },
            RewardEffect::StealCash { amount: 1 },
            RewardEffect::RearrangeTop { count: 5 },
        ],
        RewardTier::High => &[
            RewardEffect::GainCash { amount: 3 },
            RewardEffect::AdjustPrice { magnitude: 1 },
            RewardEffect::SaleBonus { amount: 1 },
            RewardEffect::TradeResource,
            RewardEffect::DiscountAny { amount: 2 },
            RewardEffect::GainLowestStock,
        ],
    }
}

/// A drawn reward: the typed effect plus the tier it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub effect: RewardEffect,
    pub tier: RewardTier,
}

impl Reward {
    /// The text printed on the card.
    #[must_use]
    pub fn text(&self) -> String {
        self.effect.to_string()
    }
}
