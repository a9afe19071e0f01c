//! Anti-synergy legality rules.
//!
//! A card's stock change must not trivially help the goal printed on the
//! same card. Concretely, for every color the candidate touches:
//!
//! - a color the card *requires* may not drop (the card would sabotage
//!   its own holder) and may not spike +2 (the card would over-reward
//!   hoarding the very color it demands);
//! - the same two rules apply to the color a none-of card *avoids*, so
//!   "avoid X" cards neither profit from X's decline nor spike X.
//!
//! Colors the card has no stake in are unrestricted.

use crate::catalog::{GoalCard, StockChangeInstance};

/// Is this candidate change legal on this card?
///
/// Pure predicate; no state, no side effects.
#[must_use]
pub fn legal_for(card: &GoalCard, instance: &StockChangeInstance) -> bool {
    for (color, delta) in instance.touched() {
        let staked = card.kind.requires_color(color) || card.kind.avoided_color() == Some(color);
        if staked && (delta < 0 || delta == 2) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CardId, GoalKind, StockChangeKind};
    use crate::core::Color;
    use smallvec::smallvec;

    fn card(kind: GoalKind) -> GoalCard {
        GoalCard::new(CardId::new(0), kind)
    }

    fn single(kind: StockChangeKind, color: Color, delta: i8) -> StockChangeInstance {
        StockChangeInstance::new(kind, smallvec![(color, delta)])
    }

    #[test]
    fn test_required_color_may_not_drop() {
        let pair = card(GoalKind::Pair(Color::Blue));

        let down = single(StockChangeKind::SingleDown, Color::Blue, -1);
        assert!(!legal_for(&pair, &down));

        let crash = single(StockChangeKind::SingleDownTwice, Color::Blue, -2);
        assert!(!legal_for(&pair, &crash));
    }

    #[test]
    fn test_required_color_may_not_spike() {
        let pair = card(GoalKind::Pair(Color::Blue));

        let spike = single(StockChangeKind::SingleUpTwice, Color::Blue, 2);
        assert!(!legal_for(&pair, &spike));

        // +1 on the required color is fine.
        let up = single(StockChangeKind::SingleUp, Color::Blue, 1);
        assert!(legal_for(&pair, &up));
    }

    #[test]
    fn test_unrelated_colors_unrestricted() {
        let pair = card(GoalKind::Pair(Color::Blue));

        for delta in [-2i8, -1, 1, 2] {
            let kind = match delta {
                -2 => StockChangeKind::SingleDownTwice,
                -1 => StockChangeKind::SingleDown,
                1 => StockChangeKind::SingleUp,
                _ => StockChangeKind::SingleUpTwice,
            };
            assert!(legal_for(&pair, &single(kind, Color::Purple, delta)));
        }
    }

    #[test]
    fn test_avoided_color_rules() {
        let none_of = card(GoalKind::NoneOf(Color::Yellow));

        let down = single(StockChangeKind::SingleDown, Color::Yellow, -1);
        assert!(!legal_for(&none_of, &down));

        let spike = single(StockChangeKind::SingleUpTwice, Color::Yellow, 2);
        assert!(!legal_for(&none_of, &spike));

        let up = single(StockChangeKind::SingleUp, Color::Yellow, 1);
        assert!(legal_for(&none_of, &up));

        let other = single(StockChangeKind::SingleDown, Color::Blue, -1);
        assert!(legal_for(&none_of, &other));
    }

    #[test]
    fn test_two_color_instance_checks_both() {
        let combo = card(GoalKind::PairPlusSpecific { pair: Color::Blue, single: Color::Orange });

        let bad = StockChangeInstance::new(
            StockChangeKind::Mixed,
            smallvec![(Color::Purple, 1), (Color::Orange, -1)],
        );
        assert!(!legal_for(&combo, &bad));

        let good = StockChangeInstance::new(
            StockChangeKind::Mixed,
            smallvec![(Color::Blue, 1), (Color::Purple, -1)],
        );
        assert!(legal_for(&combo, &good));
    }

    #[test]
    fn test_one_of_every_only_tolerates_plus_one() {
        let all = card(GoalKind::OneOfEvery);

        for color in Color::ALL {
            assert!(legal_for(&all, &single(StockChangeKind::SingleUp, color, 1)));
            assert!(!legal_for(&all, &single(StockChangeKind::SingleDown, color, -1)));
            assert!(!legal_for(&all, &single(StockChangeKind::SingleUpTwice, color, 2)));
        }

        let double_up = StockChangeInstance::new(
            StockChangeKind::DoubleUp,
            smallvec![(Color::Blue, 1), (Color::Yellow, 1)],
        );
        assert!(legal_for(&all, &double_up));
    }

    #[test]
    fn test_manipulation_cards_accept_anything() {
        let manip = card(GoalKind::Manipulation);

        assert!(legal_for(&manip, &single(StockChangeKind::SingleDownTwice, Color::Blue, -2)));
        assert!(legal_for(&manip, &single(StockChangeKind::SingleUpTwice, Color::Blue, 2)));
    }
}
