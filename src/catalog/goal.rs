//! Goal card definitions - static card data.
//!
//! A `GoalCard` holds the immutable properties of one card: which resource
//! pattern it demands and how hard that pattern is to collect. The stock
//! change a card ends up carrying is decided later by the assignment
//! engine and lives in `AssignedCard`, not here.
//!
//! `GoalKind` carries its color payload in the variant itself, so a card
//! either has required colors or an avoided color - the type rules out
//! both at once.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Color;

/// Unique identifier for a goal card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The resource pattern a card demands, with its color payload.
///
/// `Manipulation` is the goal-less variant: such cards carry only a stock
/// change and are played for the market effect alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    /// Three resources of one color.
    ThreeOfAKind(Color),
    /// Two resources of one color.
    Pair(Color),
    /// Two of one color plus one of another.
    PairPlusSpecific { pair: Color, single: Color },
    /// One resource of each of three distinct colors.
    ThreeDifferent([Color; 3]),
    /// Zero resources of the given color in hand.
    NoneOf(Color),
    /// Two each of two distinct colors.
    TwoPair(Color, Color),
    /// One resource of every palette color.
    OneOfEvery,
    /// No goal at all - played for the stock effect only.
    Manipulation,
}

impl GoalKind {
    /// Stable identifier used in the interchange records.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            GoalKind::ThreeOfAKind(_) => "three_of_a_kind",
            GoalKind::Pair(_) => "pair",
            GoalKind::PairPlusSpecific { .. } => "pair_plus_specific",
            GoalKind::ThreeDifferent(_) => "three_different",
            GoalKind::NoneOf(_) => "none_of",
            GoalKind::TwoPair(_, _) => "two_pair",
            GoalKind::OneOfEvery => "one_of_every",
            GoalKind::Manipulation => "manipulation",
        }
    }

    /// Baseline difficulty score for this pattern.
    #[must_use]
    pub const fn base_difficulty(&self) -> i32 {
        match self {
            GoalKind::ThreeOfAKind(_) => 3,
            GoalKind::Pair(_) => 1,
            GoalKind::PairPlusSpecific { .. } => 2,
            GoalKind::ThreeDifferent(_) => 2,
            GoalKind::NoneOf(_) => 2,
            GoalKind::TwoPair(_, _) => 4,
            GoalKind::OneOfEvery => 4,
            GoalKind::Manipulation => 0,
        }
    }

    /// Does this card demand the given color?
    ///
    /// `OneOfEvery` demands every color; `NoneOf` and `Manipulation`
    /// demand none.
    #[must_use]
    pub fn requires_color(&self, color: Color) -> bool {
        match self {
            GoalKind::ThreeOfAKind(c) | GoalKind::Pair(c) => *c == color,
            GoalKind::PairPlusSpecific { pair, single } => *pair == color || *single == color,
            GoalKind::ThreeDifferent(cs) => cs.contains(&color),
            GoalKind::TwoPair(a, b) => *a == color || *b == color,
            GoalKind::OneOfEvery => true,
            GoalKind::NoneOf(_) | GoalKind::Manipulation => false,
        }
    }

    /// The color this card must *avoid*, if any.
    #[must_use]
    pub const fn avoided_color(&self) -> Option<Color> {
        match self {
            GoalKind::NoneOf(c) => Some(*c),
            _ => None,
        }
    }

    /// Required colors with their counts, in presentation order.
    ///
    /// Empty for `NoneOf` and `Manipulation`. `OneOfEvery` expands over
    /// the supplied palette.
    #[must_use]
    pub fn required_counts(&self, palette: &[Color]) -> SmallVec<[(Color, u8); 4]> {
        match self {
            GoalKind::ThreeOfAKind(c) => SmallVec::from_slice(&[(*c, 3)]),
            GoalKind::Pair(c) => SmallVec::from_slice(&[(*c, 2)]),
            GoalKind::PairPlusSpecific { pair, single } => {
                SmallVec::from_slice(&[(*pair, 2), (*single, 1)])
            }
            GoalKind::ThreeDifferent(cs) => cs.iter().map(|&c| (c, 1)).collect(),
            GoalKind::TwoPair(a, b) => SmallVec::from_slice(&[(*a, 2), (*b, 2)]),
            GoalKind::OneOfEvery => palette.iter().map(|&c| (c, 1)).collect(),
            GoalKind::NoneOf(_) | GoalKind::Manipulation => SmallVec::new(),
        }
    }

    /// Is this the constrained kind the engine must place first?
    #[must_use]
    pub const fn is_constrained(&self) -> bool {
        matches!(self, GoalKind::OneOfEvery)
    }

    /// Does this card have a goal at all?
    #[must_use]
    pub const fn has_goal(&self) -> bool {
        !matches!(self, GoalKind::Manipulation)
    }

    /// Card text for this goal, e.g. `"2 Blue + 1 Orange"` or `"0 Yellow"`.
    ///
    /// `None` for `Manipulation` cards, which print no goal.
    #[must_use]
    pub fn text(&self, palette: &[Color]) -> Option<String> {
        if let Some(avoided) = self.avoided_color() {
            return Some(format!("0 {avoided}"));
        }
        if !self.has_goal() {
            return None;
        }
        let parts: Vec<String> = self
            .required_counts(palette)
            .iter()
            .map(|(color, count)| format!("{count} {color}"))
            .collect();
        Some(parts.join(" + "))
    }
}

/// Static goal card definition. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalCard {
    /// Unique identifier for this card.
    pub id: CardId,

    /// The resource pattern this card demands.
    pub kind: GoalKind,

    /// Difficulty score, before the stock-change penalty.
    pub difficulty: i32,
}

impl GoalCard {
    /// Create a card with the kind's baseline difficulty.
    #[must_use]
    pub fn new(id: CardId, kind: GoalKind) -> Self {
        Self {
            id,
            kind,
            difficulty: kind.base_difficulty(),
        }
    }

    /// Override the difficulty score (builder pattern).
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: i32) -> Self {
        self.difficulty = difficulty;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(format!("{}", id), "Card(7)");
    }

    #[test]
    fn test_required_colors() {
        let pair = GoalKind::Pair(Color::Blue);
        assert!(pair.requires_color(Color::Blue));
        assert!(!pair.requires_color(Color::Orange));

        let combo = GoalKind::PairPlusSpecific {
            pair: Color::Orange,
            single: Color::Yellow,
        };
        assert!(combo.requires_color(Color::Orange));
        assert!(combo.requires_color(Color::Yellow));
        assert!(!combo.requires_color(Color::Purple));

        assert!(GoalKind::OneOfEvery.requires_color(Color::Purple));
        assert!(!GoalKind::Manipulation.requires_color(Color::Blue));
    }

    #[test]
    fn test_avoided_is_exclusive_with_required() {
        let none_of = GoalKind::NoneOf(Color::Yellow);
        assert_eq!(none_of.avoided_color(), Some(Color::Yellow));
        assert!(Color::ALL.iter().all(|&c| !none_of.requires_color(c)));
        assert!(none_of.required_counts(&Color::ALL).is_empty());

        let two_pair = GoalKind::TwoPair(Color::Blue, Color::Purple);
        assert_eq!(two_pair.avoided_color(), None);
    }

    #[test]
    fn test_goal_text() {
        let palette = &Color::ALL;

        assert_eq!(
            GoalKind::ThreeOfAKind(Color::Blue).text(palette).unwrap(),
            "3 Blue"
        );
        assert_eq!(GoalKind::Pair(Color::Purple).text(palette).unwrap(), "2 Purple");
        assert_eq!(
            GoalKind::PairPlusSpecific { pair: Color::Blue, single: Color::Orange }
                .text(palette)
                .unwrap(),
            "2 Blue + 1 Orange"
        );
        assert_eq!(
            GoalKind::ThreeDifferent([Color::Blue, Color::Orange, Color::Yellow])
                .text(palette)
                .unwrap(),
            "1 Blue + 1 Orange + 1 Yellow"
        );
        assert_eq!(GoalKind::NoneOf(Color::Yellow).text(palette).unwrap(), "0 Yellow");
        assert_eq!(
            GoalKind::TwoPair(Color::Yellow, Color::Purple).text(palette).unwrap(),
            "2 Yellow + 2 Purple"
        );
        assert_eq!(
            GoalKind::OneOfEvery.text(palette).unwrap(),
            "1 Blue + 1 Orange + 1 Yellow + 1 Purple"
        );
        assert_eq!(GoalKind::Manipulation.text(palette), None);
    }

    #[test]
    fn test_base_difficulty() {
        assert_eq!(GoalKind::Pair(Color::Blue).base_difficulty(), 1);
        assert_eq!(GoalKind::ThreeOfAKind(Color::Blue).base_difficulty(), 3);
        assert_eq!(GoalKind::TwoPair(Color::Blue, Color::Orange).base_difficulty(), 4);
        assert_eq!(GoalKind::OneOfEvery.base_difficulty(), 4);
    }

    #[test]
    fn test_card_builder() {
        let card = GoalCard::new(CardId::new(1), GoalKind::Pair(Color::Blue));
        assert_eq!(card.difficulty, 1);

        let harder = card.clone().with_difficulty(5);
        assert_eq!(harder.difficulty, 5);
        assert_eq!(harder.kind, GoalKind::Pair(Color::Blue));
    }

    #[test]
    fn test_serialization() {
        let card = GoalCard::new(
            CardId::new(3),
            GoalKind::PairPlusSpecific { pair: Color::Blue, single: Color::Orange },
        );
        let json = serde_json::to_string(&card).unwrap();
        let deserialized: GoalCard = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
