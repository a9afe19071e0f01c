//! Stock-change kinds and concrete instances.
//!
//! A `StockChangeKind` is the abstract shape of a price adjustment (how
//! many colors it touches and by how much); a `StockChangeInstance` pins
//! the shape to concrete colors. Instances are generated fresh for every
//! assignment attempt and never reused across attempts.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Color;

/// The shape of a stock-price adjustment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockChangeKind {
    /// +1 to one stock.
    SingleUp,
    /// -1 to one stock.
    SingleDown,
    /// +2 to one stock.
    SingleUpTwice,
    /// -2 to one stock.
    SingleDownTwice,
    /// +1 to two stocks.
    DoubleUp,
    /// -1 to two stocks.
    DoubleDown,
    /// +1 to one stock, -1 to another.
    Mixed,
}

impl StockChangeKind {
    /// Every kind, in canonical order.
    pub const ALL: [StockChangeKind; 7] = [
        StockChangeKind::SingleUp,
        StockChangeKind::SingleDown,
        StockChangeKind::SingleUpTwice,
        StockChangeKind::SingleDownTwice,
        StockChangeKind::DoubleUp,
        StockChangeKind::DoubleDown,
        StockChangeKind::Mixed,
    ];

    /// Stable identifier used in the interchange records.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            StockChangeKind::SingleUp => "single_up",
            StockChangeKind::SingleDown => "single_down",
            StockChangeKind::SingleUpTwice => "single_up_twice",
            StockChangeKind::SingleDownTwice => "single_down_twice",
            StockChangeKind::DoubleUp => "double_up",
            StockChangeKind::DoubleDown => "double_down",
            StockChangeKind::Mixed => "mixed",
        }
    }

    /// How many distinct colors an instance of this kind touches.
    #[must_use]
    pub const fn arity(&self) -> usize {
        match self {
            StockChangeKind::SingleUp
            | StockChangeKind::SingleDown
            | StockChangeKind::SingleUpTwice
            | StockChangeKind::SingleDownTwice => 1,
            StockChangeKind::DoubleUp | StockChangeKind::DoubleDown | StockChangeKind::Mixed => 2,
        }
    }

    /// Kinds legal for one-of-every goals: every touched color gets
    /// exactly +1, so no required color is ever penalized or spiked.
    #[must_use]
    pub const fn positive_only(&self) -> bool {
        matches!(self, StockChangeKind::SingleUp | StockChangeKind::DoubleUp)
    }

    /// Score penalty a card takes for carrying this kind. Bigger market
    /// swings make a card easier to profit from, so they cost points.
    #[must_use]
    pub const fn penalty(&self) -> i32 {
        match self {
            StockChangeKind::SingleUp | StockChangeKind::SingleDown => 0,
            StockChangeKind::SingleUpTwice | StockChangeKind::SingleDownTwice => -2,
            StockChangeKind::DoubleUp | StockChangeKind::DoubleDown | StockChangeKind::Mixed => -1,
        }
    }
}

impl std::fmt::Display for StockChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A concrete stock change: a kind pinned to specific colors.
///
/// Deltas are kept in draw order so the display text is stable; `Mixed`
/// instances always list the +1 color first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockChangeInstance {
    /// The shape this instance realizes.
    pub kind: StockChangeKind,

    /// The touched colors and their signed deltas.
    deltas: SmallVec<[(Color, i8); 2]>,
}

impl StockChangeInstance {
    /// Create an instance from explicit deltas.
    ///
    /// Panics if the delta count does not match the kind's arity.
    #[must_use]
    pub fn new(kind: StockChangeKind, deltas: SmallVec<[(Color, i8); 2]>) -> Self {
        assert_eq!(
            deltas.len(),
            kind.arity(),
            "{} takes {} delta(s)",
            kind.name(),
            kind.arity()
        );
        Self { kind, deltas }
    }

    /// The delta this instance applies to a color (0 if untouched).
    #[must_use]
    pub fn delta(&self, color: Color) -> i8 {
        self.deltas
            .iter()
            .find(|(c, _)| *c == color)
            .map_or(0, |(_, d)| *d)
    }

    /// Iterate over the touched colors and their deltas, in draw order.
    pub fn touched(&self) -> impl Iterator<Item = (Color, i8)> + '_ {
        self.deltas.iter().copied()
    }

    /// Card text, e.g. `"Blue +1"` or `"Orange +1, Purple -1"`.
    #[must_use]
    pub fn text(&self) -> String {
        let parts: Vec<String> = self
            .deltas
            .iter()
            .map(|(color, delta)| format!("{color} {delta:+}"))
            .collect();
        parts.join(", ")
    }
}

impl std::fmt::Display for StockChangeInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text())
    }
}
