//! Stock colors and per-color data storage.
//!
//! ## Color
//!
//! The four stock colors of the game. `Color::ALL` is the canonical
//! palette; engine code receives palettes as slices so nothing downstream
//! bakes in the count.
//!
//! ## ColorMap
//!
//! Per-color data storage backed by `Vec` for O(1) access, indexable by
//! `Color`. Used for the net-delta and appearance-frequency tallies.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the tradeable stock colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    Blue,
    Orange,
    Yellow,
    Purple,
}

impl Color {
    /// The full palette, in canonical order.
    pub const ALL: [Color; 4] = [Color::Blue, Color::Orange, Color::Yellow, Color::Purple];

    /// Position of this color in the canonical palette.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display name, as printed on cards.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Blue => "Blue",
            Color::Orange => "Orange",
            Color::Yellow => "Yellow",
            Color::Purple => "Purple",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-color data storage with O(1) access.
///
/// Always covers every color in the enum; palette-restricted queries
/// (max, min, spread) take the palette slice explicitly.
///
/// ## Example
///
/// ```
/// use goal_deck::core::{Color, ColorMap};
///
/// let mut net: ColorMap<i64> = ColorMap::default();
/// net[Color::Blue] += 2;
/// net[Color::Purple] -= 1;
///
/// assert_eq!(net[Color::Blue], 2);
/// assert_eq!(net[Color::Orange], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorMap<T> {
    data: Vec<T>,
}

impl<T: Default> Default for ColorMap<T> {
    fn default() -> Self {
        Self::new(|_| T::default())
    }
}

impl<T> ColorMap<T> {
    /// Create a new ColorMap with values from a factory function.
    pub fn new(factory: impl Fn(Color) -> T) -> Self {
        let data = Color::ALL.iter().map(|&c| factory(c)).collect();
        Self { data }
    }

    /// Get a reference to a color's entry.
    #[must_use]
    pub fn get(&self, color: Color) -> &T {
        &self.data[color.index()]
    }

    /// Get a mutable reference to a color's entry.
    pub fn get_mut(&mut self, color: Color) -> &mut T {
        &mut self.data[color.index()]
    }

    /// Iterate over (Color, &T) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        Color::ALL.iter().copied().zip(self.data.iter())
    }
}

impl<T: Copy + Ord> ColorMap<T> {
    /// Largest entry among the given palette colors.
    ///
    /// Panics if the palette is empty.
    #[must_use]
    pub fn max_over(&self, palette: &[Color]) -> T {
        palette
            .iter()
            .map(|&c| self.data[c.index()])
            .max()
            .expect("palette must not be empty")
    }

    /// Smallest entry among the given palette colors.
    ///
    /// Panics if the palette is empty.
    #[must_use]
    pub fn min_over(&self, palette: &[Color]) -> T {
        palette
            .iter()
            .map(|&c| self.data[c.index()])
            .min()
            .expect("palette must not be empty")
    }
}

impl<T> Index<Color> for ColorMap<T> {
    type Output = T;

    fn index(&self, color: Color) -> &Self::Output {
        self.get(color)
    }
}

impl<T> IndexMut<Color> for ColorMap<T> {
    fn index_mut(&mut self, color: Color) -> &mut Self::Output {
        self.get_mut(color)
    }
}
