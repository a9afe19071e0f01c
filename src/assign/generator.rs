//! Candidate stock-change generation.
//!
//! Produces one concrete instance of a requested kind. Color selection is
//! uniform by default; when a running frequency tally is supplied, colors
//! are drawn with weight `max_freq - freq + 1`, so less-used colors come
//! up more often. Two-color draws under weighting first narrow to the
//! pool of least-used colors (twice the draw size, capped at the full
//! palette) - drawing both colors from the global weighting would pile
//! every two-color instance onto the single least-used color.

use smallvec::{smallvec, SmallVec};

use crate::catalog::{StockChangeInstance, StockChangeKind};
use crate::core::{Color, ColorMap, DeckRng};

/// Generate one candidate instance of `kind`.
///
/// Panics if the palette has fewer colors than the kind's arity.
#[must_use]
pub fn generate_instance(
    kind: StockChangeKind,
    palette: &[Color],
    frequency: Option<&ColorMap<u32>>,
    rng: &mut DeckRng,
) -> StockChangeInstance {
    assert!(
        palette.len() >= kind.arity(),
        "palette has {} colors but {} touches {}",
        palette.len(),
        kind.name(),
        kind.arity()
    );

    let deltas: SmallVec<[(Color, i8); 2]> = match kind {
        StockChangeKind::SingleUp => smallvec![(pick_one(palette, frequency, rng), 1)],
        StockChangeKind::SingleDown => smallvec![(pick_one(palette, frequency, rng), -1)],
        StockChangeKind::SingleUpTwice => smallvec![(pick_one(palette, frequency, rng), 2)],
        StockChangeKind::SingleDownTwice => smallvec![(pick_one(palette, frequency, rng), -2)],
        StockChangeKind::DoubleUp => {
            let (a, b) = pick_two(palette, frequency, rng);
            smallvec![(a, 1), (b, 1)]
        }
        StockChangeKind::DoubleDown => {
            let (a, b) = pick_two(palette, frequency, rng);
            smallvec![(a, -1), (b, -1)]
        }
        StockChangeKind::Mixed => {
            let (a, b) = pick_two(palette, frequency, rng);
            smallvec![(a, 1), (b, -1)]
        }
    };

    StockChangeInstance::new(kind, deltas)
}

fn pick_one(palette: &[Color], frequency: Option<&ColorMap<u32>>, rng: &mut DeckRng) -> Color {
    match frequency {
        Some(freq) => weighted_pick(palette, freq, rng),
        None => palette[rng.gen_range_usize(0..palette.len())],
    }
}

fn pick_two(
    palette: &[Color],
    frequency: Option<&ColorMap<u32>>,
    rng: &mut DeckRng,
) -> (Color, Color) {
    match frequency {
        Some(freq) => {
            // Narrow to the least-used colors, keeping palette order for
            // equal counts so the draw stays deterministic.
            let mut pool: SmallVec<[Color; 8]> = SmallVec::from_slice(palette);
            pool.sort_by_key(|&c| freq[c]);
            pool.truncate(4.min(palette.len()));

            let first = weighted_pick(&pool, freq, rng);
            pool.retain(|&mut c| c != first);
            let second = weighted_pick(&pool, freq, rng);
            (first, second)
        }
        None => {
            let i = rng.gen_range_usize(0..palette.len());
            let mut j = rng.gen_range_usize(0..palette.len() - 1);
            if j >= i {
                j += 1;
            }
            (palette[i], palette[j])
        }
    }
}

/// Weighted draw over `pool`: weight `max_freq - freq + 1`, falling back
/// to a uniform draw if the weights collapse.
fn weighted_pick(pool: &[Color], freq: &ColorMap<u32>, rng: &mut DeckRng) -> Color {
    let max = freq.max_over(pool);
    let weights: SmallVec<[f32; 8]> = pool
        .iter()
        .map(|&c| (max - freq[c] + 1) as f32)
        .collect();

    match rng.choose_weighted(&weights) {
        Some(i) => pool[i],
        None => pool[rng.gen_range_usize(0..pool.len())],
    }
}
