//! Core types: the color enumeration, per-color storage, and the seeded RNG.
//!
//! Everything downstream (catalog, assignment, scoring) builds on these.
//! Code that iterates colors takes a `&[Color]` palette slice rather than
//! assuming how many colors exist.

pub mod color;
pub mod rng;

pub use color::{Color, ColorMap};
pub use rng::DeckRng;
