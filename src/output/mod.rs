//! Interchange output for the renderer collaborator.
//!
//! The JSON record sequence is the sole contract with the rendering side;
//! statistics and warnings go to the diagnostic channel, never into the
//! primary output.

pub mod records;

pub use records::{
    to_json, to_records, CardMetadata, CardRecord, DeckStats, GoalRecord, RewardRecord,
    StockChangeRecord,
};
