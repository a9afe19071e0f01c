//! The assignment engine and its helpers.
//!
//! Distributes one stock-change instance to every catalog card under
//! exact per-kind quotas, anti-synergy legality, zero-sum-per-color
//! balance, and (optionally) bounded color-appearance skew.
//!
//! - `validator`: is a candidate change legal on a given card?
//! - `generator`: draw one candidate instance of a kind
//! - `scorer`: how much does a candidate improve balance?
//! - `engine`: the bounded-retry search tying them together

pub mod validator;
pub mod generator;
pub mod scorer;
pub mod engine;

pub use validator::legal_for;
pub use generator::generate_instance;
pub use scorer::{balance_score, skew_penalty};
pub use engine::{
    AssignError, AssignedCard, Assignment, AssignmentEngine, EngineConfig, ImbalanceWarning,
};
