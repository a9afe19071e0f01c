//! The bounded-retry assignment engine.
//!
//! Each attempt assigns one freshly generated stock-change instance to
//! every card, constrained cards first, then checks the global balance
//! invariants. Unbalanced attempts are discarded wholesale and re-run
//! with a fresh card order and a fresh RNG stream, up to a cap. Attempt
//! state is local to the attempt - the engine shares nothing mutable
//! between attempts, so attempts could run on independent workers.
//!
//! When the cap runs out the engine still returns the last complete
//! attempt, tagged with an `ImbalanceWarning`: callers get a usable
//! (if imperfect) deck, never an empty result.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::catalog::{DeckCatalog, GoalCard, StockChangeInstance, StockChangeKind};
use crate::core::{Color, ColorMap, DeckRng};

use super::generator::generate_instance;
use super::scorer::{balance_score, skew_penalty};
use super::validator::legal_for;

/// Tuning knobs for the assignment search.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Hard cap on full assignment attempts.
    pub max_attempts: usize,

    /// Candidate instances generated per eligible kind per card.
    pub candidates_per_kind: usize,

    /// Candidate draws per kind during the relaxed fallback pass.
    pub fallback_candidates: usize,

    /// Maximum allowed max-min color appearance spread. `None` disables
    /// frequency balancing entirely: draws stay uniform and scoring
    /// drops the skew term.
    pub frequency_threshold: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5000,
            candidates_per_kind: 50,
            fallback_candidates: 20,
            frequency_threshold: None,
        }
    }
}

/// The engine found no complete legal assignment at all.
///
/// Distinct from an imbalanced-but-complete result (which is returned
/// with a warning): this means the quota table cannot legally cover the
/// catalog, which is a configuration problem.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AssignError {
    #[error(
        "no complete legal assignment in {attempts} attempts; \
         the quota table cannot legally cover the catalog"
    )]
    Unsatisfiable { attempts: usize },
}

/// One card with its committed stock change.
#[derive(Clone, Debug)]
pub struct AssignedCard {
    pub card: GoalCard,
    pub change: StockChangeInstance,
}

impl AssignedCard {
    /// Score penalty from the carried change kind.
    #[must_use]
    pub fn penalty(&self) -> i32 {
        self.change.kind.penalty()
    }

    /// Combined card score; `None` for goal-less manipulation cards.
    #[must_use]
    pub fn score(&self) -> Option<i32> {
        self.card
            .kind
            .has_goal()
            .then(|| self.card.difficulty + self.penalty())
    }
}

/// Residual imbalance of a best-effort result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImbalanceWarning {
    /// Attempts spent before giving up on a balanced deck.
    pub attempts: usize,
    /// Per-color net delta of the returned assignment.
    pub residual_net: ColorMap<i64>,
    /// Max-min color appearance spread of the returned assignment.
    pub frequency_spread: u32,
}

impl std::fmt::Display for ImbalanceWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let residual: Vec<String> = self
            .residual_net
            .iter()
            .filter(|(_, &net)| net != 0)
            .map(|(color, net)| format!("{color} {net:+}"))
            .collect();
        let residual = if residual.is_empty() {
            "none".to_string()
        } else {
            residual.join(", ")
        };
        write!(
            f,
            "no balanced assignment after {} attempts; residual net: {}; frequency spread: {}",
            self.attempts, residual, self.frequency_spread
        )
    }
}

/// A complete one-instance-per-card assignment with its bookkeeping.
///
/// Immutable once returned; downstream scoring consumes it read-only.
#[derive(Clone, Debug)]
pub struct Assignment {
    /// Cards in assignment order (constrained first, then the attempt's
    /// shuffled order).
    pub cards: Vec<AssignedCard>,
    /// Net signed delta per color.
    pub net: ColorMap<i64>,
    /// How many instances touch each color.
    pub frequency: ColorMap<u32>,
    /// Cards per kind; equals the quota table for complete assignments.
    pub usage: FxHashMap<StockChangeKind, usize>,
    /// Present when the retry cap was exhausted.
    pub warning: Option<ImbalanceWarning>,
}

impl Assignment {
    /// Max-min color appearance spread over the palette.
    #[must_use]
    pub fn frequency_spread(&self, palette: &[Color]) -> u32 {
        self.frequency.max_over(palette) - self.frequency.min_over(palette)
    }

    /// Does every palette color net to zero?
    #[must_use]
    pub fn is_zero_sum(&self, palette: &[Color]) -> bool {
        palette.iter().all(|&c| self.net[c] == 0)
    }
}

/// Per-attempt working state. Created fresh for every attempt and
/// discarded wholesale when the attempt is rejected.
struct Attempt {
    assigned: Vec<AssignedCard>,
    net: ColorMap<i64>,
    frequency: ColorMap<u32>,
    usage: FxHashMap<StockChangeKind, usize>,
}

impl Attempt {
    fn new() -> Self {
        Self {
            assigned: Vec::new(),
            net: ColorMap::default(),
            frequency: ColorMap::default(),
            usage: FxHashMap::default(),
        }
    }

    fn used(&self, kind: StockChangeKind) -> usize {
        self.usage.get(&kind).copied().unwrap_or(0)
    }

    fn commit(&mut self, card: &GoalCard, change: StockChangeInstance) {
        *self.usage.entry(change.kind).or_insert(0) += 1;
        for (color, delta) in change.touched() {
            self.net[color] += i64::from(delta);
            self.frequency[color] += 1;
        }
        self.assigned.push(AssignedCard {
            card: card.clone(),
            change,
        });
    }

    fn into_assignment(self, warning: Option<ImbalanceWarning>) -> Assignment {
        Assignment {
            cards: self.assigned,
            net: self.net,
            frequency: self.frequency,
            usage: self.usage,
            warning,
        }
    }
}

/// The constrained-assignment search.
#[derive(Clone, Debug)]
pub struct AssignmentEngine {
    config: EngineConfig,
}

impl AssignmentEngine {
    /// Create an engine with the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Assign one stock change to every catalog card.
    ///
    /// Deterministic for a given catalog and seed. Returns a best-effort
    /// assignment with a warning when the cap runs out, and
    /// `AssignError::Unsatisfiable` only if no attempt ever covered every
    /// card.
    pub fn assign(&self, catalog: &DeckCatalog, seed: u64) -> Result<Assignment, AssignError> {
        let mut root = DeckRng::new(seed);
        let mut last_complete: Option<Attempt> = None;

        for attempt_index in 0..self.config.max_attempts {
            let mut rng = root.fork();
            let Some(attempt) = self.run_attempt(catalog, &mut rng) else {
                continue;
            };

            if self.is_balanced(&attempt, catalog.palette()) {
                log::debug!(
                    "balanced assignment on attempt {} of {}",
                    attempt_index + 1,
                    self.config.max_attempts
                );
                return Ok(attempt.into_assignment(None));
            }
            last_complete = Some(attempt);
        }

        match last_complete {
            Some(attempt) => {
                let warning = ImbalanceWarning {
                    attempts: self.config.max_attempts,
                    residual_net: attempt.net.clone(),
                    frequency_spread: attempt.frequency.max_over(catalog.palette())
                        - attempt.frequency.min_over(catalog.palette()),
                };
                log::warn!("{warning}");
                Ok(attempt.into_assignment(Some(warning)))
            }
            None => Err(AssignError::Unsatisfiable {
                attempts: self.config.max_attempts,
            }),
        }
    }

    /// One full pass over the catalog. `None` if some card could not be
    /// assigned even by the fallback pass.
    fn run_attempt(&self, catalog: &DeckCatalog, rng: &mut DeckRng) -> Option<Attempt> {
        let mut attempt = Attempt::new();

        let constrained: Vec<&GoalCard> = catalog
            .cards()
            .iter()
            .filter(|c| c.kind.is_constrained())
            .collect();
        let mut unconstrained: Vec<&GoalCard> = catalog
            .cards()
            .iter()
            .filter(|c| !c.kind.is_constrained())
            .collect();
        rng.shuffle(&mut unconstrained);

        // Constrained cards draw from the narrow positive-only kind set;
        // place them first, while that quota is still open.
        for card in constrained {
            let kinds = self.eligible_kinds(&attempt, catalog, true);
            let change = self.pick_scored(card, &kinds, &attempt, catalog, rng)?;
            attempt.commit(card, change);
        }

        for card in unconstrained {
            let kinds = self.eligible_kinds(&attempt, catalog, false);
            let change = match self.pick_scored(card, &kinds, &attempt, catalog, rng) {
                Some(change) => change,
                None => self.pick_fallback(card, &kinds, &attempt, catalog, rng)?,
            };
            attempt.commit(card, change);
        }

        Some(attempt)
    }

    /// Kinds with remaining quota, optionally narrowed to positive-only.
    fn eligible_kinds(
        &self,
        attempt: &Attempt,
        catalog: &DeckCatalog,
        positive_only: bool,
    ) -> SmallVec<[StockChangeKind; 7]> {
        StockChangeKind::ALL
            .iter()
            .copied()
            .filter(|k| !positive_only || k.positive_only())
            .filter(|&k| attempt.used(k) < catalog.quotas().quota(k))
            .collect()
    }

    /// Full candidate pass: generate, validate, score, and sample
    /// uniformly from the best third.
    fn pick_scored(
        &self,
        card: &GoalCard,
        kinds: &[StockChangeKind],
        attempt: &Attempt,
        catalog: &DeckCatalog,
        rng: &mut DeckRng,
    ) -> Option<StockChangeInstance> {
        let frequency = self.frequency_tally(attempt);

        let mut candidates = Vec::new();
        for &kind in kinds {
            for _ in 0..self.config.candidates_per_kind {
                let inst = generate_instance(kind, catalog.palette(), frequency, rng);
                if legal_for(card, &inst) {
                    candidates.push(inst);
                }
            }
        }

        if candidates.is_empty() {
            return None;
        }

        candidates.sort_by_cached_key(|inst| self.score(inst, attempt, catalog.palette()));
        let top = (candidates.len() / 3).max(1);
        let index = rng.gen_range_usize(0..top);
        Some(candidates.swap_remove(index))
    }

    /// Relaxed pass: fewer draws per kind, first legal candidate wins.
    /// Trades variety for forward progress so the attempt doesn't stall.
    fn pick_fallback(
        &self,
        card: &GoalCard,
        kinds: &[StockChangeKind],
        attempt: &Attempt,
        catalog: &DeckCatalog,
        rng: &mut DeckRng,
    ) -> Option<StockChangeInstance> {
        let frequency = self.frequency_tally(attempt);

        for &kind in kinds {
            for _ in 0..self.config.fallback_candidates {
                let inst = generate_instance(kind, catalog.palette(), frequency, rng);
                if legal_for(card, &inst) {
                    return Some(inst);
                }
            }
        }
        None
    }

    fn frequency_tally<'a>(&self, attempt: &'a Attempt) -> Option<&'a ColorMap<u32>> {
        self.config
            .frequency_threshold
            .is_some()
            .then_some(&attempt.frequency)
    }

    fn score(&self, instance: &StockChangeInstance, attempt: &Attempt, palette: &[Color]) -> i64 {
        let mut score = balance_score(instance, &attempt.net);
        if self.config.frequency_threshold.is_some() {
            score += skew_penalty(instance, &attempt.frequency, palette);
        }
        score
    }

    fn is_balanced(&self, attempt: &Attempt, palette: &[Color]) -> bool {
        if palette.iter().any(|&c| attempt.net[c] != 0) {
            return false;
        }
        match self.config.frequency_threshold {
            Some(threshold) => {
                attempt.frequency.max_over(palette) - attempt.frequency.min_over(palette)
                    <= threshold
            }
            None => true,
        }
    }
}
