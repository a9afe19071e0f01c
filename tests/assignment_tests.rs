//! Assignment invariant and scenario tests.
//!
//! These exercise the engine through the public API: exact quotas,
//! zero-sum balance, anti-synergy legality, constrained-card handling,
//! and the degraded best-effort path.

use goal_deck::assign::{AssignmentEngine, EngineConfig};
use goal_deck::catalog::{
    CardId, DeckCatalog, GoalCard, GoalKind, QuotaTable, StockChangeKind,
};
use goal_deck::core::Color;
use goal_deck::{legal_for, Assignment};

fn engine() -> AssignmentEngine {
    AssignmentEngine::new(EngineConfig::default())
}

/// Invariants that must hold for every complete assignment, balanced or
/// degraded: exact quotas, anti-synergy, and constrained-kind placement.
fn assert_hard_invariants(assignment: &Assignment, catalog: &DeckCatalog) {
    assert_eq!(assignment.cards.len(), catalog.len());

    for kind in StockChangeKind::ALL {
        assert_eq!(
            assignment.usage.get(&kind).copied().unwrap_or(0),
            catalog.quotas().quota(kind),
            "{kind} used wrong number of times"
        );
    }

    for assigned in &assignment.cards {
        assert!(
            legal_for(&assigned.card, &assigned.change),
            "illegal change {} on {:?}",
            assigned.change,
            assigned.card.kind
        );
        if assigned.card.kind.is_constrained() {
            assert!(
                assigned.change.kind.positive_only(),
                "one-of-every card got {}",
                assigned.change.kind
            );
        }
    }
}

#[test]
fn standard_deck_meets_every_invariant() {
    let catalog = DeckCatalog::standard();

    for seed in [0u64, 1, 42, 1234, 98765] {
        let assignment = engine().assign(&catalog, seed).unwrap();

        assert_hard_invariants(&assignment, &catalog);
        assert!(
            assignment.warning.is_none(),
            "standard deck should balance within the cap (seed {seed})"
        );
        assert!(assignment.is_zero_sum(catalog.palette()), "seed {seed} not zero-sum");
    }
}

#[test]
fn required_colors_never_dropped_or_spiked() {
    let catalog = DeckCatalog::standard();
    let assignment = engine().assign(&catalog, 42).unwrap();

    for assigned in &assignment.cards {
        for color in Color::ALL {
            let delta = assigned.change.delta(color);
            if assigned.card.kind.requires_color(color)
                || assigned.card.kind.avoided_color() == Some(color)
            {
                assert!(delta >= 0, "{:?} lost {color}", assigned.card.kind);
                assert_ne!(delta, 2, "{:?} spiked {color}", assigned.card.kind);
            }
        }
    }
}

#[test]
fn single_pair_card_scenario() {
    // One pair card demanding 2 Blue, one single_up quota: the engine
    // must hand out a +1, and never a negative or +2 touch on Blue.
    let cards = vec![GoalCard::new(CardId::new(0), GoalKind::Pair(Color::Blue))];
    let quotas = QuotaTable::new().with_quota(StockChangeKind::SingleUp, 1);
    let catalog = DeckCatalog::new(Color::ALL.to_vec(), cards, quotas).unwrap();

    for seed in 0..20u64 {
        let config = EngineConfig {
            max_attempts: 50,
            ..EngineConfig::default()
        };
        let assignment = AssignmentEngine::new(config).assign(&catalog, seed).unwrap();

        let assigned = &assignment.cards[0];
        assert_eq!(assigned.change.kind, StockChangeKind::SingleUp);

        let blue = assigned.change.delta(Color::Blue);
        assert!(blue >= 0);
        assert_ne!(blue, 2);
    }
}

#[test]
fn single_kind_quota_covers_whole_catalog() {
    // Every quota zero except mixed, which covers all four cards: the
    // engine has no kind choice left and every card must carry mixed.
    let cards: Vec<GoalCard> = Color::ALL
        .iter()
        .enumerate()
        .map(|(i, &color)| GoalCard::new(CardId::new(i as u32), GoalKind::Pair(color)))
        .collect();
    let quotas = QuotaTable::new().with_quota(StockChangeKind::Mixed, 4);
    let catalog = DeckCatalog::new(Color::ALL.to_vec(), cards, quotas).unwrap();

    let assignment = engine().assign(&catalog, 5).unwrap();

    assert_hard_invariants(&assignment, &catalog);
    for assigned in &assignment.cards {
        assert_eq!(assigned.change.kind, StockChangeKind::Mixed);
    }
}

#[test]
fn degraded_result_keeps_quotas_and_legality() {
    // Three pair cards, all quota on single_up: the net is +3 forever,
    // so the cap exhausts. The result must still be complete, legal, and
    // quota-exact - only the zero-sum invariant is allowed to fail.
    let cards = vec![
        GoalCard::new(CardId::new(0), GoalKind::Pair(Color::Blue)),
        GoalCard::new(CardId::new(1), GoalKind::Pair(Color::Orange)),
        GoalCard::new(CardId::new(2), GoalKind::Pair(Color::Yellow)),
    ];
    let quotas = QuotaTable::new().with_quota(StockChangeKind::SingleUp, 3);
    let catalog = DeckCatalog::new(Color::ALL.to_vec(), cards, quotas).unwrap();

    let config = EngineConfig {
        max_attempts: 40,
        ..EngineConfig::default()
    };
    let assignment = AssignmentEngine::new(config).assign(&catalog, 9).unwrap();

    assert_hard_invariants(&assignment, &catalog);

    let warning = assignment.warning.as_ref().expect("cap exhaustion must warn");
    assert_eq!(warning.attempts, 40);
    assert!(!assignment.is_zero_sum(catalog.palette()));

    // The warning carries the residual imbalance.
    let residual: i64 = Color::ALL.iter().map(|&c| warning.residual_net[c]).sum();
    assert_eq!(residual, 3);
}

#[test]
fn manipulation_deck_meets_hard_invariants() {
    let catalog = DeckCatalog::standard().with_manipulation(4).unwrap();
    let assignment = engine().assign(&catalog, 42).unwrap();

    assert_hard_invariants(&assignment, &catalog);
    if assignment.warning.is_none() {
        assert!(assignment.is_zero_sum(catalog.palette()));
    }

    let manipulation = assignment
        .cards
        .iter()
        .filter(|a| !a.card.kind.has_goal())
        .count();
    assert_eq!(manipulation, 4);
}

#[test]
fn frequency_threshold_bounds_spread() {
    let catalog = DeckCatalog::standard();
    let engine = AssignmentEngine::new(EngineConfig {
        frequency_threshold: Some(3),
        ..EngineConfig::default()
    });

    for seed in [2u64, 21, 77] {
        let assignment = engine.assign(&catalog, seed).unwrap();

        assert_hard_invariants(&assignment, &catalog);
        if assignment.warning.is_none() {
            assert!(
                assignment.frequency_spread(catalog.palette()) <= 3,
                "seed {seed} exceeded the spread threshold"
            );
        }
    }
}

#[test]
fn catalog_errors_fail_before_assignment() {
    // A bad quota total never reaches the engine.
    let cards = vec![GoalCard::new(CardId::new(0), GoalKind::Pair(Color::Blue))];
    let quotas = QuotaTable::new().with_quota(StockChangeKind::SingleUp, 2);

    assert!(DeckCatalog::new(Color::ALL.to_vec(), cards, quotas).is_err());
}
