// tests/stochastic.rs
use std::collections::HashSet;
use symbios_turtle::{LSystemError, Production, ProductionSet, Rewriter, RewriterConfig};

fn branching() -> ProductionSet {
    let mut rules = ProductionSet::new();
    rules.add_alternative('F', "F", 1.0);
    rules.add_alternative('F', "FF", 1.0);
    rules
}

#[test]
fn test_same_seed_same_output() {
    let rewriter = Rewriter::default();
    let a = rewriter.expand_stochastic("F", &branching(), 6, 42).unwrap();
    let b = rewriter.expand_stochastic("F", &branching(), 6, 42).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_seeds_vary_output_within_bounds() {
    let rewriter = Rewriter::default();
    let mut seen = HashSet::new();
    for seed in 0..20 {
        let out = rewriter.expand_stochastic("F", &branching(), 6, seed).unwrap();
        assert!(out.chars().all(|c| c == 'F'));
        assert!((1..=64).contains(&out.len()));
        seen.insert(out);
    }
    assert!(seen.len() > 1, "twenty seeds should not all agree");
}

#[test]
fn test_deterministic_expand_uses_latest_alternative() {
    let out = Rewriter::default().expand("F", &branching(), 3).unwrap();
    assert_eq!(out, "FFFFFFFF");
    assert!(branching().is_stochastic());
}

#[test]
fn test_zero_weight_alternative_never_drawn() {
    let mut rules = ProductionSet::new();
    rules.add_alternative('A', "B", 1.0);
    rules.add_alternative('A', "C", 0.0);

    let rewriter = Rewriter::default();
    for seed in 0..50 {
        assert_eq!(rewriter.expand_stochastic("AAAA", &rules, 1, seed).unwrap(), "BBBB");
    }
}

#[test]
fn test_single_alternative_matches_deterministic() {
    let rules = ProductionSet::new().with_rule('F', "F-F++F-F");
    let rewriter = Rewriter::default();
    assert_eq!(
        rewriter.expand_stochastic("F++F++F", &rules, 3, 7).unwrap(),
        rewriter.expand("F++F++F", &rules, 3).unwrap()
    );
}

#[test]
fn test_projected_len_bounds_stochastic_growth() {
    let mut rules = ProductionSet::new();
    rules.add_alternative('A', "A", 1.0);
    rules.add_alternative('A', "AAA", 1.0);

    assert_eq!(Rewriter::projected_len_upper_bound("A", &rules, 4), 81);

    let rewriter = Rewriter::new(RewriterConfig {
        max_iterations: 10,
        max_symbols: 80,
    });
    assert!(matches!(
        rewriter.expand_stochastic("A", &rules, 4, 1),
        Err(LSystemError::UnboundedGrowth { projected: 81, .. })
    ));
}

#[test]
fn test_deterministic_limit_ignores_unused_alternatives() {
    let mut rules = ProductionSet::new();
    rules.add_alternative('A', "AAA", 1.0);
    rules.add_alternative('A', "A", 1.0);

    let rewriter = Rewriter::new(RewriterConfig {
        max_iterations: 10,
        max_symbols: 100,
    });

    assert_eq!(Rewriter::projected_len("A", &rules, 5), 1);
    assert_eq!(Rewriter::projected_len_upper_bound("A", &rules, 5), 243);
    assert_eq!(rewriter.expand("A", &rules, 5).unwrap(), "A");
    assert_eq!(rewriter.generations("A", &rules, 5).unwrap().len(), 6);

    // Any seed could pick "AAA" every time, so the stochastic path stays bounded.
    assert_eq!(
        rewriter.expand_stochastic("A", &rules, 5, 3).unwrap_err(),
        LSystemError::UnboundedGrowth {
            projected: 243,
            limit: 100
        }
    );
}

#[test]
fn test_deterministic_expand_skips_zero_weight_alternative() {
    let mut rules = ProductionSet::new();
    rules.add_alternative('A', "B", 1.0);
    rules.add_alternative('A', "C", 0.0);

    assert_eq!(rules.replacement('A'), Some("B"));
    assert_eq!(Rewriter::default().expand("AAAA", &rules, 1).unwrap(), "BBBB");

    // With no positive weight the last definition still wins.
    let mut unweighted = ProductionSet::new();
    unweighted.add_alternative('A', "X", 0.0);
    unweighted.add_alternative('A', "Y", 0.0);
    assert_eq!(Rewriter::default().expand("A", &unweighted, 1).unwrap(), "Y");
}

#[test]
fn test_empty_production_is_rejected_on_load() {
    let err = serde_json::from_str::<Production>(r#"{ "alternatives": [] }"#).unwrap_err();
    assert!(err.to_string().contains("production has no alternatives"));

    let set = serde_json::from_str::<ProductionSet>(
        r#"{ "rules": { "F": { "alternatives": [] } } }"#,
    );
    assert!(set.is_err());

    let json = serde_json::to_string(&branching()).unwrap();
    let back: ProductionSet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, branching());
}
