// tests/definitions.rs
use glam::Vec2;
use symbios_turtle::{
    Bounds, LSystemDef, LSystemError, Rewriter, Segment, fit_segments, presets, step_length_for,
};

const EPS: f32 = 1e-4;

#[test]
fn test_presets_are_available() {
    let names: Vec<String> = presets::all().into_iter().map(|d| d.name).collect();
    assert_eq!(
        names,
        ["Koch Snowflake", "Sierpinski Triangle", "Dragon Curve"]
    );
    assert_eq!(presets::by_name("dragon curve"), Some(presets::dragon_curve()));
    assert!(presets::by_name("Hilbert").is_none());
}

#[test]
fn test_koch_render_is_closed() {
    let koch = presets::koch_snowflake();
    let segments = koch.render(&Rewriter::default(), 1, 4.0).unwrap();

    assert_eq!(segments.len(), 12);
    for seg in &segments {
        assert!((seg.length() - 2.0).abs() < EPS);
    }
    let first = segments.first().unwrap().start;
    let last = segments.last().unwrap().end;
    assert!(first.abs_diff_eq(last, EPS));
}

#[test]
fn test_sierpinski_draws_both_symbols() {
    let def = presets::sierpinski_triangle();
    let rewriter = Rewriter::default();
    let sequence = rewriter
        .expand(&def.axiom, &def.production_set().unwrap(), 2)
        .unwrap();
    let drawn = sequence.chars().filter(|&c| c == 'F' || c == 'G').count();

    let segments = def.render(&rewriter, 2, 3.0).unwrap();
    assert_eq!(segments.len(), drawn);
}

#[test]
fn test_dragon_curve_ignores_rewrite_only_symbols() {
    let def = presets::dragon_curve();
    let segments = def.render(&Rewriter::default(), 3, 1.0).unwrap();

    // FX -> FX+YF+ -> FX+YF++-FX-YF+ -> ...; the F count doubles each generation.
    assert_eq!(segments.len(), 8);
    for seg in &segments {
        assert!((seg.length() - 0.25).abs() < EPS);
    }
}

#[test]
fn test_step_length_policy() {
    assert_eq!(step_length_for(10.0, 0), 10.0);
    assert_eq!(step_length_for(10.0, 4), 2.0);
}

#[test]
fn test_turtle_config_converts_degrees() {
    let mut def = presets::koch_snowflake();
    def.initial_heading = 90.0;
    let config = def.turtle_config(0.5);

    assert_eq!(config.step_length, 0.5);
    assert!((config.turn_angle - std::f32::consts::FRAC_PI_3).abs() < 1e-6);
    assert!((config.initial_heading - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
}

#[test]
fn test_definition_from_json() {
    let def: LSystemDef = serde_json::from_str(
        r#"{
            "name": "Plant",
            "axiom": "X",
            "productions": { "X": "F[+X]F[-X]+X", "F": "FF" },
            "angle": 20
        }"#,
    )
    .unwrap();

    assert_eq!(def.initial_heading, 0.0);
    let rules = def.production_set().unwrap();
    assert_eq!(rules.replacement('X'), Some("F[+X]F[-X]+X"));
    assert_eq!(rules.replacement('F'), Some("FF"));

    // Balanced branches never underflow.
    let segments = def.render(&Rewriter::default(), 4, 1.0).unwrap();
    assert!(!segments.is_empty());
}

#[test]
fn test_multi_symbol_key_is_rejected() {
    let mut def = presets::koch_snowflake();
    def.productions.insert("FF".to_owned(), "F".to_owned());
    assert_eq!(
        def.production_set().unwrap_err(),
        LSystemError::InvalidSymbol("FF".to_owned())
    );

    def.productions.clear();
    def.productions.insert(String::new(), "F".to_owned());
    assert!(matches!(
        def.render(&Rewriter::default(), 1, 1.0),
        Err(LSystemError::InvalidSymbol(_))
    ));
}

#[test]
fn test_bounds_and_fit() {
    let segments = presets::koch_snowflake()
        .render(&Rewriter::default(), 2, 1.0)
        .unwrap();
    let target = Bounds::centered(2.0);
    let fitted = fit_segments(&segments, target);

    assert_eq!(fitted.len(), segments.len());
    let fitted_bounds = Bounds::of(&fitted).unwrap();
    assert!(fitted_bounds.min.abs_diff_eq(Vec2::splat(-1.0), EPS));
    assert!(fitted_bounds.max.abs_diff_eq(Vec2::splat(1.0), EPS));
}

#[test]
fn test_fit_handles_flat_input() {
    let line = [
        Segment::new(Vec2::new(0.0, 3.0), Vec2::new(1.0, 3.0)),
        Segment::new(Vec2::new(1.0, 3.0), Vec2::new(2.0, 3.0)),
    ];
    let fitted = fit_segments(&line, Bounds::new(Vec2::ZERO, Vec2::new(10.0, 4.0)));

    assert_eq!(fitted[0].start, Vec2::new(0.0, 2.0));
    assert_eq!(fitted[1].end, Vec2::new(10.0, 2.0));
    assert!(fit_segments(&[], Bounds::centered(1.0)).is_empty());
    assert!(Bounds::of(&[]).is_none());
}
