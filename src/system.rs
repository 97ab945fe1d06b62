//! Complete L-System definitions and the built-in presets.

use crate::error::LSystemError;
use crate::geometry::Segment;
use crate::grammar::ProductionSet;
use crate::interpreter::{ActionMap, TurtleConfig, TurtleInterpreter};
use crate::rewriter::Rewriter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every parameter needed to expand and draw one L-System.
///
/// Angles are in degrees here and converted to radians when a
/// [`TurtleConfig`] is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LSystemDef {
    pub name: String,
    pub axiom: String,
    /// Replacement strings keyed by single-symbol strings.
    pub productions: BTreeMap<String, String>,
    /// Turn angle in degrees.
    pub angle: f32,
    /// Starting heading in degrees.
    #[serde(default)]
    pub initial_heading: f32,
}

impl LSystemDef {
    /// Builds the [`ProductionSet`] for this definition.
    ///
    /// # Errors
    ///
    /// [`LSystemError::InvalidSymbol`] if a key is not exactly one symbol.
    pub fn production_set(&self) -> Result<ProductionSet, LSystemError> {
        let mut set = ProductionSet::new();
        for (key, replacement) in &self.productions {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(symbol), None) => set.insert(symbol, replacement.as_str()),
                _ => return Err(LSystemError::InvalidSymbol(key.clone())),
            }
        }
        Ok(set)
    }

    /// Turtle configuration for this definition with an already resolved step.
    pub fn turtle_config(&self, step_length: f32) -> TurtleConfig {
        TurtleConfig {
            step_length,
            turn_angle: self.angle.to_radians(),
            initial_heading: self.initial_heading.to_radians(),
            ..Default::default()
        }
    }

    /// Expands the axiom and interprets it with the standard symbols, using
    /// [`step_length_for`] to keep the overall extent stable across iterations.
    pub fn render(
        &self,
        rewriter: &Rewriter,
        iterations: u32,
        base_length: f32,
    ) -> Result<Vec<Segment>, LSystemError> {
        let productions = self.production_set()?;
        let sequence = rewriter.expand(&self.axiom, &productions, iterations)?;
        let config = self.turtle_config(step_length_for(base_length, iterations));
        TurtleInterpreter::new(config)
            .with_map(ActionMap::standard())
            .interpret(&sequence)
    }
}

/// Step length that shrinks as iterations grow: `base / (iterations + 1)`.
pub fn step_length_for(base_length: f32, iterations: u32) -> f32 {
    base_length / (iterations as f32 + 1.0)
}

pub mod presets {
    use super::LSystemDef;
    use std::collections::BTreeMap;

    fn def(name: &str, angle: f32, axiom: &str, rules: &[(&str, &str)]) -> LSystemDef {
        LSystemDef {
            name: name.to_owned(),
            axiom: axiom.to_owned(),
            productions: rules
                .iter()
                .map(|&(k, v)| (k.to_owned(), v.to_owned()))
                .collect::<BTreeMap<_, _>>(),
            angle,
            initial_heading: 0.0,
        }
    }

    pub fn koch_snowflake() -> LSystemDef {
        def("Koch Snowflake", 60.0, "F++F++F", &[("F", "F-F++F-F")])
    }

    pub fn sierpinski_triangle() -> LSystemDef {
        def(
            "Sierpinski Triangle",
            120.0,
            "F-G-G",
            &[("F", "F-G+F+G-F"), ("G", "GG")],
        )
    }

    /// `X` and `Y` only drive rewriting and draw nothing.
    pub fn dragon_curve() -> LSystemDef {
        def(
            "Dragon Curve",
            90.0,
            "FX",
            &[("X", "X+YF+"), ("Y", "-FX-Y")],
        )
    }

    pub fn all() -> Vec<LSystemDef> {
        vec![koch_snowflake(), sierpinski_triangle(), dragon_curve()]
    }

    /// Finds a preset by name, ignoring ASCII case.
    pub fn by_name(name: &str) -> Option<LSystemDef> {
        all().into_iter().find(|d| d.name.eq_ignore_ascii_case(name))
    }
}
