//! Production rules keyed by symbol.

use crate::error::LSystemError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One weighted replacement for a symbol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    /// The symbols written in place of the predecessor.
    pub replacement: String,
    /// Relative selection weight for stochastic expansion. Non-positive weights are never drawn.
    pub weight: f32,
}

/// The rewrite rule for a single symbol.
///
/// Holds at least one alternative; deserializing an empty list fails.
/// Deterministic expansion uses the most recently added alternative with a
/// positive weight; stochastic expansion draws among all of them in
/// proportion to their weights.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProduction")]
pub struct Production {
    alternatives: Vec<Alternative>,
}

#[derive(Deserialize)]
struct RawProduction {
    alternatives: Vec<Alternative>,
}

impl TryFrom<RawProduction> for Production {
    type Error = LSystemError;

    fn try_from(raw: RawProduction) -> Result<Self, Self::Error> {
        if raw.alternatives.is_empty() {
            return Err(LSystemError::EmptyProduction);
        }
        Ok(Self {
            alternatives: raw.alternatives,
        })
    }
}

impl Production {
    fn new(replacement: String, weight: f32) -> Self {
        Self {
            alternatives: vec![Alternative {
                replacement,
                weight,
            }],
        }
    }

    /// All alternatives, in definition order.
    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }

    /// The replacement used by deterministic expansion: the last-defined
    /// alternative with a positive weight, or the last one if none has.
    pub fn replacement(&self) -> &str {
        self.alternatives
            .iter()
            .rev()
            .find(|alt| alt.weight > 0.0)
            .or_else(|| self.alternatives.last())
            .map(|alt| alt.replacement.as_str())
            .unwrap_or_default()
    }

    /// Whether this rule has more than one alternative to choose from.
    pub fn is_stochastic(&self) -> bool {
        self.alternatives.len() > 1
    }
}

/// Mapping from symbol to [`Production`].
///
/// Symbols without a rule rewrite to themselves. Defining the same symbol
/// twice with [`insert`](Self::insert) keeps the later definition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionSet {
    rules: HashMap<char, Production>,
}

impl ProductionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the deterministic rule for `symbol`, replacing any earlier rule
    /// and any stochastic alternatives it carried.
    pub fn insert(&mut self, symbol: char, replacement: impl Into<String>) {
        self.rules
            .insert(symbol, Production::new(replacement.into(), 1.0));
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_rule(mut self, symbol: char, replacement: impl Into<String>) -> Self {
        self.insert(symbol, replacement);
        self
    }

    /// Appends a weighted alternative for `symbol`, keeping earlier ones.
    ///
    /// An alternative with a non-positive weight is never drawn, and
    /// deterministic expansion skips it while a positively weighted one exists.
    pub fn add_alternative(&mut self, symbol: char, replacement: impl Into<String>, weight: f32) {
        let replacement = replacement.into();
        match self.rules.get_mut(&symbol) {
            Some(production) => production.alternatives.push(Alternative {
                replacement,
                weight,
            }),
            None => {
                self.rules
                    .insert(symbol, Production::new(replacement, weight));
            }
        }
    }

    /// Looks up the rule for `symbol`, if one is defined.
    pub fn get(&self, symbol: char) -> Option<&Production> {
        self.rules.get(&symbol)
    }

    /// The deterministic replacement for `symbol`, or `None` for the identity production.
    pub fn replacement(&self, symbol: char) -> Option<&str> {
        self.rules.get(&symbol).map(Production::replacement)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether any rule has more than one alternative.
    pub fn is_stochastic(&self) -> bool {
        self.rules.values().any(Production::is_stochastic)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &Production)> {
        self.rules.iter().map(|(&sym, prod)| (sym, prod))
    }
}

impl<S: Into<String>> FromIterator<(char, S)> for ProductionSet {
    /// Collects deterministic rules; a repeated key keeps the last pair.
    fn from_iter<I: IntoIterator<Item = (char, S)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (symbol, replacement) in iter {
            set.insert(symbol, replacement);
        }
        set
    }
}
