//! Parallel rewriting of a symbol sequence through successive generations.
//!
//! The entry point is [`Rewriter`]. Every pass replaces each symbol of the
//! current generation with its production from a [`ProductionSet`] (or with
//! itself when no rule exists). Generation length grows exponentially, so each
//! request is checked against [`RewriterConfig`] limits before any work starts.

use crate::error::LSystemError;
use crate::grammar::{Production, ProductionSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// Limits applied before expansion begins.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriterConfig {
    /// Largest accepted iteration count.
    pub max_iterations: u32,
    /// Largest accepted length (in symbols) of the final generation.
    pub max_symbols: u64,
}

impl Default for RewriterConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            max_symbols: 5_000_000,
        }
    }
}

/// Expands axioms through a [`ProductionSet`].
#[derive(Clone, Debug, Default)]
pub struct Rewriter {
    config: RewriterConfig,
}

impl Rewriter {
    pub fn new(config: RewriterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RewriterConfig {
        &self.config
    }

    /// Returns generation `iterations` of `axiom`.
    ///
    /// `iterations == 0` returns the axiom unchanged. Symbols with several
    /// alternatives use [`Production::replacement`]; see
    /// [`expand_stochastic`](Self::expand_stochastic) for weighted choice.
    ///
    /// # Errors
    ///
    /// [`LSystemError::InvalidIterationCount`] or [`LSystemError::UnboundedGrowth`]
    /// when the request exceeds the configured limits. Both are detected up front.
    pub fn expand(
        &self,
        axiom: &str,
        productions: &ProductionSet,
        iterations: u32,
    ) -> Result<String, LSystemError> {
        self.check_limits(axiom, productions, iterations, Projection::Deterministic)?;

        let mut current = axiom.to_owned();
        for generation in 1..=iterations {
            current = rewrite_pass(&current, productions);
            trace!(generation, len = current.chars().count(), "rewrote generation");
        }

        debug!(iterations, len = current.chars().count(), "expanded axiom");
        Ok(current)
    }

    /// Returns every generation from the axiom (index 0) through `iterations`.
    ///
    /// # Errors
    ///
    /// Same limits as [`expand`](Self::expand).
    pub fn generations(
        &self,
        axiom: &str,
        productions: &ProductionSet,
        iterations: u32,
    ) -> Result<Vec<String>, LSystemError> {
        self.check_limits(axiom, productions, iterations, Projection::Deterministic)?;

        let mut out = Vec::with_capacity(iterations as usize + 1);
        out.push(axiom.to_owned());
        for _ in 0..iterations {
            let next = match out.last() {
                Some(prev) => rewrite_pass(prev, productions),
                None => break,
            };
            out.push(next);
        }
        Ok(out)
    }

    /// Like [`expand`](Self::expand), but symbols with several alternatives
    /// pick one per occurrence, weighted, from an RNG seeded with `seed`.
    ///
    /// The same seed always yields the same sequence. Symbols with a single
    /// alternative consume no random draws.
    ///
    /// # Errors
    ///
    /// Same limits as [`expand`](Self::expand), checked against the longest
    /// possible outcome.
    pub fn expand_stochastic(
        &self,
        axiom: &str,
        productions: &ProductionSet,
        iterations: u32,
        seed: u64,
    ) -> Result<String, LSystemError> {
        self.check_limits(axiom, productions, iterations, Projection::WorstCase)?;

        let mut rng = StdRng::seed_from_u64(seed);
        let mut current = axiom.to_owned();
        for generation in 1..=iterations {
            let chosen: Vec<Option<&str>> = current
                .chars()
                .map(|sym| productions.get(sym).map(|prod| choose(prod, &mut rng)))
                .collect();

            let bytes: usize = current
                .chars()
                .zip(&chosen)
                .map(|(sym, rep)| rep.map_or(sym.len_utf8(), str::len))
                .sum();

            let mut next = String::with_capacity(bytes);
            for (sym, rep) in current.chars().zip(&chosen) {
                match rep {
                    Some(rep) => next.push_str(rep),
                    None => next.push(sym),
                }
            }
            current = next;
            trace!(generation, len = current.chars().count(), "rewrote generation");
        }

        debug!(iterations, seed, len = current.chars().count(), "expanded axiom stochastically");
        Ok(current)
    }

    /// Exact length in symbols of generation `iterations` as produced by
    /// [`expand`](Self::expand), computed from per-symbol counts without
    /// building any sequence. Saturates at `u64::MAX`.
    pub fn projected_len(axiom: &str, productions: &ProductionSet, iterations: u32) -> u64 {
        project(axiom, productions, iterations, Projection::Deterministic)
    }

    /// Upper bound on the length of any outcome of
    /// [`expand_stochastic`](Self::expand_stochastic).
    ///
    /// Each successor symbol of a rule is counted at its largest multiplicity
    /// across the rule's alternatives. Equals [`projected_len`](Self::projected_len)
    /// for sets without alternatives. Saturates at `u64::MAX`.
    pub fn projected_len_upper_bound(
        axiom: &str,
        productions: &ProductionSet,
        iterations: u32,
    ) -> u64 {
        project(axiom, productions, iterations, Projection::WorstCase)
    }

    fn check_limits(
        &self,
        axiom: &str,
        productions: &ProductionSet,
        iterations: u32,
        projection: Projection,
    ) -> Result<(), LSystemError> {
        if iterations > self.config.max_iterations {
            warn!(
                requested = iterations,
                max = self.config.max_iterations,
                "rejected iteration count"
            );
            return Err(LSystemError::InvalidIterationCount {
                requested: iterations,
                max: self.config.max_iterations,
            });
        }

        let projected = project(axiom, productions, iterations, projection);
        if projected > self.config.max_symbols {
            warn!(
                projected,
                limit = self.config.max_symbols,
                "rejected expansion exceeding symbol limit"
            );
            return Err(LSystemError::UnboundedGrowth {
                projected,
                limit: self.config.max_symbols,
            });
        }
        Ok(())
    }
}

/// Which alternatives a length projection accounts for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Projection {
    /// Only the replacement deterministic expansion uses.
    Deterministic,
    /// Every alternative, taking the largest count per successor symbol.
    WorstCase,
}

fn project(
    axiom: &str,
    productions: &ProductionSet,
    iterations: u32,
    projection: Projection,
) -> u64 {
    let successors: HashMap<char, Vec<(char, u64)>> = productions
        .iter()
        .map(|(sym, prod)| (sym, successor_counts(prod, projection)))
        .collect();

    let mut counts: HashMap<char, u64> = HashMap::new();
    for sym in axiom.chars() {
        *counts.entry(sym).or_default() += 1;
    }

    for _ in 0..iterations {
        let mut next: HashMap<char, u64> = HashMap::with_capacity(counts.len());
        for (&sym, &count) in &counts {
            match successors.get(&sym) {
                Some(succ) => {
                    for &(s, n) in succ {
                        let slot = next.entry(s).or_default();
                        *slot = slot.saturating_add(count.saturating_mul(n));
                    }
                }
                None => {
                    let slot = next.entry(sym).or_default();
                    *slot = slot.saturating_add(count);
                }
            }
        }
        // Fixed point: further passes cannot change the counts.
        if next == counts {
            break;
        }
        counts = next;
    }

    counts.values().fold(0u64, |acc, &n| acc.saturating_add(n))
}

/// One deterministic pass, with the output buffer sized exactly up front.
fn rewrite_pass(current: &str, productions: &ProductionSet) -> String {
    let bytes: usize = current
        .chars()
        .map(|sym| match productions.replacement(sym) {
            Some(rep) => rep.len(),
            None => sym.len_utf8(),
        })
        .sum();

    let mut next = String::with_capacity(bytes);
    for sym in current.chars() {
        match productions.replacement(sym) {
            Some(rep) => next.push_str(rep),
            None => next.push(sym),
        }
    }
    next
}

/// Weighted draw among the alternatives of `prod`.
fn choose<'a>(prod: &'a Production, rng: &mut StdRng) -> &'a str {
    if !prod.is_stochastic() {
        return prod.replacement();
    }

    let total: f32 = prod
        .alternatives()
        .iter()
        .map(|alt| alt.weight.max(0.0))
        .sum();
    if total <= 0.0 {
        return prod.replacement();
    }

    let mut target = rng.random::<f32>() * total;
    let mut fallback = prod.replacement();
    for alt in prod.alternatives() {
        if alt.weight <= 0.0 {
            continue;
        }
        if target < alt.weight {
            return &alt.replacement;
        }
        target -= alt.weight;
        fallback = &alt.replacement;
    }
    fallback
}

/// Per-successor symbol counts of a rule. `WorstCase` maximises over all alternatives.
fn successor_counts(prod: &Production, projection: Projection) -> Vec<(char, u64)> {
    let replacements: Vec<&str> = match projection {
        Projection::Deterministic => vec![prod.replacement()],
        Projection::WorstCase => prod
            .alternatives()
            .iter()
            .map(|alt| alt.replacement.as_str())
            .collect(),
    };

    let mut max_counts: HashMap<char, u64> = HashMap::new();
    for replacement in replacements {
        let mut counts: HashMap<char, u64> = HashMap::new();
        for sym in replacement.chars() {
            *counts.entry(sym).or_default() += 1;
        }
        for (sym, n) in counts {
            let slot = max_counts.entry(sym).or_default();
            *slot = (*slot).max(n);
        }
    }
    max_counts.into_iter().collect()
}
