//! Interpreter that converts an L-System symbol sequence into line [`Segment`]s.
//!
//! The entry point is [`TurtleInterpreter`]. Configure it with a [`TurtleConfig`],
//! register symbol-to-operation mappings via [`TurtleInterpreter::set_op`] or
//! [`TurtleInterpreter::populate_standard_symbols`], then call
//! [`TurtleInterpreter::interpret`] with an expanded sequence.

use crate::error::LSystemError;
use crate::geometry::Segment;
use crate::turtle::{TurtleOp, TurtleState};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Configuration for turtle interpretation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TurtleConfig {
    /// Distance covered by one `Draw` or `Move`. Already resolved by the caller.
    pub step_length: f32,
    /// Rotation (in radians) applied by `Turn`, multiplied by the op's sign.
    pub turn_angle: f32,
    /// Heading (in radians) the turtle starts with.
    pub initial_heading: f32,
    /// Position the turtle starts at.
    pub initial_position: Vec2,
    /// Maximum number of simultaneously saved states.
    pub max_stack_depth: usize,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            step_length: 1.0,
            turn_angle: 90.0f32.to_radians(),
            initial_heading: 0.0,
            initial_position: Vec2::ZERO,
            max_stack_depth: 1024,
        }
    }
}

/// Mapping from symbol to [`TurtleOp`]. Unmapped symbols are [`TurtleOp::Ignore`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionMap {
    ops: HashMap<char, TurtleOp>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The conventional bindings: `F`/`G` draw, `f` moves, `+`/`-` turn,
    /// `[`/`]` push and pop.
    pub fn standard() -> Self {
        [
            ('F', TurtleOp::Draw),
            ('G', TurtleOp::Draw),
            ('f', TurtleOp::Move),
            ('+', TurtleOp::Turn(1.0)),
            ('-', TurtleOp::Turn(-1.0)),
            ('[', TurtleOp::Push),
            (']', TurtleOp::Pop),
        ]
        .into_iter()
        .collect()
    }

    pub fn set(&mut self, symbol: char, op: TurtleOp) {
        self.ops.insert(symbol, op);
    }

    pub fn get(&self, symbol: char) -> TurtleOp {
        self.ops.get(&symbol).copied().unwrap_or(TurtleOp::Ignore)
    }
}

impl FromIterator<(char, TurtleOp)> for ActionMap {
    fn from_iter<I: IntoIterator<Item = (char, TurtleOp)>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

/// Interprets L-System output as a sequence of drawn segments.
#[derive(Clone, Debug)]
pub struct TurtleInterpreter {
    actions: ActionMap,
    config: TurtleConfig,
}

impl TurtleInterpreter {
    /// Creates a new interpreter with the given configuration and an empty symbol map.
    ///
    /// Register operations with [`set_op`](Self::set_op) or
    /// [`populate_standard_symbols`](Self::populate_standard_symbols) before calling
    /// [`interpret`](Self::interpret).
    pub fn new(config: TurtleConfig) -> Self {
        Self {
            actions: ActionMap::new(),
            config,
        }
    }

    /// Replaces the entire symbol-to-operation map in one step (builder pattern).
    pub fn with_map(mut self, actions: ActionMap) -> Self {
        self.actions = actions;
        self
    }

    /// Assigns a single [`TurtleOp`] to a symbol.
    pub fn set_op(&mut self, symbol: char, op: TurtleOp) {
        self.actions.set(symbol, op);
    }

    /// Registers the bindings of [`ActionMap::standard`], keeping any other
    /// symbols already mapped.
    pub fn populate_standard_symbols(&mut self) {
        for (symbol, op) in ActionMap::standard().ops {
            self.set_op(symbol, op);
        }
    }

    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    pub fn actions(&self) -> &ActionMap {
        &self.actions
    }

    /// Walks `sequence` once and returns the segments drawn, in draw order.
    ///
    /// The turtle starts at `initial_position` facing `initial_heading`. Each
    /// symbol is dispatched to its registered [`TurtleOp`]; symbols with no
    /// mapping are skipped. Output is in the turtle's own frame.
    ///
    /// # Push / Pop
    ///
    /// `[` saves position and heading onto a stack local to this call and `]`
    /// restores them.
    ///
    /// # Errors
    ///
    /// [`LSystemError::StackUnderflow`] when a pop meets an empty stack, and
    /// [`LSystemError::StackOverflow`] when a push exceeds `max_stack_depth`.
    /// Either aborts the pass.
    pub fn interpret(&self, sequence: &str) -> Result<Vec<Segment>, LSystemError> {
        let mut turtle = TurtleState::new(self.config.initial_position, self.config.initial_heading);
        let mut stack: Vec<TurtleState> = Vec::new();
        let mut segments = Vec::new();

        for (index, symbol) in sequence.chars().enumerate() {
            match self.actions.get(symbol) {
                TurtleOp::Draw => {
                    let start = turtle.advance(self.config.step_length);
                    segments.push(Segment::new(start, turtle.position));
                }
                TurtleOp::Move => {
                    turtle.advance(self.config.step_length);
                }
                TurtleOp::Turn(sign) => turtle.turn(self.config.turn_angle * sign),
                TurtleOp::Push => {
                    if stack.len() >= self.config.max_stack_depth {
                        return Err(LSystemError::StackOverflow {
                            index,
                            max_depth: self.config.max_stack_depth,
                        });
                    }
                    stack.push(turtle);
                }
                TurtleOp::Pop => {
                    turtle = stack.pop().ok_or(LSystemError::StackUnderflow { index })?;
                }
                TurtleOp::Ignore => {}
            }
        }

        debug!(
            symbols = sequence.chars().count(),
            segments = segments.len(),
            "interpreted sequence"
        );
        Ok(segments)
    }
}
