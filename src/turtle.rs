//! Turtle state and operations for 2D interpretation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The state of the drawing turtle.
///
/// Tracks the cursor position and heading. Saved copies of this value form
/// the branch stack during interpretation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current position of the cursor in the turtle's local frame.
    pub position: Vec2,

    /// Current heading in radians, measured counter-clockwise from `+X`.
    pub heading: f32,
}

impl Default for TurtleState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            heading: 0.0,
        }
    }
}

impl TurtleState {
    pub fn new(position: Vec2, heading: f32) -> Self {
        Self { position, heading }
    }

    /// Unit vector pointing along the current heading.
    pub fn forward(&self) -> Vec2 {
        Vec2::from_angle(self.heading)
    }

    /// Rotates the heading by `angle` radians (positive turns counter-clockwise).
    pub fn turn(&mut self, angle: f32) {
        self.heading += angle;
    }

    /// Moves `distance` along the heading and returns the previous position.
    pub fn advance(&mut self, distance: f32) -> Vec2 {
        let from = self.position;
        self.position += self.forward() * distance;
        from
    }
}

/// Operations that can be bound to a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TurtleOp {
    /// Move forward one step and emit a segment (`F`, `G`).
    Draw,
    /// Move forward one step without drawing (`f`).
    Move,
    /// Rotate by the turn angle times this sign (`+` is `1.0`, `-` is `-1.0`).
    Turn(f32),
    /// Save position and heading onto the branch stack (`[`).
    Push,
    /// Restore the most recently pushed state (`]`).
    Pop,
    /// No-op, the symbol has no registered meaning.
    Ignore,
}
