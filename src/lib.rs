//! # symbios-turtle
//!
//! A deterministic L-System engine that expands an axiom through symbol-keyed
//! productions and interprets the result with a 2D turtle.
//!
//! The [`Rewriter`] produces the expanded *Genotype* (the symbol sequence), and the
//! [`TurtleInterpreter`] turns it into a *Phenotype*: an ordered list of [`Segment`]s
//! in the turtle's own frame, ready for scaling with [`fit_segments`] and rendering
//! by whatever backend the caller uses.

pub mod error;
pub mod geometry;
pub mod grammar;
pub mod interpreter;
pub mod rewriter;
pub mod system;
pub mod turtle;

pub use error::*;
pub use geometry::*;
pub use grammar::*;
pub use interpreter::*;
pub use rewriter::*;
pub use system::*;
pub use turtle::*;
