use thiserror::Error;

/// Failures surfaced by the rewriter, the interpreter, and definition parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LSystemError {
    /// The requested iteration count exceeds the configured maximum.
    #[error("iteration count {requested} exceeds the maximum of {max}")]
    InvalidIterationCount { requested: u32, max: u32 },

    /// The projected generation length exceeds the configured symbol ceiling.
    #[error("projected sequence length {projected} exceeds the limit of {limit} symbols")]
    UnboundedGrowth { projected: u64, limit: u64 },

    /// A pop was executed with an empty branch stack.
    #[error("pop at symbol {index} with an empty branch stack")]
    StackUnderflow { index: usize },

    /// A push would grow the branch stack beyond its configured depth.
    #[error("push at symbol {index} exceeds the maximum stack depth of {max_depth}")]
    StackOverflow { index: usize, max_depth: usize },

    /// A production was given with no alternatives.
    #[error("production has no alternatives")]
    EmptyProduction,

    /// A production key is not exactly one symbol.
    #[error("production key {0:?} is not a single symbol")]
    InvalidSymbol(String),
}
