//! Interpreter configuration.

/// Default bound on nested function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 2_000;

/// Default depth of the explanation printed when a program fails.
pub const DEFAULT_FAILURE_EXPLAIN_DEPTH: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// `None` leaves recursion bounded only by memory.
    pub max_call_depth: Option<usize>,
    pub failure_explain_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
            failure_explain_depth: DEFAULT_FAILURE_EXPLAIN_DEPTH,
        }
    }
}
