//! Errors raised while building or querying the justification graph.

use crate::JustificationId;

/// Failure to add or find a justification.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum JustificationError {
    /// A supporter was not created strictly before its supportee.
    #[error("justification {supporter} cannot support {supportee}: supporters must be created first")]
    InvariantViolation {
        supporter: JustificationId,
        supportee: JustificationId,
    },
    /// No justification with this id exists in the registry.
    #[error("no justification with id {id}")]
    UnknownJustification { id: u32 },
}
