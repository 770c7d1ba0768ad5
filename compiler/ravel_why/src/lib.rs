//! Ravel Why - the justification graph.
//!
//! Every value a Ravel program computes is paired with a [`JustificationId`]
//! pointing into a [`JustificationRegistry`]. Each node records *why* the value
//! holds: a textual axiom, a conjunction of earlier causes, or a full record of
//! the variable, its value, where it was computed and what caused the
//! computation.
//!
//! # Ordering invariant
//!
//! Ids are allocated in creation order and a node may only be supported by
//! nodes that already exist, so every supporter id is strictly smaller than its
//! supportee's. The graph is therefore a DAG ordered by creation time, and
//! recursive explanation terminates without cycle detection. The registry
//! rejects any node that would break this with
//! [`JustificationError::InvariantViolation`].
//!
//! # Lifecycle
//!
//! The registry is an append-only arena owned by one interpreter session.
//! Nothing is ever removed; ids stay valid for the whole run so that any node
//! can be looked up again by number (`why #42`).

mod errors;
mod explain;
mod id;
mod justification;
mod location;
mod registry;

pub use errors::JustificationError;
pub use id::JustificationId;
pub use justification::{to_variable_text, Justification, JustificationKind};
pub use location::SourceLoc;
pub use registry::JustificationRegistry;
