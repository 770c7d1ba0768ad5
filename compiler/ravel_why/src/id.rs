//! Justification ids.

use std::fmt;

/// Index of a justification in its registry.
///
/// Ids are handed out in creation order, so comparing two ids compares their
/// creation time.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct JustificationId(u32);

impl JustificationId {
    /// Create an id from its raw number.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        JustificationId(raw)
    }

    /// Position in the registry arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The raw number, as shown to users (`#12`).
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for JustificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JustificationId({})", self.0)
    }
}

impl fmt::Display for JustificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
