//! Source-location tags.

use std::fmt;

/// Where in the host program a Ravel statement or expression was built.
///
/// Ravel programs are assembled in Rust through the `ravel_ir` builder
/// functions, which are `#[track_caller]`; the tag therefore names the line of
/// the program *definition*, not a line inside the interpreter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceLoc {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl SourceLoc {
    /// Tag for the caller of the current `#[track_caller]` function.
    #[track_caller]
    #[inline]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        SourceLoc {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }

    /// A tag that does not correspond to program text (built-in glue).
    pub const fn builtin() -> Self {
        SourceLoc {
            file: "<builtin>",
            line: 0,
            column: 0,
        }
    }

    pub fn is_builtin(self) -> bool {
        self.line == 0
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_builtin() {
            write!(f, "builtin")
        } else {
            write!(f, "line {}", self.line)
        }
    }
}
