//! Evaluation errors.
//!
//! Every failure is fatal to the running program. Errors carry the
//! justification of the failing operation so the report can explain how the
//! program got there, plus a snapshot of the interpreter call stack.
//!
//! Factory functions are the public way to build errors; they keep message
//! wording in one place.

use std::fmt;

use ravel_why::{JustificationError, JustificationId, SourceLoc};

/// Result of evaluation.
pub type EvalResult<T> = Result<T, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("undefined variable: '{name}' in {scope}")]
    UndefinedVariable { name: String, scope: String },
    #[error("function '{name}' not defined in {scope}")]
    UndefinedFunction { name: String, scope: String },
    #[error("class {name} is not defined")]
    UndefinedClass { name: String },
    #[error("variable '{name}' already defined in {scope}")]
    DuplicateDeclaration { name: String, scope: String },
    #[error("invalid number of arguments to function {name}: required {expected}, got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("invalid value {value} (not Object) returned from {function}")]
    InvalidReturnType { function: String, value: String },
    #[error("no justification with id {id}")]
    InvalidJustificationType { id: u32 },
    #[error("justification {supporter} cannot support {supportee}: supporters must be created first")]
    InvariantViolation {
        supporter: JustificationId,
        supportee: JustificationId,
    },
    #[error("{class}.{method} failed: {message}")]
    NativeDispatchFailure {
        class: String,
        method: String,
        message: String,
    },
    #[error("{message}")]
    InvalidOperand { message: String },
    #[error("maximum recursion depth exceeded (limit: {depth})")]
    RecursionLimit { depth: usize },
    #[error("{message}")]
    Raised { message: String },
    #[error("end of input")]
    InputExhausted,
}

/// One frame of an interpreter backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    pub name: String,
    /// Where the called function is declared.
    pub loc: Option<SourceLoc>,
}

/// Call stack snapshot at the error site, most recent call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.name)?;
            if let Some(loc) = frame.loc {
                write!(f, " at {}:{}", loc.file, loc.line)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A fatal evaluation error.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Why the failing operation was attempted.
    pub justification: Option<JustificationId>,
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            justification: None,
            backtrace: None,
        }
    }

    #[must_use]
    pub fn with_justification(mut self, justification: JustificationId) -> Self {
        self.justification = Some(justification);
        self
    }

    /// Set the justification unless a more specific one is already attached.
    #[must_use]
    pub fn or_justification(mut self, justification: JustificationId) -> Self {
        if self.justification.is_none() {
            self.justification = Some(justification);
        }
        self
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    /// Whether the program simply ran out of input, which is a clean exit.
    pub fn is_input_exhausted(&self) -> bool {
        matches!(self.kind, EvalErrorKind::InputExhausted)
    }
}

impl From<JustificationError> for EvalError {
    fn from(err: JustificationError) -> Self {
        match err {
            JustificationError::InvariantViolation {
                supporter,
                supportee,
            } => EvalError::from_kind(EvalErrorKind::InvariantViolation {
                supporter,
                supportee,
            }),
            JustificationError::UnknownJustification { id } => {
                EvalError::from_kind(EvalErrorKind::InvalidJustificationType { id })
            }
        }
    }
}

#[cold]
pub fn undefined_variable(name: &str, scope: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
        scope: scope.to_string(),
    })
}

#[cold]
pub fn undefined_function(name: &str, scope: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedFunction {
        name: name.to_string(),
        scope: scope.to_string(),
    })
}

#[cold]
pub fn undefined_class(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedClass {
        name: name.to_string(),
    })
}

#[cold]
pub fn duplicate_declaration(name: &str, scope: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateDeclaration {
        name: name.to_string(),
        scope: scope.to_string(),
    })
}

#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn invalid_return_type(function: &str, value: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidReturnType {
        function: function.to_string(),
        value: value.to_string(),
    })
}

#[cold]
pub fn native_dispatch_failure(class: &str, method: &str, message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NativeDispatchFailure {
        class: class.to_string(),
        method: method.to_string(),
        message: message.into(),
    })
}

#[cold]
pub fn invalid_operand(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidOperand {
        message: message.into(),
    })
}

#[cold]
pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { depth })
}

#[cold]
pub fn raised(message: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Raised {
        message: message.to_string(),
    })
}

#[cold]
pub fn input_exhausted() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InputExhausted)
}

#[cfg(test)]
mod tests;
