//! Ravel Eval - interpreter for Ravel programs.
//!
//! Every value a program computes is a [`JustifiedValue`]: the value paired
//! with a node of the session's justification graph saying why it holds.
//! After (or during) a run, any value can be explained back to the literals,
//! inputs and statements it came from.
//!
//! # Architecture
//!
//! - [`Interpreter`]: one session; owns every arena and the call stack
//! - `ScopeArena`: scopes and objects, addressed by [`ScopeId`]
//! - [`natives`]: the host-implemented classes `String`, `List`, `Dict`,
//!   `Bool` and `Num`
//! - [`errors`]: the fatal error taxonomy and its constructors
//!
//! ```ignore
//! use ravel_eval::{buffer_handler, Interpreter};
//! use ravel_ir::builder::*;
//!
//! let output = buffer_handler();
//! let mut interp = Interpreter::builder().print_handler(output.clone()).build()?;
//! interp.run(&[var("x", string("hello")), print(get("x"))])?;
//! assert_eq!(output.get_output(), "hello\n");
//! ```

mod class;
mod config;
mod diagnostics;
pub mod errors;
mod input_handler;
mod interpreter;
pub mod natives;
mod print_handler;
mod scope;
mod value;

pub use class::{ClassDef, ClassKind, FunctionDefinition};
pub use config::{EvalConfig, DEFAULT_FAILURE_EXPLAIN_DEPTH, DEFAULT_MAX_CALL_DEPTH};
pub use diagnostics::{CallFrame, CallStack};
pub use errors::{BacktraceFrame, EvalBacktrace, EvalError, EvalErrorKind, EvalResult};
pub use input_handler::{scripted_handler, stdin_handler, InputHandlerImpl, SharedInputHandler};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use scope::{ObjectMeta, ScopeArena, ScopeData};
pub use value::{ClassId, FunctionId, JustifiedValue, ScopeId, Value};

#[cfg(test)]
mod tests;
