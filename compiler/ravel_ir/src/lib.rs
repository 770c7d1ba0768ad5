//! Ravel IR - program representation.
//!
//! Ravel programs are trees of [`Stmt`] and [`Expr`] nodes assembled in Rust
//! through the [`builder`] functions:
//!
//! ```ignore
//! use ravel_ir::builder::*;
//!
//! let program = vec![
//!     var("greeting", string("hello")),
//!     print(get("greeting")),
//! ];
//! ```
//!
//! Every builder is `#[track_caller]`, so each node carries the [`SourceLoc`]
//! of the line that built it. Explanations quote those lines ("[line 12]: x = 3").
//!
//! The `Display` impls produce the short forms used inside justification text
//! (`get x`, `new Num(1)`, `(get self).increment()`), not source code.

pub mod ast;
pub mod builder;

pub use ast::{ClassDecl, Expr, ExprKind, FuncDecl, Literal, Receiver, Stmt, StmtKind};
pub use ravel_why::SourceLoc;

/// Name of the constructor method.
pub const INIT: &str = "__init__";

/// Name of the implicit receiver parameter.
pub const SELF: &str = "self";
