//! Statement and expression nodes.
//!
//! Nodes own their children directly (`Box`/`Vec`). Function bodies are
//! `Rc<[Stmt]>` so that declaring a function shares its body with the
//! runtime definition instead of copying it.

use std::fmt;
use std::rc::Rc;

use crate::{SourceLoc, SELF};

/// A host literal, the payload of a `Const` expression.
///
/// Literals are not managed objects; they only ever reach native
/// constructors (`new Num(3)`), never user code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    Str(Rc<str>),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::None => write!(f, "None"),
            Literal::Bool(true) => write!(f, "True"),
            Literal::Bool(false) => write!(f, "False"),
            Literal::Int(n) => write!(f, "{n}"),
            Literal::Str(s) => write!(f, "{s}"),
        }
    }
}

/// A value-producing node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub loc: SourceLoc,
}

/// Who a method call is dispatched on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Receiver {
    /// An arbitrary object; dispatch through its class.
    Object(Box<Expr>),
    /// `self`, dispatched through its (possibly more derived) class.
    SelfObject,
    /// `self`, dispatched through the parent of the class that defines the
    /// calling method.
    Super,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    Const(Literal),
    /// Scoped variable lookup.
    Get(String),
    /// Field of an object.
    DotGet {
        owner: Box<Expr>,
        property: String,
    },
    New {
        class: String,
        args: Vec<Expr>,
    },
    /// Equality of two host values. Managed objects must use `equals`.
    Eq(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
    IsNone(Box<Expr>),
    /// Left fold through each operand's `plus` method.
    Plus(Vec<Expr>),
    /// `Plus` written for strings.
    Concat(Vec<Expr>),
    /// Call a free function.
    Call {
        function: String,
        args: Vec<Expr>,
    },
    MethodCall {
        receiver: Receiver,
        method: String,
        args: Vec<Expr>,
    },
    /// The value's text prefixed by its justification id.
    WithId(Box<Expr>),
    /// A list of numbers `low..high`.
    Range {
        low: Box<Expr>,
        high: Box<Expr>,
    },
    /// A line of user input.
    Ask(Option<Box<Expr>>),
    /// Parse a String object into a Num.
    Int(Box<Expr>),
}

fn join(f: &mut fmt::Formatter<'_>, items: &[Expr], separator: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Const(literal) => write!(f, "{literal}"),
            ExprKind::Get(name) => write!(f, "get {name}"),
            ExprKind::DotGet { owner, property } => write!(f, "{owner}.{property}"),
            ExprKind::New { class, args } => {
                write!(f, "new {class}(")?;
                join(f, args, ", ")?;
                write!(f, ")")
            }
            ExprKind::Eq(left, right) => write!(f, "{left}=={right}"),
            ExprKind::Not(inner) => write!(f, "!({inner})"),
            ExprKind::IsNone(inner) => write!(f, "({inner} == None)"),
            ExprKind::Plus(operands) | ExprKind::Concat(operands) => join(f, operands, "+"),
            ExprKind::Call { function, args } => {
                write!(f, "call {function}(")?;
                join(f, args, ", ")?;
                write!(f, ")")
            }
            ExprKind::MethodCall {
                receiver,
                method,
                args,
            } => {
                match receiver {
                    Receiver::Object(object) => write!(f, "({object})")?,
                    Receiver::SelfObject | Receiver::Super => write!(f, "(get {SELF})")?,
                }
                write!(f, ".{method}(")?;
                join(f, args, ", ")?;
                write!(f, ")")
            }
            ExprKind::WithId(inner) => write!(f, "WithId({inner})"),
            ExprKind::Range { low, high } => write!(f, "range({low},{high})"),
            ExprKind::Ask(Some(prompt)) => write!(f, "ask({prompt})"),
            ExprKind::Ask(None) => write!(f, "ask()"),
            ExprKind::Int(inner) => write!(f, "int({inner})"),
        }
    }
}

/// A function (or method) declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: String,
    /// Methods list `self` first.
    pub params: Vec<String>,
    pub body: Rc<[Stmt]>,
    pub loc: SourceLoc,
}

/// A class declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: String,
    pub parent: Option<String>,
    /// Field names, in declaration order.
    pub fields: Vec<String>,
    pub methods: Vec<FuncDecl>,
}

/// An effect-producing node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub loc: SourceLoc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StmtKind {
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Vec<Stmt>,
    },
    /// Iterate over the items of a List or the keys of a Dict.
    ForEach {
        variable: String,
        values: Expr,
        body: Vec<Stmt>,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
    },
    /// Declare in the current scope, then assign.
    Var {
        name: String,
        value: Expr,
    },
    /// Assign to the nearest declaration.
    Set {
        name: String,
        value: Expr,
    },
    /// End the enclosing function with a value.
    Return(Expr),
    Func(FuncDecl),
    Class(ClassDecl),
    /// Evaluate for effect (calls).
    Expr(Expr),
    DotSet {
        owner: Expr,
        property: String,
        value: Expr,
    },
    Print(Expr),
    FullExplain(Expr),
    ShortExplain {
        value: Expr,
        depth: Expr,
    },
    /// Fail the program with a message.
    Raise(String),
    /// Forward the enclosing method to the receiver's native handle.
    InvokeNative {
        method: String,
        args: Vec<String>,
    },
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StmtKind::If { condition, .. } => write!(f, "{condition}"),
            StmtKind::ForEach {
                variable, values, ..
            } => write!(f, "for {variable} in {values}"),
            StmtKind::While { condition, .. } => write!(f, "while ({condition})"),
            StmtKind::Var { name, value } | StmtKind::Set { name, value } => {
                write!(f, "{name}={value}")
            }
            StmtKind::Return(value) => write!(f, "return={value}"),
            StmtKind::Func(decl) => write!(f, "def {}", decl.name),
            StmtKind::Class(decl) => write!(f, "declare class {}", decl.name),
            StmtKind::Expr(expr) => write!(f, "{expr}"),
            StmtKind::DotSet {
                owner,
                property,
                value,
            } => write!(f, "{owner}.{property}={value}"),
            StmtKind::Print(value) => write!(f, "Print({value})"),
            StmtKind::FullExplain(value) => write!(f, "FullExplain({value})"),
            StmtKind::ShortExplain { value, depth } => {
                write!(f, "ShortExplain({value}, {depth})")
            }
            StmtKind::Raise(message) => write!(f, "raise Exception({message})"),
            StmtKind::InvokeNative { method, .. } => write!(f, "native {method}"),
        }
    }
}

#[cfg(test)]
mod tests;
