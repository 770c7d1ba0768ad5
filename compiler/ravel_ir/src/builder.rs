//! Program-builder DSL.
//!
//! Each function builds one node tagged with its caller's line. Compound
//! statements (`if_`, `class`) are fluent builders converted with `.into()`.

use std::rc::Rc;

use crate::ast::{ClassDecl, Expr, ExprKind, FuncDecl, Literal, Receiver, Stmt, StmtKind};
use crate::{SourceLoc, INIT, SELF};

#[track_caller]
fn expr(kind: ExprKind) -> Expr {
    Expr {
        kind,
        loc: SourceLoc::caller(),
    }
}

#[track_caller]
fn stmt(kind: StmtKind) -> Stmt {
    Stmt {
        kind,
        loc: SourceLoc::caller(),
    }
}

fn names<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Vec<String> {
    items.into_iter().map(Into::into).collect()
}

// Expressions

#[track_caller]
pub fn constant(literal: Literal) -> Expr {
    expr(ExprKind::Const(literal))
}

#[track_caller]
pub fn get(name: impl Into<String>) -> Expr {
    expr(ExprKind::Get(name.into()))
}

#[track_caller]
pub fn dot_get(owner: Expr, property: impl Into<String>) -> Expr {
    expr(ExprKind::DotGet {
        owner: Box::new(owner),
        property: property.into(),
    })
}

#[track_caller]
pub fn self_get(property: impl Into<String>) -> Expr {
    dot_get(get(SELF), property)
}

#[track_caller]
pub fn new(class: impl Into<String>, args: Vec<Expr>) -> Expr {
    expr(ExprKind::New {
        class: class.into(),
        args,
    })
}

/// `new String(text)`.
#[track_caller]
pub fn string(text: &str) -> Expr {
    new("String", vec![constant(Literal::Str(Rc::from(text)))])
}

/// `new Num(value)`.
#[track_caller]
pub fn num(value: i64) -> Expr {
    new("Num", vec![constant(Literal::Int(value))])
}

/// `new Bool(value)`.
#[track_caller]
pub fn boolean(value: bool) -> Expr {
    new("Bool", vec![constant(Literal::Bool(value))])
}

#[track_caller]
pub fn eq(left: Expr, right: Expr) -> Expr {
    expr(ExprKind::Eq(Box::new(left), Box::new(right)))
}

#[track_caller]
pub fn not(inner: Expr) -> Expr {
    expr(ExprKind::Not(Box::new(inner)))
}

#[track_caller]
pub fn is_none(inner: Expr) -> Expr {
    expr(ExprKind::IsNone(Box::new(inner)))
}

#[track_caller]
pub fn plus(operands: Vec<Expr>) -> Expr {
    expr(ExprKind::Plus(operands))
}

#[track_caller]
pub fn concat(operands: Vec<Expr>) -> Expr {
    expr(ExprKind::Concat(operands))
}

#[track_caller]
pub fn call_expr(function: impl Into<String>, args: Vec<Expr>) -> Expr {
    expr(ExprKind::Call {
        function: function.into(),
        args,
    })
}

#[track_caller]
fn method_call(receiver: Receiver, method: impl Into<String>, args: Vec<Expr>) -> Expr {
    expr(ExprKind::MethodCall {
        receiver,
        method: method.into(),
        args,
    })
}

/// `object.method(args)`.
#[track_caller]
pub fn dot_call(object: Expr, method: impl Into<String>, args: Vec<Expr>) -> Expr {
    method_call(Receiver::Object(Box::new(object)), method, args)
}

/// `self.method(args)`, dispatched on the receiver's own class.
#[track_caller]
pub fn self_call(method: impl Into<String>, args: Vec<Expr>) -> Expr {
    method_call(Receiver::SelfObject, method, args)
}

/// `super.method(args)`, dispatched on the defining class's parent.
#[track_caller]
pub fn super_call(method: impl Into<String>, args: Vec<Expr>) -> Expr {
    method_call(Receiver::Super, method, args)
}

#[track_caller]
pub fn with_id(inner: Expr) -> Expr {
    expr(ExprKind::WithId(Box::new(inner)))
}

#[track_caller]
pub fn range(low: Expr, high: Expr) -> Expr {
    expr(ExprKind::Range {
        low: Box::new(low),
        high: Box::new(high),
    })
}

#[track_caller]
pub fn ask(prompt: Option<Expr>) -> Expr {
    expr(ExprKind::Ask(prompt.map(Box::new)))
}

#[track_caller]
pub fn int(inner: Expr) -> Expr {
    expr(ExprKind::Int(Box::new(inner)))
}

// Statements

#[track_caller]
pub fn var(name: impl Into<String>, value: Expr) -> Stmt {
    stmt(StmtKind::Var {
        name: name.into(),
        value,
    })
}

#[track_caller]
pub fn set(name: impl Into<String>, value: Expr) -> Stmt {
    stmt(StmtKind::Set {
        name: name.into(),
        value,
    })
}

#[track_caller]
pub fn ret(value: Expr) -> Stmt {
    stmt(StmtKind::Return(value))
}

#[track_caller]
pub fn for_each(variable: impl Into<String>, values: Expr, body: Vec<Stmt>) -> Stmt {
    stmt(StmtKind::ForEach {
        variable: variable.into(),
        values,
        body,
    })
}

/// `for variable in range(low, high)`.
#[track_caller]
pub fn for_range(variable: impl Into<String>, low: Expr, high: Expr, body: Vec<Stmt>) -> Stmt {
    for_each(variable, range(low, high), body)
}

#[track_caller]
pub fn while_(condition: Expr, body: Vec<Stmt>) -> Stmt {
    stmt(StmtKind::While { condition, body })
}

/// Parameter list of a function that takes no arguments.
pub const NO_ARGS: [&str; 0] = [];

/// A function signature; its line is reported as the function's location.
#[derive(Clone, Debug)]
pub struct Sig {
    name: String,
    params: Vec<String>,
    loc: SourceLoc,
}

#[track_caller]
pub fn sig<S: Into<String>>(name: impl Into<String>, params: impl IntoIterator<Item = S>) -> Sig {
    Sig {
        name: name.into(),
        params: names(params),
        loc: SourceLoc::caller(),
    }
}

impl Sig {
    fn into_decl(self, body: Vec<Stmt>) -> FuncDecl {
        FuncDecl {
            name: self.name,
            params: self.params,
            body: body.into(),
            loc: self.loc,
        }
    }
}

#[track_caller]
pub fn func(signature: Sig, body: Vec<Stmt>) -> Stmt {
    stmt(StmtKind::Func(signature.into_decl(body)))
}

/// Call a free function for its effect.
#[track_caller]
pub fn call(function: impl Into<String>, args: Vec<Expr>) -> Stmt {
    let call = call_expr(function, args);
    stmt(StmtKind::Expr(call))
}

/// Evaluate an expression for its effect.
#[track_caller]
pub fn effect(value: Expr) -> Stmt {
    stmt(StmtKind::Expr(value))
}

#[track_caller]
pub fn dot_set(owner: Expr, property: impl Into<String>, value: Expr) -> Stmt {
    stmt(StmtKind::DotSet {
        owner,
        property: property.into(),
        value,
    })
}

#[track_caller]
pub fn self_set(property: impl Into<String>, value: Expr) -> Stmt {
    dot_set(get(SELF), property, value)
}

#[track_caller]
pub fn print(value: Expr) -> Stmt {
    stmt(StmtKind::Print(value))
}

#[track_caller]
pub fn print_with_id(value: Expr) -> Stmt {
    print(with_id(value))
}

#[track_caller]
pub fn full_explain(value: Expr) -> Stmt {
    stmt(StmtKind::FullExplain(value))
}

#[track_caller]
pub fn short_explain(value: Expr, depth: Expr) -> Stmt {
    stmt(StmtKind::ShortExplain { value, depth })
}

#[track_caller]
pub fn raise(message: impl Into<String>) -> Stmt {
    stmt(StmtKind::Raise(message.into()))
}

/// Body of a method that subclasses must override.
#[track_caller]
pub fn abstract_method() -> Stmt {
    raise("called abstract method")
}

/// Forwarding body of a native method.
pub fn invoke_native(method: &str, args: &[String], loc: SourceLoc) -> Stmt {
    Stmt {
        kind: StmtKind::InvokeNative {
            method: method.to_string(),
            args: args.to_vec(),
        },
        loc,
    }
}

// Compound statements

/// `if (condition) then [...] otherwise [...]`.
#[derive(Debug)]
pub struct IfBuilder {
    condition: Expr,
    then_branch: Vec<Stmt>,
    else_branch: Vec<Stmt>,
    loc: SourceLoc,
}

#[track_caller]
pub fn if_(condition: Expr) -> IfBuilder {
    IfBuilder {
        condition,
        then_branch: Vec::new(),
        else_branch: Vec::new(),
        loc: SourceLoc::caller(),
    }
}

impl IfBuilder {
    #[must_use]
    pub fn then(mut self, statements: Vec<Stmt>) -> Self {
        self.then_branch = statements;
        self
    }

    #[must_use]
    pub fn otherwise(mut self, statements: Vec<Stmt>) -> Self {
        self.else_branch = statements;
        self
    }
}

impl From<IfBuilder> for Stmt {
    fn from(builder: IfBuilder) -> Self {
        Stmt {
            kind: StmtKind::If {
                condition: builder.condition,
                then_branch: builder.then_branch,
                else_branch: builder.else_branch,
            },
            loc: builder.loc,
        }
    }
}

/// A class declaration under construction.
#[derive(Debug)]
pub struct ClassBuilder {
    decl: ClassDecl,
    loc: SourceLoc,
}

#[track_caller]
pub fn class(name: impl Into<String>) -> ClassBuilder {
    ClassBuilder {
        decl: ClassDecl {
            name: name.into(),
            parent: None,
            fields: Vec::new(),
            methods: Vec::new(),
        },
        loc: SourceLoc::caller(),
    }
}

impl ClassBuilder {
    #[must_use]
    pub fn inherit(mut self, parent: impl Into<String>) -> Self {
        self.decl.parent = Some(parent.into());
        self
    }

    #[must_use]
    pub fn vars<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.decl.fields = names(fields);
        self
    }

    /// Declare a method; `self` is prepended to the signature's parameters.
    #[must_use]
    pub fn func(mut self, signature: Sig, body: Vec<Stmt>) -> Self {
        let mut decl = signature.into_decl(body);
        decl.params.insert(0, SELF.to_string());
        self.decl.methods.push(decl);
        self
    }

    /// Declare the constructor.
    ///
    /// Arguments named like a declared field are copied into that field
    /// before `body` runs.
    #[must_use]
    #[track_caller]
    pub fn init<S: Into<String>>(
        self,
        params: impl IntoIterator<Item = S>,
        body: Vec<Stmt>,
    ) -> Self {
        let loc = SourceLoc::caller();
        let params = names(params);
        let mut statements: Vec<Stmt> = params
            .iter()
            .filter(|param| self.decl.fields.contains(*param))
            .map(|param| copy_field(param, loc))
            .collect();
        statements.extend(body);
        let signature = sig(INIT, params);
        self.func(signature, statements)
    }
}

/// `self.field = get field`, located at the constructor declaration.
fn copy_field(field: &str, loc: SourceLoc) -> Stmt {
    let at = |kind| Expr { kind, loc };
    Stmt {
        kind: StmtKind::DotSet {
            owner: at(ExprKind::Get(SELF.to_string())),
            property: field.to_string(),
            value: at(ExprKind::Get(field.to_string())),
        },
        loc,
    }
}

impl From<ClassBuilder> for Stmt {
    fn from(builder: ClassBuilder) -> Self {
        Stmt {
            kind: StmtKind::Class(builder.decl),
            loc: builder.loc,
        }
    }
}
