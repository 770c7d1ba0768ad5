//! Class and function definitions.

use std::fmt;
use std::rc::Rc;

use ravel_ir::{SourceLoc, Stmt};
use rustc_hash::FxHashMap;

use crate::natives::NativeConstructor;
use crate::{ClassId, FunctionId, ScopeId};

/// A declared function or method.
#[derive(Clone, Debug)]
pub struct FunctionDefinition {
    pub name: String,
    pub params: Vec<String>,
    pub body: Rc<[Stmt]>,
    /// The class whose declaration defined this method. `super` calls inside
    /// the body resolve against this class's parent, wherever they are called from.
    pub owner: Option<ClassId>,
    pub loc: SourceLoc,
}

#[derive(Clone)]
pub enum ClassKind {
    User,
    /// Instances get a host handle from the constructor.
    Native(NativeConstructor),
}

impl fmt::Debug for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassKind::User => write!(f, "User"),
            ClassKind::Native(_) => write!(f, "Native"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClassDef {
    pub name: String,
    pub parent: Option<ClassId>,
    /// Fields this class declares (not inherited ones).
    pub fields: Vec<String>,
    /// Holds the class's method bindings; a child of the parent class's.
    pub impl_scope: ScopeId,
    /// Method resolution, inherited entries included. Built once when the
    /// class is declared, with overrides already applied.
    pub vtable: FxHashMap<String, FunctionId>,
    pub kind: ClassKind,
    /// Nearest native class in the lineage, this class included. Its
    /// constructor builds the handle of every instance.
    pub native_base: Option<ClassId>,
}

impl ClassDef {
    pub fn method(&self, name: &str) -> Option<FunctionId> {
        self.vtable.get(name).copied()
    }

    pub fn is_native(&self) -> bool {
        matches!(self.kind, ClassKind::Native(_))
    }
}

impl fmt::Display for ClassDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            write!(f, "native classdef:{}", self.name)
        } else {
            write!(f, "classdef:{}", self.name)
        }
    }
}
