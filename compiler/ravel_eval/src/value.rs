//! Runtime values.

use std::fmt;
use std::rc::Rc;

use ravel_ir::Literal;
use ravel_why::JustificationId;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub(crate) fn from_index(index: usize) -> Self {
                #[allow(clippy::cast_possible_truncation)]
                let raw = index as u32;
                $name(raw)
            }

            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

arena_id!(
    /// A scope (or object) in the session's scope arena.
    ScopeId
);
arena_id!(
    /// A class definition.
    ClassId
);
arena_id!(
    /// A function definition.
    FunctionId
);

/// A Ravel value.
///
/// `Bool`, `Int` and `Str` are host values: they appear as literals and
/// inside native objects. User code manipulates managed objects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Str(Rc<str>),
    /// A managed object, which is a scope tagged with its class.
    Object(ScopeId),
    Class(ClassId),
    Function(FunctionId),
}

impl Value {
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    #[inline]
    pub fn as_object(&self) -> Option<ScopeId> {
        match self {
            Value::Object(scope) => Some(*scope),
            _ => None,
        }
    }

    pub fn string(text: &str) -> Self {
        Value::Str(Rc::from(text))
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::None => Value::None,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Int(n) => Value::Int(*n),
            Literal::Str(s) => Value::Str(Rc::clone(s)),
        }
    }
}

/// Host values print the way literals do. Managed values need the
/// interpreter to render; see `Interpreter::render`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Object(scope) => write!(f, "object@{}", scope.index()),
            Value::Class(class) => write!(f, "class@{}", class.index()),
            Value::Function(function) => write!(f, "function@{}", function.index()),
        }
    }
}

/// A value together with the reason it holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JustifiedValue {
    pub value: Value,
    pub justification: JustificationId,
}

impl JustifiedValue {
    #[inline]
    pub fn new(value: Value, justification: JustificationId) -> Self {
        JustifiedValue {
            value,
            justification,
        }
    }

    #[inline]
    pub fn none(justification: JustificationId) -> Self {
        JustifiedValue::new(Value::None, justification)
    }
}
