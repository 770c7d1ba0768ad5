//! Built-in classes implemented by the host.
//!
//! A native class pairs a constructor, which turns the justified constructor
//! arguments into a handle, with a list of method signatures. Each signature
//! becomes an ordinary method whose body forwards to [`NativeObject::invoke`],
//! so native methods are dispatched, justified and arity-checked like user
//! methods.

mod boolean;
mod dict;
mod list;
mod number;
mod string;

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use ravel_why::JustificationId;

use crate::errors::{native_dispatch_failure, EvalError};
use crate::{Interpreter, JustifiedValue, ScopeId, Value};

pub use boolean::BoolObject;
pub use dict::DictObject;
pub use list::ListObject;
pub use number::NumObject;
pub use string::StringObject;

/// Failure inside a native method or constructor.
#[derive(Debug, thiserror::Error)]
pub enum NativeError {
    #[error("no native method named {method}")]
    UnknownMethod { method: String },
    #[error("{method} expects {expected} arguments, got {got}")]
    Arity {
        method: String,
        expected: usize,
        got: usize,
    },
    #[error("{method} expects a {expected} argument")]
    WrongType {
        method: String,
        expected: &'static str,
    },
    #[error("index {index} is out of range for {len} items")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("integer overflow in {operation}")]
    Overflow { operation: &'static str },
    /// An interpreter error raised while the native code called back in.
    #[error(transparent)]
    Eval(Box<EvalError>),
}

impl From<EvalError> for NativeError {
    fn from(err: EvalError) -> Self {
        NativeError::Eval(Box::new(err))
    }
}

impl NativeError {
    pub(crate) fn into_eval_error(self, class: &str, method: &str) -> EvalError {
        match self {
            NativeError::Eval(err) => *err,
            other => native_dispatch_failure(class, method, other.to_string()),
        }
    }
}

pub type NativeResult<T> = Result<T, NativeError>;

/// Host state behind a native-backed object.
pub trait NativeObject: fmt::Debug {
    fn class_name(&self) -> &'static str;

    /// Run `method` on this handle.
    ///
    /// `this` is the managed object owning the handle and `why` the
    /// call-history justification of the forwarding call.
    fn invoke(
        &self,
        interp: &mut Interpreter,
        this: ScopeId,
        method: &str,
        why: JustificationId,
        args: &[JustifiedValue],
    ) -> NativeResult<JustifiedValue>;

    /// Text shown for the object in explanations; `None` uses the object's
    /// scope description.
    fn display(&self) -> Option<String> {
        None
    }

    /// Elements visited by `ForEach`, if the object is iterable.
    fn items(&self) -> Option<Vec<JustifiedValue>> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

/// Builds the handle of a new native object.
pub type NativeConstructor =
    fn(&mut Interpreter, JustificationId, &[JustifiedValue]) -> NativeResult<Rc<dyn NativeObject>>;

/// Declaration of a built-in class.
pub struct NativeClass {
    pub name: &'static str,
    pub construct: NativeConstructor,
    /// Method names with their parameter names, `self` excluded.
    pub methods: &'static [(&'static str, &'static [&'static str])],
}

/// The classes every session starts with.
pub fn builtin_classes() -> [NativeClass; 5] {
    [
        string::CLASS,
        list::CLASS,
        dict::CLASS,
        boolean::CLASS,
        number::CLASS,
    ]
}

/// Run `f` on the handle of `value` if it is a native object of type `T`.
pub fn with_native<T: 'static, R>(
    interp: &Interpreter,
    value: &Value,
    f: impl FnOnce(&T) -> R,
) -> Option<R> {
    let handle = interp.native_handle(value)?;
    handle.as_any().downcast_ref::<T>().map(f)
}

pub(crate) fn expect_args(method: &str, args: &[JustifiedValue], expected: usize) -> NativeResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(NativeError::Arity {
            method: method.to_string(),
            expected,
            got: args.len(),
        })
    }
}

pub(crate) fn unknown_method(method: &str) -> NativeError {
    NativeError::UnknownMethod {
        method: method.to_string(),
    }
}

pub(crate) fn wrong_type(method: &str, expected: &'static str) -> NativeError {
    NativeError::WrongType {
        method: method.to_string(),
        expected,
    }
}

/// `"=="` or `"!="`.
pub(crate) fn comparison(equal: bool) -> &'static str {
    if equal {
        "=="
    } else {
        "!="
    }
}
