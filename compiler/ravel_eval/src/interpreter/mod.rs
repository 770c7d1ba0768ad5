//! Tree-walking interpreter for Ravel programs.
//!
//! # Architecture
//!
//! One [`Interpreter`] is one session: it owns the justification registry,
//! the scope arena, the class and function tables and the live call stack.
//! Nothing is global, and every id handed out (justification, scope, class,
//! function, object) is only meaningful inside the session that created it.
//!
//! Evaluation is split by node family:
//!
//! - `exec` - statements, producing a [`Flow`]
//! - `eval` - expressions, producing a [`JustifiedValue`]
//! - `function_call` - function calls and method dispatch
//! - `objects` - class declaration and object construction
//!
//! Every evaluation step takes a *call justification*: the reason the step
//! runs. Values carry the justification of why they hold, and each step
//! records a new node supported by both.

mod builder;
mod eval;
mod exec;
mod function_call;
mod objects;

pub use builder::InterpreterBuilder;

use std::rc::Rc;

use ravel_why::{JustificationId, JustificationRegistry, SourceLoc};

use crate::class::{ClassDef, FunctionDefinition};
use crate::config::EvalConfig;
use crate::diagnostics::CallStack;
use crate::errors::{EvalError, EvalResult};
use crate::input_handler::SharedInputHandler;
use crate::natives::NativeObject;
use crate::print_handler::SharedPrintHandler;
use crate::scope::ScopeArena;
use crate::{ClassId, FunctionId, JustifiedValue, ScopeId, Value};

/// Binding that tags an object with its class.
pub(crate) const CLASS_FIELD: &str = "__class__";

/// How a statement list finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Normal,
    /// A `Return` ran; the enclosing function ends with this value.
    Returned(JustifiedValue),
}

/// A Ravel interpreter session.
pub struct Interpreter {
    why: JustificationRegistry,
    scopes: ScopeArena,
    global: ScopeId,
    classes: Vec<ClassDef>,
    functions: Vec<FunctionDefinition>,
    /// Innermost scope last. Never empty while running; lookups fall back
    /// to the global scope.
    scope_stack: Vec<ScopeId>,
    call_stack: CallStack,
    config: EvalConfig,
    print: SharedPrintHandler,
    input: SharedInputHandler,
    next_object_id: u64,
}

impl Interpreter {
    /// A session with the default configuration, printing to stdout.
    pub fn new() -> EvalResult<Self> {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    #[inline]
    pub fn why(&self) -> &JustificationRegistry {
        &self.why
    }

    #[inline]
    pub fn scopes(&self) -> &ScopeArena {
        &self.scopes
    }

    #[inline]
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    #[inline]
    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    #[inline]
    pub fn global_scope(&self) -> ScopeId {
        self.global
    }

    pub fn class(&self, id: ClassId) -> &ClassDef {
        &self.classes[id.index()]
    }

    pub fn function(&self, id: FunctionId) -> &FunctionDefinition {
        &self.functions[id.index()]
    }

    /// A binding of the global scope.
    pub fn global(&self, name: &str) -> Option<JustifiedValue> {
        self.scopes.get_local(self.global, name).cloned()
    }

    /// The field `name` of an object, inherited scopes excluded.
    pub fn field(&self, object: &Value, name: &str) -> Option<JustifiedValue> {
        let scope = object.as_object()?;
        self.scopes.get_local(scope, name).cloned()
    }

    /// Recursive explanation of `id`; `None` explains the whole history.
    pub fn explain(&self, id: JustificationId, max_depth: Option<usize>) -> EvalResult<String> {
        Ok(self.why.explain_recursive(id, max_depth)?)
    }

    /// Explanation of why the failing operation ran, at the configured depth.
    pub fn explain_failure(&self, err: &EvalError) -> Option<String> {
        let id = err.justification?;
        self.why
            .explain_recursive(id, Some(self.config.failure_explain_depth))
            .ok()
    }

    #[inline]
    pub(crate) fn current_scope(&self) -> ScopeId {
        self.scope_stack.last().copied().unwrap_or(self.global)
    }

    /// Run `f` with `scope` as the current scope, restoring the previous one
    /// whether or not `f` succeeds.
    pub(crate) fn with_scope<T>(
        &mut self,
        scope: ScopeId,
        f: impl FnOnce(&mut Self) -> EvalResult<T>,
    ) -> EvalResult<T> {
        self.scope_stack.push(scope);
        let result = f(self);
        self.scope_stack.pop();
        result
    }

    // Justification helpers. Natives build their explanations through these.

    pub fn text(&mut self, message: impl Into<String>) -> JustificationId {
        self.why.text(message)
    }

    pub fn unknown(&mut self) -> JustificationId {
        self.why.unknown()
    }

    pub fn and(
        &mut self,
        description: impl Into<String>,
        supporters: impl IntoIterator<Item = JustificationId>,
    ) -> EvalResult<JustificationId> {
        Ok(self.why.and(description, supporters)?)
    }

    pub(crate) fn and_at(
        &mut self,
        description: impl Into<String>,
        supporters: impl IntoIterator<Item = JustificationId>,
        location: SourceLoc,
    ) -> EvalResult<JustificationId> {
        Ok(self.why.and_at(description, supporters, location)?)
    }

    pub(crate) fn full(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        location: SourceLoc,
        calling: JustificationId,
        values: impl IntoIterator<Item = JustificationId>,
    ) -> EvalResult<JustificationId> {
        Ok(self.why.full(name, value, location, calling, values)?)
    }

    pub fn mark_boring(&mut self, id: JustificationId) -> EvalResult<()> {
        Ok(self.why.mark_boring(id)?)
    }

    /// Host handle of a native-backed object.
    pub fn native_handle(&self, value: &Value) -> Option<Rc<dyn NativeObject>> {
        let scope = value.as_object()?;
        let meta = self.scopes.data(scope).object.as_ref()?;
        meta.native.clone()
    }

    /// Class of an object.
    pub fn class_of(&self, value: &Value) -> Option<ClassId> {
        let scope = value.as_object()?;
        self.scopes.data(scope).object.as_ref()?.class
    }

    /// `"Counter@3"`.
    pub fn object_description(&self, scope: ScopeId) -> &str {
        self.scopes.description(scope)
    }

    /// Text of a value as explanations quote it.
    pub fn render(&self, value: &Value) -> String {
        match value {
            Value::Object(scope) => self
                .native_handle(value)
                .and_then(|handle| handle.display())
                .unwrap_or_else(|| self.scopes.description(*scope).to_string()),
            Value::Class(class) => self.class(*class).to_string(),
            Value::Function(function) => self.function(*function).name.clone(),
            host => host.to_string(),
        }
    }

    pub(crate) fn render_all(&self, values: &[JustifiedValue]) -> String {
        let rendered: Vec<String> = values.iter().map(|info| self.render(&info.value)).collect();
        rendered.join(", ")
    }

    pub(crate) fn println(&self, message: &str) {
        self.print.println(message);
    }
}

#[cfg(test)]
mod tests;
