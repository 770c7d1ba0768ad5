//! `InterpreterBuilder` for creating Interpreter sessions with various configurations.

use std::rc::Rc;

use ravel_ir::builder::invoke_native;
use ravel_ir::{SourceLoc, Stmt, SELF};
use ravel_why::JustificationRegistry;
use rustc_hash::FxHashMap;

use super::Interpreter;
use crate::class::{ClassDef, ClassKind, FunctionDefinition};
use crate::config::EvalConfig;
use crate::diagnostics::CallStack;
use crate::errors::EvalResult;
use crate::natives::{builtin_classes, NativeClass};
use crate::scope::ScopeArena;
use crate::{
    stdin_handler, stdout_handler, ClassId, FunctionId, JustifiedValue, SharedInputHandler,
    SharedPrintHandler, Value,
};

/// Builder for creating Interpreter sessions.
///
/// Defaults: [`EvalConfig::default`], output to stdout, input from stdin.
#[derive(Default)]
pub struct InterpreterBuilder {
    config: EvalConfig,
    print_handler: Option<SharedPrintHandler>,
    input_handler: Option<SharedInputHandler>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    /// Bound on nested calls; `None` removes the bound.
    #[must_use]
    pub fn max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.config.max_call_depth = depth;
        self
    }

    /// Depth of the explanation attached to failure reports.
    #[must_use]
    pub fn failure_explain_depth(mut self, depth: usize) -> Self {
        self.config.failure_explain_depth = depth;
        self
    }

    /// Set the print handler. Use `buffer_handler()` to capture output.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Set the source of `Ask` answers.
    #[must_use]
    pub fn input_handler(mut self, handler: SharedInputHandler) -> Self {
        self.input_handler = Some(handler);
        self
    }

    /// Build the session and declare the built-in classes.
    pub fn build(self) -> EvalResult<Interpreter> {
        let mut scopes = ScopeArena::new();
        let global = scopes.new_root("global scope");
        let mut interpreter = Interpreter {
            why: JustificationRegistry::new(),
            scopes,
            global,
            classes: Vec::new(),
            functions: Vec::new(),
            scope_stack: vec![global],
            call_stack: CallStack::new(self.config.max_call_depth),
            config: self.config,
            print: self.print_handler.unwrap_or_else(stdout_handler),
            input: self.input_handler.unwrap_or_else(stdin_handler),
            next_object_id: 1,
        };
        for class in builtin_classes() {
            interpreter.declare_native_class(&class)?;
        }
        Ok(interpreter)
    }
}

impl Interpreter {
    /// Wire a native class: every method becomes a function whose body
    /// forwards to the object's handle.
    fn declare_native_class(&mut self, native: &NativeClass) -> EvalResult<()> {
        let impl_scope = self
            .scopes
            .new_child(self.global, Some(native.name.to_string()));
        let class = ClassId::from_index(self.classes.len());
        self.classes.push(ClassDef {
            name: native.name.to_string(),
            parent: None,
            fields: Vec::new(),
            impl_scope,
            vtable: FxHashMap::default(),
            kind: ClassKind::Native(native.construct),
            native_base: Some(class),
        });
        let declared = self.text(format!("{} is a built-in class", native.name));
        self.scopes
            .declare_info(self.global, native.name, JustifiedValue::new(Value::Class(class), declared))?;

        for &(method, params) in native.methods {
            let params: Vec<String> = params.iter().map(|param| (*param).to_string()).collect();
            let body: Rc<[Stmt]> = Rc::from(vec![invoke_native(method, &params, SourceLoc::builtin())]);
            let function = FunctionId::from_index(self.functions.len());
            self.functions.push(FunctionDefinition {
                name: method.to_string(),
                params: std::iter::once(SELF.to_string()).chain(params).collect(),
                body,
                owner: Some(class),
                loc: SourceLoc::builtin(),
            });
            let built_in = self.text(format!("{method} is a built-in method"));
            self.scopes.declare_info(
                impl_scope,
                method,
                JustifiedValue::new(Value::Function(function), built_in),
            )?;
            self.classes[class.index()]
                .vtable
                .insert(method.to_string(), function);
        }
        Ok(())
    }
}
