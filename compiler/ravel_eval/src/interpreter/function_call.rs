//! Function calls and method dispatch.

use ravel_why::JustificationId;

use super::{Flow, Interpreter};
use crate::class::FunctionDefinition;
use crate::diagnostics::CallFrame;
use crate::errors::{arity_mismatch, invalid_operand, invalid_return_type, undefined_function, EvalResult};
use crate::{FunctionId, JustifiedValue, Value};

impl Interpreter {
    /// Call a function with exactly as many arguments as it has parameters.
    ///
    /// The body runs in a fresh scope whose parent is the global scope, so
    /// only parameters and globals are visible. A result is either None or a
    /// managed object.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn call_function(
        &mut self,
        id: FunctionId,
        args: Vec<JustifiedValue>,
        why: JustificationId,
    ) -> EvalResult<JustifiedValue> {
        let function = self.function(id).clone();
        if args.len() != function.params.len() {
            let description = format!(
                "Gave {} arguments : [{}]; required {} arguments: [{}]",
                args.len(),
                self.render_all(&args),
                function.params.len(),
                function.params.join(", ")
            );
            let failure = self.and(
                description,
                std::iter::once(why).chain(args.iter().map(|arg| arg.justification)),
            )?;
            return Err(arity_mismatch(&function.name, function.params.len(), args.len())
                .with_justification(failure));
        }

        self.call_stack
            .push(CallFrame {
                name: function.name.clone(),
                loc: Some(function.loc).filter(|loc| !loc.is_builtin()),
                owner: function.owner,
            })
            .map_err(|err| err.with_justification(why))?;
        let result = self
            .run_function(&function, args, why)
            .map_err(|err| self.call_stack.attach_backtrace(err));
        self.call_stack.pop();
        result
    }

    fn run_function(
        &mut self,
        function: &FunctionDefinition,
        args: Vec<JustifiedValue>,
        why: JustificationId,
    ) -> EvalResult<JustifiedValue> {
        let scope = self
            .scopes
            .new_child(self.global, Some(format!("function {}", function.name)));
        for (param, arg) in function.params.iter().zip(args) {
            self.scopes.declare_info(scope, param, arg)?;
        }
        let called = self.and_at(format!("called {}", function.name), [why], function.loc)?;

        let flow = ravel_stack::ensure_sufficient_stack(|| {
            self.with_scope(scope, |this| this.run_statements(&function.body, called))
        })?;
        match flow {
            Flow::Normal => {
                let fell_through =
                    self.text(format!("{} did not reach any return statement", function.name));
                Ok(JustifiedValue::none(fell_through))
            }
            Flow::Returned(result) => match result.value {
                Value::None => {
                    let explicit = self.and(
                        format!("{} explicitly returned None", function.name),
                        [result.justification],
                    )?;
                    Ok(JustifiedValue::none(explicit))
                }
                Value::Object(_) => Ok(result),
                ref other => Err(invalid_return_type(&function.name, &self.render(other))
                    .with_justification(result.justification)),
            },
        }
    }

    /// Resolve a free function in the current scope chain.
    pub(crate) fn lookup_function(&self, name: &str, why: JustificationId) -> EvalResult<FunctionId> {
        let scope = self.current_scope();
        match self.scopes.try_get_info(scope, name).map(|info| info.value) {
            Some(Value::Function(function)) => Ok(function),
            _ => Err(undefined_function(name, self.scopes.description(scope)).with_justification(why)),
        }
    }

    /// Call `name` on the object `receiver`, which is passed as `self`.
    ///
    /// The method comes from the receiver's class table, so overrides win.
    #[tracing::instrument(level = "debug", skip_all, fields(method = name))]
    pub fn call_method_name(
        &mut self,
        receiver: &JustifiedValue,
        name: &str,
        args: Vec<JustifiedValue>,
        why: JustificationId,
    ) -> EvalResult<JustifiedValue> {
        let class = self.class_of(&receiver.value).ok_or_else(|| {
            invalid_operand(format!(
                "cannot call {name} on {}: not an object",
                self.render(&receiver.value)
            ))
            .with_justification(receiver.justification)
        })?;
        let class_def = self.class(class);
        let function = class_def.method(name).ok_or_else(|| {
            undefined_function(name, self.scopes.description(class_def.impl_scope))
                .with_justification(why)
        })?;

        let this = JustifiedValue::new(receiver.value.clone(), self.unknown());
        let mut all = Vec::with_capacity(args.len() + 1);
        all.push(this);
        all.extend(args);
        self.call_function(function, all, why)
    }
}
