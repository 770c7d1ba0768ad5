//! Statement execution.

use ravel_ir::{Expr, Stmt, StmtKind, SELF};
use ravel_why::{to_variable_text, JustificationId, SourceLoc};

use super::{Flow, Interpreter};
use crate::errors::{
    invalid_operand, native_dispatch_failure, raised, undefined_variable, EvalResult,
};
use crate::natives::{BoolObject, NumObject, StringObject};
use crate::{JustifiedValue, Value};

impl Interpreter {
    /// Run a program. Each top-level statement is justified by being part
    /// of the program.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.len()))]
    pub fn run(&mut self, program: &[Stmt]) -> EvalResult<()> {
        for stmt in program {
            let why = self.text(format!("{stmt} is in my program"));
            if let Flow::Returned(_) = self.exec(stmt, why)? {
                break;
            }
        }
        Ok(())
    }

    /// Run `statements` in order under `why`, stopping at a `Return`.
    pub(crate) fn run_statements(
        &mut self,
        statements: &[Stmt],
        why: JustificationId,
    ) -> EvalResult<Flow> {
        for stmt in statements {
            let flow = self.exec(stmt, why)?;
            if flow != Flow::Normal {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    pub(crate) fn exec(&mut self, stmt: &Stmt, why: JustificationId) -> EvalResult<Flow> {
        tracing::trace!(statement = %stmt, "exec");
        match &stmt.kind {
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let result = self.eval(condition, why)?;
                let branch = if self.truth(&result, condition)? {
                    then_branch
                } else {
                    else_branch
                };
                self.run_statements(branch, result.justification)
            }
            StmtKind::ForEach {
                variable,
                values,
                body,
            } => self.exec_for_each(variable, values, body, why),
            StmtKind::While { condition, body } => self.exec_while(condition, body, stmt.loc, why),
            StmtKind::Var { name, value } => {
                let default = self.text("the default variable value is None");
                self.scopes
                    .declare_info(self.current_scope(), name, JustifiedValue::none(default))
                    .map_err(|err| err.with_justification(why))?;
                self.exec_set(name, value, stmt.loc, why)?;
                Ok(Flow::Normal)
            }
            StmtKind::Set { name, value } => {
                self.exec_set(name, value, stmt.loc, why)?;
                Ok(Flow::Normal)
            }
            StmtKind::Return(value) => {
                let result = self.eval(value, why)?;
                let rendered = self.render(&result.value);
                let returned = self.full("return", rendered, stmt.loc, why, [result.justification])?;
                Ok(Flow::Returned(JustifiedValue::new(result.value, returned)))
            }
            StmtKind::Func(decl) => {
                let function = self.define_function(decl, None);
                self.scopes.declare_info(
                    self.current_scope(),
                    &decl.name,
                    JustifiedValue::new(Value::Function(function), why),
                )?;
                Ok(Flow::Normal)
            }
            StmtKind::Class(decl) => {
                self.declare_class(decl, why)?;
                Ok(Flow::Normal)
            }
            StmtKind::Expr(expr) => {
                self.eval(expr, why)?;
                Ok(Flow::Normal)
            }
            StmtKind::DotSet {
                owner,
                property,
                value,
            } => {
                self.exec_dot_set(owner, property, value, stmt.loc, why)?;
                Ok(Flow::Normal)
            }
            StmtKind::Print(value) => {
                let result = self.eval(value, why)?;
                let text = self.printable_text(&result, why)?;
                self.println(&text);
                Ok(Flow::Normal)
            }
            StmtKind::FullExplain(value) => {
                let result = self.eval(value, why)?;
                let explanation = self.explain(result.justification, None)?;
                self.println(&explanation);
                Ok(Flow::Normal)
            }
            StmtKind::ShortExplain { value, depth } => {
                let result = self.eval(value, why)?;
                let depth_info = self.eval(depth, why)?;
                let depth = NumObject::number_of(self, &depth_info.value)
                    .and_then(|(number, _)| number)
                    .and_then(|number| usize::try_from(number).ok())
                    .ok_or_else(|| {
                        invalid_operand(format!(
                            "explanation depth {} is not a non-negative Num",
                            self.render(&depth_info.value)
                        ))
                        .with_justification(depth_info.justification)
                    })?;
                let explanation = self.explain(result.justification, Some(depth))?;
                self.println(&explanation);
                Ok(Flow::Normal)
            }
            StmtKind::Raise(message) => Err(raised(message).with_justification(why)),
            StmtKind::InvokeNative { method, args } => {
                self.exec_invoke_native(method, args, stmt.loc, why)
            }
        }
    }

    /// Truth of a condition, which must be a Bool object.
    pub(crate) fn truth(&self, result: &JustifiedValue, condition: &Expr) -> EvalResult<bool> {
        BoolObject::bool_of(self, &result.value)
            .map(|(value, _)| value)
            .ok_or_else(|| {
                invalid_operand(format!(
                    "{condition} is {}, not a Bool",
                    self.render(&result.value)
                ))
                .with_justification(result.justification)
            })
    }

    fn exec_set(
        &mut self,
        name: &str,
        value: &Expr,
        loc: SourceLoc,
        why: JustificationId,
    ) -> EvalResult<()> {
        let result = self.eval(value, why)?;
        let rendered = self.render(&result.value);
        let assigned = self.full(name, rendered, loc, why, [result.justification])?;
        self.scopes
            .set_info(
                self.current_scope(),
                name,
                JustifiedValue::new(result.value, assigned),
            )
            .map_err(|err| err.with_justification(why))
    }

    fn exec_dot_set(
        &mut self,
        owner: &Expr,
        property: &str,
        value: &Expr,
        loc: SourceLoc,
        why: JustificationId,
    ) -> EvalResult<()> {
        let owner_info = self.eval(owner, why)?;
        let Some(object) = owner_info.value.as_object() else {
            return Err(invalid_operand(format!(
                "cannot set {property} on {}: not an object",
                self.render(&owner_info.value)
            ))
            .with_justification(owner_info.justification));
        };
        // Only the object's own fields; its scope's parents are not its members.
        if self.scopes.get_local(object, property).is_none() {
            return Err(
                undefined_variable(property, self.scopes.description(object))
                    .with_justification(owner_info.justification),
            );
        }
        let result = self.eval(value, why)?;
        let getter = format!(
            "{}.{property}",
            to_variable_text(&self.render(&owner_info.value))
        );
        let rendered = self.render(&result.value);
        let assigned = self.full(getter, rendered, loc, why, [result.justification])?;
        self.scopes
            .set_info(object, property, JustifiedValue::new(result.value, assigned))
            .map_err(|err| err.with_justification(why))
    }

    fn exec_for_each(
        &mut self,
        variable: &str,
        values: &Expr,
        body: &[Stmt],
        why: JustificationId,
    ) -> EvalResult<Flow> {
        let loop_scope = self
            .scopes
            .new_child(self.current_scope(), Some(format!("for loop of {variable}")));
        self.with_scope(loop_scope, |this| {
            let collection = this.eval(values, why)?;
            let initialized = this.text("Initialized by ForEach loop");
            this.scopes
                .declare_info(loop_scope, variable, JustifiedValue::none(initialized))?;
            let items = this
                .native_handle(&collection.value)
                .and_then(|handle| handle.items())
                .ok_or_else(|| {
                    invalid_operand(format!(
                        "cannot iterate over {}",
                        this.render(&collection.value)
                    ))
                    .with_justification(collection.justification)
                })?;

            for item in items {
                let rendered = this.render(&item.value);
                let iteration = this.full(
                    format!("loop iterator {variable}"),
                    rendered.clone(),
                    values.loc,
                    why,
                    [collection.justification, item.justification],
                )?;
                this.scopes
                    .set_info(loop_scope, variable, JustifiedValue::new(item.value, iteration))?;
                let iteration_scope = this.scopes.new_child(
                    loop_scope,
                    Some(format!("iteration where {variable} = {rendered}")),
                );
                let flow = this.with_scope(iteration_scope, |this| this.run_statements(body, iteration))?;
                if flow != Flow::Normal {
                    return Ok(flow);
                }
            }
            Ok(Flow::Normal)
        })
    }

    fn exec_while(
        &mut self,
        condition: &Expr,
        body: &[Stmt],
        loc: SourceLoc,
        why: JustificationId,
    ) -> EvalResult<Flow> {
        loop {
            let pass_scope = self
                .scopes
                .new_child(self.current_scope(), Some(format!("while ({condition})")));
            let flow = self.with_scope(pass_scope, |this| {
                let result = this.eval(condition, why)?;
                if !this.truth(&result, condition)? {
                    return Ok(None);
                }
                let rendered = this.render(&result.value);
                let pass = this.full(
                    condition.to_string(),
                    rendered,
                    loc,
                    why,
                    [result.justification],
                )?;
                this.run_statements(body, pass).map(Some)
            })?;
            match flow {
                None => return Ok(Flow::Normal),
                Some(Flow::Normal) => {}
                Some(returned) => return Ok(returned),
            }
        }
    }

    /// Text a `Print` shows: a String's text, any other object's `toString`,
    /// or a host value as written.
    fn printable_text(&mut self, result: &JustifiedValue, why: JustificationId) -> EvalResult<String> {
        if let Some((text, _)) = StringObject::text_of(self, &result.value) {
            return Ok(text.to_string());
        }
        if self.class_of(&result.value).is_none() {
            return Ok(self.render(&result.value));
        }
        let converted = self.call_method_name(result, "toString", Vec::new(), why)?;
        Ok(StringObject::text_of(self, &converted.value)
            .map_or_else(|| self.render(&converted.value), |(text, _)| text.to_string()))
    }

    /// Forward the running method to the native handle of `self`.
    fn exec_invoke_native(
        &mut self,
        method: &str,
        params: &[String],
        loc: SourceLoc,
        why: JustificationId,
    ) -> EvalResult<Flow> {
        let this = self.lookup_variable(SELF, loc, why)?;
        let mut args = Vec::with_capacity(params.len());
        for param in params {
            args.push(self.lookup_variable(param, loc, why)?);
        }
        let shown = self.render_all(&args);
        let args_why = self.full(
            format!("{method} arguments"),
            format!("({shown})"),
            loc,
            why,
            args.iter().map(|arg| arg.justification),
        )?;
        let object = self.render(&this.value);
        let history = self.and(
            format!("Called (unmanaged) {object}.{method}({shown})"),
            [why, this.justification, args_why],
        )?;

        let (Some(scope), Some(handle)) = (this.value.as_object(), self.native_handle(&this.value))
        else {
            return Err(
                native_dispatch_failure(&object, method, "receiver has no native handle")
                    .with_justification(history),
            );
        };
        let result = handle
            .invoke(self, scope, method, history, &args)
            .map_err(|err| {
                err.into_eval_error(handle.class_name(), method)
                    .or_justification(history)
            })?;

        self.mark_boring(history)?;
        let rendered = self.render(&result.value);
        let forwarded = self.full(
            format!("unmanaged {object}.{method}({shown})"),
            rendered,
            loc,
            why,
            [result.justification],
        )?;
        self.mark_boring(forwarded)?;
        Ok(Flow::Returned(JustifiedValue::new(result.value, forwarded)))
    }
}
