//! Expression evaluation.

use ravel_ir::{Expr, ExprKind, Receiver, SELF};
use ravel_why::{to_variable_text, JustificationId, SourceLoc};
use smallvec::SmallVec;

use super::Interpreter;
use crate::errors::{input_exhausted, invalid_operand, undefined_function, EvalResult};
use crate::natives::{ListObject, NumObject, StringObject};
use crate::{ClassId, JustifiedValue, Value};

impl Interpreter {
    /// Evaluate `expr` because of `why`.
    pub(crate) fn eval(&mut self, expr: &Expr, why: JustificationId) -> EvalResult<JustifiedValue> {
        match &expr.kind {
            ExprKind::Const(literal) => {
                let in_program = self.text(format!("'{literal}' is in my program"));
                Ok(JustifiedValue::new(Value::from(literal), in_program))
            }
            ExprKind::Get(name) => self.lookup_variable(name, expr.loc, why),
            ExprKind::DotGet { owner, property } => self.eval_dot_get(owner, property, expr.loc, why),
            ExprKind::New { class, args } => {
                let args = self.eval_args(args, why)?;
                let description = format!("new {class}({})", self.render_all(&args));
                let context = self.and(
                    description,
                    std::iter::once(why).chain(args.iter().map(|arg| arg.justification)),
                )?;
                self.new_object(class, args, context)
            }
            ExprKind::Eq(left, right) => self.eval_eq(expr, left, right, why),
            ExprKind::Not(inner) => {
                let sub = self.eval(inner, why)?;
                let truth = self.truth(&sub, inner)?;
                self.derived_bool(expr, !truth, sub, why)
            }
            ExprKind::IsNone(inner) => {
                let sub = self.eval(inner, why)?;
                let missing = sub.value.is_none();
                self.derived_bool(expr, missing, sub, why)
            }
            ExprKind::Plus(operands) | ExprKind::Concat(operands) => {
                self.eval_plus(expr, operands, why)
            }
            ExprKind::Call { function, args } => {
                let args = self.eval_args(args, why)?;
                let description = format!("Call {function}({})", self.render_all(&args));
                let context = self.and(description, [why])?;
                let function = self.lookup_function(function, context)?;
                self.call_function(function, args, context)
            }
            ExprKind::MethodCall {
                receiver,
                method,
                args,
            } => self.eval_method_call(expr, receiver, method, args, why),
            ExprKind::WithId(inner) => {
                let result = self.eval(inner, why)?;
                let labelled = format!(
                    "{}{}",
                    self.why.get(result.justification)?.id_text(),
                    self.render(&result.value)
                );
                self.new_boring_object(
                    "String",
                    vec![JustifiedValue::new(Value::string(&labelled), result.justification)],
                    why,
                )
            }
            ExprKind::Range { low, high } => self.eval_range(expr, low, high, why),
            ExprKind::Ask(prompt) => self.eval_ask(prompt.as_deref(), why),
            ExprKind::Int(inner) => {
                let input = self.eval(inner, why)?;
                let parsed = StringObject::text_of(self, &input.value)
                    .and_then(|(text, _)| text.trim().parse::<i64>().ok());
                let unknown = self.unknown();
                let payload = parsed.map_or(Value::None, Value::Int);
                self.new_object("Num", vec![JustifiedValue::new(payload, unknown)], why)
            }
        }
    }

    pub(crate) fn eval_args(
        &mut self,
        args: &[Expr],
        why: JustificationId,
    ) -> EvalResult<Vec<JustifiedValue>> {
        args.iter().map(|arg| self.eval(arg, why)).collect()
    }

    /// Scoped variable lookup, recording where the value was read.
    pub(crate) fn lookup_variable(
        &mut self,
        name: &str,
        loc: SourceLoc,
        why: JustificationId,
    ) -> EvalResult<JustifiedValue> {
        let stored = match self.scopes.get_info(self.current_scope(), name) {
            Ok(stored) => stored,
            Err(err) => {
                let failed = self.and(err.to_string(), [why])?;
                return Err(err.with_justification(failed));
            }
        };
        let rendered = self.render(&stored.value);
        let read = self.full(name, rendered, loc, why, [stored.justification])?;
        Ok(JustifiedValue::new(stored.value, read))
    }

    fn eval_dot_get(
        &mut self,
        owner: &Expr,
        property: &str,
        loc: SourceLoc,
        why: JustificationId,
    ) -> EvalResult<JustifiedValue> {
        let owner_info = self.eval(owner, why)?;
        let Some(object) = owner_info.value.as_object() else {
            let message = if owner_info.value.is_none() {
                "object to dereference is None".to_string()
            } else {
                format!(
                    "cannot read {property} of {}: not an object",
                    self.render(&owner_info.value)
                )
            };
            return Err(invalid_operand(message).with_justification(owner_info.justification));
        };
        let stored = self
            .scopes
            .get_info(object, property)
            .map_err(|err| err.with_justification(why))?;
        let getter = format!(
            "{}.{property}",
            to_variable_text(&self.render(&owner_info.value))
        );
        let rendered = self.render(&stored.value);
        let read = self.full(
            getter,
            rendered,
            loc,
            why,
            [owner_info.justification, stored.justification],
        )?;
        Ok(JustifiedValue::new(stored.value, read))
    }

    /// Equality of host values. Objects must be compared through `equals`.
    fn eval_eq(
        &mut self,
        expr: &Expr,
        left: &Expr,
        right: &Expr,
        why: JustificationId,
    ) -> EvalResult<JustifiedValue> {
        let first = self.eval(left, why)?;
        let second = self.eval(right, why)?;
        for (operand, info) in [(left, &first), (right, &second)] {
            if info.value.as_object().is_some() {
                return Err(invalid_operand(format!(
                    "{operand} is the object {}; objects must be compared with 'equals'",
                    self.render(&info.value)
                ))
                .with_justification(info.justification));
            }
        }
        let matches = first.value == second.value;
        let description = format!("{left}{}{right}", if matches { "=" } else { "!=" });
        let first_rendered = self.render(&first.value);
        let first_why = self.full(
            left.to_string(),
            first_rendered,
            expr.loc,
            why,
            [first.justification],
        )?;
        let second_rendered = self.render(&second.value);
        let second_why = self.full(
            right.to_string(),
            second_rendered,
            expr.loc,
            why,
            [second.justification],
        )?;
        let compared = self.and(description, [first_why, second_why])?;
        self.new_boring_object(
            "Bool",
            vec![JustifiedValue::new(Value::Bool(matches), compared)],
            why,
        )
    }

    /// A Bool computed from one operand (`Not`, `IsNone`).
    fn derived_bool(
        &mut self,
        expr: &Expr,
        value: bool,
        operand: JustifiedValue,
        why: JustificationId,
    ) -> EvalResult<JustifiedValue> {
        let result = self.new_boring_object(
            "Bool",
            vec![JustifiedValue::new(Value::Bool(value), operand.justification)],
            why,
        )?;
        let rendered = self.render(&result.value);
        let derived = self.full(
            expr.to_string(),
            rendered,
            expr.loc,
            why,
            [operand.justification],
        )?;
        Ok(JustifiedValue::new(result.value, derived))
    }

    /// Left fold through `plus`, so each operand's class decides what adding means.
    /// The sum is justified by its operands alone; the `plus` calls are bookkeeping.
    fn eval_plus(
        &mut self,
        expr: &Expr,
        operands: &[Expr],
        why: JustificationId,
    ) -> EvalResult<JustifiedValue> {
        let infos = self.eval_args(operands, why)?;
        for info in &infos {
            if info.value.as_object().is_none() {
                return Err(invalid_operand(format!(
                    "invalid operand {} for {expr} (not an object)",
                    self.render(&info.value)
                ))
                .with_justification(info.justification));
            }
        }
        let Some((first, rest)) = infos.split_first() else {
            return Err(invalid_operand(format!("{expr} has no operands")).with_justification(why));
        };
        let mut sum = first.clone();
        for other in rest {
            sum = self.call_method_name(&sum, "plus", vec![other.clone()], why)?;
            if sum.value.as_object().is_none() {
                return Err(invalid_operand(format!(
                    "plus returned {} (not an object)",
                    self.render(&sum.value)
                ))
                .with_justification(sum.justification));
            }
        }
        let operand_whys: SmallVec<[JustificationId; 4]> =
            infos.iter().map(|info| info.justification).collect();
        let rendered = self.render(&sum.value);
        let total = self.full(expr.to_string(), rendered, expr.loc, why, operand_whys)?;
        Ok(JustifiedValue::new(sum.value, total))
    }

    /// The class whose method table serves a call on `receiver`, with the
    /// reason that table was chosen.
    fn dispatch_class(
        &mut self,
        receiver: &Receiver,
        target: &JustifiedValue,
        method: &str,
        why: JustificationId,
    ) -> EvalResult<(ClassId, JustificationId)> {
        if let Receiver::Super = receiver {
            let owner = self.call_stack.current_owner();
            let parent = owner.and_then(|owner| self.class(owner).parent);
            let (Some(owner), Some(parent)) = (owner, parent) else {
                let scope = owner.map_or_else(
                    || self.scopes.description(self.global).to_string(),
                    |owner| self.class(owner).name.clone(),
                );
                return Err(undefined_function(method, &format!("the parent of {scope}"))
                    .with_justification(why));
            };
            let reason = format!(
                "parent scope of {} is {}",
                self.class(owner).name,
                self.class(parent).name
            );
            return Ok((parent, self.text(reason)));
        }
        let Some(class) = self.class_of(&target.value) else {
            let message = if target.value.is_none() {
                format!("cannot call {method} on None")
            } else {
                format!(
                    "cannot call {method} on {}: not an object",
                    self.render(&target.value)
                )
            };
            return Err(invalid_operand(message).with_justification(target.justification));
        };
        let reason = format!(
            "({}) instanceof {}",
            self.render(&target.value),
            self.class(class)
        );
        Ok((class, self.text(reason)))
    }

    fn eval_method_call(
        &mut self,
        expr: &Expr,
        receiver: &Receiver,
        method: &str,
        args: &[Expr],
        why: JustificationId,
    ) -> EvalResult<JustifiedValue> {
        let target = match receiver {
            Receiver::Object(object) => self.eval(object, why)?,
            Receiver::SelfObject | Receiver::Super => self.lookup_variable(SELF, expr.loc, why)?,
        };
        let (class, class_why) = self.dispatch_class(receiver, &target, method, why)?;
        let class_name = self.class(class).name.clone();
        let chosen = self.why.equal(SELF, class_name, class_why)?;
        let args = self.eval_args(args, why)?;

        let context = self.and_at(
            format!("Evaluated {expr}"),
            [why, target.justification, chosen]
                .into_iter()
                .chain(args.iter().map(|arg| arg.justification)),
            expr.loc,
        )?;
        let class_def = self.class(class);
        let Some(function) = class_def.method(method) else {
            return Err(
                undefined_function(method, self.scopes.description(class_def.impl_scope))
                    .with_justification(context),
            );
        };

        let mut all = Vec::with_capacity(args.len() + 1);
        all.push(target);
        all.extend(args);
        let result = self.call_function(function, all, context)?;
        let rendered = self.render(&result.value);
        let called = self.full(
            expr.to_string(),
            rendered,
            expr.loc,
            why,
            [result.justification],
        )?;
        Ok(JustifiedValue::new(result.value, called))
    }

    fn eval_range(
        &mut self,
        expr: &Expr,
        low: &Expr,
        high: &Expr,
        why: JustificationId,
    ) -> EvalResult<JustifiedValue> {
        let low_info = self.eval(low, why)?;
        let high_info = self.eval(high, why)?;
        let mut bounds = [0_i64; 2];
        for (bound, info) in bounds.iter_mut().zip([&low_info, &high_info]) {
            *bound = NumObject::number_of(self, &info.value)
                .and_then(|(number, _)| number)
                .ok_or_else(|| {
                    invalid_operand(format!(
                        "range bound {} is not a Num",
                        self.render(&info.value)
                    ))
                    .with_justification(info.justification)
                })?;
        }
        let [start, end] = bounds;

        let list = self.new_boring_object("List", Vec::new(), why)?;
        for number in start..end {
            let unknown = self.unknown();
            let item =
                self.new_boring_object("Num", vec![JustifiedValue::new(Value::Int(number), unknown)], why)?;
            ListObject::append_to(self, &list.value, why, item)
                .map_err(|err| err.into_eval_error("List", "append").or_justification(why))?;
        }
        let description = format!("{expr} = ({start},{end})");
        let spanned = self.and(description, [low_info.justification, high_info.justification])?;
        Ok(JustifiedValue::new(list.value, spanned))
    }

    fn eval_ask(&mut self, prompt: Option<&Expr>, why: JustificationId) -> EvalResult<JustifiedValue> {
        let prompt = match prompt {
            Some(prompt) => {
                let info = self.eval(prompt, why)?;
                StringObject::text_of(self, &info.value)
                    .map_or_else(|| self.render(&info.value), |(text, _)| text.to_string())
            }
            None => String::new(),
        };
        if !prompt.is_empty() {
            self.print.print(&prompt);
        }
        let entered = self
            .input
            .read_line()
            .ok_or_else(|| input_exhausted().with_justification(why))?;
        let answered = self.text(format!("You entered '{entered}' when asked '{prompt}'"));
        let unknown = self.unknown();
        self.new_object(
            "String",
            vec![JustifiedValue::new(Value::string(&entered), unknown)],
            answered,
        )
    }
}
