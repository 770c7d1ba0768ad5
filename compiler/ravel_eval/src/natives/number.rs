//! `Num`: an integer, or `None` when a conversion produced no number.

use std::any::Any;
use std::rc::Rc;

use ravel_why::JustificationId;

use super::{
    expect_args, unknown_method, with_native, wrong_type, NativeClass, NativeError, NativeObject,
    NativeResult,
};
use crate::{Interpreter, JustifiedValue, ScopeId, Value};

pub(super) const CLASS: NativeClass = NativeClass {
    name: "Num",
    construct,
    methods: &[
        ("toString", &[]),
        ("nonEmpty", &[]),
        ("equals", &["other"]),
        ("plus", &["other"]),
    ],
};

fn construct(
    _interp: &mut Interpreter,
    _why: JustificationId,
    args: &[JustifiedValue],
) -> NativeResult<Rc<dyn NativeObject>> {
    expect_args("Num", args, 1)?;
    let value = match args[0].value {
        Value::Int(n) => Some(n),
        Value::None => None,
        _ => return Err(wrong_type("Num", "integer")),
    };
    Ok(Rc::new(NumObject {
        value,
        justification: args[0].justification,
    }))
}

#[derive(Debug)]
pub struct NumObject {
    value: Option<i64>,
    justification: JustificationId,
}

fn spelled(value: Option<i64>) -> String {
    value.map_or_else(|| "None".to_string(), |n| n.to_string())
}

impl NumObject {
    pub fn value(&self) -> Option<i64> {
        self.value
    }

    /// Payload and its justification, if `value` is a Num object.
    pub fn number_of(interp: &Interpreter, value: &Value) -> Option<(Option<i64>, JustificationId)> {
        with_native(interp, value, |n: &NumObject| (n.value, n.justification))
    }

    fn other(
        interp: &Interpreter,
        method: &str,
        other: &JustifiedValue,
    ) -> NativeResult<(Option<i64>, JustificationId)> {
        Self::number_of(interp, &other.value).ok_or_else(|| wrong_type(method, "Num"))
    }

    fn equals(
        &self,
        interp: &mut Interpreter,
        why: JustificationId,
        other: &JustifiedValue,
    ) -> NativeResult<JustifiedValue> {
        let (theirs, their_why) = Self::other(interp, "equals", other)?;
        let equal = self.value == theirs;
        let result_why = interp.and(
            format!("{} == {}", spelled(self.value), spelled(theirs)),
            [self.justification, their_why],
        )?;
        Ok(interp.new_boring_object(
            "Bool",
            vec![JustifiedValue::new(Value::Bool(equal), result_why)],
            why,
        )?)
    }

    fn plus(
        &self,
        interp: &mut Interpreter,
        why: JustificationId,
        other: &JustifiedValue,
    ) -> NativeResult<JustifiedValue> {
        let (theirs, their_why) = Self::other(interp, "plus", other)?;
        let sum = match (self.value, theirs) {
            (Some(a), Some(b)) => Some(
                a.checked_add(b)
                    .ok_or(NativeError::Overflow { operation: "plus" })?,
            ),
            _ => None,
        };
        let sum_why = interp.and(
            format!("sum = {}", spelled(sum)),
            [why, self.justification, their_why],
        )?;
        let payload = sum.map_or(Value::None, Value::Int);
        Ok(interp.new_boring_object("Num", vec![JustifiedValue::new(payload, sum_why)], why)?)
    }
}

impl NativeObject for NumObject {
    fn class_name(&self) -> &'static str {
        CLASS.name
    }

    fn invoke(
        &self,
        interp: &mut Interpreter,
        _this: ScopeId,
        method: &str,
        why: JustificationId,
        args: &[JustifiedValue],
    ) -> NativeResult<JustifiedValue> {
        match method {
            "toString" => {
                expect_args(method, args, 0)?;
                let text = spelled(self.value);
                Ok(interp.new_boring_object(
                    "String",
                    vec![JustifiedValue::new(Value::string(&text), self.justification)],
                    why,
                )?)
            }
            "nonEmpty" => {
                expect_args(method, args, 0)?;
                Ok(interp.new_boring_object(
                    "Bool",
                    vec![JustifiedValue::new(
                        Value::Bool(self.value.is_some()),
                        self.justification,
                    )],
                    why,
                )?)
            }
            "equals" => {
                expect_args(method, args, 1)?;
                self.equals(interp, why, &args[0])
            }
            "plus" => {
                expect_args(method, args, 1)?;
                self.plus(interp, why, &args[0])
            }
            _ => Err(unknown_method(method)),
        }
    }

    fn display(&self) -> Option<String> {
        Some(spelled(self.value))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
