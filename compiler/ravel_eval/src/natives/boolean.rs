//! `Bool`: a justified truth value.

use std::any::Any;
use std::rc::Rc;

use ravel_why::JustificationId;

use super::{
    comparison, expect_args, unknown_method, with_native, wrong_type, NativeClass, NativeObject,
    NativeResult,
};
use crate::{Interpreter, JustifiedValue, ScopeId, Value};

pub(super) const CLASS: NativeClass = NativeClass {
    name: "Bool",
    construct,
    methods: &[("toString", &[]), ("equals", &["other"])],
};

fn construct(
    _interp: &mut Interpreter,
    _why: JustificationId,
    args: &[JustifiedValue],
) -> NativeResult<Rc<dyn NativeObject>> {
    expect_args("Bool", args, 1)?;
    match args[0].value {
        Value::Bool(value) => Ok(Rc::new(BoolObject {
            value,
            justification: args[0].justification,
        })),
        _ => Err(wrong_type("Bool", "boolean")),
    }
}

#[derive(Debug)]
pub struct BoolObject {
    value: bool,
    justification: JustificationId,
}

fn spelled(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

impl BoolObject {
    pub fn value(&self) -> bool {
        self.value
    }

    /// Truth value and its justification, if `value` is a Bool object.
    pub fn bool_of(interp: &Interpreter, value: &Value) -> Option<(bool, JustificationId)> {
        with_native(interp, value, |b: &BoolObject| (b.value, b.justification))
    }

    fn equals(
        &self,
        interp: &mut Interpreter,
        why: JustificationId,
        other: &JustifiedValue,
    ) -> NativeResult<JustifiedValue> {
        let (theirs, their_why) =
            Self::bool_of(interp, &other.value).ok_or_else(|| wrong_type("equals", "Bool"))?;
        let equal = self.value == theirs;
        let description = format!(
            "{}{}{}",
            spelled(self.value),
            comparison(equal),
            spelled(theirs)
        );
        let result_why = interp.and(description, [self.justification, their_why])?;
        Ok(interp.new_boring_object(
            "Bool",
            vec![JustifiedValue::new(Value::Bool(equal), result_why)],
            why,
        )?)
    }
}

impl NativeObject for BoolObject {
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
                Ok(interp.new_object(
                    "String",
                    vec![JustifiedValue::new(
                        Value::string(spelled(self.value)),
                        self.justification,
                    )],
                    why,
                )?)
            }
            "equals" => {
                expect_args(method, args, 1)?;
                self.equals(interp, why, &args[0])
            }
            _ => Err(unknown_method(method)),
        }
    }

    fn display(&self) -> Option<String> {
        Some(spelled(self.value).to_string())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
