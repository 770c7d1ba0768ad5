//! `String`: immutable text.

use std::any::Any;
use std::rc::Rc;

use ravel_why::JustificationId;

use super::{
    comparison, expect_args, unknown_method, with_native, wrong_type, NativeClass, NativeObject,
    NativeResult,
};
use crate::natives::ListObject;
use crate::{Interpreter, JustifiedValue, ScopeId, Value};

pub(super) const CLASS: NativeClass = NativeClass {
    name: "String",
    construct,
    methods: &[
        ("split", &["separator"]),
        ("toString", &[]),
        ("plus", &["other"]),
        ("exceptPrefix", &["prefix"]),
        ("equals", &["other"]),
    ],
};

fn construct(
    _interp: &mut Interpreter,
    _why: JustificationId,
    args: &[JustifiedValue],
) -> NativeResult<Rc<dyn NativeObject>> {
    expect_args("String", args, 1)?;
    match &args[0].value {
        Value::Str(text) => Ok(Rc::new(StringObject {
            text: Rc::clone(text),
            justification: args[0].justification,
        })),
        _ => Err(wrong_type("String", "text")),
    }
}

#[derive(Debug)]
pub struct StringObject {
    text: Rc<str>,
    /// Why the text is what it is.
    justification: JustificationId,
}

impl StringObject {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text and its justification, if `value` is a String object.
    pub fn text_of(interp: &Interpreter, value: &Value) -> Option<(Rc<str>, JustificationId)> {
        with_native(interp, value, |s: &StringObject| {
            (Rc::clone(&s.text), s.justification)
        })
    }

    fn other_text(
        interp: &Interpreter,
        method: &str,
        info: &JustifiedValue,
    ) -> NativeResult<(Rc<str>, JustificationId)> {
        Self::text_of(interp, &info.value).ok_or_else(|| wrong_type(method, "String"))
    }

    fn split(
        &self,
        interp: &mut Interpreter,
        why: JustificationId,
        separator: &JustifiedValue,
    ) -> NativeResult<JustifiedValue> {
        let (sep, sep_why) = Self::other_text(interp, "split", separator)?;
        let parts: Vec<&str> = self.text.split(&*sep).collect();

        let list = interp.new_object("List", Vec::new(), why)?;
        interp.mark_boring(list.justification)?;

        let quoted: Vec<String> = parts.iter().map(|part| format!("'{part}'")).collect();
        let split_why = interp.and(
            format!("{}.split({sep}) = [{}]", self.text, quoted.join(", ")),
            [why, self.justification, sep_why],
        )?;
        for part in parts {
            let item = interp.new_object(
                "String",
                vec![JustifiedValue::new(Value::string(part), split_why)],
                split_why,
            )?;
            interp.mark_boring(item.justification)?;
            ListObject::append_to(interp, &list.value, split_why, item)?;
        }
        Ok(JustifiedValue::new(list.value, split_why))
    }

    fn plus(
        &self,
        interp: &mut Interpreter,
        why: JustificationId,
        other: &JustifiedValue,
    ) -> NativeResult<JustifiedValue> {
        let (theirs, their_why) = Self::other_text(interp, "plus", other)?;
        let text = format!("{}{theirs}", self.text);
        let sum_why = interp.and(
            format!("concatenation = {text}"),
            [why, self.justification, their_why],
        )?;
        Ok(interp.new_boring_object(
            "String",
            vec![JustifiedValue::new(Value::string(&text), sum_why)],
            why,
        )?)
    }

    fn equals(
        &self,
        interp: &mut Interpreter,
        why: JustificationId,
        other: &JustifiedValue,
    ) -> NativeResult<JustifiedValue> {
        let (theirs, their_why) = Self::other_text(interp, "equals", other)?;
        let equal = *self.text == *theirs;
        let result_why = interp.and(
            format!("{}{}{theirs}", self.text, comparison(equal)),
            [self.justification, their_why],
        )?;
        Ok(interp.new_object(
            "Bool",
            vec![JustifiedValue::new(Value::Bool(equal), result_why)],
            why,
        )?)
    }

    fn except_prefix(
        &self,
        interp: &mut Interpreter,
        why: JustificationId,
        prefix: &JustifiedValue,
    ) -> NativeResult<JustifiedValue> {
        let (prefix, _) = Self::other_text(interp, "exceptPrefix", prefix)?;
        let (rest, reason) = match self.text.strip_prefix(&*prefix) {
            Some(rest) => (rest, format!("'{}' starts with '{prefix}'", self.text)),
            None => (
                &*self.text,
                format!("'{}' does not start with '{prefix}'", self.text),
            ),
        };
        let reason = interp.text(reason);
        Ok(interp.new_boring_object(
            "String",
            vec![JustifiedValue::new(Value::string(rest), reason)],
            why,
        )?)
    }
}

impl NativeObject for StringObject {
    fn class_name(&self) -> &'static str {
        CLASS.name
    }

    fn invoke(
        &self,
        interp: &mut Interpreter,
        this: ScopeId,
        method: &str,
        why: JustificationId,
        args: &[JustifiedValue],
    ) -> NativeResult<JustifiedValue> {
        match method {
            "toString" => {
                expect_args(method, args, 0)?;
                Ok(JustifiedValue::new(Value::Object(this), why))
            }
            "split" => {
                expect_args(method, args, 1)?;
                self.split(interp, why, &args[0])
            }
            "plus" => {
                expect_args(method, args, 1)?;
                self.plus(interp, why, &args[0])
            }
            "equals" => {
                expect_args(method, args, 1)?;
                self.equals(interp, why, &args[0])
            }
            "exceptPrefix" => {
                expect_args(method, args, 1)?;
                self.except_prefix(interp, why, &args[0])
            }
            _ => Err(unknown_method(method)),
        }
    }

    fn display(&self) -> Option<String> {
        Some(self.text.to_string())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
