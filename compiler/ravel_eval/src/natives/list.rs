//! `List`: an ordered, growable sequence of justified values.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use ravel_why::JustificationId;

use super::{
    expect_args, unknown_method, wrong_type, NativeClass, NativeError, NativeObject,
    NativeResult,
};
use crate::natives::{NumObject, StringObject};
use crate::{Interpreter, JustifiedValue, ScopeId, Value};

pub(super) const CLASS: NativeClass = NativeClass {
    name: "List",
    construct,
    methods: &[
        ("append", &["item"]),
        ("clear", &[]),
        ("get", &["index"]),
        ("tryGet", &["index"]),
        ("removeAt", &["index"]),
        ("getLength", &[]),
        ("toString", &[]),
    ],
};

fn construct(
    _interp: &mut Interpreter,
    _why: JustificationId,
    args: &[JustifiedValue],
) -> NativeResult<Rc<dyn NativeObject>> {
    expect_args("List", args, 0)?;
    Ok(Rc::new(ListObject::default()))
}

#[derive(Debug, Default)]
pub struct ListObject {
    items: RefCell<Vec<JustifiedValue>>,
}

impl ListObject {
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Append `item` to the List object `list`.
    pub fn append_to(
        interp: &mut Interpreter,
        list: &Value,
        why: JustificationId,
        item: JustifiedValue,
    ) -> NativeResult<()> {
        let handle = interp
            .native_handle(list)
            .ok_or_else(|| wrong_type("append", "List"))?;
        let list = handle
            .as_any()
            .downcast_ref::<ListObject>()
            .ok_or_else(|| wrong_type("append", "List"))?;
        list.append(interp, why, item)
    }

    fn append(
        &self,
        interp: &mut Interpreter,
        why: JustificationId,
        item: JustifiedValue,
    ) -> NativeResult<()> {
        let description = format!(
            "appended {} to {}",
            interp.render(&item.value),
            self.render_contents(interp)
        );
        let appended = interp.and(description, [why, item.justification])?;
        self.items
            .borrow_mut()
            .push(JustifiedValue::new(item.value, appended));
        Ok(())
    }

    fn render_contents(&self, interp: &Interpreter) -> String {
        let rendered: Vec<String> = self
            .items
            .borrow()
            .iter()
            .map(|item| interp.render(&item.value))
            .collect();
        format!("[{}]", rendered.join(", "))
    }

    fn index_of(interp: &Interpreter, method: &str, index: &JustifiedValue) -> NativeResult<Option<i64>> {
        NumObject::number_of(interp, &index.value)
            .map(|(number, _)| number)
            .ok_or_else(|| wrong_type(method, "Num"))
    }

    fn position(&self, index: i64) -> Option<usize> {
        usize::try_from(index).ok().filter(|&i| i < self.len())
    }

    fn get(
        &self,
        interp: &mut Interpreter,
        this: ScopeId,
        why: JustificationId,
        index: &JustifiedValue,
    ) -> NativeResult<JustifiedValue> {
        let requested = Self::index_of(interp, "get", index)?;
        let position = requested.and_then(|i| self.position(i));
        let Some(position) = position else {
            return Err(NativeError::IndexOutOfRange {
                index: requested.unwrap_or(-1),
                len: self.len(),
            });
        };
        let item = self.items.borrow()[position].clone();
        let description = format!(
            "returned {}[{position}] = {}",
            interp.object_description(this),
            interp.render(&item.value)
        );
        let returned = interp.and(description, [item.justification, why, index.justification])?;
        Ok(JustifiedValue::new(item.value, returned))
    }

    fn try_get(
        &self,
        interp: &mut Interpreter,
        this: ScopeId,
        why: JustificationId,
        index: &JustifiedValue,
    ) -> NativeResult<JustifiedValue> {
        let requested = Self::index_of(interp, "tryGet", index)?;
        let description = interp.object_description(this).to_string();
        let (item, item_why) = match requested {
            None => (Value::None, interp.text("index is None")),
            Some(i) => match self.position(i) {
                Some(position) => {
                    let item = self.items.borrow()[position].clone();
                    (item.value, item.justification)
                }
                None => {
                    let reason = format!(
                        "index ({i}) is past the end of {description} ({})",
                        self.len()
                    );
                    (Value::None, interp.text(reason))
                }
            },
        };
        let shown = requested.map_or_else(|| "None".to_string(), |i| i.to_string());
        let description = format!("returned {description}[{shown}] = {}", interp.render(&item));
        let returned = interp.and(description, [item_why, why, index.justification])?;
        Ok(JustifiedValue::new(item, returned))
    }

    fn remove_at(&self, interp: &mut Interpreter, index: &JustifiedValue) -> NativeResult<JustifiedValue> {
        let requested = Self::index_of(interp, "removeAt", index)?;
        let Some(position) = requested.and_then(|i| self.position(i)) else {
            return Err(NativeError::IndexOutOfRange {
                index: requested.unwrap_or(-1),
                len: self.len(),
            });
        };
        self.items.borrow_mut().remove(position);
        Ok(JustifiedValue::none(interp.unknown()))
    }

    fn get_length(
        &self,
        interp: &mut Interpreter,
        this: ScopeId,
        why: JustificationId,
    ) -> NativeResult<JustifiedValue> {
        let supporters: Vec<JustificationId> =
            self.items.borrow().iter().map(|item| item.justification).collect();
        let length = supporters.len();
        let description = format!(
            "these {length} items were added to {}",
            interp.object_description(this)
        );
        let counted = interp.and(description, supporters)?;
        let length = i64::try_from(length).map_err(|_| NativeError::Overflow {
            operation: "getLength",
        })?;
        Ok(interp.new_boring_object(
            "Num",
            vec![JustifiedValue::new(Value::Int(length), counted)],
            why,
        )?)
    }

    fn stringify(&self, interp: &mut Interpreter, why: JustificationId) -> NativeResult<JustifiedValue> {
        let items = self.items.borrow().clone();
        let mut texts = Vec::with_capacity(items.len());
        let mut supporters = vec![why];
        for item in &items {
            supporters.push(item.justification);
            let text = interp.call_method_name(item, "toString", Vec::new(), why)?;
            let (text, _) = StringObject::text_of(interp, &text.value)
                .ok_or_else(|| wrong_type("toString", "String"))?;
            texts.push(text.to_string());
        }
        let result = format!("[{}]", texts.join(", "));
        let elements = interp.and(format!("Returned List.toString() = {result}"), supporters)?;
        Ok(interp.new_boring_object(
            "String",
            vec![JustifiedValue::new(Value::string(&result), elements)],
            why,
        )?)
    }
}

impl NativeObject for ListObject {
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
            "append" => {
                expect_args(method, args, 1)?;
                self.append(interp, why, args[0].clone())?;
                Ok(JustifiedValue::none(why))
            }
            "clear" => {
                expect_args(method, args, 0)?;
                self.items.borrow_mut().clear();
                Ok(JustifiedValue::none(interp.unknown()))
            }
            "get" => {
                expect_args(method, args, 1)?;
                self.get(interp, this, why, &args[0])
            }
            "tryGet" => {
                expect_args(method, args, 1)?;
                self.try_get(interp, this, why, &args[0])
            }
            "removeAt" => {
                expect_args(method, args, 1)?;
                self.remove_at(interp, &args[0])
            }
            "getLength" => {
                expect_args(method, args, 0)?;
                self.get_length(interp, this, why)
            }
            "toString" => {
                expect_args(method, args, 0)?;
                self.stringify(interp, why)
            }
            _ => Err(unknown_method(method)),
        }
    }

    fn items(&self) -> Option<Vec<JustifiedValue>> {
        Some(self.items.borrow().clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

