//! `Dict`: a map from host keys to justified values.
//!
//! Entries keep their insertion order; writing an existing key replaces the
//! value in place.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use ravel_why::JustificationId;
use rustc_hash::FxHashMap;

use super::{expect_args, unknown_method, NativeClass, NativeObject, NativeResult};
use crate::{Interpreter, JustifiedValue, ScopeId, Value};

pub(super) const CLASS: NativeClass = NativeClass {
    name: "Dict",
    construct,
    methods: &[
        ("get", &["key"]),
        ("put", &["key", "value"]),
        ("containsKey", &["key"]),
    ],
};

fn construct(
    _interp: &mut Interpreter,
    _why: JustificationId,
    args: &[JustifiedValue],
) -> NativeResult<Rc<dyn NativeObject>> {
    expect_args("Dict", args, 0)?;
    Ok(Rc::new(DictObject::default()))
}

/// Host key of an entry.
///
/// Native objects compare by class and displayed text, so two String objects
/// with the same text address the same entry while `Num 1` and `"1"` do not.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Key {
    Native { class: &'static str, text: String },
    Host { kind: &'static str, text: String },
    Object(ScopeId),
}

#[derive(Debug)]
struct Entry {
    key: JustifiedValue,
    value: JustifiedValue,
}

#[derive(Debug, Default)]
struct Entries {
    index: FxHashMap<Key, usize>,
    entries: Vec<Entry>,
}

#[derive(Debug, Default)]
pub struct DictObject {
    inner: RefCell<Entries>,
}

impl DictObject {
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    fn key_of(interp: &Interpreter, key: &Value) -> Key {
        if let Value::Object(scope) = key {
            let native = interp.native_handle(key).and_then(|handle| {
                handle.display().map(|text| Key::Native {
                    class: handle.class_name(),
                    text,
                })
            });
            return native.unwrap_or(Key::Object(*scope));
        }
        let kind = match key {
            Value::Object(_) => "Object",
            Value::None => "None",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Str(_) => "Str",
            Value::Class(_) => "Class",
            Value::Function(_) => "Function",
        };
        Key::Host {
            kind,
            text: key.to_string(),
        }
    }

    fn lookup(&self, interp: &Interpreter, key: &Value) -> Option<JustifiedValue> {
        let inner = self.inner.borrow();
        let position = *inner.index.get(&Self::key_of(interp, key))?;
        Some(inner.entries[position].value.clone())
    }

    fn get(
        &self,
        interp: &mut Interpreter,
        this: ScopeId,
        why: JustificationId,
        key: &JustifiedValue,
    ) -> NativeResult<JustifiedValue> {
        let key_text = interp.render(&key.value);
        let dict = interp.object_description(this).to_string();
        match self.lookup(interp, &key.value) {
            None => {
                let missing = interp.and(format!("{key_text} not found in {dict}"), [why])?;
                Ok(JustifiedValue::none(missing))
            }
            Some(found) => {
                let retrieved = interp.and(
                    format!("{key_text} retrieved from {dict}"),
                    [why, found.justification],
                )?;
                Ok(JustifiedValue::new(found.value, retrieved))
            }
        }
    }

    fn put(
        &self,
        interp: &mut Interpreter,
        this: ScopeId,
        why: JustificationId,
        key: &JustifiedValue,
        value: &JustifiedValue,
    ) -> NativeResult<JustifiedValue> {
        let description = format!(
            "called {}[{}] = {}",
            interp.object_description(this),
            interp.render(&key.value),
            interp.render(&value.value)
        );
        let stored = interp.and(description, [why, key.justification, value.justification])?;
        let entry = Entry {
            key: key.clone(),
            value: JustifiedValue::new(value.value.clone(), stored),
        };

        let host_key = Self::key_of(interp, &key.value);
        let mut inner = self.inner.borrow_mut();
        let existing = inner.index.get(&host_key).copied();
        match existing {
            Some(position) => inner.entries[position] = entry,
            None => {
                let position = inner.entries.len();
                inner.index.insert(host_key, position);
                inner.entries.push(entry);
            }
        }
        Ok(JustifiedValue::none(interp.unknown()))
    }

    fn contains_key(
        &self,
        interp: &mut Interpreter,
        this: ScopeId,
        why: JustificationId,
        key: &JustifiedValue,
    ) -> NativeResult<JustifiedValue> {
        let key_text = interp.render(&key.value);
        let dict = interp.object_description(this).to_string();
        let (present, answer) = match self.lookup(interp, &key.value) {
            Some(found) => (
                true,
                interp.and(format!("{key_text} in {dict}"), [why, found.justification])?,
            ),
            None => (
                false,
                interp.and(format!("{key_text} not in {dict}"), [why])?,
            ),
        };
        Ok(interp.new_boring_object(
            "Bool",
            vec![JustifiedValue::new(Value::Bool(present), answer)],
            why,
        )?)
    }
}

impl NativeObject for DictObject {
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
            "get" => {
                expect_args(method, args, 1)?;
                self.get(interp, this, why, &args[0])
            }
            "put" => {
                expect_args(method, args, 2)?;
                self.put(interp, this, why, &args[0], &args[1])
            }
            "containsKey" => {
                expect_args(method, args, 1)?;
                self.contains_key(interp, this, why, &args[0])
            }
            _ => Err(unknown_method(method)),
        }
    }

    /// Iterating a Dict visits its keys in insertion order.
    fn items(&self) -> Option<Vec<JustifiedValue>> {
        Some(
            self.inner
                .borrow()
                .entries
                .iter()
                .map(|entry| entry.key.clone())
                .collect(),
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
