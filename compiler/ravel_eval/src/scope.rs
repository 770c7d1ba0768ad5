//! The scope arena.
//!
//! Scopes (and objects, which are scopes with an object tag) live in one
//! arena per interpreter session and refer to their parents by [`ScopeId`].
//! Nothing is freed before the session ends, so a parent always outlives its
//! children.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::errors::{duplicate_declaration, undefined_variable, EvalResult};
use crate::natives::NativeObject;
use crate::{ClassId, JustifiedValue, ScopeId};

/// What makes a scope an object.
#[derive(Clone)]
pub struct ObjectMeta {
    /// Unique within the session, starting at 1.
    pub object_id: u64,
    pub class: Option<ClassId>,
    /// Host state of a native-backed object.
    pub native: Option<Rc<dyn NativeObject>>,
}

impl fmt::Debug for ObjectMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectMeta")
            .field("object_id", &self.object_id)
            .field("class", &self.class)
            .field("native", &self.native.as_ref().map(|n| n.class_name()))
            .finish()
    }
}

#[derive(Debug)]
pub struct ScopeData {
    bindings: FxHashMap<String, JustifiedValue>,
    parent: Option<ScopeId>,
    pub description: String,
    pub object: Option<ObjectMeta>,
}

#[derive(Debug, Default)]
pub struct ScopeArena {
    scopes: Vec<ScopeData>,
}

impl ScopeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    fn alloc(&mut self, parent: Option<ScopeId>, description: String) -> ScopeId {
        let id = ScopeId::from_index(self.scopes.len());
        self.scopes.push(ScopeData {
            bindings: FxHashMap::default(),
            parent,
            description,
            object: None,
        });
        id
    }

    /// A scope with no parent.
    pub fn new_root(&mut self, description: impl Into<String>) -> ScopeId {
        self.alloc(None, description.into())
    }

    /// A scope whose lookups fall back to `parent`.
    pub fn new_child(&mut self, parent: ScopeId, description: Option<String>) -> ScopeId {
        let description = description
            .unwrap_or_else(|| format!("child scope of {}", self.scopes[parent.index()].description));
        self.alloc(Some(parent), description)
    }

    #[inline]
    pub fn data(&self, scope: ScopeId) -> &ScopeData {
        &self.scopes[scope.index()]
    }

    #[inline]
    pub fn data_mut(&mut self, scope: ScopeId) -> &mut ScopeData {
        &mut self.scopes[scope.index()]
    }

    #[inline]
    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.data(scope).parent
    }

    #[inline]
    pub fn description(&self, scope: ScopeId) -> &str {
        &self.data(scope).description
    }

    /// Bind `name` in `scope` itself. Ancestors may already bind it.
    pub fn declare_info(
        &mut self,
        scope: ScopeId,
        name: &str,
        info: JustifiedValue,
    ) -> EvalResult<()> {
        let data = self.data_mut(scope);
        if data.bindings.contains_key(name) {
            return Err(duplicate_declaration(name, &data.description));
        }
        data.bindings.insert(name.to_string(), info);
        Ok(())
    }

    /// The nearest scope, starting at `scope`, that binds `name`.
    pub fn try_find_scope(&self, scope: ScopeId, name: &str) -> Option<ScopeId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let data = self.data(id);
            if data.bindings.contains_key(name) {
                return Some(id);
            }
            current = data.parent;
        }
        None
    }

    pub fn find_scope(&self, scope: ScopeId, name: &str) -> EvalResult<ScopeId> {
        self.try_find_scope(scope, name)
            .ok_or_else(|| undefined_variable(name, self.description(scope)))
    }

    /// Overwrite the nearest binding of `name`.
    pub fn set_info(&mut self, scope: ScopeId, name: &str, info: JustifiedValue) -> EvalResult<()> {
        let owner = self.find_scope(scope, name)?;
        self.data_mut(owner).bindings.insert(name.to_string(), info);
        Ok(())
    }

    pub fn get_info(&self, scope: ScopeId, name: &str) -> EvalResult<JustifiedValue> {
        let owner = self.find_scope(scope, name)?;
        Ok(self.data(owner).bindings[name].clone())
    }

    pub fn try_get_info(&self, scope: ScopeId, name: &str) -> Option<JustifiedValue> {
        self.try_find_scope(scope, name)
            .map(|owner| self.data(owner).bindings[name].clone())
    }

    /// Binding in `scope` itself, ignoring ancestors.
    pub fn get_local(&self, scope: ScopeId, name: &str) -> Option<&JustifiedValue> {
        self.data(scope).bindings.get(name)
    }
}
