//! Class declaration and object construction.

use ravel_ir::{ClassDecl, FuncDecl, INIT};
use ravel_why::JustificationId;
use rustc_hash::FxHashMap;

use super::{Interpreter, CLASS_FIELD};
use crate::class::{ClassDef, ClassKind, FunctionDefinition};
use crate::errors::{arity_mismatch, undefined_class, EvalResult};
use crate::natives::NativeConstructor;
use crate::scope::ObjectMeta;
use crate::{ClassId, FunctionId, JustifiedValue, ScopeId, Value};

impl Interpreter {
    /// A class declared in the global scope.
    pub fn lookup_class(&self, name: &str) -> Option<ClassId> {
        match self.scopes.get_local(self.global, name)?.value {
            Value::Class(class) => Some(class),
            _ => None,
        }
    }

    pub(crate) fn define_function(&mut self, decl: &FuncDecl, owner: Option<ClassId>) -> FunctionId {
        let id = FunctionId::from_index(self.functions.len());
        self.functions.push(FunctionDefinition {
            name: decl.name.clone(),
            params: decl.params.clone(),
            body: decl.body.clone(),
            owner,
            loc: decl.loc,
        });
        id
    }

    /// Declare a user class in the global scope.
    ///
    /// The method table starts as a copy of the parent's, so overrides
    /// replace inherited entries and lookups never walk the hierarchy.
    pub(crate) fn declare_class(&mut self, decl: &ClassDecl, why: JustificationId) -> EvalResult<()> {
        let parent = match &decl.parent {
            Some(name) => Some(
                self.lookup_class(name)
                    .ok_or_else(|| undefined_class(name).with_justification(why))?,
            ),
            None => None,
        };
        let (parent_scope, vtable, native_base) = match parent {
            Some(parent) => {
                let parent = self.class(parent);
                (parent.impl_scope, parent.vtable.clone(), parent.native_base)
            }
            None => (self.global, FxHashMap::default(), None),
        };
        let impl_scope = self.scopes.new_child(parent_scope, Some(decl.name.clone()));

        let class = ClassId::from_index(self.classes.len());
        self.classes.push(ClassDef {
            name: decl.name.clone(),
            parent,
            fields: decl.fields.clone(),
            impl_scope,
            vtable,
            kind: ClassKind::User,
            native_base,
        });
        self.scopes
            .declare_info(self.global, &decl.name, JustifiedValue::new(Value::Class(class), why))?;

        for method in &decl.methods {
            let defined = self.text(format!("def {} is in my program", method.name));
            let function = self.define_function(method, Some(class));
            self.scopes.declare_info(
                impl_scope,
                &method.name,
                JustifiedValue::new(Value::Function(function), defined),
            )?;
            self.classes[class.index()]
                .vtable
                .insert(method.name.clone(), function);
        }

        tracing::debug!(
            class = %decl.name,
            parent = ?decl.parent,
            methods = decl.methods.len(),
            "declared class"
        );
        Ok(())
    }

    /// Construct an instance of `class_name`, justified by the call site and
    /// every argument.
    #[tracing::instrument(level = "debug", skip_all, fields(class = class_name))]
    pub fn new_object(
        &mut self,
        class_name: &str,
        args: Vec<JustifiedValue>,
        why: JustificationId,
    ) -> EvalResult<JustifiedValue> {
        let class = self
            .lookup_class(class_name)
            .ok_or_else(|| undefined_class(class_name).with_justification(why))?;

        let object_id = self.next_object_id;
        self.next_object_id += 1;
        let object = self
            .scopes
            .new_child(self.current_scope(), Some(format!("{class_name}@{object_id}")));
        self.scopes.data_mut(object).object = Some(ObjectMeta {
            object_id,
            class: Some(class),
            native: None,
        });

        let is_user = !self.class(class).is_native();
        let native_backed = self.native_constructor(class);
        if let Some(construct) = native_backed {
            let handle = construct(self, why, &args)
                .map_err(|err| err.into_eval_error(class_name, "new").or_justification(why))?;
            if let Some(meta) = self.scopes.data_mut(object).object.as_mut() {
                meta.native = Some(handle);
            }
        }
        if is_user {
            self.declare_fields(object, class)?;
        }
        self.tag_class(object, class)?;
        if is_user {
            self.run_constructor(object, class, &args, native_backed.is_some(), why)?;
        }

        let description = format!("newObject {class_name}({})", self.render_all(&args));
        let justification = self.and(
            description,
            std::iter::once(why).chain(args.iter().map(|arg| arg.justification)),
        )?;
        Ok(JustifiedValue::new(Value::Object(object), justification))
    }

    /// [`new_object`](Self::new_object) for bookkeeping values whose
    /// construction is not worth explaining.
    pub fn new_boring_object(
        &mut self,
        class_name: &str,
        args: Vec<JustifiedValue>,
        why: JustificationId,
    ) -> EvalResult<JustifiedValue> {
        let result = self.new_object(class_name, args, why)?;
        self.mark_boring(result.justification)?;
        Ok(result)
    }

    /// Constructor of the class's native base, if it has one.
    fn native_constructor(&self, class: ClassId) -> Option<NativeConstructor> {
        let base = self.class(class).native_base?;
        match self.class(base).kind {
            ClassKind::Native(construct) => Some(construct),
            ClassKind::User => None,
        }
    }

    fn tag_class(&mut self, object: ScopeId, class: ClassId) -> EvalResult<()> {
        let tagged = self.text("This is the class of the object");
        self.scopes
            .declare_info(object, CLASS_FIELD, JustifiedValue::new(Value::Class(class), tagged))
    }

    /// Declare every field as None, root ancestor first.
    fn declare_fields(&mut self, object: ScopeId, class: ClassId) -> EvalResult<()> {
        let mut lineage = Vec::new();
        let mut current = Some(class);
        while let Some(id) = current {
            lineage.push(id);
            current = self.class(id).parent;
        }
        for id in lineage.into_iter().rev() {
            for field in self.class(id).fields.clone() {
                let default = self.text("The default value for a member variable is None");
                self.scopes
                    .declare_info(object, &field, JustifiedValue::none(default))?;
            }
        }
        Ok(())
    }

    fn run_constructor(
        &mut self,
        object: ScopeId,
        class: ClassId,
        args: &[JustifiedValue],
        native_backed: bool,
        why: JustificationId,
    ) -> EvalResult<()> {
        let class_def = self.class(class);
        let name = class_def.name.clone();
        let Some(init) = class_def.method(INIT) else {
            // Without `__init__` the arguments belong to the native constructor.
            if args.is_empty() || native_backed {
                return Ok(());
            }
            return Err(arity_mismatch(&name, 0, args.len()).with_justification(why));
        };
        let specified = self.text(format!("my program specified a {name}"));
        let mut all = Vec::with_capacity(args.len() + 1);
        all.push(JustifiedValue::new(Value::Object(object), specified));
        all.extend_from_slice(args);
        self.call_function(init, all, why)?;
        Ok(())
    }
}
