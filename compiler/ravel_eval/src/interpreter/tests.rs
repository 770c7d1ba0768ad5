use pretty_assertions::assert_eq;
use ravel_ir::builder::*;
use ravel_ir::SELF;

use super::*;
use crate::{buffer_handler, EvalErrorKind, DEFAULT_MAX_CALL_DEPTH};

fn quiet() -> Interpreter {
    Interpreter::builder()
        .print_handler(buffer_handler())
        .build()
        .expect("session should build")
}

mod builder_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_classes_are_declared_in_global_scope() {
        let interp = quiet();
        for name in ["String", "List", "Dict", "Bool", "Num"] {
            let class = interp.lookup_class(name).expect("built-in class");
            assert!(interp.class(class).is_native());
            assert_eq!(interp.class(class).to_string(), format!("native classdef:{name}"));
        }
    }

    #[test]
    fn native_methods_take_self_first() {
        let interp = quiet();
        let string = interp.lookup_class("String").expect("String is built in");
        let split = interp.class(string).method("split").expect("split is declared");
        let definition = interp.function(split);
        assert_eq!(definition.params, vec![SELF.to_string(), "separator".to_string()]);
        assert_eq!(definition.owner, Some(string));
        assert!(definition.loc.is_builtin());
    }

    #[test]
    fn configuration_reaches_the_session() {
        let interp = Interpreter::builder()
            .print_handler(buffer_handler())
            .max_call_depth(None)
            .failure_explain_depth(5)
            .build()
            .expect("session should build");
        assert_eq!(interp.config().max_call_depth, None);
        assert_eq!(interp.config().failure_explain_depth, 5);
        assert_eq!(
            quiet().config().max_call_depth,
            Some(DEFAULT_MAX_CALL_DEPTH)
        );
    }

    #[test]
    fn session_starts_in_global_scope() {
        let interp = quiet();
        assert_eq!(interp.current_scope(), interp.global_scope());
        assert_eq!(interp.scopes().description(interp.global_scope()), "global scope");
    }
}

mod object_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn native_objects_render_their_value() {
        let mut interp = quiet();
        let why = interp.text("test");
        let unknown = interp.unknown();
        let three = interp
            .new_object("Num", vec![JustifiedValue::new(Value::Int(3), unknown)], why)
            .expect("Num constructs");
        assert_eq!(interp.render(&three.value), "3");
        assert_eq!(
            interp.class_of(&three.value),
            interp.lookup_class("Num")
        );
    }

    #[test]
    fn user_objects_render_their_description() {
        let mut interp = quiet();
        interp
            .run(&[class("Thing").vars(["size"]).into()])
            .expect("class declares");
        let why = interp.text("test");
        let thing = interp
            .new_object("Thing", Vec::new(), why)
            .expect("Thing constructs");
        assert_eq!(interp.render(&thing.value), "Thing@1");
        let size = interp.field(&thing.value, "size").expect("field declared");
        assert_eq!(size.value, Value::None);
        let tag = interp.field(&thing.value, CLASS_FIELD).expect("class tag");
        assert_eq!(tag.value, Value::Class(interp.lookup_class("Thing").expect("declared")));
    }

    #[test]
    fn object_justification_names_class_and_arguments() {
        let mut interp = quiet();
        let why = interp.text("test");
        let unknown = interp.unknown();
        let text = interp
            .new_object("String", vec![JustifiedValue::new(Value::string("hi"), unknown)], why)
            .expect("String constructs");
        let node = interp.why().get(text.justification).expect("known");
        assert_eq!(node.describe(), "newObject String(hi)");
        assert_eq!(node.supporters(), &[why, unknown]);
    }

    #[test]
    fn boring_objects_are_hidden_from_explanations() {
        let mut interp = quiet();
        let why = interp.text("test");
        let unknown = interp.unknown();
        let text = interp
            .new_boring_object("String", vec![JustifiedValue::new(Value::string("hi"), unknown)], why)
            .expect("String constructs");
        assert!(!interp.why().get(text.justification).expect("known").is_interesting());
    }

    #[test]
    fn unknown_class_is_justified_by_the_caller() {
        let mut interp = quiet();
        let why = interp.text("test");
        let err = interp
            .new_object("Ghost", Vec::new(), why)
            .expect_err("Ghost is not declared");
        assert_eq!(
            err.kind,
            EvalErrorKind::UndefinedClass {
                name: "Ghost".to_string()
            }
        );
        assert_eq!(err.justification, Some(why));
    }
}

mod call_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn call_method_name_passes_the_receiver_as_self() {
        let mut interp = quiet();
        let why = interp.text("test");
        let unknown = interp.unknown();
        let text = interp
            .new_object("String", vec![JustifiedValue::new(Value::string("hi"), unknown)], why)
            .expect("String constructs");
        let same = interp
            .call_method_name(&text, "toString", Vec::new(), why)
            .expect("toString runs");
        assert_eq!(same.value, text.value);
    }

    #[test]
    fn call_stack_is_empty_after_a_failed_call() {
        let mut interp = quiet();
        let result = interp.run(&[
            func(sig("fails", NO_ARGS), vec![raise("no")]),
            call("fails", vec![]),
        ]);
        assert!(result.is_err());
        assert!(interp.call_stack.is_empty());
        assert_eq!(interp.current_scope(), interp.global_scope());
    }

    #[test]
    fn function_scopes_are_children_of_global() {
        let mut interp = quiet();
        interp
            .run(&[
                func(sig("noop", NO_ARGS), vec![]),
                call("noop", vec![]),
            ])
            .expect("program runs");
        let function_scope = (0..interp.scopes().len())
            .map(ScopeId::from_index)
            .find(|&scope| interp.scopes().description(scope) == "function noop")
            .expect("function scope was created");
        assert_eq!(interp.scopes().parent(function_scope), Some(interp.global_scope()));
    }

    #[test]
    fn explain_failure_uses_the_configured_depth() {
        let mut interp = Interpreter::builder()
            .print_handler(buffer_handler())
            .failure_explain_depth(0)
            .build()
            .expect("session should build");
        let err = interp
            .run(&[print(get("missing"))])
            .expect_err("missing is undefined");
        let explanation = interp.explain_failure(&err).expect("failure is justified");
        assert!(explanation.ends_with("|- (more)"), "explanation:\n{explanation}");
    }
}

#[test]
fn printing_goes_through_the_handler() {
    let output = buffer_handler();
    let mut interp = Interpreter::builder()
        .print_handler(output.clone())
        .build()
        .expect("session should build");
    interp
        .run(&[print(string("captured"))])
        .expect("program runs");
    assert_eq!(output.get_output(), "captured\n");
    assert_eq!(interp.print_handler().get_output(), "captured\n");
}
