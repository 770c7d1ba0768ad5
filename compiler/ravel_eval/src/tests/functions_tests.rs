//! Free functions: arguments, scoping, results and arity.

use ravel_ir::builder::*;
use ravel_ir::Literal;

use super::{rendered_global, run_err, run_ok};
use crate::{EvalErrorKind, Value};

mod scoping_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parameter_shadows_global_of_the_same_name() {
        let (_, output) = run_ok(&[
            var("x", string("outer")),
            func(sig("show", ["x"]), vec![print(get("x"))]),
            call("show", vec![string("inner")]),
            print(get("x")),
        ]);
        assert_eq!(output, "inner\nouter\n");
    }

    #[test]
    fn set_inside_a_function_updates_the_global() {
        let (interp, _) = run_ok(&[
            var("count", string("a")),
            func(sig("bump", NO_ARGS), vec![set("count", string("b"))]),
            call("bump", vec![]),
        ]);
        assert_eq!(rendered_global(&interp, "count"), "b");
    }

    #[test]
    fn local_var_leaves_the_global_alone() {
        let (interp, output) = run_ok(&[
            var("count", string("a")),
            func(
                sig("shadow", NO_ARGS),
                vec![var("count", string("c")), print(get("count"))],
            ),
            call("shadow", vec![]),
        ]);
        assert_eq!(output, "c\n");
        assert_eq!(rendered_global(&interp, "count"), "a");
    }

    #[test]
    fn callee_cannot_see_caller_locals() {
        let (_, err, _) = run_err(&[
            func(sig("peek", NO_ARGS), vec![print(get("secret"))]),
            func(
                sig("outer", NO_ARGS),
                vec![var("secret", string("s")), call("peek", vec![])],
            ),
            call("outer", vec![]),
        ]);
        assert!(
            matches!(&err.kind, EvalErrorKind::UndefinedVariable { name, .. } if name == "secret"),
            "unexpected error: {err:?}"
        );
    }
}

mod return_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn return_skips_the_rest_of_the_body() {
        let (_, output) = run_ok(&[
            func(
                sig("pick", NO_ARGS),
                vec![ret(string("first")), print(string("unreachable"))],
            ),
            print(call_expr("pick", vec![])),
        ]);
        assert_eq!(output, "first\n");
    }

    #[test]
    fn return_inside_a_loop_ends_the_function() {
        let (_, output) = run_ok(&[
            func(
                sig("first", ["items"]),
                vec![
                    for_each("item", get("items"), vec![ret(get("item"))]),
                    print(string("unreachable")),
                ],
            ),
            print(call_expr("first", vec![range(num(7), num(9))])),
        ]);
        assert_eq!(output, "7\n");
    }

    #[test]
    fn recursion_with_early_return() {
        let (_, output) = run_ok(&[
            func(
                sig("down", ["n"]),
                vec![
                    if_(dot_call(get("n"), "equals", vec![num(0)]))
                        .then(vec![ret(string("liftoff"))])
                        .into(),
                    print(get("n")),
                    ret(call_expr("down", vec![plus(vec![get("n"), num(-1)])])),
                ],
            ),
            print(call_expr("down", vec![num(2)])),
        ]);
        assert_eq!(output, "2\n1\nliftoff\n");
    }

    #[test]
    fn falling_off_the_end_returns_none() {
        let (interp, _) = run_ok(&[
            func(sig("nothing", NO_ARGS), vec![]),
            var("result", call_expr("nothing", vec![])),
        ]);
        let result = interp.global("result").expect("result is declared");
        assert_eq!(result.value, Value::None);
    }

    #[test]
    fn explicit_none_return_is_justified() {
        let (interp, _) = run_ok(&[
            func(
                sig("nothing", NO_ARGS),
                vec![ret(constant(Literal::None))],
            ),
            var("result", call_expr("nothing", vec![])),
        ]);
        let result = interp.global("result").expect("result is declared");
        assert_eq!(result.value, Value::None);
        let explanation = interp
            .explain(result.justification, None)
            .expect("explanation renders");
        assert!(
            explanation.contains("nothing explicitly returned None"),
            "explanation:\n{explanation}"
        );
    }

    #[test]
    fn host_value_result_is_rejected() {
        let (_, err, _) = run_err(&[
            func(sig("raw", NO_ARGS), vec![ret(constant(Literal::Int(3)))]),
            call("raw", vec![]),
        ]);
        assert_eq!(
            err.kind,
            EvalErrorKind::InvalidReturnType {
                function: "raw".to_string(),
                value: "3".to_string()
            }
        );
    }
}

mod arity_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn too_few_arguments_is_an_arity_mismatch() {
        let (interp, err, _) = run_err(&[
            func(sig("pair", ["a", "b"]), vec![]),
            call("pair", vec![string("only")]),
        ]);
        assert_eq!(
            err.kind,
            EvalErrorKind::ArityMismatch {
                name: "pair".to_string(),
                expected: 2,
                got: 1
            }
        );

        let failure = interp
            .why()
            .get(err.justification.expect("arity failures are justified"))
            .expect("known justification");
        assert_eq!(
            failure.describe(),
            "Gave 1 arguments : [only]; required 2 arguments: [a, b]"
        );
        let supporters: Vec<String> = failure
            .supporters()
            .iter()
            .map(|id| interp.why().get(*id).expect("known").describe())
            .collect();
        assert_eq!(
            supporters,
            vec!["Call pair(only)".to_string(), "newObject String(only)".to_string()]
        );
    }

    #[test]
    fn method_arity_counts_self() {
        let (_, err, _) = run_err(&[
            class("Greeter")
                .func(sig("greet", ["name"]), vec![])
                .into(),
            effect(dot_call(new("Greeter", vec![]), "greet", vec![])),
        ]);
        assert_eq!(
            err.kind,
            EvalErrorKind::ArityMismatch {
                name: "greet".to_string(),
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn arguments_without_a_constructor_are_rejected() {
        let (_, err, _) = run_err(&[
            class("Plain").into(),
            var("p", new("Plain", vec![num(1)])),
        ]);
        assert_eq!(
            err.kind,
            EvalErrorKind::ArityMismatch {
                name: "Plain".to_string(),
                expected: 0,
                got: 1
            }
        );
    }

    #[test]
    fn undefined_function_is_reported() {
        let (_, err, _) = run_err(&[call("missing", vec![])]);
        assert!(
            matches!(&err.kind, EvalErrorKind::UndefinedFunction { name, .. } if name == "missing"),
            "unexpected error: {err:?}"
        );
    }
}
