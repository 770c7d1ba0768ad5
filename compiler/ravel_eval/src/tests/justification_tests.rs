//! What the justification graph records for ordinary programs.

use ravel_ir::builder::*;

use super::{run_err, run_ok};
use crate::EvalErrorKind;

fn explain_global(interp: &crate::Interpreter, name: &str) -> String {
    let info = interp
        .global(name)
        .unwrap_or_else(|| panic!("no global named {name}"));
    interp
        .explain(info.justification, None)
        .expect("explanation renders")
}

mod explain_statement_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn print_with_id_labels_the_value_with_its_justification() {
        let (interp, output) = run_ok(&[var("x", string("hello")), print_with_id(get("x"))]);
        let line = output.trim_end();
        assert!(line.starts_with("- (#"), "output: {output}");
        assert!(line.ends_with(") hello"), "output: {output}");

        let raw: u32 = line["- (#".len()..line.find(')').expect("closing paren")]
            .parse()
            .expect("numeric id");
        let labelled = interp.why().lookup(raw).expect("id is live");
        assert!(
            labelled.describe().ends_with("x = hello"),
            "labelled: {}",
            labelled.describe()
        );
    }

    #[test]
    fn full_explain_reaches_the_literal() {
        let (_, output) = run_ok(&[var("x", string("hello")), full_explain(get("x"))]);
        assert!(output.contains("x = hello"), "output:\n{output}");
        assert!(
            output.contains("'hello' is in my program"),
            "output:\n{output}"
        );
    }

    #[test]
    fn short_explain_at_depth_zero_elides_children() {
        let (_, output) = run_ok(&[var("x", string("hello")), short_explain(get("x"), num(0))]);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2, "output:\n{output}");
        assert!(lines[0].ends_with("x = hello because"), "output:\n{output}");
        assert_eq!(lines[1], "|- (more)");
    }

    #[test]
    fn short_explain_rejects_a_negative_depth() {
        let (_, err, _) = run_err(&[var("x", string("hello")), short_explain(get("x"), num(-1))]);
        assert!(matches!(err.kind, EvalErrorKind::InvalidOperand { .. }));
    }
}

mod provenance_tests {
    use super::*;

    #[test]
    fn assignment_chain_is_explained_back_to_the_source() {
        let (interp, _) = run_ok(&[
            var("a", string("seed")),
            var("b", get("a")),
            var("c", get("b")),
        ]);
        let explanation = explain_global(&interp, "c");
        for expected in ["c = seed", "b = seed", "a = seed", "'seed' is in my program"] {
            assert!(
                explanation.contains(expected),
                "missing {expected:?} in:\n{explanation}"
            );
        }
    }

    #[test]
    fn split_records_the_parts() {
        let (interp, _) = run_ok(&[var(
            "parts",
            dot_call(string("a,b"), "split", vec![string(",")]),
        )]);
        let explanation = explain_global(&interp, "parts");
        assert!(
            explanation.contains("a,b.split(,) = ['a', 'b']"),
            "explanation:\n{explanation}"
        );
    }

    #[test]
    fn method_call_records_the_chosen_class() {
        let (interp, _) = run_ok(&[var(
            "t",
            dot_call(string("a"), "toString", vec![]),
        )]);
        let explanation = explain_global(&interp, "t");
        assert!(
            explanation.contains("self equals \"String\""),
            "explanation:\n{explanation}"
        );
    }

    #[test]
    fn forwarding_bookkeeping_is_hidden() {
        let (interp, _) = run_ok(&[var(
            "t",
            dot_call(string("a"), "toString", vec![]),
        )]);
        let explanation = explain_global(&interp, "t");
        assert!(
            !explanation.contains("unmanaged"),
            "explanation:\n{explanation}"
        );
    }

    #[test]
    fn loop_iterations_are_justified_by_the_collection() {
        let (interp, _) = run_ok(&[
            var("last", string("none yet")),
            for_range("i", num(0), num(2), vec![set("last", get("i"))]),
        ]);
        let explanation = explain_global(&interp, "last");
        assert!(
            explanation.contains("(loop iterator i) = 1"),
            "explanation:\n{explanation}"
        );
    }

    #[test]
    fn while_passes_are_justified_by_the_condition() {
        let (interp, _) = run_ok(&[
            var("go", boolean(true)),
            var("seen", string("before")),
            while_(
                get("go"),
                vec![set("seen", string("inside")), set("go", boolean(false))],
            ),
        ]);
        let explanation = explain_global(&interp, "seen");
        assert!(explanation.contains("go = True"), "explanation:\n{explanation}");
    }
}
