use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_factory_messages() {
    assert_eq!(
        undefined_variable("x", "global scope").to_string(),
        "undefined variable: 'x' in global scope"
    );
    assert_eq!(
        arity_mismatch("f", 2, 1).to_string(),
        "invalid number of arguments to function f: required 2, got 1"
    );
    assert_eq!(raised("called abstract method").to_string(), "called abstract method");
    assert_eq!(
        recursion_limit_exceeded(50).to_string(),
        "maximum recursion depth exceeded (limit: 50)"
    );
}

#[test]
fn test_with_justification_sets_justification() {
    let id = JustificationId::new(7);
    let err = undefined_class("Widget").with_justification(id);
    assert_eq!(err.justification, Some(id));
    assert_eq!(err.kind, EvalErrorKind::UndefinedClass { name: "Widget".to_string() });
}

#[test]
fn test_backtrace_display() {
    let backtrace = EvalBacktrace::new(vec![
        BacktraceFrame {
            name: "increment".to_string(),
            loc: Some(SourceLoc {
                file: "demo.rs",
                line: 14,
                column: 9,
            }),
        },
        BacktraceFrame {
            name: "__init__".to_string(),
            loc: None,
        },
    ]);
    assert_eq!(
        backtrace.to_string(),
        "stack backtrace:\n  0: increment at demo.rs:14\n  1: __init__\n"
    );
    assert_eq!(EvalBacktrace::default().to_string(), "");
}

#[test]
fn test_justification_errors_convert() {
    let err: EvalError = JustificationError::UnknownJustification { id: 3 }.into();
    assert_eq!(err.kind, EvalErrorKind::InvalidJustificationType { id: 3 });
}

#[test]
fn test_input_exhausted_is_clean_exit() {
    assert!(input_exhausted().is_input_exhausted());
    assert!(!raised("boom").is_input_exhausted());
}
