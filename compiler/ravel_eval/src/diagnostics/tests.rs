use super::*;
use crate::errors::{raised, EvalErrorKind};

fn frame(name: &str) -> CallFrame {
    CallFrame {
        name: name.to_string(),
        loc: None,
        owner: None,
    }
}

#[test]
fn test_push_respects_limit() {
    let mut stack = CallStack::new(Some(2));
    stack.push(frame("a")).unwrap();
    stack.push(frame("b")).unwrap();
    let err = stack.push(frame("c")).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::RecursionLimit { depth: 2 });
    assert_eq!(stack.depth(), 2);
}

#[test]
fn test_unlimited_stack() {
    let mut stack = CallStack::default();
    for _ in 0..10_000 {
        stack.push(frame("f")).unwrap();
    }
    assert_eq!(stack.depth(), 10_000);
}

#[test]
fn test_capture_is_most_recent_first() {
    let mut stack = CallStack::new(None);
    stack.push(frame("outer")).unwrap();
    stack.push(frame("inner")).unwrap();
    let captured = stack.capture();
    let names: Vec<&str> = captured
        .frames()
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, vec!["inner", "outer"]);
}

#[test]
fn test_attach_keeps_innermost_backtrace() {
    let mut stack = CallStack::new(None);
    stack.push(frame("outer")).unwrap();
    stack.push(frame("inner")).unwrap();
    let err = stack.attach_backtrace(raised("boom"));
    stack.pop();
    let err = stack.attach_backtrace(err);
    assert_eq!(err.backtrace.map(|b| b.len()), Some(2));
}

#[test]
fn test_current_owner_follows_top_frame() {
    let mut stack = CallStack::new(None);
    assert_eq!(stack.current_owner(), None);
    stack
        .push(CallFrame {
            name: "talk".to_string(),
            loc: None,
            owner: Some(ClassId::from_index(3)),
        })
        .unwrap();
    assert_eq!(stack.current_owner(), Some(ClassId::from_index(3)));
    stack.pop();
    assert!(stack.is_empty());
}
