use pretty_assertions::assert_eq;

use crate::builder::*;
use crate::Stmt;

#[test]
fn test_expr_display_forms() {
    assert_eq!(get("x").to_string(), "get x");
    assert_eq!(num(1).to_string(), "new Num(1)");
    assert_eq!(string("hi").to_string(), "new String(hi)");
    assert_eq!(boolean(false).to_string(), "new Bool(False)");
    assert_eq!(eq(get("a"), get("b")).to_string(), "get a==get b");
    assert_eq!(not(get("x")).to_string(), "!(get x)");
    assert_eq!(is_none(get("x")).to_string(), "(get x == None)");
    assert_eq!(plus(vec![get("a"), num(1)]).to_string(), "get a+new Num(1)");
    assert_eq!(self_get("n").to_string(), "get self.n");
    assert_eq!(
        call_expr("f", vec![get("a"), get("b")]).to_string(),
        "call f(get a, get b)"
    );
}

#[test]
fn test_method_call_display() {
    assert_eq!(
        dot_call(get("list"), "append", vec![num(2)]).to_string(),
        "(get list).append(new Num(2))"
    );
    assert_eq!(self_call("increment", vec![]).to_string(), "(get self).increment()");
    assert_eq!(super_call("talk", vec![]).to_string(), "(get self).talk()");
}

#[test]
fn test_stmt_display_forms() {
    assert_eq!(set("x", get("y")).to_string(), "x=get y");
    assert_eq!(ret(get("y")).to_string(), "return=get y");
    assert_eq!(func(sig("f", ["a"]), vec![]).to_string(), "def f");
    assert_eq!(Stmt::from(class("Counter")).to_string(), "declare class Counter");
    assert_eq!(
        for_each("x", get("items"), vec![]).to_string(),
        "for x in get items"
    );
    assert_eq!(
        while_(get("going"), vec![]).to_string(),
        "while (get going)"
    );
    assert_eq!(print(get("x")).to_string(), "Print(get x)");
    assert_eq!(call("f", vec![]).to_string(), "call f()");
}
