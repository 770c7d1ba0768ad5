//! Built-in programs runnable with `ravel demo <name>`.

use ravel_ir::builder::*;
use ravel_ir::Stmt;

pub struct Demo {
    pub name: &'static str,
    pub summary: &'static str,
    build: fn() -> Vec<Stmt>,
}

impl Demo {
    pub fn program(&self) -> Vec<Stmt> {
        (self.build)()
    }
}

pub const DEMOS: &[Demo] = &[
    Demo {
        name: "inheritance",
        summary: "constructors and methods chained through super",
        build: inheritance,
    },
    Demo {
        name: "counter",
        summary: "a field updated by three method calls",
        build: counter,
    },
    Demo {
        name: "args",
        summary: "constructor arguments copied into fields",
        build: args,
    },
    Demo {
        name: "equality",
        summary: "a branch decided by comparing two strings",
        build: equality,
    },
    Demo {
        name: "lists",
        summary: "splitting text and collecting unique words",
        build: lists,
    },
];

pub fn find(name: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|demo| demo.name == name)
}

fn inheritance() -> Vec<Stmt> {
    vec![
        class("TestGrandParent")
            .init(
                NO_ARGS,
                vec![print(string("running init in TestGrandParent class"))],
            )
            .func(
                sig("talk", NO_ARGS),
                vec![print(string("running talk in TestGrandParent class"))],
            )
            .into(),
        class("TestParent")
            .inherit("TestGrandParent")
            .init(
                NO_ARGS,
                vec![
                    print(string("running init in TestParent class")),
                    effect(super_call("__init__", vec![])),
                    effect(self_call("talk", vec![])),
                ],
            )
            .func(
                sig("talk", NO_ARGS),
                vec![
                    print(string("running talk in TestParent class")),
                    effect(super_call("talk", vec![])),
                ],
            )
            .into(),
        class("TestChild")
            .inherit("TestParent")
            .init(
                NO_ARGS,
                vec![
                    print(string("running init in TestChild class")),
                    effect(super_call("__init__", vec![])),
                ],
            )
            .func(
                sig("talk", NO_ARGS),
                vec![
                    print(string("running talk in TestChild class")),
                    effect(super_call("talk", vec![])),
                ],
            )
            .into(),
        var("testChild", new("TestChild", vec![])),
    ]
}

fn counter() -> Vec<Stmt> {
    vec![
        class("Counter")
            .vars(["n"])
            .init(NO_ARGS, vec![self_set("n", num(0))])
            .func(
                sig("increment", NO_ARGS),
                vec![self_set("n", plus(vec![self_get("n"), num(1)]))],
            )
            .into(),
        var("counter", new("Counter", vec![])),
        for_range(
            "i",
            num(0),
            num(3),
            vec![effect(dot_call(get("counter"), "increment", vec![]))],
        ),
        print_with_id(dot_get(get("counter"), "n")),
    ]
}

fn args() -> Vec<Stmt> {
    vec![
        class("ArgTester")
            .vars(["key1", "key2"])
            .init(["key2"], vec![print(self_get("key1")), print(self_get("key2"))])
            .into(),
        var("a", new("ArgTester", vec![string("abcd")])),
    ]
}

fn equality() -> Vec<Stmt> {
    vec![
        var("a", string("one")),
        var("b", string("two")),
        var("result", string("undecided")),
        if_(dot_call(get("a"), "equals", vec![get("b")]))
            .then(vec![set("result", string("equal"))])
            .otherwise(vec![set("result", string("different"))])
            .into(),
        print_with_id(get("result")),
        short_explain(get("result"), num(2)),
    ]
}

fn lists() -> Vec<Stmt> {
    vec![
        var(
            "words",
            dot_call(string("to be or not to be"), "split", vec![string(" ")]),
        ),
        var("seen", new("Dict", vec![])),
        var("unique", new("List", vec![])),
        for_each(
            "word",
            get("words"),
            vec![if_(not(dot_call(get("seen"), "containsKey", vec![get("word")])))
                .then(vec![
                    effect(dot_call(get("seen"), "put", vec![get("word"), boolean(true)])),
                    effect(dot_call(get("unique"), "append", vec![get("word")])),
                ])
                .into()],
        ),
        print(concat(vec![
            string("unique words: "),
            dot_call(get("unique"), "toString", vec![]),
        ])),
        print_with_id(dot_call(get("unique"), "getLength", vec![])),
    ]
}

#[cfg(test)]
mod tests;
