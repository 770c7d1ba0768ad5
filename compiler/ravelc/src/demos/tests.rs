use pretty_assertions::assert_eq;
use ravel_eval::{buffer_handler, Interpreter};

use super::*;

fn output_of(name: &str) -> String {
    let demo = find(name).expect("demo exists");
    let output = buffer_handler();
    let mut interp = Interpreter::builder()
        .print_handler(output.clone())
        .build()
        .expect("session should build");
    interp.run(&demo.program()).expect("demo runs");
    output.get_output()
}

#[test]
fn demo_names_are_unique() {
    let mut names: Vec<&str> = DEMOS.iter().map(|demo| demo.name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), DEMOS.len());
}

#[test]
fn unknown_demo_is_not_found() {
    assert!(find("nonsense").is_none());
}

#[test]
fn inheritance_demo_chains_constructors_and_methods() {
    assert_eq!(
        output_of("inheritance"),
        "running init in TestChild class\n\
         running init in TestParent class\n\
         running init in TestGrandParent class\n\
         running talk in TestChild class\n\
         running talk in TestParent class\n\
         running talk in TestGrandParent class\n"
    );
}

#[test]
fn args_demo_copies_only_named_fields() {
    assert_eq!(output_of("args"), "None\nabcd\n");
}

#[test]
fn counter_demo_prints_the_labelled_total() {
    let output = output_of("counter");
    assert!(output.starts_with("- (#"), "output: {output}");
    assert!(output.ends_with(") 3\n"), "output: {output}");
}

#[test]
fn equality_demo_takes_the_else_branch() {
    let output = output_of("equality");
    let first = output.lines().next().expect("labelled result");
    assert!(first.ends_with(") different"), "output:\n{output}");
    assert!(output.contains("result = different"), "output:\n{output}");
}

#[test]
fn lists_demo_keeps_first_occurrences() {
    let output = output_of("lists");
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "unique words: [to, be, or, not]");
    assert!(lines[1].ends_with(") 4"), "output:\n{output}");
}
