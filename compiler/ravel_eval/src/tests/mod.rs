//! End-to-end tests that run whole programs through an interpreter session.
//!
//! Each module covers one area of the language; the helpers below build a
//! session that captures output and answers `Ask` from a script.

mod functions_tests;
mod justification_tests;

use ravel_ir::Stmt;

use crate::{buffer_handler, scripted_handler, EvalError, Interpreter, SharedPrintHandler};

/// A session printing into a buffer and reading `input` line by line.
pub(crate) fn session(input: &[&str]) -> (Interpreter, SharedPrintHandler) {
    let output = buffer_handler();
    let interp = Interpreter::builder()
        .print_handler(output.clone())
        .input_handler(scripted_handler(input.iter().copied()))
        .build()
        .expect("session should build");
    (interp, output)
}

/// Run `program`, which must succeed, and return the session and its output.
pub(crate) fn run_ok(program: &[Stmt]) -> (Interpreter, String) {
    run_with_input(program, &[])
}

pub(crate) fn run_with_input(program: &[Stmt], input: &[&str]) -> (Interpreter, String) {
    let (mut interp, output) = session(input);
    if let Err(err) = interp.run(program) {
        panic!("program failed: {err}\noutput so far:\n{}", output.get_output());
    }
    let printed = output.get_output();
    (interp, printed)
}

/// Run `program`, which must fail, and return the session, error and output.
pub(crate) fn run_err(program: &[Stmt]) -> (Interpreter, EvalError, String) {
    let (mut interp, output) = session(&[]);
    match interp.run(program) {
        Ok(()) => panic!("program should fail; output:\n{}", output.get_output()),
        Err(err) => {
            let printed = output.get_output();
            (interp, err, printed)
        }
    }
}

/// Global `name` as explanations render it.
pub(crate) fn rendered_global(interp: &Interpreter, name: &str) -> String {
    let info = interp
        .global(name)
        .unwrap_or_else(|| panic!("no global named {name}"));
    interp.render(&info.value)
}

/// Distinct `#N` ids of explanation lines that contain `needle`.
pub(crate) fn ids_of_lines_containing(explanation: &str, needle: &str) -> Vec<u32> {
    let mut ids: Vec<u32> = explanation
        .lines()
        .filter(|line| line.contains(needle))
        .filter_map(|line| {
            let start = line.find("(#")? + 2;
            let end = start + line[start..].find(')')?;
            line[start..end].parse().ok()
        })
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}
