use std::io::Cursor;

use ravel_eval::{buffer_handler, scripted_handler};
use ravel_ir::builder::*;
use ravel_ir::Stmt;

use super::*;

fn run_with(program: &[Stmt], args: &[&str], prompt: &str) -> (i32, String, String) {
    let args: Vec<String> = args.iter().map(|arg| (*arg).to_string()).collect();
    let (options, _) = parse_run_options(&args, None).expect("valid options");
    let output = buffer_handler();
    let mut console = Console {
        print: output.clone(),
        input: scripted_handler(Vec::<String>::new()),
        prompt_input: Cursor::new(prompt.to_string()),
        out: Vec::new(),
    };
    let status = run_program(program, &options, &mut console).expect("writes to buffers");
    let report = String::from_utf8(console.out).expect("utf-8 report");
    (status, output.get_output(), report)
}

#[test]
fn successful_run_opens_the_prompt() {
    let (status, printed, report) = run_with(&[print(string("hi"))], &[], "quit\n");
    assert_eq!(status, 0);
    assert_eq!(printed, "hi\n");
    assert!(report.contains(debugger::PROMPT), "report:\n{report}");
    assert!(!report.contains("Error summary:"), "report:\n{report}");
}

#[test]
fn failure_is_reported_with_status_one() {
    let (status, _, report) = run_with(&[print(get("missing"))], &[], "quit\n");
    assert_eq!(status, 1);
    assert!(report.contains("Error summary:"), "report:\n{report}");
}

#[test]
fn no_post_mortem_skips_the_prompt() {
    let (status, _, report) = run_with(&[raise("stop")], &["--no-post-mortem"], "");
    assert_eq!(status, 1);
    assert!(!report.contains(debugger::PROMPT), "report:\n{report}");
}

#[test]
fn running_out_of_input_ends_quietly() {
    let (status, _, report) = run_with(&[var("answer", ask(None))], &[], "quit\n");
    assert_eq!(status, 0);
    assert!(report.is_empty(), "report:\n{report}");
}
