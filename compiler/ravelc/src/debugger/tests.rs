use std::io::Cursor;

use pretty_assertions::assert_eq;
use ravel_eval::{silent_handler, Interpreter};
use ravel_ir::builder::*;

use super::*;

fn session_with_value() -> (Interpreter, u32) {
    let mut interp = Interpreter::builder()
        .print_handler(silent_handler())
        .build()
        .expect("session should build");
    interp
        .run(&[var("x", string("hello"))])
        .expect("program runs");
    let id = interp.global("x").expect("x is declared").justification;
    let raw = interp
        .why()
        .get(id)
        .expect("known")
        .id_text()
        .trim_start_matches("- (#")
        .trim_end_matches(") ")
        .parse()
        .expect("numeric id");
    (interp, raw)
}

mod parse_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn why_and_its_short_form() {
        assert_eq!(
            parse_command("why 12"),
            Command::Why {
                id: 12,
                depth: DEFAULT_WHY_DEPTH
            }
        );
        assert_eq!(parse_command("y #12 3"), Command::Why { id: 12, depth: 3 });
    }

    #[test]
    fn malformed_why_is_invalid() {
        assert_eq!(parse_command("why"), Command::Invalid("why".to_string()));
        assert_eq!(
            parse_command("y twelve"),
            Command::Invalid("y twelve".to_string())
        );
    }

    #[test]
    fn other_commands() {
        assert_eq!(parse_command("  \n"), Command::Empty);
        assert_eq!(parse_command("help"), Command::Help(None));
        assert_eq!(
            parse_command("help why"),
            Command::Help(Some("why".to_string()))
        );
        assert_eq!(parse_command("quit\n"), Command::Quit);
        assert_eq!(
            parse_command("solve"),
            Command::Invalid("solve".to_string())
        );
    }
}

mod respond_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn why_explains_one_level_by_default() {
        let (interp, raw) = session_with_value();
        let debugger = Debugger::new(&interp);
        let answer = debugger
            .respond(&parse_command(&format!("y {raw}")))
            .expect("why keeps the session open");
        let first = answer.lines().next().expect("at least one line");
        assert!(first.starts_with(&format!("- (#{raw}) ")), "answer:\n{answer}");
        assert!(first.ends_with("x = hello because"), "answer:\n{answer}");
    }

    #[test]
    fn unknown_id_is_reported() {
        let (interp, _) = session_with_value();
        let answer = Debugger::new(&interp)
            .respond(&Command::Why {
                id: u32::MAX,
                depth: 1,
            })
            .expect("session stays open");
        assert!(
            answer.starts_with(&format!("no justification with id {}", u32::MAX)),
            "answer: {answer}"
        );
    }

    #[test]
    fn quit_ends_the_session() {
        let (interp, _) = session_with_value();
        assert_eq!(Debugger::new(&interp).respond(&Command::Quit), None);
    }

    #[test]
    fn help_for_an_unknown_topic_lists_the_commands() {
        let (interp, _) = session_with_value();
        let answer = Debugger::new(&interp)
            .respond(&Command::Help(Some("solve".to_string())))
            .expect("session stays open");
        assert!(answer.starts_with("Sorry; I don't recognize 'solve'."));
        assert!(answer.contains("quit"));
    }
}

#[test]
fn run_answers_until_quit() {
    let (interp, raw) = session_with_value();
    let input = Cursor::new(format!("why {raw}\nquit\nwhy {raw}\n"));
    let mut output = Vec::new();
    Debugger::new(&interp)
        .run(input, &mut output)
        .expect("writes to a buffer");
    let text = String::from_utf8(output).expect("utf-8 output");
    assert_eq!(text.matches("x = hello because").count(), 1, "output:\n{text}");
    assert_eq!(text.matches(PROMPT).count(), 2, "output:\n{text}");
}

#[test]
fn run_stops_at_end_of_input() {
    let (interp, _) = session_with_value();
    let mut output = Vec::new();
    Debugger::new(&interp)
        .run(Cursor::new(""), &mut output)
        .expect("writes to a buffer");
    let text = String::from_utf8(output).expect("utf-8 output");
    assert!(text.ends_with(&format!("{PROMPT}\n")), "output:\n{text}");
}
