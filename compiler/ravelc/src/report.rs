//! Fatal error reporting.

use std::fmt::Write as _;

use ravel_eval::{EvalError, Interpreter};

/// Exit status for a run that ended with `err`.
pub fn exit_code(err: &EvalError) -> i32 {
    if err.is_input_exhausted() {
        0
    } else {
        1
    }
}

/// The failure report: the error, why the failing operation ran, and where
/// in the program it happened.
pub fn failure_report(interp: &Interpreter, err: &EvalError) -> String {
    let mut report = String::new();
    let _ = writeln!(report);
    let _ = writeln!(report, "Error summary:");
    let _ = writeln!(report, "{err}");

    if let Some(explanation) = interp.explain_failure(err) {
        let _ = writeln!(report);
        let _ = writeln!(report, "Error explanation:");
        let _ = writeln!(report, "{explanation}");
    }

    if let Some(backtrace) = err.backtrace.as_ref().filter(|trace| !trace.is_empty()) {
        let _ = writeln!(report);
        let _ = write!(report, "{backtrace}");
    }
    report
}
