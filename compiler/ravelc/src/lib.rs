//! Ravel runner: runs programs, reports failures and answers "why" questions
//! about what a program computed.

pub mod debugger;
pub mod demos;
pub mod options;
pub mod report;

#[cfg(test)]
mod tests;

use std::io::{self, BufRead, Write};
use std::sync::Once;

use ravel_eval::{Interpreter, SharedInputHandler, SharedPrintHandler};
use ravel_ir::Stmt;

pub use debugger::{parse_command, Command, Debugger};
pub use demos::{Demo, DEMOS};
pub use options::{parse_run_options, OptionError, RunOptions, MAX_DEPTH_ENV};

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Only takes effect when `RUST_LOG` is set, e.g.
/// `RUST_LOG=ravel_eval=debug ravel demo counter`. Safe to call repeatedly.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .init();
        }
    });
}

/// Where a run prints and reads.
pub struct Console<R, W> {
    /// Program output.
    pub print: SharedPrintHandler,
    /// Answers to `Ask`.
    pub input: SharedInputHandler,
    /// Lines for the post-mortem prompt.
    pub prompt_input: R,
    /// Failure reports and the post-mortem prompt.
    pub out: W,
}

/// Run `program` and return the process exit status.
///
/// A failure is reported on `console.out`. Unless disabled by `options`,
/// the post-mortem prompt follows the run either way.
pub fn run_program<R: BufRead, W: Write>(
    program: &[Stmt],
    options: &RunOptions,
    console: &mut Console<R, W>,
) -> io::Result<i32> {
    let built = Interpreter::builder()
        .config(options.config.clone())
        .print_handler(console.print.clone())
        .input_handler(console.input.clone())
        .build();
    let mut interp = match built {
        Ok(interp) => interp,
        Err(err) => {
            writeln!(console.out, "error: {err}")?;
            return Ok(1);
        }
    };

    let status = match interp.run(program) {
        Ok(()) => 0,
        Err(err) if err.is_input_exhausted() => {
            tracing::debug!("input exhausted; stopping");
            return Ok(report::exit_code(&err));
        }
        Err(err) => {
            tracing::debug!(error = %err, "program failed");
            write!(console.out, "{}", report::failure_report(&interp, &err))?;
            report::exit_code(&err)
        }
    };

    if options.post_mortem {
        Debugger::new(&interp).run(&mut console.prompt_input, &mut console.out)?;
    }
    Ok(status)
}
