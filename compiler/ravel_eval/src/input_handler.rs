//! Where `Ask` reads lines from.

use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::Arc;

use parking_lot::Mutex;

pub enum InputHandlerImpl {
    /// Blocking reads from the process's standard input.
    Stdin,
    /// Pre-recorded answers, for tests and demos.
    Scripted(Mutex<VecDeque<String>>),
}

impl InputHandlerImpl {
    /// The next line without its terminator, or `None` at end of input.
    pub fn read_line(&self) -> Option<String> {
        match self {
            Self::Stdin => {
                let mut line = String::new();
                match std::io::stdin().lock().read_line(&mut line) {
                    Ok(0) => None,
                    Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
                    Err(err) => {
                        tracing::warn!(%err, "failed to read standard input");
                        None
                    }
                }
            }
            Self::Scripted(lines) => lines.lock().pop_front(),
        }
    }

    /// Lines a scripted handler has not handed out yet.
    pub fn remaining(&self) -> usize {
        match self {
            Self::Stdin => 0,
            Self::Scripted(lines) => lines.lock().len(),
        }
    }
}

pub type SharedInputHandler = Arc<InputHandlerImpl>;

pub fn stdin_handler() -> SharedInputHandler {
    Arc::new(InputHandlerImpl::Stdin)
}

pub fn scripted_handler<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> SharedInputHandler {
    Arc::new(InputHandlerImpl::Scripted(Mutex::new(
        lines.into_iter().map(Into::into).collect(),
    )))
}
