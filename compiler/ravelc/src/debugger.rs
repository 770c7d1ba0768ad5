//! Interactive prompt for asking why a statement holds.
//!
//! Ids come from `PrintWithId` output or from an explanation. The prompt
//! only reads the justification graph, so it works the same after a clean
//! run and after a fatal error.

use std::io::{self, BufRead, Write};

use ravel_eval::Interpreter;

/// Default depth of a `why` answer: the statement and its direct supporters.
pub const DEFAULT_WHY_DEPTH: usize = 1;

pub(crate) const PROMPT: &str = "why> ";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Why { id: u32, depth: usize },
    Help(Option<String>),
    Quit,
    Empty,
    Invalid(String),
}

pub fn parse_command(line: &str) -> Command {
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return Command::Empty;
    };
    match keyword {
        "why" | "y" => {
            let id = words.next().map(|word| word.trim_start_matches('#').parse::<u32>());
            let depth = words.next().map(str::parse::<usize>);
            match (id, depth) {
                (Some(Ok(id)), None) => Command::Why {
                    id,
                    depth: DEFAULT_WHY_DEPTH,
                },
                (Some(Ok(id)), Some(Ok(depth))) => Command::Why { id, depth },
                _ => Command::Invalid(line.trim().to_string()),
            }
        }
        "help" => Command::Help(words.next().map(str::to_string)),
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Invalid(line.trim().to_string()),
    }
}

pub struct Debugger<'a> {
    interp: &'a Interpreter,
}

impl<'a> Debugger<'a> {
    pub fn new(interp: &'a Interpreter) -> Self {
        Self { interp }
    }

    /// Text answering `command`; `None` ends the session.
    pub fn respond(&self, command: &Command) -> Option<String> {
        match command {
            Command::Why { id, depth } => Some(self.why(*id, *depth)),
            Command::Help(topic) => Some(help(topic.as_deref())),
            Command::Quit => None,
            Command::Empty => Some(String::new()),
            Command::Invalid(text) => Some(format!(
                "Sorry; I don't understand '{text}'. Type 'help' for help."
            )),
        }
    }

    fn why(&self, id: u32, depth: usize) -> String {
        let registry = self.interp.why();
        match registry.lookup(id) {
            Ok(justification) => registry
                .explain_recursive(justification.id(), Some(depth))
                .unwrap_or_else(|err| err.to_string()),
            Err(err) => format!("{err}; known ids are 0 to {}", registry.len().saturating_sub(1)),
        }
    }

    /// Answer commands from `input` until `quit` or end of input.
    pub fn run(&self, mut input: impl BufRead, output: &mut impl Write) -> io::Result<()> {
        writeln!(output)?;
        writeln!(
            output,
            "Type 'why <id>' to see how statement <id> was deduced, 'help' for help or 'quit' to leave."
        )?;
        let mut line = String::new();
        loop {
            write!(output, "{PROMPT}")?;
            output.flush()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                return Ok(());
            }
            let command = parse_command(&line);
            tracing::debug!(?command, "post-mortem command");
            let Some(answer) = self.respond(&command) else {
                return Ok(());
            };
            if !answer.is_empty() {
                writeln!(output, "{answer}")?;
            }
        }
    }
}

fn help(topic: Option<&str>) -> String {
    match topic {
        Some("why" | "y") => "\
why <id>          - list the statements that directly support statement <id>
why <id> <depth>  - follow supporters <depth> levels deep

Statements print as '- (#<id>) [line <n>]: <text>'; <n> is where the
statement was made in the program."
            .to_string(),
        Some("quit") => "quit - leave the prompt".to_string(),
        Some("help") => "help [keyword] - list the commands, or explain one".to_string(),
        Some(other) => format!("Sorry; I don't recognize '{other}'.\n{}", help(None)),
        None => "\
why  <id> [depth] - ask how statement number <id> was deduced (also 'y')
help [keyword]    - show this list, or usage of <keyword>
quit              - leave the prompt"
            .to_string(),
    }
}

#[cfg(test)]
mod tests;
