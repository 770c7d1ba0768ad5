//! Command-line options shared by the `ravel` subcommands.

use ravel_eval::EvalConfig;

/// Environment fallback for `--max-depth`.
pub const MAX_DEPTH_ENV: &str = "RAVEL_MAX_DEPTH";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub config: EvalConfig,
    /// Offer the `why` prompt after the program ends or fails.
    pub post_mortem: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config: EvalConfig::default(),
            post_mortem: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OptionError {
    #[error("invalid value '{value}' for {flag}")]
    InvalidValue { flag: &'static str, value: String },
    #[error("unknown option '{0}'")]
    Unknown(String),
}

/// Split `args` into run options and positional arguments.
///
/// `env_max_depth` is the value of [`MAX_DEPTH_ENV`]; an explicit
/// `--max-depth` wins over it.
pub fn parse_run_options(
    args: &[String],
    env_max_depth: Option<&str>,
) -> Result<(RunOptions, Vec<String>), OptionError> {
    let mut options = RunOptions::default();
    if let Some(value) = env_max_depth {
        options.config.max_call_depth = parse_max_depth(MAX_DEPTH_ENV, value)?;
    }

    let mut positional = Vec::new();
    for arg in args {
        if let Some(value) = arg.strip_prefix("--max-depth=") {
            options.config.max_call_depth = parse_max_depth("--max-depth", value)?;
        } else if let Some(value) = arg.strip_prefix("--explain-depth=") {
            options.config.failure_explain_depth =
                value.parse().map_err(|_| OptionError::InvalidValue {
                    flag: "--explain-depth",
                    value: value.to_string(),
                })?;
        } else if arg == "--no-post-mortem" {
            options.post_mortem = false;
        } else if arg.starts_with('-') {
            return Err(OptionError::Unknown(arg.clone()));
        } else {
            positional.push(arg.clone());
        }
    }
    Ok((options, positional))
}

/// A frame count, or `none` for no limit.
fn parse_max_depth(flag: &'static str, value: &str) -> Result<Option<usize>, OptionError> {
    if value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    match value.parse::<usize>() {
        Ok(depth) if depth > 0 => Ok(Some(depth)),
        _ => Err(OptionError::InvalidValue {
            flag,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests;
