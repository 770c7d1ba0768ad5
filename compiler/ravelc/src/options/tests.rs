use pretty_assertions::assert_eq;

use super::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|arg| (*arg).to_string()).collect()
}

#[test]
fn defaults_without_flags() {
    let (options, positional) = parse_run_options(&args(&["counter"]), None).unwrap();
    assert_eq!(options, RunOptions::default());
    assert!(options.post_mortem);
    assert_eq!(positional, vec!["counter".to_string()]);
}

#[test]
fn flags_set_the_config() {
    let (options, positional) = parse_run_options(
        &args(&["--max-depth=50", "lists", "--explain-depth=4", "--no-post-mortem"]),
        None,
    )
    .unwrap();
    assert_eq!(options.config.max_call_depth, Some(50));
    assert_eq!(options.config.failure_explain_depth, 4);
    assert!(!options.post_mortem);
    assert_eq!(positional, vec!["lists".to_string()]);
}

#[test]
fn none_removes_the_depth_limit() {
    let (options, _) = parse_run_options(&args(&["--max-depth=none"]), None).unwrap();
    assert_eq!(options.config.max_call_depth, None);
}

#[test]
fn environment_is_a_fallback() {
    let (options, _) = parse_run_options(&args(&[]), Some("30")).unwrap();
    assert_eq!(options.config.max_call_depth, Some(30));

    let (options, _) = parse_run_options(&args(&["--max-depth=10"]), Some("30")).unwrap();
    assert_eq!(options.config.max_call_depth, Some(10));
}

#[test]
fn bad_values_are_rejected() {
    assert_eq!(
        parse_run_options(&args(&["--max-depth=0"]), None),
        Err(OptionError::InvalidValue {
            flag: "--max-depth",
            value: "0".to_string()
        })
    );
    assert_eq!(
        parse_run_options(&args(&[]), Some("lots")),
        Err(OptionError::InvalidValue {
            flag: MAX_DEPTH_ENV,
            value: "lots".to_string()
        })
    );
    assert_eq!(
        parse_run_options(&args(&["--verbose"]), None),
        Err(OptionError::Unknown("--verbose".to_string()))
    );
}
