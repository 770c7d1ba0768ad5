//! Ravel CLI

use std::io;

use ravelc::{demos, parse_run_options, run_program, Console, MAX_DEPTH_ENV};

fn main() {
    ravelc::init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "demo" => {
            let env_depth = std::env::var(MAX_DEPTH_ENV).ok();
            let (options, positional) = match parse_run_options(&args[2..], env_depth.as_deref())
            {
                Ok(parsed) => parsed,
                Err(err) => {
                    eprintln!("error: {err}");
                    std::process::exit(1);
                }
            };

            let Some(name) = positional.first() else {
                list_demos();
                return;
            };
            let Some(demo) = demos::find(name) else {
                eprintln!("error: unknown demo '{name}'");
                list_demos();
                std::process::exit(1);
            };

            tracing::debug!(demo = demo.name, "running demo");
            let mut console = Console {
                print: ravel_eval::stdout_handler(),
                input: ravel_eval::stdin_handler(),
                prompt_input: io::BufReader::new(io::stdin()),
                out: io::stdout(),
            };
            match run_program(&demo.program(), &options, &mut console) {
                Ok(status) => std::process::exit(status),
                Err(err) => {
                    eprintln!("error: {err}");
                    std::process::exit(1);
                }
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("error: unknown command '{other}'");
            print_usage();
            std::process::exit(1);
        }
    }
}

fn list_demos() {
    println!("Available demos:");
    for demo in demos::DEMOS {
        println!("  {:<12} {}", demo.name, demo.summary);
    }
}

fn print_usage() {
    println!("Ravel - an interpreter that can explain its results");
    println!();
    println!("Usage: ravel <command> [options]");
    println!();
    println!("Commands:");
    println!("  demo <name>   Run a built-in program (omit <name> to list them)");
    println!("  help          Show this message");
    println!();
    println!("Options:");
    println!("  --max-depth=<n>      Limit nested calls (or 'none'; env: {MAX_DEPTH_ENV})");
    println!("  --explain-depth=<n>  Depth of the explanation in failure reports");
    println!("  --no-post-mortem     Exit without the 'why' prompt");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=ravel_eval=debug) to trace evaluation.");
}
