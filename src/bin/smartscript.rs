//! Reference driver: parses a SmartScript file, prints its canonical form and
//! checks that re-parsing the canonical form reproduces it.
//!
//! Exit codes: 1 bad arguments, 2 unreadable file, 3 parse failure,
//! 4 empty document body.
use clap::Parser;
use smartscript::{parse_with_options, render, ParseOptions, DEFAULT_MAX_DEPTH};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "smartscript")]
#[command(about = "Parses a SmartScript document and prints its canonical form")]
struct Args {
    /// Path to the document
    file: PathBuf,

    /// Print the parsed tree as JSON instead of the canonical text
    #[arg(long)]
    ast: bool,

    /// Maximum number of nested FOR loops
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let body = match fs::read_to_string(&args.file) {
        Ok(body) => body,
        Err(e) => {
            eprintln!("Unable to read {}: {}", args.file.display(), e);
            return ExitCode::from(2);
        }
    };

    let options = ParseOptions::new().with_max_depth(args.max_depth);
    let document = match parse_with_options(&body, &options) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Unable to parse document!");
            eprintln!("{}", e);
            return ExitCode::from(3);
        }
    };

    if args.ast {
        return match serde_json::to_string_pretty(&document) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Unable to encode the tree: {}", e);
                ExitCode::from(3)
            }
        };
    }

    let canonical = render(&document);
    if canonical.is_empty() {
        return ExitCode::from(4);
    }
    println!("{}", canonical);

    let equals = match parse_with_options(&canonical, &options) {
        Ok(reparsed) => render(&reparsed) == canonical,
        Err(e) => {
            eprintln!("{}", e);
            false
        }
    };
    println!();
    println!("Equals: {}", equals);

    ExitCode::SUCCESS
}
