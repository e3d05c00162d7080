//! Jot command-line tool for parsing, checking, and rendering jot
//! outline documents.
//!
//! Usage: jot [OPTIONS] [FILE]
//!
//! Options:
//!   -t, --to <FORMAT>    Output format (jot, json, tree) [default: jot]
//!   -o, --output <FILE>  Write output to specified file
//!   --check              Check if the document is valid (exit 0 if valid,
//!                        1 if invalid)
//!   --single-break       Parse with the single-break grammar variant
//!                        (no paragraph breaks)
//!   -h, --help           Print help
//!   -V, --version        Print version

use libjot::{parse_with_options, print, ParseOptions};
use std::fs;
use std::io::{self, Read, Write};
use std::process;

mod render;

/// Check whether a string is a recognized format name for -t.
fn is_format_name(s: &str) -> bool {
    matches!(s, "jot" | "json" | "tree")
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut to_format: Option<&str> = None;
    let mut output_file: Option<&str> = None;
    let mut check_only = false;
    let mut single_break = false;
    let mut input_path: Option<&str> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-V" | "--version" => {
                println!("jot {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            "-t" | "--to" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: -t requires a format argument");
                    process::exit(1);
                }
                if !is_format_name(&args[i]) {
                    eprintln!("Error: Unknown format: {}", args[i]);
                    process::exit(1);
                }
                to_format = Some(&args[i]);
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --output requires an argument");
                    process::exit(1);
                }
                output_file = Some(&args[i]);
            }
            "--check" => {
                check_only = true;
            }
            "--single-break" => {
                single_break = true;
            }
            "-" => {
                // Explicit stdin; input_path stays None.
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                process::exit(1);
            }
            arg => {
                if input_path.is_some() {
                    eprintln!("Error: Multiple input files given");
                    process::exit(1);
                }
                input_path = Some(arg);
            }
        }
        i += 1;
    }

    let source = match input_path {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error: Failed to read {}: {}", path, e);
                process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error: Failed to read stdin: {}", e);
                process::exit(1);
            }
            buffer
        }
    };

    let options = ParseOptions {
        paragraph_breaks: !single_break,
    };
    let document = match parse_with_options(&source, input_path, &options) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if check_only {
        return;
    }

    let rendered = match to_format.unwrap_or("jot") {
        "json" => match serde_json::to_string_pretty(&render::to_json(&document)) {
            Ok(json) => json + "\n",
            Err(e) => {
                eprintln!("Error: Failed to render JSON: {}", e);
                process::exit(1);
            }
        },
        "tree" => render::to_tree(&document),
        _ => print(&document),
    };

    match output_file {
        Some(path) => {
            if let Err(e) = fs::write(path, rendered) {
                eprintln!("Error: Failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
        None => {
            if let Err(e) = io::stdout().write_all(rendered.as_bytes()) {
                eprintln!("Error: Failed to write output: {}", e);
                process::exit(1);
            }
        }
    }
}

fn print_help() {
    println!("Usage: jot [OPTIONS] [FILE]");
    println!();
    println!("Parse, check, and render jot outline documents. Reads from");
    println!("FILE, or from stdin when FILE is omitted or \"-\".");
    println!();
    println!("Options:");
    println!("  -t, --to <FORMAT>    Output format (jot, json, tree) [default: jot]");
    println!("  -o, --output <FILE>  Write output to specified file");
    println!("  --check              Check if the document is valid (exit 0 if");
    println!("                       valid, 1 if invalid)");
    println!("  --single-break       Parse with the single-break grammar variant");
    println!("                       (no paragraph breaks)");
    println!("  -h, --help           Print help");
    println!("  -V, --version        Print version");
}
