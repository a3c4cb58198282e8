//! CLI tool for coursegrid - renders course JSON into a timetable JSON
//!
//! Usage:
//!   coursegrid_cli <courses.json>                       # Output JSON to stdout
//!   coursegrid_cli <courses.json> -o out.json           # Output JSON to file
//!   coursegrid_cli <courses.json> --selection sel.json  # Colour by selection file
//!   coursegrid_cli <courses.json> --grade master        # Filter by grade
//!   coursegrid_cli <courses.json> --config config.json  # Custom column names
//!
//! Set `RUST_LOG=debug` for cluster decisions; dropped data is logged at `warn`.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use coursegrid::render::{parse_selection, render_filtered};
use coursegrid::{CourseRecord, GradeFilter, RenderConfig};

const USAGE: &str = "Usage: coursegrid_cli <courses.json> [--selection FILE] \
                     [--grade all|master|N] [--config FILE] [-o output.json]";

struct Args {
    input: String,
    selection: Option<String>,
    grade: Option<String>,
    config: Option<String>,
    output: Option<String>,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut input = None;
    let mut selection = None;
    let mut grade = None;
    let mut config = None;
    let mut output = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        let slot = match arg.as_str() {
            "--selection" | "-s" => &mut selection,
            "--grade" | "-g" => &mut grade,
            "--config" | "-c" => &mut config,
            "-o" | "--output" => &mut output,
            flag if flag.starts_with('-') => return Err(format!("unknown option {flag}")),
            _ => {
                if input.is_some() {
                    return Err(format!("unexpected argument {arg}"));
                }
                input = Some(arg.clone());
                continue;
            }
        };
        match iter.next() {
            Some(value) => *slot = Some(value.clone()),
            None => return Err(format!("{arg} needs a value")),
        }
    }

    Ok(Args {
        input: input.ok_or("missing <courses.json>")?,
        selection,
        grade,
        config,
        output,
    })
}

fn read(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let raw: Vec<String> = env::args().collect();
    let args = match parse_args(&raw) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            std::process::exit(1);
        }
    };

    // Config
    let config = match &args.config {
        Some(path) => match RenderConfig::from_path(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => RenderConfig::default(),
    };

    // Course rows
    let rows: Vec<CourseRecord> = match serde_json::from_str(&read(&args.input)) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error parsing {}: {}", args.input, e);
            std::process::exit(1);
        }
    };

    // Selection map
    let selection_json = args.selection.as_deref().map(read);
    let selection = match parse_selection(selection_json.as_deref(), &config.selection_fields) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error parsing selection: {}", e);
            std::process::exit(1);
        }
    };

    let filter: GradeFilter = match args.grade.as_deref().unwrap_or("all").parse() {
        Ok(f) => f,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let table = render_filtered(&rows, &selection, &config, &filter);
    if table.skipped > 0 {
        eprintln!("Skipped {} occurrence(s); see warnings above", table.skipped);
    }

    // Serialize to JSON
    let json = match serde_json::to_string_pretty(&table) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    // Output
    match args.output {
        Some(path) => {
            if let Err(e) = fs::write(&path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
