// Command-line interface for polymark
//
// Reads one markup string per line from stdin, dispatches it against a
// recording backend and prints the resulting call trace.
//
// Usage:
//  polymark [--config <file>] [--log <file>] [--log-level <level>]
//
// Example:
//  echo '%{F#f00}red%{F-} %{A1:reboot:}off%{A}' | polymark

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::LevelFilter;
use render::log_init::init_logger;
use render::testing::Recorder;
use render::{CycleSummary, Dispatch, Loader};

#[derive(Debug, Parser)]
#[command(name = "polymark", version, about = "Render status bar markup to a call trace")]
struct Cli {
    /// TOML file with bar settings, layered over the built-in defaults
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write log records to this file
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Most verbose level written to the log file
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: LevelFilter,
}

fn main() {
    let cli = Cli::parse();

    if let Some(path) = &cli.log {
        if let Err(err) = init_logger(path, cli.log_level) {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    }

    let mut loader = Loader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    let settings = match loader.build() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Error loading settings: {err}");
            process::exit(1);
        }
    };

    let recorder = Recorder::new();
    let mut renderer = recorder.renderer();
    let mut dispatch = Dispatch::new(recorder.emitter());

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                eprintln!("Error reading input: {err}");
                process::exit(1);
            }
        };

        recorder.clear();
        match dispatch.parse(&settings, &mut renderer, &line) {
            Ok(summary) => {
                let trace = recorder.trace();
                if !trace.is_empty() {
                    println!("{trace}");
                }
                if !summary.is_clean() {
                    eprintln!("{}", describe(&summary));
                }
            }
            Err(err) => {
                eprintln!("Error: {err}");
                process::exit(1);
            }
        }
    }
}

fn describe(summary: &CycleSummary) -> String {
    let unclosed: Vec<_> = summary.unclosed.iter().map(ToString::to_string).collect();
    format!(
        "{} parse error(s), {} unmatched close(s), unclosed: [{}]",
        summary.parse_errors,
        summary.unmatched_closes,
        unclosed.join(", ")
    )
}
