//! Shared logic for the `bt` binary: argument parsing, tracing setup, and
//! the translate-and-print driver.

pub mod args;

use anyhow::Context;
use bt_common::ErrorKind;
use colored::Colorize;
use std::io::Read;

pub use args::CliArgs;

/// Runs the CLI end to end; returns the process exit code.
pub fn run(args: CliArgs) -> anyhow::Result<i32> {
    init_tracing(args.verbose);

    let expression = match args.expression {
        Some(expr) => expr,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading expression from stdin")?;
            buf
        }
    };

    match bt_emit::translate(args.target.into(), expression.trim()) {
        Ok(rendered) => {
            println!("{rendered}");
            Ok(0)
        }
        Err(err) => {
            eprintln!("{}", err.to_string().red());
            Ok(exit_code(err.kind))
        }
    }
}

fn exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::ArityMismatch => 2,
        ErrorKind::TypeError => 3,
        ErrorKind::ReferenceError => 4,
        ErrorKind::AttributeError => 5,
        ErrorKind::Generic => 1,
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
