//! `cparsec` — parses a single C expression or type-name and prints its
//! canonical, fully parenthesized form.
//!
//! Reads one file (default `./test/test.h`), runs `parse_expression` (or
//! `parse_type_name` with `--type-name`), and prints the result via the
//! pretty-printer on success. On a fatal parse it prints the first error
//! to stderr and exits non-zero.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cparsec_drv::error::Result;
use cparsec_drv::{render, Session};

/// Parses a C expression or type-name and prints its canonical form.
#[derive(Parser, Debug)]
#[command(name = "cparsec")]
#[command(author = "cparsec contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Parses a C expression or type-name and prints its canonical form")]
struct Cli {
    /// File to parse.
    #[arg(default_value = "./test/test.h")]
    path: PathBuf,

    /// Parse the file's contents as a type-name instead of an expression.
    #[arg(long)]
    type_name: bool,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true, env = "CPARSEC_VERBOSE")]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    tracing::debug!(path = %cli.path.display(), type_name = cli.type_name, "parsing");
    let session = Session::read(&cli.path)?;
    let result = if cli.type_name {
        session.parse_type_name()
    } else {
        session.parse_expression()
    };
    render(&result)
}

fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .map_err(|e| cparsec_drv::error::DriverError::Logging(e.to_string()))?;

    Ok(())
}
