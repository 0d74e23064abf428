//! # reqscope command-line entry point
//!
//! ```bash
//! reqscope analyze --input data/requests.csv --charts-dir charts/
//! reqscope config --config reqscope.json
//! ```
//!
//! Diagnostics are logged to stderr (`RUST_LOG=debug` for detail); the
//! statistics tables go to stdout.

#![warn(clippy::all, rust_2018_idioms)]

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    reqscope::logging::init(cli.log_file)?;

    cli::run_command(cli.command)
}
