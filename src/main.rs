//! # wdq
//!
//! Command-line tool for inspecting and exporting WinDAQ (.wdq) recordings.
//!
//! ## Usage
//!
//! ```bash
//! # Show header and channel information
//! wdq info run_042.wdq
//!
//! # Export every channel to CSV (run_042.csv)
//! wdq export run_042.wdq
//!
//! # Check file integrity
//! wdq validate run_042.wdq
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
