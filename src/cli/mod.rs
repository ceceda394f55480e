use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod export;
mod info;
mod validate;

/// wdq - WinDAQ recording inspector and exporter
#[derive(Parser)]
#[command(name = "wdq")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display header and channel information
    Info {
        /// Input WinDAQ file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export channels to CSV
    Export {
        /// Input WinDAQ file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output CSV path (defaults to the input path with a .csv extension)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Load export settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Channel numbers to export, 1-based (default: all)
        #[arg(short = 'c', long, value_delimiter = ',')]
        channels: Option<Vec<usize>>,

        /// Field delimiter
        #[arg(short = 'd', long)]
        delimiter: Option<char>,

        /// Omit the leading Time column
        #[arg(long)]
        no_time: bool,

        /// Fixed number of decimal places
        #[arg(short = 'p', long)]
        precision: Option<usize>,
    },

    /// Validate WinDAQ file integrity
    Validate {
        /// Input WinDAQ file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Info { file, json } => info::run(file, json),
        Commands::Export {
            input,
            output,
            config,
            channels,
            delimiter,
            no_time,
            precision,
        } => export::run(export::ExportArgs {
            input,
            output,
            config,
            channels,
            delimiter,
            no_time,
            precision,
        }),
        Commands::Validate { file } => validate::run(file),
    }
}
