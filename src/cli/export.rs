use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use windaq::export::{export_csv_file, ExportConfig};
use windaq::reader::WdqFile;

use super::config::{channel_indices, delimiter_byte, Config};

pub struct ExportArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub channels: Option<Vec<usize>>,
    pub delimiter: Option<char>,
    pub no_time: bool,
    pub precision: Option<usize>,
}

/// Export a WinDAQ file to CSV
pub fn run(args: ExportArgs) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("csv"));

    // Config file first, explicit flags override it
    let mut export = ExportConfig::default();
    if let Some(path) = &args.config {
        Config::from_file(path)?.export.apply(&mut export)?;
    }
    if let Some(delimiter) = args.delimiter {
        export.delimiter = delimiter_byte(delimiter)?;
    }
    if let Some(channels) = &args.channels {
        export.channels = Some(channel_indices(channels)?);
    }
    if args.no_time {
        export.include_time = false;
    }
    if args.precision.is_some() {
        export.precision = args.precision;
    }

    info!("WinDAQ Export - wdq to CSV");
    info!("Input:  {}", args.input.display());
    info!("Output: {}", output.display());

    let file = WdqFile::open(&args.input)
        .with_context(|| format!("Failed to open WinDAQ file: {}", args.input.display()))?;
    let stats = export_csv_file(&file, &output, &export).context("Export failed")?;

    println!(
        "Exported {} channels with {} samples each to {}",
        stats.columns - usize::from(export.include_time),
        stats.rows_written,
        output.display()
    );
    println!("Time step: {} seconds", file.sample_interval());

    Ok(())
}
