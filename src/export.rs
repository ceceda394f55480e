//! CSV export of decoded channels
//!
//! Writes one row per sample with an optional leading `Time` column and one
//! column per selected channel, labelled `name (unit)`.
//!
//! ```rust,no_run
//! use windaq::export::{export_csv_file, ExportConfig};
//! use windaq::reader::WdqFile;
//!
//! let file = WdqFile::open("run_042.wdq")?;
//! let stats = export_csv_file(&file, "run_042.csv", &ExportConfig::default())?;
//! println!("{} rows written", stats.rows_written);
//! # Ok::<(), windaq::export::ExportError>(())
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use crate::reader::{ReaderError, WdqFile};

/// Errors that can occur during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Error decoding the source file
    #[error("Reader error: {0}")]
    ReaderError(#[from] ReaderError),

    /// Error from the CSV writer
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// I/O error creating or flushing the output
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Options for CSV export
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Field delimiter byte
    pub delimiter: u8,
    /// Emit a leading `Time` column in seconds
    pub include_time: bool,
    /// 0-based channel indices to export, all channels when `None`
    pub channels: Option<Vec<usize>>,
    /// Fixed number of decimal places, shortest round-trip form when `None`
    pub precision: Option<usize>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            include_time: true,
            channels: None,
            precision: None,
        }
    }
}

/// Statistics from an export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportStats {
    /// Data rows written (excluding the header row)
    pub rows_written: usize,
    /// Columns per row
    pub columns: usize,
}

/// Write the selected channels of `file` as CSV to `writer`
pub fn write_csv<W: Write>(
    file: &WdqFile,
    writer: W,
    config: &ExportConfig,
) -> Result<ExportStats, ExportError> {
    let selection: Vec<usize> = match &config.channels {
        Some(channels) => channels.clone(),
        None => (0..file.channel_count()).collect(),
    };

    // Resolve every channel before writing so a bad selection leaves no partial output
    let mut headers = Vec::with_capacity(selection.len() + 1);
    if config.include_time {
        headers.push("Time".to_string());
    }
    for &index in &selection {
        headers.push(file.channel(index)?.column_label());
    }

    let columns: Vec<Vec<f64>> = selection
        .iter()
        .map(|&index| file.samples(index))
        .collect::<Result<_, _>>()?;
    let time = if config.include_time {
        file.time()
    } else {
        Vec::new()
    };

    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .from_writer(writer);
    csv_writer.write_record(&headers)?;

    let render = |value: f64| match config.precision {
        Some(precision) => format!("{:.*}", precision, value),
        None => value.to_string(),
    };

    let rows = file.samples_per_channel();
    let mut record = Vec::with_capacity(headers.len());
    for row in 0..rows {
        record.clear();
        if config.include_time {
            record.push(render(time[row]));
        }
        record.extend(columns.iter().map(|column| render(column[row])));
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush()?;

    Ok(ExportStats {
        rows_written: rows,
        columns: headers.len(),
    })
}

/// Write the selected channels of `file` as CSV to a new file at `path`
pub fn export_csv_file<P: AsRef<Path>>(
    file: &WdqFile,
    path: P,
    config: &ExportConfig,
) -> Result<ExportStats, ExportError> {
    let path = path.as_ref();
    let output = BufWriter::new(File::create(path)?);
    let stats = write_csv(file, output, config)?;
    info!(
        "Wrote {} rows x {} columns to {}",
        stats.rows_written,
        stats.columns,
        path.display()
    );
    Ok(stats)
}
