//! TOML configuration file support for repeated exports.
//!
//! Instead of passing the same flags for every file, settings can live in a
//! config file:
//!
//! ```toml
//! # wdq.toml
//! [export]
//! delimiter = ";"
//! include_time = true
//! channels = [1, 3]
//! precision = 4
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

use windaq::export::ExportConfig;

/// Root configuration structure for wdq.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Export-specific settings.
    #[serde(default)]
    pub export: ExportSection,
}

/// Configuration for the export command.
#[derive(Debug, Default, Deserialize)]
pub struct ExportSection {
    /// Single ASCII field delimiter.
    pub delimiter: Option<char>,

    /// Emit the leading Time column.
    pub include_time: Option<bool>,

    /// 1-based channel numbers to export.
    pub channels: Option<Vec<usize>>,

    /// Fixed number of decimal places.
    pub precision: Option<usize>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

impl ExportSection {
    /// Overlay the settings present in this section onto `config`.
    pub fn apply(&self, config: &mut ExportConfig) -> Result<()> {
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter_byte(delimiter)?;
        }
        if let Some(include_time) = self.include_time {
            config.include_time = include_time;
        }
        if let Some(channels) = &self.channels {
            config.channels = Some(channel_indices(channels)?);
        }
        if let Some(precision) = self.precision {
            config.precision = Some(precision);
        }
        Ok(())
    }
}

/// Convert a delimiter character to the single byte the CSV writer needs.
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got {:?}", delimiter);
    }
    Ok(delimiter as u8)
}

/// Convert 1-based channel numbers to 0-based indices.
pub fn channel_indices(numbers: &[usize]) -> Result<Vec<usize>> {
    numbers
        .iter()
        .map(|&n| match n {
            0 => bail!("Channel numbers start at 1"),
            n => Ok(n - 1),
        })
        .collect()
}
