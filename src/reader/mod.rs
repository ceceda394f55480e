//! # WinDAQ Reader Module
//!
//! Opens `.wdq` recordings and exposes their channels as calibrated series.
//!
//! ## Features
//!
//! - **Metadata first**: `open` reads only the header, the channel table and
//!   the annotation block; sample words stay on disk until requested
//! - **Random Access**: decode any single channel out of the interleaved frames
//! - **In-memory sources**: parse a buffer already held by the caller
//! - **Strict bounds**: truncated or inconsistent files fail with a
//!   [`FormatError`] naming the field, never with partial data
//!
//! ## Example
//!
//! ```rust,no_run
//! use windaq::reader::WdqFile;
//!
//! let file = WdqFile::open("run_042.wdq")?;
//! println!("{} channels at {:.1} Hz", file.channel_count(), file.sample_rate());
//!
//! for channel in file.channels() {
//!     let values = file.samples(channel.index)?;
//!     println!("{}: {} samples", channel.column_label(), values.len());
//! }
//! # Ok::<(), windaq::reader::ReaderError>(())
//! ```

mod config;
mod error;
mod open;
mod samples;
mod summary;

#[cfg(test)]
mod tests;

pub use config::ReaderConfig;
pub use error::{FormatError, ReaderError};
pub use summary::FileSummary;

use config::ReaderSource;

use crate::channel::ChannelDescriptor;
use crate::header::FileHeader;

/// A parsed WinDAQ recording
///
/// Header and channel descriptors are immutable once `open` returns; sample
/// data is decoded afresh on every call.
///
/// A file opened from a path keeps its handle, so renaming or replacing the
/// path afterwards does not change what is read. Rewriting the same file in
/// place does; truncation is reported as [`FormatError::TruncatedSampleData`].
pub struct WdqFile {
    source: ReaderSource,
    header: FileHeader,
    channels: Vec<ChannelDescriptor>,
}

impl WdqFile {
    /// Parsed fixed header
    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    /// Number of channels in the file
    pub fn channel_count(&self) -> usize {
        self.header.channel_count
    }

    /// All channel descriptors in index order
    pub fn channels(&self) -> &[ChannelDescriptor] {
        &self.channels
    }

    /// Descriptor of one channel
    pub fn channel(&self, index: usize) -> Result<&ChannelDescriptor, ReaderError> {
        self.channels.get(index).ok_or(ReaderError::OutOfRange {
            index,
            channel_count: self.channels.len(),
        })
    }

    /// Samples stored for every channel
    pub fn samples_per_channel(&self) -> usize {
        self.header.samples_per_channel as usize
    }

    /// Seconds between two samples of one channel
    pub fn sample_interval(&self) -> f64 {
        self.header.sample_interval
    }

    /// Nominal per-channel sample rate in Hz
    pub fn sample_rate(&self) -> f64 {
        self.header.sample_rate()
    }

    /// Recording length in seconds
    pub fn duration(&self) -> f64 {
        self.header.samples_per_channel as f64 * self.header.sample_interval
    }

    /// Time axis in seconds, one entry per sample, starting at zero
    pub fn time(&self) -> Vec<f64> {
        let interval = self.header.sample_interval;
        (0..self.samples_per_channel())
            .map(|i| i as f64 * interval)
            .collect()
    }
}

impl std::fmt::Debug for WdqFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = match &self.source {
            ReaderSource::File { path, .. } => path.display().to_string(),
            ReaderSource::Memory(bytes) => format!("<{} bytes in memory>", bytes.len()),
        };
        f.debug_struct("WdqFile")
            .field("source", &source)
            .field("header", &self.header)
            .field("channels", &self.channels)
            .finish()
    }
}
