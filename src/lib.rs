//! # windaq - WinDAQ Recording Reader
//!
//! `windaq` decodes `.wdq` files written by DATAQ WinDAQ acquisition software
//! into calibrated per-channel series.
//!
//! ## Key Features
//!
//! - **Metadata without samples**: opening a file reads the header, the
//!   channel table and the annotation block only.
//!
//! - **Random access by channel**: samples are stored as interleaved frames;
//!   any single channel can be decoded without touching the others' values.
//!
//! - **Both sample codings**: legacy 14-bit and high-resolution 16-bit files,
//!   resolved once from the header flags.
//!
//! - **Strict layout checks**: truncated or inconsistent files fail with a
//!   [`reader::FormatError`] naming the offending field.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use windaq::reader::WdqFile;
//!
//! let file = WdqFile::open("torque_test.wdq")?;
//!
//! let time = file.time();
//! for channel in file.channels() {
//!     let values = file.samples(channel.index)?;
//!     println!(
//!         "{}: {} samples over {:.1} s",
//!         channel.column_label(),
//!         values.len(),
//!         time.last().copied().unwrap_or(0.0)
//!     );
//! }
//! # Ok::<(), windaq::reader::ReaderError>(())
//! ```
//!
//! ## File Layout
//!
//! | Region | Location | Contents |
//! |--------|----------|----------|
//! | Fixed header | bytes 0..110 | channel count, region sizes, sample interval, flags |
//! | Channel table | header byte 4 | per-channel calibration, units, hardware channel |
//! | Samples | header size | frames of one little-endian `i16` per channel |
//! | Trailer | after samples | event markers (skipped) |
//! | Annotations | after trailer | NUL-separated channel labels |
//!
//! ## Architecture
//!
//! - [`header`]: fixed header layout and sample coding
//! - [`channel`]: channel descriptors, calibration and text-field cleanup
//! - [`reader`]: opening files and decoding channels
//! - [`export`]: CSV export
//! - [`validator`]: checklist-style integrity report

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod channel;
pub mod export;
pub mod header;
pub mod reader;
pub mod validator;

#[cfg(test)]
mod fixtures;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::channel::{Calibration, ChannelDescriptor, DisplayScaling};
    pub use crate::export::{export_csv_file, write_csv, ExportConfig, ExportError, ExportStats};
    pub use crate::header::{FileHeader, SampleCoding};
    pub use crate::reader::{FileSummary, FormatError, ReaderConfig, ReaderError, WdqFile};
    pub use crate::validator::{validate_wdq_file, ValidationReport};
}
