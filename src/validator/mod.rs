//! # WinDAQ Validation Module
//!
//! Integrity checks for `.wdq` recordings, reported as a checklist instead of
//! stopping at the first problem the reader would hit.
//!
//! ## Validation Checklist
//!
//! 1. **Structure**: fixed header, channel table, sample region and
//!    annotation block all lie within the file and agree with each other
//! 2. **Metadata**: channel annotations, trailing bytes and acquisition
//!    timestamps
//! 3. **Channel data**: every channel decodes to the declared number of
//!    finite samples
//!
//! ## Usage
//!
//! ```rust,no_run
//! use windaq::validator::validate_wdq_file;
//! use std::path::Path;
//!
//! match validate_wdq_file(Path::new("run_042.wdq")) {
//!     Ok(report) => println!("{}", report),
//!     Err(e) => eprintln!("Validation failed: {}", e),
//! }
//! ```

use std::path::Path;

pub use report::{CheckStatus, ValidationCheck, ValidationReport};

mod data;
mod report;
mod structure;

/// Errors that stop validation before a report can be produced
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// I/O error reading the file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Main validation entry point
pub fn validate_wdq_file(path: &Path) -> Result<ValidationReport, ValidationError> {
    let mut report = ValidationReport::new(path.display().to_string());

    // 1. Structure and metadata
    let Some(file) = structure::check_structure(path, &mut report)? else {
        return Ok(report);
    };

    // 2. Channel data
    data::check_channels(&file, &mut report)?;

    Ok(report)
}
