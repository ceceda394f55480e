/// Errors that can occur while opening or decoding a WinDAQ file
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    /// I/O error from the underlying source, passed through unchanged
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The bytes do not follow the expected WinDAQ layout
    #[error("Invalid format: {0}")]
    InvalidFormat(#[from] FormatError),

    /// Channel index outside `0..channel_count`
    #[error("Channel index {index} out of range (file has {channel_count} channels)")]
    OutOfRange {
        /// Requested index
        index: usize,
        /// Number of channels in the file
        channel_count: usize,
    },
}

/// Structural violations of the WinDAQ byte layout
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormatError {
    /// Source is shorter than the header it declares
    #[error("truncated header: need {required} bytes, source has {actual}")]
    TruncatedHeader {
        /// Bytes needed to hold the header
        required: u64,
        /// Length of the source
        actual: u64,
    },

    /// A header or channel-table field holds an impossible value
    #[error("invalid header: {field}: {reason}")]
    InvalidHeader {
        /// Name of the offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// The sample region extends past the end of the source
    #[error("truncated sample data: region ends at byte {required}, source has {actual}")]
    TruncatedSampleData {
        /// End of the declared sample region
        required: u64,
        /// Length of the source
        actual: u64,
    },

    /// A trailing region extends past the end of the source
    #[error("{region} out of bounds: ends at byte {end}, source has {actual}")]
    RegionOutOfBounds {
        /// Which region
        region: &'static str,
        /// End of the declared region
        end: u64,
        /// Length of the source
        actual: u64,
    },
}

impl FormatError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        FormatError::InvalidHeader {
            field,
            reason: reason.into(),
        }
    }
}

impl ReaderError {
    /// Whether this error describes a malformed file rather than an I/O or caller problem
    pub fn is_format_error(&self) -> bool {
        matches!(self, ReaderError::InvalidFormat(_))
    }
}
