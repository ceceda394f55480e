//! Fixed-layout WinDAQ file header
//!
//! Every `.wdq` recording starts with a 110-byte block of little-endian fields
//! describing where the per-channel info table, the interleaved sample region,
//! the event trailer and the user-annotation block live in the file.
//!
//! ```text
//! +--------------+---------------+------------------+---------+-------------+
//! | fixed header | channel table | samples (frames) | trailer | annotations |
//! +--------------+---------------+------------------+---------+-------------+
//! 0              byte 4          header size        ...       ...
//! ```

use std::io::{self, Cursor};

use byteorder::{LittleEndian, ReadBytesExt};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::reader::FormatError;

/// Number of bytes that must be present before any field can be decoded
pub const FIXED_HEADER_LEN: usize = 110;

/// Smallest channel info entry that still holds every field the decoder reads
pub const CHANNEL_ENTRY_MIN_LEN: usize = 33;

/// Width in bytes of one stored sample word
pub const ELEMENT_SIZE: usize = 2;

/// Byte offsets of the fixed header fields
pub mod offsets {
    /// `u8`, channel count in the low 5 bits
    pub const CHANNEL_COUNT: usize = 0;
    /// `u8`, byte offset of the channel info table
    pub const CHANNEL_TABLE_OFFSET: usize = 4;
    /// `u8`, size of one channel info entry
    pub const CHANNEL_ENTRY_SIZE: usize = 5;
    /// `u16`, total header size, which is where samples begin
    pub const HEADER_SIZE: usize = 6;
    /// `u32`, length of the sample region
    pub const DATA_BYTES: usize = 8;
    /// `u32`, length of the event trailer
    pub const TRAILER_BYTES: usize = 12;
    /// `u16`, length of the annotation block
    pub const ANNOTATION_BYTES: usize = 16;
    /// `f64`, seconds between samples of one channel
    pub const SAMPLE_INTERVAL: usize = 28;
    /// `u32`, Unix time the file was opened
    pub const CREATED: usize = 36;
    /// `u32`, Unix time the file was last written
    pub const WRITTEN: usize = 40;
    /// `u16`, flags word
    pub const FLAGS: usize = 100;
}

const CHANNEL_COUNT_MASK: u8 = 0x1F;

/// Flags bit marking high-resolution 16-bit sample data
pub const FLAG_HIRES: u16 = 1 << 1;

/// Flags bit marking a packed file (per-channel sample rate divisors)
pub const FLAG_PACKED: u16 = 1 << 14;

/// How a stored 16-bit word turns into a raw sample code
///
/// Resolved once from the header flags; every channel of a file shares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SampleCoding {
    /// 14-bit converter data left-justified in the word (code = word >> 2)
    #[serde(rename = "legacy_14bit")]
    Legacy14Bit,
    /// Full 16-bit data scaled into the 14-bit code range (code = word / 4)
    #[serde(rename = "hires_16bit")]
    HiRes16Bit,
}

impl SampleCoding {
    /// Determine the coding from the header flags word
    pub fn from_flags(flags: u16) -> Self {
        if flags & FLAG_HIRES != 0 {
            SampleCoding::HiRes16Bit
        } else {
            SampleCoding::Legacy14Bit
        }
    }

    /// Convert a stored word into its raw code
    #[inline]
    pub fn code(self, word: i16) -> f64 {
        match self {
            SampleCoding::Legacy14Bit => f64::from(word >> 2),
            SampleCoding::HiRes16Bit => f64::from(word) * 0.25,
        }
    }

    /// Smallest and largest representable code
    pub fn code_range(self) -> (f64, f64) {
        (self.code(i16::MIN), self.code(i16::MAX))
    }
}

/// Parsed fixed header of a WinDAQ file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileHeader {
    /// Number of acquired channels
    pub channel_count: usize,
    /// Byte offset of the per-channel info table
    pub channel_table_offset: usize,
    /// Size in bytes of one channel info entry
    pub channel_entry_size: usize,
    /// Byte offset where the interleaved sample region begins (the header size)
    pub data_offset: u64,
    /// Length in bytes of the sample region
    pub data_bytes: u64,
    /// Length in bytes of the event trailer following the samples
    pub trailer_bytes: u64,
    /// Length in bytes of the user-annotation block
    pub annotation_bytes: usize,
    /// Samples stored for every channel
    pub samples_per_channel: u64,
    /// Seconds between two consecutive samples of one channel
    pub sample_interval: f64,
    /// Raw header flags word
    pub flags: u16,
    /// Sample coding variant derived from `flags`
    pub coding: SampleCoding,
    #[serde(rename = "created_unix")]
    created_secs: u32,
    #[serde(rename = "written_unix")]
    written_secs: u32,
}

impl FileHeader {
    /// Decode and validate the fixed header.
    ///
    /// Packed files store slower channels in only some frames and are
    /// rejected with [`FormatError::InvalidHeader`] on `flags`.
    ///
    /// `fixed` holds the first bytes of the source (at least
    /// [`FIXED_HEADER_LEN`] of them) and `source_len` is the full source
    /// length, used to check that every region the header declares exists.
    pub fn parse(fixed: &[u8], source_len: u64) -> Result<Self, FormatError> {
        if fixed.len() < FIXED_HEADER_LEN {
            return Err(FormatError::TruncatedHeader {
                required: FIXED_HEADER_LEN as u64,
                actual: source_len,
            });
        }

        let channel_count = usize::from(fixed[offsets::CHANNEL_COUNT] & CHANNEL_COUNT_MASK);
        let channel_table_offset = usize::from(fixed[offsets::CHANNEL_TABLE_OFFSET]);
        let channel_entry_size = usize::from(fixed[offsets::CHANNEL_ENTRY_SIZE]);
        let data_offset = u64::from(field(fixed, offsets::HEADER_SIZE, |c| {
            c.read_u16::<LittleEndian>()
        })?);
        let data_bytes = u64::from(field(fixed, offsets::DATA_BYTES, |c| {
            c.read_u32::<LittleEndian>()
        })?);
        let trailer_bytes = u64::from(field(fixed, offsets::TRAILER_BYTES, |c| {
            c.read_u32::<LittleEndian>()
        })?);
        let annotation_bytes = usize::from(field(fixed, offsets::ANNOTATION_BYTES, |c| {
            c.read_u16::<LittleEndian>()
        })?);
        let sample_interval = field(fixed, offsets::SAMPLE_INTERVAL, |c| {
            c.read_f64::<LittleEndian>()
        })?;
        let created_secs = field(fixed, offsets::CREATED, |c| c.read_u32::<LittleEndian>())?;
        let written_secs = field(fixed, offsets::WRITTEN, |c| c.read_u32::<LittleEndian>())?;
        let flags = field(fixed, offsets::FLAGS, |c| c.read_u16::<LittleEndian>())?;

        if flags & FLAG_PACKED != 0 {
            return Err(FormatError::invalid(
                "flags",
                "packed files are not supported",
            ));
        }
        if channel_table_offset < FIXED_HEADER_LEN {
            return Err(FormatError::invalid(
                "channel_table_offset",
                format!(
                    "{} overlaps the {}-byte fixed header",
                    channel_table_offset, FIXED_HEADER_LEN
                ),
            ));
        }
        if channel_entry_size < CHANNEL_ENTRY_MIN_LEN {
            return Err(FormatError::invalid(
                "channel_entry_size",
                format!(
                    "{} bytes is smaller than the {}-byte minimum",
                    channel_entry_size, CHANNEL_ENTRY_MIN_LEN
                ),
            ));
        }
        let table_end = (channel_table_offset + channel_count * channel_entry_size) as u64;
        if table_end > data_offset {
            return Err(FormatError::invalid(
                "header_size",
                format!(
                    "header ends at byte {} but the channel table ends at byte {}",
                    data_offset, table_end
                ),
            ));
        }
        if !sample_interval.is_finite() || sample_interval <= 0.0 {
            return Err(FormatError::invalid(
                "sample_interval",
                format!("{} is not a positive finite number of seconds", sample_interval),
            ));
        }

        let frame_size = (channel_count * ELEMENT_SIZE) as u64;
        let samples_per_channel = if frame_size == 0 {
            if data_bytes != 0 {
                return Err(FormatError::invalid(
                    "data_bytes",
                    format!("{} sample bytes declared for a file without channels", data_bytes),
                ));
            }
            0
        } else {
            if data_bytes % frame_size != 0 {
                return Err(FormatError::invalid(
                    "data_bytes",
                    format!(
                        "{} is not a whole number of {}-byte frames",
                        data_bytes, frame_size
                    ),
                ));
            }
            data_bytes / frame_size
        };

        let header = Self {
            channel_count,
            channel_table_offset,
            channel_entry_size,
            data_offset,
            data_bytes,
            trailer_bytes,
            annotation_bytes,
            samples_per_channel,
            sample_interval,
            flags,
            coding: SampleCoding::from_flags(flags),
            created_secs,
            written_secs,
        };
        header.check_bounds(source_len)?;
        Ok(header)
    }

    fn check_bounds(&self, source_len: u64) -> Result<(), FormatError> {
        if self.data_offset > source_len {
            return Err(FormatError::TruncatedHeader {
                required: self.data_offset,
                actual: source_len,
            });
        }
        if self.data_end() > source_len {
            return Err(FormatError::TruncatedSampleData {
                required: self.data_end(),
                actual: source_len,
            });
        }
        let annotation_end = self.annotation_offset() + self.annotation_bytes as u64;
        if annotation_end > source_len {
            return Err(FormatError::RegionOutOfBounds {
                region: "annotation block",
                end: annotation_end,
                actual: source_len,
            });
        }
        Ok(())
    }

    /// Bytes occupied by one frame (one sample of every channel)
    pub fn frame_size(&self) -> usize {
        self.channel_count * ELEMENT_SIZE
    }

    /// Bytes occupied by the whole channel info table
    pub fn channel_table_len(&self) -> usize {
        self.channel_count * self.channel_entry_size
    }

    /// First byte past the sample region
    pub fn data_end(&self) -> u64 {
        self.data_offset + self.data_bytes
    }

    /// Byte offset of the trailing user-annotation block
    pub fn annotation_offset(&self) -> u64 {
        self.data_end() + self.trailer_bytes
    }

    /// Nominal per-channel sample rate in Hz
    pub fn sample_rate(&self) -> f64 {
        1.0 / self.sample_interval
    }

    /// Time the acquisition opened the file, if recorded
    pub fn created(&self) -> Option<DateTime<Utc>> {
        timestamp(self.created_secs)
    }

    /// Time the acquisition last wrote the file, if recorded
    pub fn written(&self) -> Option<DateTime<Utc>> {
        timestamp(self.written_secs)
    }
}

fn timestamp(secs: u32) -> Option<DateTime<Utc>> {
    if secs == 0 {
        return None;
    }
    DateTime::from_timestamp(i64::from(secs), 0)
}

fn field<T>(
    bytes: &[u8],
    offset: usize,
    read: impl FnOnce(&mut Cursor<&[u8]>) -> io::Result<T>,
) -> Result<T, FormatError> {
    let mut cursor = Cursor::new(bytes);
    cursor.set_position(offset as u64);
    read(&mut cursor).map_err(|_| FormatError::TruncatedHeader {
        required: FIXED_HEADER_LEN as u64,
        actual: bytes.len() as u64,
    })
}
