//! Per-channel metadata: calibration, engineering units and annotations

use std::io::{self, Cursor};

use byteorder::{LittleEndian, ReadBytesExt};
use log::warn;
use serde::Serialize;

use crate::header::{FileHeader, SampleCoding};
use crate::reader::FormatError;

/// Byte offsets inside one channel info entry
pub mod offsets {
    /// `f32` display slope
    pub const DISPLAY_SLOPE: usize = 0;
    /// `f32` display intercept
    pub const DISPLAY_INTERCEPT: usize = 4;
    /// `f64` calibration slope
    pub const CAL_SLOPE: usize = 8;
    /// `f64` calibration intercept
    pub const CAL_INTERCEPT: usize = 16;
    /// Start of the NUL-padded unit tag
    pub const UNITS: usize = 24;
    /// Width of the unit tag
    pub const UNITS_LEN: usize = 6;
    /// `u8` physical input number
    pub const PHYSICAL_CHANNEL: usize = 32;
}

/// Linear calibration from raw code to physical units
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Calibration {
    /// Physical units per code
    pub slope: f64,
    /// Physical value at code zero
    pub intercept: f64,
}

impl Calibration {
    /// Apply the calibration to a raw code
    #[inline]
    pub fn apply(&self, code: f64) -> f64 {
        code * self.slope + self.intercept
    }
}

/// Scaling the acquisition software used to fit the trace in its display window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayScaling {
    /// Display slope
    pub slope: f32,
    /// Display intercept
    pub intercept: f32,
}

/// Descriptor of one recorded channel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelDescriptor {
    /// 0-based channel index
    pub index: usize,
    /// User annotation (channel label), cleaned of control characters
    pub annotation: String,
    /// Engineering-unit tag, cleaned of control characters
    pub unit: String,
    /// Code to physical-unit transform
    pub calibration: Calibration,
    /// Display window scaling
    pub display_scaling: DisplayScaling,
    /// Word to code transform shared by every channel of the file
    pub coding: SampleCoding,
    /// Physical input number on the acquisition hardware
    pub physical_channel: u8,
}

impl ChannelDescriptor {
    /// Decode one channel info table entry.
    pub(crate) fn parse(
        index: usize,
        entry: &[u8],
        annotation: String,
        header: &FileHeader,
    ) -> Result<Self, FormatError> {
        let display_slope = read_at(entry, index, offsets::DISPLAY_SLOPE, |c| {
            c.read_f32::<LittleEndian>()
        })?;
        let display_intercept = read_at(entry, index, offsets::DISPLAY_INTERCEPT, |c| {
            c.read_f32::<LittleEndian>()
        })?;
        let slope = read_at(entry, index, offsets::CAL_SLOPE, |c| c.read_f64::<LittleEndian>())?;
        let intercept = read_at(entry, index, offsets::CAL_INTERCEPT, |c| {
            c.read_f64::<LittleEndian>()
        })?;

        if !slope.is_finite() {
            return Err(FormatError::invalid(
                "calibration_slope",
                format!("channel {}: {} is not finite", index, slope),
            ));
        }
        if !intercept.is_finite() {
            return Err(FormatError::invalid(
                "calibration_intercept",
                format!("channel {}: {} is not finite", index, intercept),
            ));
        }

        let units = entry
            .get(offsets::UNITS..offsets::UNITS + offsets::UNITS_LEN)
            .ok_or_else(|| short_entry(index))?;
        let physical_channel = *entry
            .get(offsets::PHYSICAL_CHANNEL)
            .ok_or_else(|| short_entry(index))?;

        Ok(Self {
            index,
            annotation,
            unit: clean_field(units),
            calibration: Calibration { slope, intercept },
            display_scaling: DisplayScaling {
                slope: display_slope,
                intercept: display_intercept,
            },
            coding: header.coding,
            physical_channel,
        })
    }

    /// 1-based channel number, as shown by the acquisition software
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// Annotation, or `Channel_<n>` when the channel was never labelled
    pub fn display_name(&self) -> String {
        if self.annotation.trim().is_empty() {
            format!("Channel_{}", self.number())
        } else {
            self.annotation.clone()
        }
    }

    /// Display name followed by the unit in parentheses, when there is one
    pub fn column_label(&self) -> String {
        if self.unit.trim().is_empty() {
            self.display_name()
        } else {
            format!("{} ({})", self.display_name(), self.unit)
        }
    }

    /// Convert one stored word to physical units
    #[inline]
    pub fn physical(&self, word: i16) -> f64 {
        self.calibration.apply(self.coding.code(word))
    }

    /// Physical values at the ends of the code range, as `(min, max)`
    pub fn full_scale(&self) -> (f64, f64) {
        let (low, high) = self.coding.code_range();
        let a = self.calibration.apply(low);
        let b = self.calibration.apply(high);
        (a.min(b), a.max(b))
    }
}

fn read_at<T>(
    entry: &[u8],
    index: usize,
    offset: usize,
    read: impl FnOnce(&mut Cursor<&[u8]>) -> io::Result<T>,
) -> Result<T, FormatError> {
    let mut cursor = Cursor::new(entry);
    cursor.set_position(offset as u64);
    read(&mut cursor).map_err(|_| short_entry(index))
}

fn short_entry(index: usize) -> FormatError {
    FormatError::invalid(
        "channel_entry_size",
        format!("entry for channel {} is too short", index),
    )
}

/// Decode a fixed-width text field.
///
/// Bytes are taken as Latin-1; NULs and other control characters are
/// dropped and trailing whitespace is trimmed.
pub fn clean_field(bytes: &[u8]) -> String {
    let cleaned: String = bytes
        .iter()
        .map(|&b| char::from(b))
        .filter(|c| !c.is_control())
        .collect();
    cleaned.trim_end().to_string()
}

/// Split the trailing annotation block into one label per channel.
///
/// The block holds NUL-terminated strings in channel order. Channels past
/// the end of the block get an empty annotation.
pub fn split_annotations(block: &[u8], channel_count: usize) -> Vec<String> {
    let terminated = block.strip_suffix(&[0]).unwrap_or(block);
    let mut annotations: Vec<String> = terminated
        .split(|&b| b == 0)
        .take(channel_count)
        .map(clean_field)
        .collect();

    if !block.is_empty() && annotations.len() < channel_count {
        warn!(
            "Annotation block holds {} labels for {} channels",
            annotations.len(),
            channel_count
        );
    }
    annotations.resize(channel_count, String::new());
    annotations
}
