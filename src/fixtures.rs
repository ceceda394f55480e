//! Synthetic WinDAQ files for unit tests

use crate::channel::offsets as e;
use crate::header::{offsets as h, FIXED_HEADER_LEN};

const ENTRY_SIZE: usize = 36;

struct FixtureChannel {
    annotation: String,
    unit: String,
    slope: f64,
    intercept: f64,
}

/// Builds the bytes of a little-endian WinDAQ file
pub(crate) struct WdqBuilder {
    channels: Vec<FixtureChannel>,
    interval: f64,
    flags: u16,
    frames: Vec<Vec<i16>>,
    trailer: Vec<u8>,
    created: u32,
    written: u32,
}

impl WdqBuilder {
    pub(crate) fn new() -> Self {
        Self {
            channels: Vec::new(),
            interval: 0.01,
            flags: 0,
            frames: Vec::new(),
            trailer: Vec::new(),
            created: 0,
            written: 0,
        }
    }

    pub(crate) fn channel(mut self, annotation: &str, unit: &str, slope: f64, intercept: f64) -> Self {
        self.channels.push(FixtureChannel {
            annotation: annotation.to_string(),
            unit: unit.to_string(),
            slope,
            intercept,
        });
        self
    }

    pub(crate) fn interval(mut self, interval: f64) -> Self {
        self.interval = interval;
        self
    }

    pub(crate) fn flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    /// One inner vector per frame, one word per channel
    pub(crate) fn frames(mut self, frames: Vec<Vec<i16>>) -> Self {
        self.frames = frames;
        self
    }

    pub(crate) fn trailer(mut self, trailer: Vec<u8>) -> Self {
        self.trailer = trailer;
        self
    }

    pub(crate) fn timestamps(mut self, created: u32, written: u32) -> Self {
        self.created = created;
        self.written = written;
        self
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let header_size = FIXED_HEADER_LEN + self.channels.len() * ENTRY_SIZE;
        let data: Vec<u8> = self
            .frames
            .iter()
            .flat_map(|frame| frame.iter().flat_map(|w| w.to_le_bytes()))
            .collect();
        let annotations: Vec<u8> = self
            .channels
            .iter()
            .flat_map(|c| c.annotation.bytes().chain(std::iter::once(0)))
            .collect();

        let mut out = vec![0u8; header_size];
        out[h::CHANNEL_COUNT] = self.channels.len() as u8;
        out[h::CHANNEL_TABLE_OFFSET] = FIXED_HEADER_LEN as u8;
        out[h::CHANNEL_ENTRY_SIZE] = ENTRY_SIZE as u8;
        put(&mut out, h::HEADER_SIZE, &(header_size as u16).to_le_bytes());
        put(&mut out, h::DATA_BYTES, &(data.len() as u32).to_le_bytes());
        put(&mut out, h::TRAILER_BYTES, &(self.trailer.len() as u32).to_le_bytes());
        put(&mut out, h::ANNOTATION_BYTES, &(annotations.len() as u16).to_le_bytes());
        put(&mut out, h::SAMPLE_INTERVAL, &self.interval.to_le_bytes());
        put(&mut out, h::CREATED, &self.created.to_le_bytes());
        put(&mut out, h::WRITTEN, &self.written.to_le_bytes());
        put(&mut out, h::FLAGS, &self.flags.to_le_bytes());

        for (i, channel) in self.channels.iter().enumerate() {
            let entry = &mut out[FIXED_HEADER_LEN + i * ENTRY_SIZE..][..ENTRY_SIZE];
            put(entry, e::DISPLAY_SLOPE, &1.0f32.to_le_bytes());
            put(entry, e::DISPLAY_INTERCEPT, &0.0f32.to_le_bytes());
            put(entry, e::CAL_SLOPE, &channel.slope.to_le_bytes());
            put(entry, e::CAL_INTERCEPT, &channel.intercept.to_le_bytes());
            let unit = channel.unit.as_bytes();
            put(entry, e::UNITS, &unit[..unit.len().min(e::UNITS_LEN)]);
            entry[e::PHYSICAL_CHANNEL] = (i + 1) as u8;
        }

        out.extend_from_slice(&data);
        out.extend_from_slice(&self.trailer);
        out.extend_from_slice(&annotations);
        out
    }
}

fn put(buf: &mut [u8], offset: usize, bytes: &[u8]) {
    buf[offset..offset + bytes.len()].copy_from_slice(bytes);
}
