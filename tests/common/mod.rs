//! Synthetic WinDAQ recordings for integration tests

#![allow(dead_code)]

use windaq::channel::offsets as entry;
use windaq::header::offsets as header;

pub use windaq::header::FIXED_HEADER_LEN;

/// Channel entry size written by [`SynthFile`]
pub const ENTRY_SIZE: usize = 36;

/// One channel of a synthetic recording
pub struct SynthChannel {
    pub unit: Vec<u8>,
    pub annotation: Vec<u8>,
    pub slope: f64,
    pub intercept: f64,
    pub words: Vec<i16>,
}

impl SynthChannel {
    pub fn new(annotation: &str, unit: &str, slope: f64, intercept: f64) -> Self {
        Self {
            unit: unit.as_bytes().to_vec(),
            annotation: annotation.as_bytes().to_vec(),
            slope,
            intercept,
            words: Vec::new(),
        }
    }

    /// Legacy 14-bit codes, stored left-justified
    pub fn codes(mut self, codes: &[i16]) -> Self {
        self.words = codes.iter().map(|c| c << 2).collect();
        self
    }

    pub fn words(mut self, words: &[i16]) -> Self {
        self.words = words.to_vec();
        self
    }
}

/// A synthetic recording; every channel must hold the same number of words
pub struct SynthFile {
    pub channels: Vec<SynthChannel>,
    pub interval: f64,
    pub flags: u16,
    pub trailer: Vec<u8>,
}

impl SynthFile {
    pub fn new(channels: Vec<SynthChannel>) -> Self {
        Self {
            channels,
            interval: 0.001,
            flags: 0,
            trailer: Vec::new(),
        }
    }

    pub fn header_size(&self) -> usize {
        FIXED_HEADER_LEN + self.channels.len() * ENTRY_SIZE
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let samples = self.channels.first().map(|c| c.words.len()).unwrap_or(0);
        let mut data = Vec::with_capacity(samples * self.channels.len() * 2);
        for i in 0..samples {
            for channel in &self.channels {
                data.extend_from_slice(&channel.words[i].to_le_bytes());
            }
        }
        let mut annotations = Vec::new();
        for channel in &self.channels {
            annotations.extend_from_slice(&channel.annotation);
            annotations.push(0);
        }

        let header_size = self.header_size();
        let mut out = vec![0u8; header_size];
        out[header::CHANNEL_COUNT] = self.channels.len() as u8;
        out[header::CHANNEL_TABLE_OFFSET] = FIXED_HEADER_LEN as u8;
        out[header::CHANNEL_ENTRY_SIZE] = ENTRY_SIZE as u8;
        put(&mut out, header::HEADER_SIZE, &(header_size as u16).to_le_bytes());
        put(&mut out, header::DATA_BYTES, &(data.len() as u32).to_le_bytes());
        put(&mut out, header::TRAILER_BYTES, &(self.trailer.len() as u32).to_le_bytes());
        put(&mut out, header::ANNOTATION_BYTES, &(annotations.len() as u16).to_le_bytes());
        put(&mut out, header::SAMPLE_INTERVAL, &self.interval.to_le_bytes());
        put(&mut out, header::CREATED, &1_650_000_000u32.to_le_bytes());
        put(&mut out, header::WRITTEN, &1_650_000_300u32.to_le_bytes());
        put(&mut out, header::FLAGS, &self.flags.to_le_bytes());

        for (i, channel) in self.channels.iter().enumerate() {
            let base = FIXED_HEADER_LEN + i * ENTRY_SIZE;
            let slot = &mut out[base..base + ENTRY_SIZE];
            put(slot, entry::DISPLAY_SLOPE, &1.0f32.to_le_bytes());
            put(slot, entry::CAL_SLOPE, &channel.slope.to_le_bytes());
            put(slot, entry::CAL_INTERCEPT, &channel.intercept.to_le_bytes());
            let len = channel.unit.len().min(entry::UNITS_LEN);
            put(slot, entry::UNITS, &channel.unit[..len]);
            slot[entry::PHYSICAL_CHANNEL] = (i + 1) as u8;
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
