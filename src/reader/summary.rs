use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::channel::ChannelDescriptor;
use crate::header::SampleCoding;

use super::WdqFile;

/// Summary of a WinDAQ file's layout and channels
#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    /// Number of channels
    pub channel_count: usize,
    /// Samples per channel
    pub samples_per_channel: u64,
    /// Seconds between samples
    pub sample_interval: f64,
    /// Per-channel sample rate in Hz
    pub sample_rate: f64,
    /// Recording length in seconds
    pub duration: f64,
    /// Word to code transform
    pub coding: SampleCoding,
    /// Acquisition start, when recorded
    pub created: Option<DateTime<Utc>>,
    /// Last write by the acquisition, when recorded
    pub written: Option<DateTime<Utc>>,
    /// Channel descriptors in index order
    pub channels: Vec<ChannelDescriptor>,
}

impl WdqFile {
    /// Get summary information about the file
    pub fn summary(&self) -> FileSummary {
        FileSummary {
            channel_count: self.channel_count(),
            samples_per_channel: self.header.samples_per_channel,
            sample_interval: self.sample_interval(),
            sample_rate: self.sample_rate(),
            duration: self.duration(),
            coding: self.header.coding,
            created: self.header.created(),
            written: self.header.written(),
            channels: self.channels.clone(),
        }
    }
}

impl fmt::Display for FileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "WinDAQ File Summary")?;
        writeln!(f, "===================")?;
        writeln!(f, "Channels: {}", self.channel_count)?;
        writeln!(f, "Samples per channel: {}", self.samples_per_channel)?;
        writeln!(f, "Sample rate: {:.3} Hz", self.sample_rate)?;
        writeln!(f, "Duration: {:.3} sec", self.duration)?;
        let coding = match self.coding {
            SampleCoding::Legacy14Bit => "14-bit",
            SampleCoding::HiRes16Bit => "16-bit (high resolution)",
        };
        writeln!(f, "Sample coding: {}", coding)?;
        if let Some(created) = self.created {
            writeln!(f, "Created: {}", created.format("%Y-%m-%d %H:%M:%S"))?;
        }
        if let Some(written) = self.written {
            writeln!(f, "Written: {}", written.format("%Y-%m-%d %H:%M:%S"))?;
        }

        if !self.channels.is_empty() {
            writeln!(f)?;
            writeln!(f, "Channels:")?;
        }
        for channel in &self.channels {
            let (min, max) = channel.full_scale();
            writeln!(
                f,
                "  {:3}. {} [slope {}, intercept {}, range {:.4} .. {:.4}]",
                channel.number(),
                channel.column_label(),
                channel.calibration.slope,
                channel.calibration.intercept,
                min,
                max
            )?;
        }
        Ok(())
    }
}
