use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::sync::PoisonError;

use byteorder::{ByteOrder, LittleEndian};

use crate::header::{FileHeader, ELEMENT_SIZE};

use super::config::ReaderSource;
use super::{FormatError, ReaderError, WdqFile};

impl WdqFile {
    /// Calibrated samples of one channel in physical units
    ///
    /// Returns exactly `samples_per_channel` values; a file that no longer
    /// holds the whole sample region fails with
    /// [`FormatError::TruncatedSampleData`].
    pub fn samples(&self, index: usize) -> Result<Vec<f64>, ReaderError> {
        let channel = self.channel(index)?;
        let words = self.channel_words(index)?;
        Ok(words.into_iter().map(|w| channel.physical(w)).collect())
    }

    /// Uncalibrated codes of one channel (stored words after the sample coding step)
    pub fn raw_codes(&self, index: usize) -> Result<Vec<f64>, ReaderError> {
        self.channel(index)?;
        let coding = self.header.coding;
        let words = self.channel_words(index)?;
        Ok(words.into_iter().map(|w| coding.code(w)).collect())
    }

    /// Stored 16-bit words of one channel, in sample order
    pub fn channel_words(&self, index: usize) -> Result<Vec<i16>, ReaderError> {
        self.channel(index)?;
        if self.header.samples_per_channel == 0 {
            return Ok(Vec::new());
        }

        match &self.source {
            ReaderSource::File { handle, .. } => {
                let file = handle.lock().unwrap_or_else(PoisonError::into_inner);
                let source_len = file.metadata()?.len();
                if source_len < self.header.data_end() {
                    return Err(truncated(&self.header, source_len).into());
                }
                let mut reader = BufReader::new(&*file);
                reader.seek(SeekFrom::Start(self.header.data_offset))?;
                read_channel(reader, &self.header, index, source_len)
            }
            ReaderSource::Memory(bytes) => {
                let start = self.header.data_offset as usize;
                let end = self.header.data_end() as usize;
                let region = bytes
                    .get(start..end)
                    .ok_or_else(|| truncated(&self.header, bytes.len() as u64))?;
                read_channel(region, &self.header, index, bytes.len() as u64)
            }
        }
    }
}

/// Pull one channel's word out of every frame of the sample region
fn read_channel<R: Read>(
    mut reader: R,
    header: &FileHeader,
    index: usize,
    source_len: u64,
) -> Result<Vec<i16>, ReaderError> {
    let count = header.samples_per_channel as usize;
    let offset = index * ELEMENT_SIZE;
    let mut frame = vec![0u8; header.frame_size()];
    let mut words = Vec::with_capacity(count);

    for _ in 0..count {
        reader.read_exact(&mut frame).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => truncated(header, source_len).into(),
            _ => ReaderError::IoError(e),
        })?;
        words.push(LittleEndian::read_i16(&frame[offset..offset + ELEMENT_SIZE]));
    }

    Ok(words)
}

fn truncated(header: &FileHeader, source_len: u64) -> FormatError {
    FormatError::TruncatedSampleData {
        required: header.data_end(),
        actual: source_len,
    }
}
