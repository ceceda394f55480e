use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Mutex;

use bytes::Bytes;
use log::debug;

use crate::channel::{split_annotations, ChannelDescriptor};
use crate::header::{FileHeader, FIXED_HEADER_LEN};

use super::config::ReaderSource;
use super::{ReaderConfig, ReaderError, WdqFile};

impl WdqFile {
    /// Open a WinDAQ file
    ///
    /// Reads the header, channel table and annotation block; the sample
    /// region is validated against the file length but not read. The file
    /// stays open and later `samples()` calls read through the same handle.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ReaderError> {
        Self::open_with_config(path, ReaderConfig::default())
    }

    /// Open a WinDAQ file with custom configuration
    pub fn open_with_config<P: AsRef<Path>>(
        path: P,
        config: ReaderConfig,
    ) -> Result<Self, ReaderError> {
        let path = path.as_ref();

        if config.preload {
            debug!("Preloading {}", path.display());
            return Self::from_bytes(std::fs::read(path)?);
        }

        let file = File::open(path)?;
        let source_len = file.metadata()?.len();
        let (header, channels) = parse_layout(&mut BufReader::new(&file), source_len)?;
        debug!(
            "Opened {}: {} channels, {} samples per channel",
            path.display(),
            header.channel_count,
            header.samples_per_channel
        );

        Ok(Self {
            source: ReaderSource::File {
                path: path.to_path_buf(),
                handle: Mutex::new(file),
            },
            header,
            channels,
        })
    }

    /// Parse a WinDAQ file already held in memory
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Result<Self, ReaderError> {
        let bytes: Bytes = bytes.into();
        let source_len = bytes.len() as u64;
        let (header, channels) = parse_layout(&mut Cursor::new(&bytes[..]), source_len)?;

        Ok(Self {
            source: ReaderSource::Memory(bytes),
            header,
            channels,
        })
    }
}

/// Decode the header and every channel descriptor from a seekable source
fn parse_layout<R: Read + Seek>(
    reader: &mut R,
    source_len: u64,
) -> Result<(FileHeader, Vec<ChannelDescriptor>), ReaderError> {
    let fixed_len = (FIXED_HEADER_LEN as u64).min(source_len) as usize;
    let fixed = read_region(reader, 0, fixed_len)?;
    let header = FileHeader::parse(&fixed, source_len)?;
    debug!("Header layout: {:?}", header);

    let table = read_region(
        reader,
        header.channel_table_offset as u64,
        header.channel_table_len(),
    )?;
    let annotation_block = read_region(reader, header.annotation_offset(), header.annotation_bytes)?;
    let annotations = split_annotations(&annotation_block, header.channel_count);

    let channels = table
        .chunks_exact(header.channel_entry_size)
        .zip(annotations)
        .enumerate()
        .map(|(index, (entry, annotation))| {
            ChannelDescriptor::parse(index, entry, annotation, &header)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((header, channels))
}

fn read_region<R: Read + Seek>(reader: &mut R, offset: u64, len: usize) -> std::io::Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    if len > 0 {
        reader.seek(SeekFrom::Start(offset))?;
        reader.read_exact(&mut buf)?;
    }
    Ok(buf)
}
