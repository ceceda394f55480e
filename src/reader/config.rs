use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use bytes::Bytes;

/// Configuration for opening WinDAQ files
#[derive(Debug, Clone, Default)]
pub struct ReaderConfig {
    /// Read the whole file into memory at open time instead of reading the
    /// sample region from the open handle on every `samples()` call
    pub preload: bool,
}

impl ReaderConfig {
    /// Configuration that buffers the whole file in memory
    pub fn preloaded() -> Self {
        Self { preload: true }
    }
}

/// Source the sample region is read from after parsing
pub(super) enum ReaderSource {
    /// Handle opened at parse time, shared by every channel read
    File {
        /// Path the handle was opened from
        path: PathBuf,
        /// Seek position is per-handle, so reads are serialized
        handle: Mutex<File>,
    },
    /// Complete file contents held in memory
    Memory(Bytes),
}
