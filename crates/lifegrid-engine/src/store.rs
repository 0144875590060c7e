//! File-backed save store.
//!
//! [`FileStore`] keeps the whole save image in memory and syncs it with a
//! file at the access-window boundaries: opening a window reads the file,
//! closing one writes it back if anything changed. Bytes only move to and
//! from persistent media inside a window, like battery-backed cartridge
//! RAM behind its enable latch.

use std::path::PathBuf;

use lifegrid_core::store::SaveStore;
use tracing::{debug, warn};

/// A save store persisted as a single flat file.
#[derive(Debug)]
pub struct FileStore {
    /// Backing file path.
    path: PathBuf,
    /// In-memory byte image, refreshed at window open.
    bytes: Vec<u8>,
    /// Whether the image changed inside the current window.
    dirty: bool,
}

impl FileStore {
    /// Create a store backed by the file at `path`.
    ///
    /// The file is not touched until the first access window opens; a
    /// missing file simply reads as an empty image ("no save").
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            bytes: Vec::new(),
            dirty: false,
        }
    }
}

impl SaveStore for FileStore {
    fn begin_access(&mut self) {
        self.bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no save image read");
                Vec::new()
            }
        };
        self.dirty = false;
    }

    fn end_access(&mut self) {
        if !self.dirty {
            return;
        }
        if let Err(e) = std::fs::write(&self.path, &self.bytes) {
            warn!(path = %self.path.display(), error = %e, "failed to write save image");
        } else {
            debug!(
                path = %self.path.display(),
                bytes = self.bytes.len(),
                "save image written"
            );
        }
        self.dirty = false;
    }

    fn read_byte(&self, addr: usize) -> u8 {
        self.bytes.get(addr).copied().unwrap_or(0)
    }

    fn write_byte(&mut self, addr: usize, value: u8) {
        if addr >= self.bytes.len() {
            self.bytes.resize(addr.saturating_add(1), 0);
        }
        if let Some(slot) = self.bytes.get_mut(addr) {
            *slot = value;
        }
        self.dirty = true;
    }
}
