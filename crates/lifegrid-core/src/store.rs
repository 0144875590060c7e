//! The persisted save store and its scoped access window.
//!
//! Save bytes sit behind an explicit access window, the way battery-backed
//! cartridge RAM sits behind an enable/disable register pair. The contract
//! is enforced by [`StoreAccess`], an RAII guard: opening it calls
//! [`SaveStore::begin_access`], dropping it calls [`SaveStore::end_access`]
//! on every exit path, and all byte I/O for a save or load happens inside
//! exactly one window. Under the single-threaded tick loop a window can
//! never overlap a generation step.

use lifegrid_world::{CellGrid, Topology, snapshot};
use tracing::{debug, warn};

/// A byte-addressable external store with scoped access.
///
/// Address 0 holds the save-exists marker; addresses `1..=width * height`
/// hold one byte per cell (see [`snapshot`] for the layout contract).
pub trait SaveStore {
    /// Enable store access. Paired with [`end_access`] by [`StoreAccess`].
    ///
    /// [`end_access`]: SaveStore::end_access
    fn begin_access(&mut self);

    /// Disable store access.
    fn end_access(&mut self);

    /// Read the byte at `addr`. Out-of-range reads yield 0.
    fn read_byte(&self, addr: usize) -> u8;

    /// Write the byte at `addr`.
    fn write_byte(&mut self, addr: usize, value: u8);
}

/// RAII access window over a [`SaveStore`].
///
/// Construction enables access; drop disables it, including on early
/// returns. All reads and writes go through the guard so they cannot
/// escape the window.
pub struct StoreAccess<'a> {
    /// The guarded store.
    store: &'a mut dyn SaveStore,
}

impl core::fmt::Debug for StoreAccess<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StoreAccess").finish_non_exhaustive()
    }
}

impl<'a> StoreAccess<'a> {
    /// Open an access window on `store`.
    pub fn open(store: &'a mut dyn SaveStore) -> Self {
        store.begin_access();
        Self { store }
    }

    /// Read the byte at `addr` inside the window.
    pub fn read_byte(&self, addr: usize) -> u8 {
        self.store.read_byte(addr)
    }

    /// Write the byte at `addr` inside the window.
    pub fn write_byte(&mut self, addr: usize, value: u8) {
        self.store.write_byte(addr, value);
    }
}

impl Drop for StoreAccess<'_> {
    fn drop(&mut self) {
        self.store.end_access();
    }
}

/// Serialize `grid` into `store` inside one scoped access window.
pub fn save_grid(store: &mut dyn SaveStore, grid: &CellGrid) {
    let bytes = snapshot::encode(grid);
    let mut access = StoreAccess::open(store);
    for (addr, &byte) in bytes.iter().enumerate() {
        access.write_byte(addr, byte);
    }
    debug!(bytes = bytes.len(), "grid saved");
}

/// Load a saved grid from `store`, if one exists.
///
/// Reads the full snapshot inside one scoped access window, then decodes
/// it. Returns `None` when the marker byte is absent ("no save"); corrupt
/// cell bytes load permissively as dead.
pub fn load_grid(store: &mut dyn SaveStore, topology: &Topology) -> Option<CellGrid> {
    let len = snapshot::encoded_len(topology.width(), topology.height());
    let mut bytes = Vec::with_capacity(len);
    {
        let access = StoreAccess::open(store);
        for addr in 0..len {
            bytes.push(access.read_byte(addr));
        }
    }
    snapshot::decode(&bytes, topology)
}

/// An in-memory store for tests and headless runs.
///
/// Tracks access-window pairing so tests can assert that every byte of
/// I/O happened inside an open window.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// The byte image, grown on demand.
    bytes: Vec<u8>,
    /// Whether an access window is currently open.
    open: bool,
    /// Number of windows opened so far.
    windows: u64,
    /// Writes attempted outside a window.
    violations: u64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with a byte image.
    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            ..Self::default()
        }
    }

    /// The current byte image.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of access windows opened so far.
    pub const fn windows(&self) -> u64 {
        self.windows
    }

    /// Number of writes attempted outside an access window.
    pub const fn violations(&self) -> u64 {
        self.violations
    }

    /// Count an access attempt, flagging it if no window is open.
    fn note_access(&mut self) {
        if !self.open {
            self.violations = self.violations.saturating_add(1);
            warn!("store I/O outside an access window");
        }
    }
}

impl SaveStore for MemoryStore {
    fn begin_access(&mut self) {
        self.open = true;
        self.windows = self.windows.saturating_add(1);
    }

    fn end_access(&mut self) {
        self.open = false;
    }

    fn read_byte(&self, addr: usize) -> u8 {
        self.bytes.get(addr).copied().unwrap_or(0)
    }

    fn write_byte(&mut self, addr: usize, value: u8) {
        self.note_access();
        if addr >= self.bytes.len() {
            self.bytes.resize(addr.saturating_add(1), 0);
        }
        if let Some(slot) = self.bytes.get_mut(addr) {
            *slot = value;
        }
    }
}
