//! The persisted snapshot byte codec.
//!
//! A snapshot is `1 + width * height` bytes: a marker byte at offset 0
//! signalling "a save exists", then one byte per cell. Cells are enumerated
//! in the flat index order defined by [`Topology`] -- column-major, `x`
//! outer, `y` inner -- and [`encode`] and [`decode`] share that single
//! enumeration, so the save and load orders cannot drift apart.
//!
//! Decoding is deliberately permissive: any cell byte other than
//! [`LIVE_BYTE`] loads as dead, and any leading byte other than
//! [`SAVE_MARKER`] means "no save". Corrupt or foreign data therefore
//! loads as an arbitrary-but-valid pattern instead of failing; there is
//! no checksum.
//!
//! [`Topology`]: crate::topology::Topology

use crate::grid::CellGrid;
use crate::topology::Topology;

/// Marker byte at offset 0 signalling that a save exists.
pub const SAVE_MARKER: u8 = b's';

/// Cell byte meaning "live".
pub const LIVE_BYTE: u8 = b'L';

/// Cell byte meaning "dead".
pub const DEAD_BYTE: u8 = b'D';

/// Byte length of a snapshot for the given grid dimensions.
pub const fn encoded_len(width: usize, height: usize) -> usize {
    width.saturating_mul(height).saturating_add(1)
}

/// Serialize `grid` to the snapshot format, marker byte included.
pub fn encode(grid: &CellGrid) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(grid.len().saturating_add(1));
    bytes.push(SAVE_MARKER);
    for (_, state) in grid.states() {
        bytes.push(if state.is_live() { LIVE_BYTE } else { DEAD_BYTE });
    }
    bytes
}

/// Deserialize a snapshot into a fresh grid sized for `topology`.
///
/// Returns `None` when the marker byte is absent, which reads as "no save".
/// Missing trailing cell bytes load as dead, as does any byte other than
/// [`LIVE_BYTE`].
pub fn decode(bytes: &[u8], topology: &Topology) -> Option<CellGrid> {
    if bytes.first() != Some(&SAVE_MARKER) {
        return None;
    }
    let mut grid = CellGrid::new(topology);
    for index in 0..grid.len() {
        let offset = index.saturating_add(1);
        let alive = bytes.get(offset) == Some(&LIVE_BYTE);
        grid.set(index, alive);
    }
    Some(grid)
}
