// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Snapshot blob layout.
//!
//! ```text
//! [rgb; W*H]     row-major, 3 bytes per cell
//! [digest; W*H]  row-major, 32 bytes per cell
//! ```
//!
//! No header, version or checksum: the length alone decides validity.

pub mod encode;
pub mod decode;

use crate::config::CELL_BYTES;

pub use decode::decode_cells;
pub use encode::encode_canvas;

/// Exact snapshot length for a canvas of `cells` cells.
pub const fn snapshot_len(cells: usize) -> usize {
    cells * CELL_BYTES
}

/// BLAKE3 of a snapshot blob, used to identify saved snapshots in logs and tooling.
pub fn fingerprint(blob: &[u8]) -> [u8; 32] {
    *blake3::hash(blob).as_bytes()
}
