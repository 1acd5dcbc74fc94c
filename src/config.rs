// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants.

/// Width of the canvas in the reference deployment.
pub const WIDTH: usize = 1024;

/// Height of the canvas in the reference deployment.
pub const HEIGHT: usize = 1024;

/// Size of a SHA-256 digest.
pub const DIGEST_BYTES: usize = 32;

/// Size of the writer-chosen nonce inside an update record.
pub const NONCE_BYTES: usize = 16;

/// Bytes per cell color (red, green, blue).
pub const COLOR_BYTES: usize = 3;

/// Bytes per cell in a snapshot: color followed (elsewhere) by digest.
pub const CELL_BYTES: usize = COLOR_BYTES + DIGEST_BYTES;

/// x, y, r, g, b
pub const PAYLOAD_BYTES: usize = 2 + 2 + COLOR_BYTES;

/// x, y, r, g, b, nonce, claimed digest
pub const RECORD_BYTES: usize = PAYLOAD_BYTES + NONCE_BYTES + DIGEST_BYTES;

/// Leading one-bits subtracted before heatmap banding.
pub const HEATMAP_OFFSET: u32 = 4;
