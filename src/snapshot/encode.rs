// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::canvas::Canvas;
use crate::config::{COLOR_BYTES, DIGEST_BYTES};
use super::snapshot_len;

/// Serializes the canvas into the snapshot layout.
///
/// Each row is copied under its own lock, so a cell's color and digest are
/// always taken from the same moment even while writers are active.
pub fn encode_canvas<const W: usize, const H: usize>(canvas: &Canvas<W, H>) -> Vec<u8> {
    let cells = W * H;
    let mut out = vec![0u8; snapshot_len(cells)];
    let (color_part, digest_part) = out.split_at_mut(cells * COLOR_BYTES);

    canvas.for_each_row(|y, colors, digests| {
        let base = y * W;
        for (x, color) in colors.iter().enumerate() {
            let at = (base + x) * COLOR_BYTES;
            color_part[at..at + COLOR_BYTES].copy_from_slice(&color.to_bytes());
        }
        for (x, digest) in digests.iter().enumerate() {
            let at = (base + x) * DIGEST_BYTES;
            digest_part[at..at + DIGEST_BYTES].copy_from_slice(digest.as_bytes());
        }
    });

    out
}
