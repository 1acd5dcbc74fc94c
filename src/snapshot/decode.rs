// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::config::{COLOR_BYTES, DIGEST_BYTES};
use crate::error::{KernelError, Result};
use crate::pixel::{Digest, Rgb};
use super::snapshot_len;

/// Splits a snapshot blob into per-cell colors and digests, row-major.
pub fn decode_cells(data: &[u8], cells: usize) -> Result<(Vec<Rgb>, Vec<Digest>)> {
    let expected = snapshot_len(cells);
    if data.len() != expected {
        return Err(KernelError::Format { expected, found: data.len() });
    }

    let (color_part, digest_part) = data.split_at(cells * COLOR_BYTES);

    let colors = color_part
        .chunks_exact(COLOR_BYTES)
        .map(|c| Rgb::new(c[0], c[1], c[2]))
        .collect();

    let digests = digest_part
        .chunks_exact(DIGEST_BYTES)
        .map(|d| {
            let mut bytes = [0u8; DIGEST_BYTES];
            bytes.copy_from_slice(d);
            Digest(bytes)
        })
        .collect();

    Ok((colors, digests))
}
