// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Canvas Store.
//!
//! Cells are sharded by row: every row sits behind its own mutex, so the
//! compare-and-raise in [`Canvas::try_set`] is atomic per cell while writers
//! on different rows never contend. Every accepted mutation bumps a
//! generation counter that derived views use to detect staleness.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{KernelError, Result};
use crate::pixel::{Digest, Rgb};
use crate::snapshot;

#[derive(Debug)]
struct Row {
    colors: Vec<Rgb>,
    digests: Vec<Digest>,
}

#[derive(Debug)]
pub struct Canvas<const W: usize, const H: usize> {
    rows: Vec<Mutex<Row>>,
    generation: AtomicU64,
}

impl<const W: usize, const H: usize> Canvas<W, H> {
    pub const WIDTH: usize = W;
    pub const HEIGHT: usize = H;

    /// Canvas where every cell holds `color` and `digest`.
    pub fn filled(color: Rgb, digest: Digest) -> Self {
        let rows = (0..H)
            .map(|_| {
                Mutex::new(Row {
                    colors: vec![color; W],
                    digests: vec![digest; W],
                })
            })
            .collect();
        Self { rows, generation: AtomicU64::new(0) }
    }

    /// White canvas with zero hardness everywhere.
    pub fn blank() -> Self {
        Self::filled(Rgb::WHITE, Digest::ZERO)
    }

    /// Decodes a snapshot blob. Fails with [`KernelError::Format`] unless
    /// `data` is exactly `W * H * 35` bytes.
    pub fn load(data: &[u8]) -> Result<Self> {
        let (colors, digests) = snapshot::decode_cells(data, W * H)?;
        Self::from_cells(colors, digests)
    }

    /// Builds a canvas from row-major cell values; both vectors must hold `W * H` entries.
    pub fn from_cells(colors: Vec<Rgb>, digests: Vec<Digest>) -> Result<Self> {
        for found in [colors.len(), digests.len()] {
            if found != W * H {
                return Err(KernelError::InvalidPayloadLength { expected: W * H, found });
            }
        }

        let rows = colors
            .chunks_exact(W)
            .zip(digests.chunks_exact(W))
            .map(|(c, d)| {
                Mutex::new(Row {
                    colors: c.to_vec(),
                    digests: d.to_vec(),
                })
            })
            .collect();

        Ok(Self { rows, generation: AtomicU64::new(0) })
    }

    /// Serializes the canvas; `Canvas::load(&c.snapshot())` reproduces it.
    pub fn snapshot(&self) -> Vec<u8> {
        snapshot::encode_canvas(self)
    }

    pub fn contains(x: usize, y: usize) -> bool {
        x < W && y < H
    }

    /// The `W` digests of row `y`, in x order.
    pub fn hardness_at(&self, y: usize) -> Result<Vec<Digest>> {
        if y >= H {
            return Err(KernelError::OutOfRange { y, height: H });
        }
        Ok(self.row(y).digests.clone())
    }

    /// Compare-and-raise.
    ///
    /// Replaces color and digest of `(x, y)` iff `digest` is strictly greater
    /// than the stored one and returns `Ok(None)`. Otherwise leaves the cell
    /// alone and returns the stored digest so the caller knows what to beat.
    pub fn try_set(&self, x: usize, y: usize, color: Rgb, digest: Digest) -> Result<Option<Digest>> {
        if !Self::contains(x, y) {
            return Err(KernelError::OutOfBounds { index: 0, x, y, width: W, height: H });
        }

        let mut row = self.row(y);
        let current = row.digests[x];
        if digest <= current {
            return Ok(Some(current));
        }
        row.digests[x] = digest;
        row.colors[x] = color;
        self.generation.fetch_add(1, Ordering::AcqRel);
        Ok(None)
    }

    /// Administrative bypass: replaces the color, keeps the digest.
    pub fn overwrite(&self, x: usize, y: usize, color: Rgb) -> Result<()> {
        if !Self::contains(x, y) {
            return Err(KernelError::OutOfBounds { index: 0, x, y, width: W, height: H });
        }
        let mut row = self.row(y);
        row.colors[x] = color;
        self.generation.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    pub fn color_at(&self, x: usize, y: usize) -> Option<Rgb> {
        Self::contains(x, y).then(|| self.row(y).colors[x])
    }

    pub fn digest_at(&self, x: usize, y: usize) -> Option<Digest> {
        Self::contains(x, y).then(|| self.row(y).digests[x])
    }

    /// Number of accepted mutations since this canvas was created.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Visits rows top to bottom, each under its own lock.
    pub fn for_each_row<F>(&self, mut f: F)
    where
        F: FnMut(usize, &[Rgb], &[Digest]),
    {
        for y in 0..H {
            let row = self.row(y);
            f(y, &row.colors, &row.digests);
        }
    }

    fn row(&self, y: usize) -> MutexGuard<'_, Row> {
        // A panic while holding a row lock cannot leave a half-written cell.
        self.rows[y].lock().unwrap_or_else(PoisonError::into_inner)
    }
}
