// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! pixelcrush-kernel: a shared canvas where every cell is owned by whoever
//! presents the largest SHA-256 digest for it.

pub mod config;
pub mod error;
pub mod pixel;
pub mod canvas;
pub mod record;
pub mod batch;
pub mod heatmap;
pub mod render;
pub mod snapshot;

pub use canvas::Canvas;
pub use error::{KernelError, Result};
pub use pixel::{Digest, Rgb};

#[cfg(test)]
pub mod tests;
