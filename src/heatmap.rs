// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Hardness banding: leading one-bits of a digest mapped onto
//! black → red → yellow → white → blue, magenta beyond.

use crate::config::HEATMAP_OFFSET;
use crate::pixel::{Digest, Rgb};

const STEP: i32 = 17;

/// Number of bands `band_index` can return.
pub const BANDS: usize = 5;

/// Which of the five bands `v` falls into, 0 (black-red) to 4 (magenta).
pub fn band_index(v: u32) -> usize {
    match v {
        0..=15 => 0,
        16..=30 => 1,
        31..=45 => 2,
        46..=60 => 3,
        _ => 4,
    }
}

pub fn band(v: u32) -> Rgb {
    let index = band_index(v);
    let v = v as i32;
    match index {
        0 => Rgb::new(channel(v * STEP), 0, 0),
        1 => Rgb::new(255, channel((v - 15) * STEP), 0),
        2 => Rgb::new(255, 255, channel((v - 30) * STEP)),
        3 => {
            // Negative for every v in this band; clamps to pure blue.
            let k = channel(255 - (v - 30) * STEP);
            Rgb::new(k, k, 255)
        }
        _ => Rgb::new(255, 0, 255),
    }
}

pub fn heat_color(digest: &Digest) -> Rgb {
    band(heat_value(digest))
}

/// Leading ones minus the offset, floored at zero.
pub fn heat_value(digest: &Digest) -> u32 {
    digest.leading_ones().saturating_sub(HEATMAP_OFFSET)
}

fn channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}
