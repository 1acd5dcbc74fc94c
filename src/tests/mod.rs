pub mod heatmap_tests;
pub mod render_tests;

use crate::config::PAYLOAD_BYTES;
use crate::pixel::{Digest, Rgb};
use crate::record::UpdateRecord;

/// Builds a record whose claimed digest is honest.
pub fn signed_record(x: u16, y: u16, color: Rgb, nonce_seed: u8) -> UpdateRecord {
    let mut record = UpdateRecord {
        x,
        y,
        color,
        nonce: [nonce_seed; 16],
        claimed: Digest::ZERO,
    };
    let bytes = record.to_bytes();
    record.claimed = Digest::of(&bytes[..PAYLOAD_BYTES + 16]);
    record
}

/// Digest with exactly `ones` leading set bits followed by a clear bit.
pub fn digest_with_leading_ones(ones: u32) -> Digest {
    let mut bytes = [0u8; 32];
    for bit in 0..ones.min(256) {
        bytes[(bit / 8) as usize] |= 0x80 >> (bit % 8);
    }
    Digest(bytes)
}
