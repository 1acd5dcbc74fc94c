// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Fixed-size wire records.

use crate::config::{DIGEST_BYTES, NONCE_BYTES, PAYLOAD_BYTES, RECORD_BYTES};
use crate::error::{KernelError, Result};
use crate::pixel::{Digest, Rgb};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

/// One proof-of-work claim on a cell.
///
/// ```text
/// [u16 x][u16 y][u8 r][u8 g][u8 b][16 nonce][32 claimed digest]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRecord {
    pub x: u16,
    pub y: u16,
    pub color: Rgb,
    pub nonce: [u8; NONCE_BYTES],
    pub claimed: Digest,
}

impl UpdateRecord {
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() != RECORD_BYTES {
            return Err(KernelError::InvalidPayloadLength { expected: RECORD_BYTES, found: data.len() });
        }
        let mut cursor = Cursor::new(data);
        let (x, y, color) = read_payload(&mut cursor)?;

        let mut nonce = [0u8; NONCE_BYTES];
        cursor.read_exact(&mut nonce)?;
        let mut claimed = [0u8; DIGEST_BYTES];
        cursor.read_exact(&mut claimed)?;

        Ok(Self { x, y, color, nonce, claimed: Digest(claimed) })
    }

    /// Digest actually earned by `data`: SHA-256 over everything but the
    /// trailing claimed digest.
    pub fn actual_digest(data: &[u8]) -> Digest {
        Digest::of(&data[..data.len().saturating_sub(DIGEST_BYTES)])
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(RECORD_BYTES);
        out.extend_from_slice(&self.x.to_le_bytes());
        out.extend_from_slice(&self.y.to_le_bytes());
        out.extend_from_slice(&self.color.to_bytes());
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(self.claimed.as_bytes());
        out
    }
}

/// Administrative color write, no proof of work.
///
/// ```text
/// [u16 x][u16 y][u8 r][u8 g][u8 b]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverwriteRecord {
    pub x: u16,
    pub y: u16,
    pub color: Rgb,
}

impl OverwriteRecord {
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() != PAYLOAD_BYTES {
            return Err(KernelError::InvalidPayloadLength { expected: PAYLOAD_BYTES, found: data.len() });
        }
        let (x, y, color) = read_payload(&mut Cursor::new(data))?;
        Ok(Self { x, y, color })
    }
}

/// Two-byte little-endian row index, as sent to the row hardness query.
pub fn parse_row_index(data: &[u8]) -> Result<u16> {
    if data.len() != 2 {
        return Err(KernelError::InvalidPayloadLength { expected: 2, found: data.len() });
    }
    Ok(Cursor::new(data).read_u16::<LittleEndian>()?)
}

fn read_payload(cursor: &mut Cursor<&[u8]>) -> Result<(u16, u16, Rgb)> {
    let x = cursor.read_u16::<LittleEndian>()?;
    let y = cursor.read_u16::<LittleEndian>()?;
    let r = cursor.read_u8()?;
    let g = cursor.read_u8()?;
    let b = cursor.read_u8()?;
    Ok((x, y, Rgb::new(r, g, b)))
}
