// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KernelError {
    #[error("Snapshot length mismatch: expected {expected} bytes, found {found}")]
    Format { expected: usize, found: usize },

    #[error("Row {y} out of range (height {height})")]
    OutOfRange { y: usize, height: usize },

    #[error("Malformed batch: {len} bytes is not a positive multiple of {record} bytes")]
    MalformedBatch { len: usize, record: usize },

    #[error("Record {index}: ({x}, {y}) out of {width}x{height} bounds")]
    OutOfBounds {
        index: usize,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("Record {index}: digest mismatch")]
    DigestMismatch { index: usize },

    #[error("Invalid payload length: expected {expected}, found {found}")]
    InvalidPayloadLength { expected: usize, found: usize },

    #[error("Image encoding failed: {0}")]
    Encode(String),

    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
}

impl KernelError {
    /// Whether the caller sent something unusable, as opposed to a failure on our side.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, KernelError::Encode(_) | KernelError::IoError(_))
    }
}

pub type Result<T> = std::result::Result<T, KernelError>;
