// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Update Validator.
//!
//! Records are applied strictly in order. A bounds or digest failure aborts
//! the rest of the batch, but records applied before it stay applied.

use crate::canvas::Canvas;
use crate::config::RECORD_BYTES;
use crate::error::{KernelError, Result};
use crate::pixel::Digest;
use crate::record::UpdateRecord;

/// Per-record result of a batch that was processed to the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Accepted(Digest),
    /// Carries the cell's current winning digest.
    Rejected(Digest),
}

impl RecordOutcome {
    pub fn digest(&self) -> Digest {
        match self {
            RecordOutcome::Accepted(d) | RecordOutcome::Rejected(d) => *d,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, RecordOutcome::Accepted(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub records: Vec<RecordOutcome>,
}

impl BatchOutcome {
    pub fn accepted(&self) -> usize {
        self.records.iter().filter(|r| r.is_accepted()).count()
    }

    pub fn rejected(&self) -> usize {
        self.records.len() - self.accepted()
    }

    pub fn all_accepted(&self) -> bool {
        self.rejected() == 0
    }

    /// `None` when every record won. Otherwise the concatenated digests of
    /// all records in order: accepted ones echo their own digest, rejected
    /// ones carry the digest they have to beat.
    pub fn conflict_body(&self) -> Option<Vec<u8>> {
        if self.all_accepted() {
            return None;
        }
        let mut body = Vec::with_capacity(self.records.len() * 32);
        for record in &self.records {
            body.extend_from_slice(record.digest().as_bytes());
        }
        Some(body)
    }
}

/// Validates and applies a batch of concatenated update records.
pub fn apply_batch<const W: usize, const H: usize>(
    canvas: &Canvas<W, H>,
    data: &[u8],
) -> Result<BatchOutcome> {
    let mut outcome = BatchOutcome::default();
    apply_batch_into(canvas, data, &mut outcome)?;
    Ok(outcome)
}

/// Like [`apply_batch`], but records each outcome into `outcome` as it goes,
/// so a caller still sees what was applied before an aborting record.
pub fn apply_batch_into<const W: usize, const H: usize>(
    canvas: &Canvas<W, H>,
    data: &[u8],
    outcome: &mut BatchOutcome,
) -> Result<()> {
    if data.is_empty() || data.len() % RECORD_BYTES != 0 {
        return Err(KernelError::MalformedBatch { len: data.len(), record: RECORD_BYTES });
    }

    outcome.records.reserve(data.len() / RECORD_BYTES);

    for (index, raw) in data.chunks_exact(RECORD_BYTES).enumerate() {
        let record = UpdateRecord::from_bytes(raw)?;
        let (x, y) = (record.x as usize, record.y as usize);

        if !Canvas::<W, H>::contains(x, y) {
            return Err(KernelError::OutOfBounds { index, x, y, width: W, height: H });
        }

        let actual = UpdateRecord::actual_digest(raw);
        if actual != record.claimed {
            return Err(KernelError::DigestMismatch { index });
        }

        let result = match canvas.try_set(x, y, record.color, actual)? {
            None => RecordOutcome::Accepted(actual),
            Some(best) => RecordOutcome::Rejected(best),
        };
        outcome.records.push(result);
    }

    Ok(())
}
