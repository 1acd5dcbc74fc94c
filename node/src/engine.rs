// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::path::PathBuf;
use std::sync::Arc;

use pixelcrush_kernel::batch::{apply_batch_into, BatchOutcome};
use pixelcrush_kernel::record::{parse_row_index, OverwriteRecord};
use pixelcrush_kernel::render::{RenderCache, RenderKind};
use pixelcrush_kernel::snapshot::fingerprint;
use pixelcrush_kernel::{Canvas, Digest};

use crate::config::NodeConfig;
use crate::encoder::PngEncoder;
use crate::errors::EngineError;
use crate::persistence::{map_snapshot, SnapshotManager};

/// The canvas plus everything derived from it. Internally synchronized, so
/// handlers share it through an `Arc` without an outer lock.
pub struct Engine<const W: usize, const H: usize> {
    canvas: Canvas<W, H>,
    renders: RenderCache,
    encoder: PngEncoder,
    admin_digest: Digest,
    pub save_dir: PathBuf,
}

impl<const W: usize, const H: usize> Engine<W, H> {
    pub fn new(cfg: &NodeConfig, canvas: Canvas<W, H>) -> Self {
        Self {
            canvas,
            renders: RenderCache::new(),
            encoder: PngEncoder,
            admin_digest: cfg.admin_digest,
            save_dir: cfg.save_dir.clone(),
        }
    }

    /// Decodes a snapshot blob into a fresh engine.
    pub fn restore(cfg: &NodeConfig, data: &[u8]) -> Result<Self, EngineError> {
        Ok(Self::new(cfg, Canvas::load(data)?))
    }

    /// Loads the snapshot named by `cfg.snapshot_path`.
    pub fn open(cfg: &NodeConfig) -> Result<Self, EngineError> {
        let map = map_snapshot(&cfg.snapshot_path)?;
        tracing::info!("Loading {} bytes from {:?}", map.len(), cfg.snapshot_path);
        Self::restore(cfg, &map)
    }

    pub fn canvas(&self) -> &Canvas<W, H> {
        &self.canvas
    }

    pub fn renders(&self) -> &RenderCache {
        &self.renders
    }

    /// Body: little-endian u16 row index. Returns the row's digests concatenated.
    pub fn row_hardness(&self, body: &[u8]) -> Result<Vec<u8>, EngineError> {
        let y = parse_row_index(body)?;
        let row = self.canvas.hardness_at(y as usize)?;
        let mut out = Vec::with_capacity(row.len() * 32);
        for digest in &row {
            out.extend_from_slice(digest.as_bytes());
        }
        Ok(out)
    }

    pub fn submit(&self, body: &[u8]) -> Result<BatchOutcome, EngineError> {
        let mut outcome = BatchOutcome::default();
        let result = apply_batch_into(&self.canvas, body, &mut outcome);

        // Records before an aborting one stay applied and are counted.
        let accepted = outcome.accepted() as u64;
        metrics::counter!("pixelcrush_records_accepted_total", accepted);
        metrics::counter!("pixelcrush_records_rejected_total", outcome.rejected() as u64);
        if accepted > 0 {
            self.renders.invalidate();
        }

        if let Err(e) = result {
            metrics::counter!("pixelcrush_batches_failed_total", 1);
            tracing::debug!("Batch aborted after {} records ({} accepted): {}", outcome.records.len(), accepted, e);
            return Err(e.into());
        }

        tracing::debug!("Batch of {} records: {} accepted", outcome.records.len(), accepted);
        Ok(outcome)
    }

    pub fn is_admin(&self, secret: &str) -> bool {
        Digest::of(secret.as_bytes()) == self.admin_digest
    }

    /// Body: `[u16 x][u16 y][r][g][b]`. Color only; hardness is untouched.
    pub fn overwrite_pixel(&self, body: &[u8]) -> Result<(), EngineError> {
        let record = OverwriteRecord::from_bytes(body)?;
        self.canvas.overwrite(record.x as usize, record.y as usize, record.color)?;
        self.renders.invalidate();
        tracing::info!("Admin overwrite at ({}, {})", record.x, record.y);
        Ok(())
    }

    /// Writes a snapshot to a new file under `save_dir`.
    pub fn save_snapshot(&self) -> Result<PathBuf, EngineError> {
        let blob = self.canvas.snapshot();
        let path = SnapshotManager::save(&self.save_dir, &blob)?;

        metrics::counter!("pixelcrush_snapshots_saved_total", 1);
        metrics::gauge!("pixelcrush_snapshot_size_bytes", blob.len() as f64);
        tracing::info!(
            "Snapshot saved to {:?} (blake3 {})",
            path,
            hex::encode(fingerprint(&blob))
        );
        Ok(path)
    }

    pub fn render(&self, kind: RenderKind) -> Result<Arc<[u8]>, EngineError> {
        let before = self.renders.render_count();
        let bytes = self.renders.get(kind, &self.canvas, &self.encoder)?;
        if self.renders.render_count() != before {
            metrics::counter!("pixelcrush_renders_total", 1);
        }
        Ok(bytes)
    }

    pub fn place_png(&self) -> Result<Arc<[u8]>, EngineError> {
        self.render(RenderKind::TrueColor)
    }

    pub fn heatmap_png(&self) -> Result<Arc<[u8]>, EngineError> {
        self.render(RenderKind::Heatmap)
    }
}
