// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use memmap2::Mmap;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

const SAVE_PREFIX: &str = "pixelcrush_save_";
const SAVE_EXTENSION: &str = "data";

/// Maps a snapshot file read-only. Length is validated by the canvas decoder.
pub fn map_snapshot(path: &Path) -> io::Result<Mmap> {
    let file = File::open(path)?;
    // SAFETY: the mapping is only read while decoding at startup and the
    // snapshot is never written in place; saves go to fresh files.
    unsafe { Mmap::map(&file) }
}

pub struct SnapshotManager;

impl SnapshotManager {
    /// Writes `blob` to a new `pixelcrush_save_<unix-secs>[_<n>].data` file in
    /// `dir` and returns its path. Never replaces an existing save.
    pub fn save(dir: &Path, blob: &[u8]) -> io::Result<PathBuf> {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::save_at(dir, secs, blob)
    }

    /// Like [`SnapshotManager::save`] with an explicit timestamp.
    ///
    /// The final name is claimed with `create_new` before anything is
    /// written, so two savers can never end up with the same file. The
    /// contents then land through a tmp file renamed over that placeholder.
    pub fn save_at(dir: &Path, secs: u64, blob: &[u8]) -> io::Result<PathBuf> {
        for attempt in 0u32.. {
            let path = dir.join(save_name(secs, attempt));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            }

            let tmp_path = path.with_extension("tmp");
            if let Err(e) = write_and_replace(&tmp_path, &path, blob) {
                let _ = std::fs::remove_file(&tmp_path);
                let _ = std::fs::remove_file(&path);
                return Err(e);
            }
            return Ok(path);
        }
        Err(io::Error::new(io::ErrorKind::AlreadyExists, "save suffixes exhausted"))
    }
}

fn write_and_replace(tmp_path: &Path, path: &Path, blob: &[u8]) -> io::Result<()> {
    // The tmp name is derived from a reserved final name, so it is ours too.
    let mut file = File::create(tmp_path)?;
    file.write_all(blob)?;
    file.sync_all()?;
    drop(file);
    std::fs::rename(tmp_path, path)
}

fn save_name(secs: u64, attempt: u32) -> String {
    if attempt == 0 {
        format!("{}{}.{}", SAVE_PREFIX, secs, SAVE_EXTENSION)
    } else {
        format!("{}{}_{}.{}", SAVE_PREFIX, secs, attempt, SAVE_EXTENSION)
    }
}
