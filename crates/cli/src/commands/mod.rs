pub mod init;
pub mod inspect;
pub mod render;

use anyhow::Context;
use pixelcrush_kernel::Canvas;
use std::path::Path;

/// Maps and decodes a snapshot file.
pub fn load_canvas<const W: usize, const H: usize>(path: &Path) -> anyhow::Result<Canvas<W, H>> {
    let map = pixelcrush_node::persistence::map_snapshot(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let canvas = Canvas::load(&map).with_context(|| format!("decoding {}", path.display()))?;
    Ok(canvas)
}
