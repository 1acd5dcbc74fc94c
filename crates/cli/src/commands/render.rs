use anyhow::Context;
use pixelcrush_kernel::config::{HEIGHT, WIDTH};
use pixelcrush_kernel::render::{render_rgb, ImageEncoder, RenderKind};
use pixelcrush_node::encoder::PngEncoder;
use std::path::{Path, PathBuf};

use super::load_canvas;

pub fn run(path: &Path, out_dir: &Path) -> anyhow::Result<()> {
    for written in run_sized::<WIDTH, HEIGHT>(path, out_dir)? {
        println!("Wrote {}", written.display());
    }
    Ok(())
}

/// Writes `place.png` and `heatmap.png` for a snapshot into `out_dir`.
pub fn run_sized<const W: usize, const H: usize>(path: &Path, out_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let canvas = load_canvas::<W, H>(path)?;
    let mut written = Vec::new();

    for (kind, name) in [(RenderKind::TrueColor, "place.png"), (RenderKind::Heatmap, "heatmap.png")] {
        let png = PngEncoder.encode(W as u32, H as u32, &render_rgb(kind, &canvas))?;
        let target = out_dir.join(name);
        std::fs::write(&target, png).with_context(|| format!("writing {}", target.display()))?;
        written.push(target);
    }

    Ok(written)
}
