use anyhow::{bail, Context};
use pixelcrush_kernel::config::{HEIGHT, WIDTH};
use pixelcrush_kernel::{Canvas, Digest, Rgb};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Hardness given to fully transparent pixels of a seed image: 8 leading ones.
const DEFAULT_TRANSPARENT: &str = "ff00000000000000000000000000000000000000000000000000000000000000";
/// Hardness given to fully opaque pixels of a seed image: 24 leading ones.
const DEFAULT_OPAQUE: &str = "ffffff0000000000000000000000000000000000000000000000000000000000";

pub fn run(path: &Path, color: Option<&str>, hardness: Option<&str>, force: bool) -> anyhow::Result<()> {
    run_sized::<WIDTH, HEIGHT>(path, color, hardness, force)
}

/// Writes a uniform snapshot: every cell gets `color` (default white) and
/// `hardness` (default all-zero).
pub fn run_sized<const W: usize, const H: usize>(
    path: &Path,
    color: Option<&str>,
    hardness: Option<&str>,
    force: bool,
) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to replace it)", path.display());
    }

    let color = match color {
        Some(hex_str) => {
            let mut bytes = [0u8; 3];
            hex::decode_to_slice(hex_str, &mut bytes).context("color must be 6 hex characters")?;
            Rgb::from_bytes(bytes)
        }
        None => Rgb::WHITE,
    };
    let hardness = match hardness {
        Some(hex_str) => parse_hardness(hex_str)?,
        None => Digest::ZERO,
    };

    let blob = Canvas::<W, H>::filled(color, hardness).snapshot();
    std::fs::write(path, &blob).with_context(|| format!("writing {}", path.display()))?;

    println!("Wrote {} bytes to {}", blob.len(), path.display());
    println!("  color    {:02x}{:02x}{:02x}", color.r, color.g, color.b);
    println!("  hardness {}", hardness);
    Ok(())
}

pub fn from_image(
    image: &Path,
    path: &Path,
    transparent: Option<&str>,
    opaque: Option<&str>,
    force: bool,
) -> anyhow::Result<()> {
    from_image_sized::<WIDTH, HEIGHT>(image, path, transparent, opaque, force)
}

/// Seeds a snapshot from an 8-bit RGBA PNG of exactly `W`x`H` pixels.
///
/// Colors come from the RGB channels. Alpha only picks the hardness: 0 gets
/// `transparent`, 255 gets `opaque`, anything in between is an error.
pub fn from_image_sized<const W: usize, const H: usize>(
    image: &Path,
    path: &Path,
    transparent: Option<&str>,
    opaque: Option<&str>,
    force: bool,
) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to replace it)", path.display());
    }
    let transparent = parse_hardness(transparent.unwrap_or(DEFAULT_TRANSPARENT))?;
    let opaque = parse_hardness(opaque.unwrap_or(DEFAULT_OPAQUE))?;

    let file = File::open(image).with_context(|| format!("opening {}", image.display()))?;
    let mut reader = png::Decoder::new(BufReader::new(file))
        .read_info()
        .with_context(|| format!("reading {}", image.display()))?;
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .with_context(|| format!("decoding {}", image.display()))?;

    if info.color_type != png::ColorType::Rgba || info.bit_depth != png::BitDepth::Eight {
        bail!("{} must be 8-bit RGBA, found {:?} {:?}", image.display(), info.color_type, info.bit_depth);
    }
    if (info.width as usize, info.height as usize) != (W, H) {
        bail!("{} is {}x{}, expected {}x{}", image.display(), info.width, info.height, W, H);
    }

    let mut colors = Vec::with_capacity(W * H);
    let mut digests = Vec::with_capacity(W * H);
    let mut opaque_cells = 0usize;
    for (i, px) in buf[..info.buffer_size()].chunks_exact(4).enumerate() {
        colors.push(Rgb::new(px[0], px[1], px[2]));
        let hardness = match px[3] {
            0 => transparent,
            255 => {
                opaque_cells += 1;
                opaque
            }
            alpha => bail!("pixel ({}, {}) has partial alpha {}", i % W, i / W, alpha),
        };
        digests.push(hardness);
    }

    let blob = Canvas::<W, H>::from_cells(colors, digests)?.snapshot();
    std::fs::write(path, &blob).with_context(|| format!("writing {}", path.display()))?;

    println!("Wrote {} bytes to {}", blob.len(), path.display());
    println!("  opaque      {} of {} cells", opaque_cells, W * H);
    println!("  transparent {}", transparent);
    println!("  opaque      {}", opaque);
    Ok(())
}

fn parse_hardness(hex_str: &str) -> anyhow::Result<Digest> {
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(hex_str, &mut bytes).context("hardness must be 64 hex characters")?;
    Ok(Digest(bytes))
}
