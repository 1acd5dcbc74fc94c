// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use pixelcrush_kernel::render::ImageEncoder;
use pixelcrush_kernel::{KernelError, Result};

/// 8-bit RGB PNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngEncoder;

impl ImageEncoder for PngEncoder {
    fn encode(&self, width: u32, height: u32, rgb: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().map_err(encode_err)?;
            writer.write_image_data(rgb).map_err(encode_err)?;
            writer.finish().map_err(encode_err)?;
        }
        Ok(out)
    }
}

fn encode_err(e: png::EncodingError) -> KernelError {
    KernelError::Encode(e.to_string())
}
