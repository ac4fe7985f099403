use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::{
    assets::decode::{decode_image, parse_svg, rasterize_svg},
    foundation::error::{ReelError, ReelResult},
};

/// Default supersampling applied when rasterizing SVG textures.
pub const SVG_RASTER_SCALE: f32 = 4.0;

/// Decoded image in premultiplied RGBA8, cheap to clone.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl Texture {
    /// Wrap premultiplied pixels, checking the buffer length.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> ReelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReelError::validation("texture width/height must be non-zero"));
        }
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if rgba8_premul.len() != expected {
            return Err(ReelError::validation(format!(
                "texture byte len {} does not match {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Load a `.png` (or any raster format `image` knows) or `.svg` file.
    pub fn load(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read texture '{}'", path.display()))?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("svg") => Self::from_svg(&bytes, SVG_RASTER_SCALE),
            Some("png" | "jpg" | "jpeg") => decode_image(&bytes),
            other => Err(ReelError::validation(format!(
                "unsupported texture type: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }

    /// Rasterize SVG source at `scale` times its intrinsic size.
    pub fn from_svg(bytes: &[u8], scale: f32) -> ReelResult<Self> {
        let tree = parse_svg(bytes)?;
        rasterize_svg(&tree, scale)
    }

    /// Rotate by `k` quarter turns counter-clockwise.
    pub fn rotate90(&self, k: i32) -> Self {
        let turns = k.rem_euclid(4);
        if turns == 0 {
            return self.clone();
        }
        let (w, h) = (self.width as usize, self.height as usize);
        let (nw, nh) = if turns % 2 == 1 { (h, w) } else { (w, h) };
        let src = self.rgba8_premul.as_slice();
        let mut out = vec![0u8; src.len()];
        for y in 0..h {
            for x in 0..w {
                let (nx, ny) = match turns {
                    1 => (y, w - 1 - x),
                    2 => (w - 1 - x, h - 1 - y),
                    _ => (h - 1 - y, x),
                };
                let si = (y * w + x) * 4;
                let di = (ny * nw + nx) * 4;
                out[di..di + 4].copy_from_slice(&src[si..si + 4]);
            }
        }
        Self {
            width: nw as u32,
            height: nh as u32,
            rgba8_premul: Arc::new(out),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/texture.rs"]
mod tests;
