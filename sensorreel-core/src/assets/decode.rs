use anyhow::Context;

use crate::{
    assets::texture::Texture,
    foundation::error::{ReelError, ReelResult},
};

/// Largest raster edge produced from an SVG.
const MAX_SVG_DIM: u32 = 8_192;

/// Decode encoded raster bytes (PNG, JPEG, ...) into a premultiplied texture.
pub fn decode_image(bytes: &[u8]) -> ReelResult<Texture> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Texture::from_premul(width, height, rgba8_premul)
}

/// Parse SVG bytes into a `usvg` tree.
pub fn parse_svg(bytes: &[u8]) -> ReelResult<usvg::Tree> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(tree)
}

/// Rasterize `tree` at `scale` times its intrinsic size.
pub fn rasterize_svg(tree: &usvg::Tree, scale: f32) -> ReelResult<Texture> {
    fn to_px(v: f32) -> ReelResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(ReelError::validation("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    if !scale.is_finite() || scale <= 0.0 {
        return Err(ReelError::validation("svg raster scale must be finite and > 0"));
    }

    let size = tree.size();
    let width = to_px(size.width() * scale)?;
    let height = to_px(size.height() * scale)?;
    if width > MAX_SVG_DIM || height > MAX_SVG_DIM {
        return Err(ReelError::validation(format!(
            "svg raster size too large: {width}x{height} (max {MAX_SVG_DIM}x{MAX_SVG_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| ReelError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Texture::from_premul(width, height, pixmap.data().to_vec())
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
