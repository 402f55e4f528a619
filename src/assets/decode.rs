use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{QuoteCardError, QuoteCardResult};

/// Largest edge an SVG avatar is rasterized at. Avatars are drawn at 80 logical px, so this
/// leaves headroom for high-density output.
pub const SVG_RASTER_EDGE_PX: u32 = 512;

/// Longest edge kept for decoded raster avatars. Larger images are downscaled on decode so they
/// stay drawable by the CPU backend.
pub const MAX_RASTER_EDGE_PX: u32 = 2048;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Decoded bitmap in premultiplied RGBA8 form.
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Build from straight RGBA8 pixels.
    pub fn from_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> QuoteCardResult<Self> {
        if rgba.len() != width as usize * height as usize * 4 {
            return Err(QuoteCardError::validation("rgba8 byte length mismatch"));
        }
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
        })
    }
}

/// Decode raster bytes or, when they look like SVG, rasterize them.
pub fn decode_avatar(bytes: &[u8]) -> QuoteCardResult<PreparedImage> {
    if looks_like_svg(bytes) {
        rasterize_svg(bytes)
    } else {
        decode_image(bytes)
    }
}

/// Decode raster bytes, downscaling so the longest edge is at most [`MAX_RASTER_EDGE_PX`].
pub fn decode_image(bytes: &[u8]) -> QuoteCardResult<PreparedImage> {
    let mut dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    if dyn_img.width().max(dyn_img.height()) > MAX_RASTER_EDGE_PX {
        dyn_img = dyn_img.thumbnail(MAX_RASTER_EDGE_PX, MAX_RASTER_EDGE_PX);
    }
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PreparedImage::from_rgba8(width, height, rgba.into_raw())
}

/// Parse an SVG document and rasterize it so its longest edge is [`SVG_RASTER_EDGE_PX`].
pub fn rasterize_svg(bytes: &[u8]) -> QuoteCardResult<PreparedImage> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;

    let size = tree.size();
    let scale = SVG_RASTER_EDGE_PX as f32 / size.width().max(size.height());
    let width = ((size.width() * scale).round() as u32).max(1);
    let height = ((size.height() * scale).round() as u32).max(1);

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| QuoteCardError::validation("failed to allocate svg pixmap"))?;
    let xform = resvg::tiny_skia::Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    // tiny-skia pixmaps are already premultiplied.
    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(pixmap.take()),
    })
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start_matches('\u{feff}').trim_start();
    head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg"))
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
