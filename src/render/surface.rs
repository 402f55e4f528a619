use std::io::Cursor;

use anyhow::Context;

use crate::foundation::{
    core::Canvas,
    error::{QuoteCardError, QuoteCardResult},
};

/// Rendered card: a full-resolution pixel buffer plus its logical and display geometry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    /// Logical design space the card was drawn in.
    pub canvas: Canvas,
    /// Pixel buffer width.
    pub width: u32,
    /// Pixel buffer height.
    pub height: u32,
    /// Size the card should be shown at, independent of density.
    pub display_width: u32,
    pub display_height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub data: Vec<u8>,
}

impl Surface {
    /// Premultiplied RGBA at pixel `(x, y)`, `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha RGBA8 copy of the pixel buffer.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = px[3] as u16;
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    /// Encode the full-resolution buffer as PNG.
    pub fn encode_png(&self) -> QuoteCardResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.to_straight_rgba8())
            .ok_or_else(|| QuoteCardError::validation("surface byte length mismatch"))?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode surface as png")?;
        Ok(buf)
    }
}
