pub use kurbo::{Affine, Circle, Point};

/// Logical design space of every card, before device-density scaling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in logical units.
    pub width: u32,
    /// Height in logical units.
    pub height: u32,
}

impl Canvas {
    /// Square canvas with the given side length.
    pub const fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    /// Horizontal midpoint in logical units.
    pub fn center_x(self) -> f64 {
        f64::from(self.width) / 2.0
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::from_hex_rgb(0xffffff);

    /// Build an opaque color from a `0xRRGGBB` literal.
    pub const fn from_hex_rgb(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 255,
        }
    }

    /// `#rrggbb` form, alpha is dropped when opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Premultiplied channels, rounding the same way as image decoding.
    pub fn to_premul(self) -> [u8; 4] {
        let a = self.a as u16;
        let premul = |c: u8| -> u8 { ((c as u16 * a + 127) / 255) as u8 };
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
