use std::{borrow::Cow, path::Path};

use crate::{
    foundation::core::Rgba8,
    layout::wrap::{FontSpec, TextMeasure},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Stateful helper for shaping single lines with Parley.
///
/// Families are resolved from the system font collection plus any font files registered from
/// extra directories. Unresolvable stacks fall back to whatever Parley picks for `sans-serif`.
pub struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    registered_families: Vec<String>,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered_families: Vec::new(),
        }
    }

    /// Shaper that also knows every font file found directly inside `dirs`.
    pub fn with_font_dirs<P: AsRef<Path>>(dirs: &[P]) -> Self {
        let mut shaper = Self::new();
        for dir in dirs {
            shaper.load_fonts_from_dir(dir.as_ref());
        }
        shaper
    }

    /// Family names registered from font bytes, in registration order.
    pub fn registered_families(&self) -> &[String] {
        &self.registered_families
    }

    /// Register raw font bytes (TTF/OTF/TTC). Returns the number of families added.
    pub fn register_font_bytes(&mut self, font_bytes: Vec<u8>) -> usize {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes), None);
        let count = families.len();
        for (id, _) in families {
            if let Some(name) = self.font_ctx.collection.family_name(id) {
                self.registered_families.push(name.to_string());
            }
        }
        count
    }

    fn load_fonts_from_dir(&mut self, dir: &Path) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            tracing::warn!(dir = %dir.display(), "font directory is not readable");
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let is_font = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| matches!(e.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"))
                .unwrap_or(false);
            if !is_font {
                continue;
            }
            match std::fs::read(&path) {
                Ok(bytes) => {
                    let added = self.register_font_bytes(bytes);
                    tracing::debug!(path = %path.display(), added, "registered font file");
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "skipping unreadable font file")
                }
            }
        }
    }

    /// Shape `text` as a single unbroken line.
    ///
    /// ASCII whitespace (newlines and tabs included) is drawn as a plain space, so a line never
    /// breaks inside Parley.
    pub fn layout_line(
        &mut self,
        text: &str,
        font: &FontSpec,
        brush: TextBrushRgba8,
    ) -> parley::Layout<TextBrushRgba8> {
        let text = single_line_text(text);
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, &text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(font.stack.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size_px));
        if font.bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(&text);
        layout.break_all_lines(None);
        layout
    }
}

impl TextMeasure for TextShaper {
    /// Advance width including trailing whitespace.
    fn measure(&mut self, text: &str, font: &FontSpec) -> f32 {
        self.layout_line(text, font, TextBrushRgba8::default())
            .full_width()
    }
}

fn single_line_text(text: &str) -> Cow<'_, str> {
    if text.bytes().any(|b| b != b' ' && b.is_ascii_whitespace()) {
        Cow::Owned(text.replace(|c: char| c.is_ascii_whitespace(), " "))
    } else {
        Cow::Borrowed(text)
    }
}
