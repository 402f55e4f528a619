use crate::{
    foundation::core::Canvas,
    model::{RenderParams, TextAlign},
};

/// Horizontal margin on both sides of the quote, in logical units.
pub const SIDE_MARGIN_PX: f64 = 60.0;
/// Space kept free under the quote for the profile section when centering.
pub const PROFILE_RESERVE_PX: f64 = 200.0;
pub const LINE_HEIGHT_FACTOR: f64 = 1.4;

/// Font request for shaping or measuring a run of text.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    /// CSS-style family stack, e.g. `"Inter", sans-serif`.
    pub stack: String,
    pub size_px: f32,
    pub bold: bool,
}

impl FontSpec {
    pub fn regular(stack: impl Into<String>, size_px: f32) -> Self {
        Self {
            stack: stack.into(),
            size_px,
            bold: false,
        }
    }

    pub fn bold(stack: impl Into<String>, size_px: f32) -> Self {
        Self {
            stack: stack.into(),
            size_px,
            bold: true,
        }
    }
}

/// Advance-width measurement of a single line of text.
pub trait TextMeasure {
    fn measure(&mut self, text: &str, font: &FontSpec) -> f32;
}

/// Surround `text` with literal double quotes unless it already starts with one.
pub fn quote_wrap(text: &str) -> String {
    if text.starts_with('"') {
        text.to_string()
    } else {
        format!("\"{text}\"")
    }
}

/// Greedy word wrap on single spaces.
///
/// A word is appended while `measure(current + " " + word)` stays strictly below
/// `max_width_px`. Words wider than the limit are never split and overflow on their own line.
/// The result always holds at least one (possibly empty) line.
pub fn wrap(text: &str, max_width_px: f32, mut measure: impl FnMut(&str) -> f32) -> Vec<String> {
    let mut words = text.split(' ');
    let mut current = words.next().unwrap_or_default().to_string();
    let mut lines = Vec::new();

    for word in words {
        let candidate = format!("{current} {word}");
        if measure(&candidate) < max_width_px {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    lines.push(current);
    lines
}

/// Wrapped and vertically placed quote.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub font: FontSpec,
    pub align: TextAlign,
    pub line_height: f64,
    /// Baseline of the first line.
    pub start_y: f64,
    pub anchor_x: f64,
}

impl TextBlock {
    pub fn height(&self) -> f64 {
        self.lines.len() as f64 * self.line_height
    }

    /// Baseline of line `index`.
    pub fn line_y(&self, index: usize) -> f64 {
        self.start_y + index as f64 * self.line_height
    }
}

/// Anchor X a text primitive aligns each line against.
pub fn anchor_x(canvas: Canvas, align: TextAlign) -> f64 {
    match align {
        TextAlign::Left => SIDE_MARGIN_PX,
        TextAlign::Center => canvas.center_x(),
        TextAlign::Right => f64::from(canvas.width) - SIDE_MARGIN_PX,
    }
}

/// Lay out the quote for `canvas`. Returns `None` for empty or whitespace-only quotes.
pub fn layout_quote(
    params: &RenderParams,
    canvas: Canvas,
    measurer: &mut dyn TextMeasure,
) -> Option<TextBlock> {
    if params.quote_text.trim().is_empty() {
        return None;
    }

    let font = FontSpec::regular(params.font_family.font_stack(), params.font_size_px as f32);
    let display_text = quote_wrap(&params.quote_text);
    let max_width = f64::from(canvas.width) - 2.0 * SIDE_MARGIN_PX;
    let lines = wrap(&display_text, max_width as f32, |s| measurer.measure(s, &font));

    let line_height = f64::from(params.font_size_px) * LINE_HEIGHT_FACTOR;
    let block_height = lines.len() as f64 * line_height;
    let start_y = (f64::from(canvas.height) - block_height - PROFILE_RESERVE_PX) / 2.0;
    tracing::debug!(lines = lines.len(), start_y, "quote laid out");

    Some(TextBlock {
        lines,
        font,
        align: params.text_align,
        line_height,
        start_y,
        anchor_x: anchor_x(canvas, params.text_align),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
