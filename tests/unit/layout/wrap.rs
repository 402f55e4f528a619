use super::*;
use crate::model::FontFamily;

/// Every char advances `size_px / 2`, regardless of family or weight.
struct HalfEm;

impl TextMeasure for HalfEm {
    fn measure(&mut self, text: &str, font: &FontSpec) -> f32 {
        text.chars().count() as f32 * font.size_px / 2.0
    }
}

fn ten_px(s: &str) -> f32 {
    s.chars().count() as f32 * 10.0
}

fn params(quote: &str, size: u32, align: TextAlign) -> RenderParams {
    RenderParams {
        quote_text: quote.to_string(),
        font_size_px: size,
        font_family: FontFamily::Inter,
        text_align: align,
    }
}

#[test]
fn empty_input_is_one_empty_line() {
    assert_eq!(wrap("", 100.0, ten_px), vec![String::new()]);
}

#[test]
fn short_text_stays_on_one_line() {
    assert_eq!(wrap("stay curious", 1000.0, ten_px), vec!["stay curious"]);
}

#[test]
fn breaks_when_candidate_reaches_the_limit() {
    // "aaaa bbbb" is 90px: strictly below 100 fits, exactly 90 does not.
    assert_eq!(wrap("aaaa bbbb", 100.0, ten_px), vec!["aaaa bbbb"]);
    assert_eq!(wrap("aaaa bbbb", 90.0, ten_px), vec!["aaaa", "bbbb"]);
}

#[test]
fn wide_word_overflows_on_its_own_line() {
    let lines = wrap("a supercalifragilistic b", 50.0, ten_px);
    assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
}

#[test]
fn joining_lines_reconstructs_the_words() {
    let text = "the quick brown fox jumps over the lazy dog and keeps on running far away";
    for max in [30.0, 80.0, 120.0, 250.0, 10_000.0] {
        let lines = wrap(text, max, ten_px);
        assert!(!lines.is_empty());
        assert_eq!(lines.join(" "), text, "max width {max}");
    }
}

#[test]
fn repeated_spaces_survive_as_empty_words() {
    let lines = wrap("a  b", 1000.0, ten_px);
    assert_eq!(lines.join(" "), "a  b");
}

#[test]
fn quote_wrap_only_adds_missing_quotes() {
    assert_eq!(quote_wrap("Stay curious"), "\"Stay curious\"");
    assert_eq!(quote_wrap("\"Already quoted\""), "\"Already quoted\"");
    assert_eq!(quote_wrap("\"open only"), "\"open only");
    assert_eq!(quote_wrap("ends with\""), "\"ends with\"\"");
}

#[test]
fn whitespace_quote_has_no_block() {
    let canvas = Canvas::square(1080);
    assert!(layout_quote(&params("   ", 32, TextAlign::Center), canvas, &mut HalfEm).is_none());
    assert!(layout_quote(&params("", 32, TextAlign::Center), canvas, &mut HalfEm).is_none());
}

#[test]
fn single_line_block_is_centered_above_the_profile_reserve() {
    let canvas = Canvas::square(1080);
    let block =
        layout_quote(&params("Stay curious", 32, TextAlign::Center), canvas, &mut HalfEm).unwrap();

    assert_eq!(block.lines, vec!["\"Stay curious\""]);
    assert!((block.line_height - 44.8).abs() < 1e-9);
    assert!((block.height() - 44.8).abs() < 1e-9);
    assert!((block.start_y - (1080.0 - 44.8 - 200.0) / 2.0).abs() < 1e-9);
    assert_eq!(block.anchor_x, 540.0);
    assert_eq!(block.font, FontSpec::regular("\"Inter\", sans-serif", 32.0));
}

#[test]
fn long_quote_wraps_against_width_minus_margins() {
    // 64px font => 32px per char; 960px leaves room for 29 chars per line.
    let quote = "one two three four five six seven eight nine ten eleven twelve";
    let canvas = Canvas::square(1080);
    let block = layout_quote(&params(quote, 64, TextAlign::Left), canvas, &mut HalfEm).unwrap();

    assert!(block.lines.len() > 1);
    for line in &block.lines {
        assert!(line.chars().count() * 32 < 960, "line {line:?} too wide");
    }
    assert_eq!(block.lines.join(" "), format!("\"{quote}\""));
    assert!((block.line_y(1) - block.line_y(0) - block.line_height).abs() < 1e-9);
}

#[test]
fn anchors_follow_alignment() {
    let canvas = Canvas::square(1080);
    assert_eq!(anchor_x(canvas, TextAlign::Left), 60.0);
    assert_eq!(anchor_x(canvas, TextAlign::Center), 540.0);
    assert_eq!(anchor_x(canvas, TextAlign::Right), 1020.0);
}
