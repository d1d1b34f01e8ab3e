/// Text wrapping and line layout.
///
/// Two wrap modes, both pure functions of (font measurement, input text,
/// wrap width):
///
/// - **Letter wrap**: greedy per-grapheme accumulation; a break is
///   emitted before any grapheme whose measured width would overflow the
///   wrap width.
/// - **Word wrap**: explicit newlines are hard breaks; within a line,
///   whitespace-terminated words accumulate until the next word would
///   overflow — but a break is only emitted when the current line is
///   non-empty, so a single too-long word can never loop. Words whose
///   trimmed width alone exceeds the wrap width are letter-wrapped and
///   spliced in, carrying the last fragment's width forward.
///
/// A non-positive wrap width disables wrapping entirely.

use glam::Vec2;
use unicode_segmentation::UnicodeSegmentation;

/// Glyph-measurement contract required by the layout engine.
///
/// Implemented by every font provider; the layout functions need nothing
/// else from a font.
pub trait FontMetrics {
    /// Measured width/height of `text` as a single line
    fn measure(&self, text: &str) -> Vec2;

    /// Vertical advance between consecutive lines
    fn line_height(&self) -> f32;
}

/// How text is broken into lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextWrapMode {
    /// No wrapping; explicit newlines only
    None,
    /// Break between words, falling back to letter wrap for oversized words
    WordWrap,
    /// Break between graphemes
    LetterWrap,
}

/// Horizontal alignment of wrapped lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// One laid-out line of text.
///
/// `measure` is filled during line generation; `position` during
/// arrangement. Lines are regenerated whenever text, wrap width, wrap
/// mode, or font change — stale lines must never be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub measure: Vec2,
    pub position: Vec2,
}

/// Wrap `text` by breaking between graphemes.
///
/// Returns the input unchanged when `wrap_width <= 0`, and an empty
/// string for empty or whitespace-only input.
pub fn letter_wrap<F: FontMetrics + ?Sized>(font: &F, text: &str, wrap_width: f32) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    if wrap_width <= 0.0 {
        return text.to_string();
    }

    let mut line_width = 0.0f32;
    let mut out = String::with_capacity(text.len());

    for grapheme in text.graphemes(true) {
        let m = font.measure(grapheme).x;
        if line_width + m > wrap_width {
            out.push('\n');
            line_width = 0.0;
        }

        line_width += m;
        out.push_str(grapheme);
    }

    out
}

/// Wrap `text` by breaking between whitespace-terminated words.
///
/// Each word keeps its terminating whitespace, so re-wrapping already
/// wrapped text at the same width reproduces the same line boundaries.
/// Returns the input unchanged when `wrap_width <= 0`, and an empty
/// string for empty or whitespace-only input.
pub fn word_wrap<F: FontMetrics + ?Sized>(font: &F, text: &str, wrap_width: f32) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    if wrap_width <= 0.0 {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut is_first_line = true;

    for line in text.split('\n') {
        if !is_first_line {
            out.push('\n');
        }
        is_first_line = false;

        let mut line_width = 0.0f32;
        for word in split_words(line) {
            let mut m = font.measure(word).x;
            let trimmed = font.measure(word.trim()).x;

            // Break only when the line already has content; a bare word
            // wider than the wrap width must not break forever.
            if line_width + m > wrap_width && line_width > 0.0 {
                out.push('\n');
                line_width = 0.0;
            }

            if trimmed > wrap_width {
                // The word alone overflows: letter-wrap it and continue
                // from the width of its last fragment.
                let letter_wrapped = letter_wrap(font, word, wrap_width);
                let last = letter_wrapped.rsplit('\n').next().unwrap_or("");
                m = font.measure(last).x;
                out.push_str(&letter_wrapped);
            } else {
                out.push_str(word);
            }

            line_width += m;
        }
    }

    out
}

/// Split a line into words, each ending at (and including) one whitespace
/// character; the final run may have no terminator.
fn split_words(line: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = 0;

    for (i, ch) in line.char_indices() {
        if ch.is_whitespace() {
            let end = i + ch.len_utf8();
            words.push(&line[start..end]);
            start = end;
        }
    }

    if start < line.len() {
        words.push(&line[start..]);
    }

    words
}

/// Wrap `text` according to `mode`.
pub fn wrap<F: FontMetrics + ?Sized>(
    font: &F,
    text: &str,
    mode: TextWrapMode,
    wrap_width: f32,
) -> String {
    match mode {
        TextWrapMode::None => text.to_string(),
        TextWrapMode::WordWrap => word_wrap(font, text, wrap_width),
        TextWrapMode::LetterWrap => letter_wrap(font, text, wrap_width),
    }
}

/// Wrap `text` and measure every resulting line.
///
/// Positions are left at the origin; arrangement assigns them later.
pub fn layout_lines<F: FontMetrics + ?Sized>(
    font: &F,
    text: &str,
    mode: TextWrapMode,
    wrap_width: f32,
) -> Vec<Line> {
    wrap(font, text, mode, wrap_width)
        .split('\n')
        .map(|line| Line {
            text: line.to_string(),
            measure: font.measure(line),
            position: Vec2::ZERO,
        })
        .collect()
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
