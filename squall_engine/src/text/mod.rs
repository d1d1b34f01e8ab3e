//! Text layout: measurement-driven line wrapping and line arrangement.
//!
//! Everything here is pure CPU-side logic over the [`FontMetrics`]
//! contract; no glyph rasterization, no drawing. Both the retained GUI
//! text element and the in-scene text component build on this module.

mod layout;

pub use layout::{
    FontMetrics, Line, TextAlign, TextWrapMode,
    letter_wrap, word_wrap, wrap, layout_lines,
};
