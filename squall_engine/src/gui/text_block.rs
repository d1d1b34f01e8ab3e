/// TextBlock — retained text element for GUI layout trees.
///
/// Caches its wrapped lines behind a dirty flag: lines are regenerated
/// only when text, alignment, wrap mode, font, or the allotted width
/// actually change. This is a correctness contract, not an optimization
/// — stale lines must never be rendered. The shaped draw cache is
/// invalidated separately on color or layer changes.

use std::sync::Arc;
use glam::Vec2;

use crate::graphics::{Color, Font, GraphicsBackend, Rect, TextCacheHandle};
use crate::text::{layout_lines, Line, TextAlign, TextWrapMode};

/// Shaped-output cache and the inputs it was shaped with
struct CachedDraw {
    handle: TextCacheHandle,
    color: Color,
    layer: i32,
}

pub struct TextBlock {
    font: Arc<dyn Font>,
    text: String,
    text_align: TextAlign,
    wrap_mode: TextWrapMode,
    lines: Vec<Line>,
    dirty: bool,
    last_width: f32,
    cache: Option<CachedDraw>,
}

impl TextBlock {
    pub fn new(font: Arc<dyn Font>) -> Self {
        Self {
            font,
            text: "Text Block".to_string(),
            text_align: TextAlign::Left,
            wrap_mode: TextWrapMode::WordWrap,
            lines: Vec::new(),
            dirty: true,
            last_width: 0.0,
            cache: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.text != text {
            self.text = text;
            self.dirty = true;
        }
    }

    pub fn text_align(&self) -> TextAlign {
        self.text_align
    }

    pub fn set_text_align(&mut self, align: TextAlign) {
        if self.text_align != align {
            self.text_align = align;
            self.dirty = true;
        }
    }

    pub fn wrap_mode(&self) -> TextWrapMode {
        self.wrap_mode
    }

    pub fn set_wrap_mode(&mut self, mode: TextWrapMode) {
        if self.wrap_mode != mode {
            self.wrap_mode = mode;
            self.dirty = true;
        }
    }

    pub fn set_font(&mut self, font: Arc<dyn Font>) {
        if !Arc::ptr_eq(&self.font, &font) {
            self.font = font;
            self.dirty = true;
        }
    }

    /// Laid-out lines from the last measure/arrange pass
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Measure the element at the given allotted width.
    ///
    /// Regenerates lines if anything changed since the last measure; the
    /// result is the max line width by the summed line height.
    pub fn measure(&mut self, allotted_width: f32) -> Vec2 {
        self.cache = None;

        if (self.last_width - allotted_width).abs() >= 0.001 {
            self.dirty = true;
        }

        self.regenerate_lines(allotted_width);
        self.last_width = allotted_width;

        let mut size = Vec2::ZERO;
        for line in &self.lines {
            size.x = size.x.max(line.measure.x);
            size.y += self.font.line_height();
        }

        size
    }

    /// Assign per-line positions inside the content rectangle.
    pub fn arrange(&mut self, content: Rect) {
        let height = self.font.line_height();
        let mut y = content.y;

        for line in &mut self.lines {
            let x = match self.text_align {
                TextAlign::Right => content.right() - line.measure.x,
                TextAlign::Center => content.x + (content.width - line.measure.x) / 2.0,
                TextAlign::Left => content.x,
            };

            line.position = Vec2::new(x, y);
            y += height;
        }
    }

    /// Submit the element's text, shaping into the backend cache only
    /// when it is absent or invalidated.
    pub fn paint(&mut self, graphics: &mut dyn GraphicsBackend, color: Color, layer: i32) {
        if let Some(cache) = &self.cache {
            if cache.color != color || cache.layer != layer {
                self.cache = None;
            }
        }

        if self.lines.is_empty() {
            return;
        }

        if self.cache.is_none() {
            let mut handle: Option<TextCacheHandle> = None;
            for line in &self.lines {
                match handle {
                    None => {
                        handle = Some(self.font.draw(&line.text, line.position, color, layer));
                    }
                    Some(cache) => {
                        self.font.draw_cached(cache, &line.text, line.position, color, layer);
                    }
                }
            }
            self.cache = handle.map(|handle| CachedDraw { handle, color, layer });
        }

        if let Some(cache) = &self.cache {
            graphics.submit_text_cache(cache.handle);
        }
    }

    fn regenerate_lines(&mut self, wrap_width: f32) {
        if !self.dirty {
            return;
        }

        self.lines = layout_lines(self.font.as_ref(), &self.text, self.wrap_mode, wrap_width);
        self.dirty = false;
    }
}

#[cfg(test)]
#[path = "text_block_tests.rs"]
mod tests;
