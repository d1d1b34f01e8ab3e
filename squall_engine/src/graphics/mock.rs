/// Mock graphics backends for unit tests (no GPU required).
///
/// Every mock records its calls as strings into a shared [`Journal`],
/// letting tests assert on exact submission order the same way the
/// backends would observe it.

use std::cell::Cell;
use std::sync::{Arc, Mutex};

use glam::{Mat4, Vec2};

use crate::error::{Error, Result};
use crate::gui::GuiSystem;
use crate::input::{
    KeyCharEvent, KeyEvent, MouseButtonEvent, MouseMoveEvent, MouseScrollEvent,
};
use crate::scene::GameTime;
use crate::text::FontMetrics;
use super::{
    Color, Font, GraphicsBackend, PostProcessSettings, PostProcessor, Rect,
    RenderTargetHandle, TextCacheHandle, TextureHandle,
};

/// Shared call log for mock backends
pub type Journal = Arc<Mutex<Vec<String>>>;

/// Create an empty journal
pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

/// Record one entry
fn record(journal: &Journal, entry: String) {
    journal.lock().unwrap().push(entry);
}

// ============================================================================
// Mock graphics backend
// ============================================================================

/// Command-recording graphics backend.
pub struct MockGraphics {
    journal: Journal,
    next_handle: u64,
}

impl MockGraphics {
    pub fn new(journal: Journal) -> Self {
        Self { journal, next_handle: 0 }
    }
}

impl GraphicsBackend for MockGraphics {
    fn create_render_target(&mut self, width: u32, height: u32) -> Result<RenderTargetHandle> {
        self.next_handle += 1;
        let handle = RenderTargetHandle(self.next_handle);
        record(
            &self.journal,
            format!("create_render_target {}x{} -> #{}", width, height, handle.0),
        );
        Ok(handle)
    }

    fn dispose_render_target(&mut self, target: RenderTargetHandle) {
        record(&self.journal, format!("dispose_render_target #{}", target.0));
    }

    fn set_render_target(&mut self, target: Option<RenderTargetHandle>) {
        match target {
            Some(t) => record(&self.journal, format!("set_render_target #{}", t.0)),
            None => record(&self.journal, "set_render_target none".to_string()),
        }
    }

    fn clear(&mut self, color: Color) {
        record(
            &self.journal,
            format!("clear {} {} {}", color.r, color.g, color.b),
        );
    }

    fn begin(&mut self, _projection: Mat4) {
        record(&self.journal, "begin".to_string());
    }

    fn submit_rect(&mut self, rect: Rect, _color: Color, _texture: Option<TextureHandle>) {
        record(
            &self.journal,
            format!(
                "submit_rect {} {} {} {}",
                rect.x, rect.y, rect.width, rect.height
            ),
        );
    }

    fn submit_text(&mut self, _font: &dyn Font, text: &str, position: Vec2, _color: Color) {
        record(
            &self.journal,
            format!("submit_text '{}' at {} {}", text, position.x, position.y),
        );
    }

    fn submit_text_cache(&mut self, cache: TextCacheHandle) {
        record(&self.journal, format!("submit_text_cache #{}", cache.0));
    }

    fn end(&mut self) {
        record(&self.journal, "end".to_string());
    }
}

// ============================================================================
// Mock font
// ============================================================================

/// Fixed-advance font: every grapheme measures `advance` wide.
pub struct MockFont {
    advance: f32,
    line_height: f32,
    journal: Option<Journal>,
    next_cache: Cell<u64>,
}

impl MockFont {
    pub fn new(advance: f32, line_height: f32) -> Self {
        Self { advance, line_height, journal: None, next_cache: Cell::new(0) }
    }

    /// A font whose draw calls are recorded in `journal`
    pub fn with_journal(advance: f32, line_height: f32, journal: Journal) -> Self {
        Self { advance, line_height, journal: Some(journal), next_cache: Cell::new(0) }
    }
}

impl FontMetrics for MockFont {
    /// Fixed advance per grapheme; multi-line text measures as the
    /// widest line by the summed line heights, like a real font.
    fn measure(&self, text: &str) -> Vec2 {
        use unicode_segmentation::UnicodeSegmentation;

        let mut widest = 0usize;
        let mut lines = 0usize;
        for line in text.split('\n') {
            widest = widest.max(line.graphemes(true).count());
            lines += 1;
        }

        Vec2::new(
            widest as f32 * self.advance,
            lines as f32 * self.line_height,
        )
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}

impl Font for MockFont {
    fn draw(&self, text: &str, position: Vec2, _color: Color, layer: i32) -> TextCacheHandle {
        self.next_cache.set(self.next_cache.get() + 1);
        let handle = TextCacheHandle(self.next_cache.get());
        if let Some(journal) = &self.journal {
            record(
                journal,
                format!(
                    "font:draw '{}' at {} {} layer={} -> #{}",
                    text, position.x, position.y, layer, handle.0
                ),
            );
        }
        handle
    }

    fn draw_cached(
        &self,
        cache: TextCacheHandle,
        text: &str,
        position: Vec2,
        _color: Color,
        layer: i32,
    ) {
        if let Some(journal) = &self.journal {
            record(
                journal,
                format!(
                    "font:draw_cached #{} '{}' at {} {} layer={}",
                    cache.0, text, position.x, position.y, layer
                ),
            );
        }
    }
}

// ============================================================================
// Mock post-processor
// ============================================================================

/// Recording post-processor; `fail_load` simulates a fatal GPU failure.
pub struct MockPostProcessor {
    journal: Journal,
    pub fail_load: bool,
}

impl MockPostProcessor {
    pub fn new(journal: Journal) -> Self {
        Self { journal, fail_load: false }
    }
}

impl PostProcessor for MockPostProcessor {
    fn load_resources(&mut self) -> Result<()> {
        if self.fail_load {
            return Err(Error::ResourceAllocation(
                "mock post-process shaders".to_string(),
            ));
        }
        record(&self.journal, "pp:load_resources".to_string());
        Ok(())
    }

    fn reallocate_buffers(&mut self, width: u32, height: u32) {
        record(
            &self.journal,
            format!("pp:reallocate_buffers {}x{}", width, height),
        );
    }

    fn apply_settings(&mut self, settings: &PostProcessSettings) {
        record(
            &self.journal,
            format!(
                "pp:apply_settings bloom={} shadow_mask={}",
                settings.bloom, settings.shadow_mask
            ),
        );
    }

    fn process(&mut self, source: RenderTargetHandle) {
        record(&self.journal, format!("pp:process #{}", source.0));
    }

    fn unload_resources(&mut self) {
        record(&self.journal, "pp:unload_resources".to_string());
    }
}

// ============================================================================
// Mock GUI system
// ============================================================================

/// Recording GUI system with per-handler consumption switches.
pub struct MockGui {
    journal: Journal,
    pub consume_mouse_down: bool,
    pub consume_mouse_up: bool,
    pub consume_mouse_move: bool,
    pub consume_mouse_scroll: bool,
    pub consume_key_down: bool,
    pub consume_key_up: bool,
    pub consume_key_char: bool,
}

impl MockGui {
    /// A GUI that consumes nothing
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            consume_mouse_down: false,
            consume_mouse_up: false,
            consume_mouse_move: false,
            consume_mouse_scroll: false,
            consume_key_down: false,
            consume_key_up: false,
            consume_key_char: false,
        }
    }
}

impl GuiSystem for MockGui {
    fn set_viewport_size(&mut self, width: u32, height: u32) {
        record(&self.journal, format!("gui:set_viewport_size {}x{}", width, height));
    }

    fn update(&mut self, _time: GameTime) {
        record(&self.journal, "gui:update".to_string());
    }

    fn render(&mut self, _time: GameTime) {
        record(&self.journal, "gui:render".to_string());
    }

    fn mouse_down(&mut self, _event: &MouseButtonEvent) -> bool {
        record(&self.journal, "gui:mouse_down".to_string());
        self.consume_mouse_down
    }

    fn mouse_up(&mut self, _event: &MouseButtonEvent) -> bool {
        record(&self.journal, "gui:mouse_up".to_string());
        self.consume_mouse_up
    }

    fn mouse_move(&mut self, _event: &MouseMoveEvent) -> bool {
        record(&self.journal, "gui:mouse_move".to_string());
        self.consume_mouse_move
    }

    fn mouse_scroll(&mut self, _event: &MouseScrollEvent) -> bool {
        record(&self.journal, "gui:mouse_scroll".to_string());
        self.consume_mouse_scroll
    }

    fn key_down(&mut self, _event: &KeyEvent) -> bool {
        record(&self.journal, "gui:key_down".to_string());
        self.consume_key_down
    }

    fn key_up(&mut self, _event: &KeyEvent) -> bool {
        record(&self.journal, "gui:key_up".to_string());
        self.consume_key_up
    }

    fn key_char(&mut self, _event: &KeyCharEvent) -> bool {
        record(&self.journal, "gui:key_char".to_string());
        self.consume_key_char
    }
}
