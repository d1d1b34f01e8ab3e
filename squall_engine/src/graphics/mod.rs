//! Backend contracts for the rendering side of the engine.
//!
//! The core never talks to a GPU directly. Everything it needs from a
//! graphics backend — render-target lifecycle, clearing, batched 2D
//! submission, font drawing, post-processing — goes through the narrow
//! traits in this module. Backends are expected to be fire-and-forget
//! submission layers: no call here blocks on the GPU.

use glam::{Mat4, Vec2};

use crate::error::Result;
use crate::text::FontMetrics;

#[cfg(test)]
pub mod mock;

// ============================================================================
// Common value types
// ============================================================================

/// RGBA color, each channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Opaque color from RGB channels
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Axis-aligned rectangle in 2D render units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn location(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

// ============================================================================
// Opaque backend handles
// ============================================================================

/// Handle to a backend-owned off-screen render target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTargetHandle(pub u64);

/// Handle to a backend-owned texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Handle to a backend-owned shaped-text cache buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextCacheHandle(pub u64);

// ============================================================================
// Graphics backend
// ============================================================================

/// Low-level graphics backend contract.
///
/// One batch at a time: `begin(projection)` … submissions … `end()`.
/// Render target dimensions must track the requested dimensions exactly
/// (integer pixels).
pub trait GraphicsBackend: Send {
    /// Allocate an off-screen render target of exactly `width`×`height` pixels
    fn create_render_target(&mut self, width: u32, height: u32) -> Result<RenderTargetHandle>;

    /// Release a render target previously returned by `create_render_target`
    fn dispose_render_target(&mut self, target: RenderTargetHandle);

    /// Direct subsequent draws to `target`, or to the display target for `None`
    fn set_render_target(&mut self, target: Option<RenderTargetHandle>);

    /// Clear the bound target to a solid color
    fn clear(&mut self, color: Color);

    /// Open a submission batch under the given projection matrix
    fn begin(&mut self, projection: Mat4);

    /// Submit a filled rectangle, optionally textured
    fn submit_rect(&mut self, rect: Rect, color: Color, texture: Option<TextureHandle>);

    /// Submit a single line of text shaped by `font`
    fn submit_text(&mut self, font: &dyn Font, text: &str, position: Vec2, color: Color);

    /// Submit a previously shaped text cache (see [`Font::draw`])
    fn submit_text_cache(&mut self, cache: TextCacheHandle);

    /// Close the current submission batch
    fn end(&mut self);
}

// ============================================================================
// Font provider
// ============================================================================

/// Font provider contract.
///
/// Extends [`FontMetrics`] (all the layout engine needs) with drawing:
/// `draw` shapes text into a new backend cache buffer, `draw_cached`
/// appends to an existing one. The GUI text element submits the finished
/// cache through [`GraphicsBackend::submit_text_cache`].
pub trait Font: FontMetrics {
    /// Shape `text` at `position` into a fresh cache buffer
    fn draw(&self, text: &str, position: Vec2, color: Color, layer: i32) -> TextCacheHandle;

    /// Shape `text` at `position` into an existing cache buffer
    fn draw_cached(
        &self,
        cache: TextCacheHandle,
        text: &str,
        position: Vec2,
        color: Color,
        layer: i32,
    );
}

// ============================================================================
// Post-processor
// ============================================================================

/// Settings snapshot fed from the primary camera to the post-processor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PostProcessSettings {
    /// Bloom/glow pass enabled
    pub bloom: bool,
    /// CRT shadow-mask overlay enabled
    pub shadow_mask: bool,
}

/// Post-processing chain contract.
///
/// The scene owns exactly one post-processor. Its buffers are reallocated
/// together with the scene render target whenever the viewport changes;
/// a resize that touches one but not the other is a contract violation.
pub trait PostProcessor {
    /// Acquire GPU resources; failure is fatal to scene load
    fn load_resources(&mut self) -> Result<()>;

    /// Resize internal effect buffers to match the scene render target
    fn reallocate_buffers(&mut self, width: u32, height: u32);

    /// Adopt the primary camera's settings snapshot for subsequent frames
    fn apply_settings(&mut self, settings: &PostProcessSettings);

    /// Composite the finished scene target onto the display target
    fn process(&mut self, source: RenderTargetHandle);

    /// Release GPU resources
    fn unload_resources(&mut self);
}
