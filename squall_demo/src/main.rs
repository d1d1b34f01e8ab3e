//! Headless demo: drives a Squall scene for a few seconds without a GPU.
//!
//! Implements the collaborator contracts with trivial console-logging
//! backends, then runs the frame loop: spawn a drifting sprite and a
//! wrapped text banner, resize mid-run, crossfade between two generated
//! tones, and unload cleanly.

use std::sync::{Arc, Mutex};

use glam::{Mat4, Vec2};
use squall_engine::engine_info;
use squall_engine::squall::audio::{AudioBackend, AudioOutput, AudioSource, MusicPlayer};
use squall_engine::squall::graphics::{
    Color, Font, GraphicsBackend, PostProcessSettings, PostProcessor, Rect,
    RenderTargetHandle, TextCacheHandle, TextureHandle,
};
use squall_engine::squall::gui::GuiSystem;
use squall_engine::squall::input::{
    KeyCharEvent, KeyEvent, MouseButtonEvent, MouseMoveEvent, MouseScrollEvent,
};
use squall_engine::squall::scene::{
    GameTime, NoHooks, Scene, SceneConfig, SceneDesc, Sprite, System, SystemContext,
    TextComponent, Transform2D,
};
use squall_engine::squall::text::{FontMetrics, TextAlign, TextWrapMode};
use squall_engine::squall::Result;

/// Counts submissions instead of touching a GPU.
#[derive(Default)]
struct HeadlessGraphics {
    next_handle: u64,
    rects: u64,
    text_lines: u64,
}

impl GraphicsBackend for HeadlessGraphics {
    fn create_render_target(&mut self, width: u32, height: u32) -> Result<RenderTargetHandle> {
        self.next_handle += 1;
        engine_info!("demo::Graphics", "Render target #{} ({}x{})", self.next_handle, width, height);
        Ok(RenderTargetHandle(self.next_handle))
    }

    fn dispose_render_target(&mut self, target: RenderTargetHandle) {
        engine_info!("demo::Graphics", "Disposed render target #{}", target.0);
    }

    fn set_render_target(&mut self, _target: Option<RenderTargetHandle>) {}

    fn clear(&mut self, _color: Color) {}

    fn begin(&mut self, _projection: Mat4) {}

    fn submit_rect(&mut self, _rect: Rect, _color: Color, _texture: Option<TextureHandle>) {
        self.rects += 1;
    }

    fn submit_text(&mut self, _font: &dyn Font, _text: &str, _position: Vec2, _color: Color) {
        self.text_lines += 1;
    }

    fn submit_text_cache(&mut self, _cache: TextCacheHandle) {}

    fn end(&mut self) {}
}

/// 8x16 fixed-cell font metrics, no rasterization.
struct CellFont;

impl FontMetrics for CellFont {
    fn measure(&self, text: &str) -> Vec2 {
        let widest = text.split('\n').map(|line| line.chars().count()).max().unwrap_or(0);
        let lines = text.split('\n').count();
        Vec2::new(widest as f32 * 8.0, lines as f32 * 16.0)
    }

    fn line_height(&self) -> f32 {
        16.0
    }
}

impl Font for CellFont {
    fn draw(&self, _text: &str, _position: Vec2, _color: Color, _layer: i32) -> TextCacheHandle {
        TextCacheHandle(0)
    }

    fn draw_cached(
        &self,
        _cache: TextCacheHandle,
        _text: &str,
        _position: Vec2,
        _color: Color,
        _layer: i32,
    ) {
    }
}

struct NullGui;

impl GuiSystem for NullGui {
    fn set_viewport_size(&mut self, _width: u32, _height: u32) {}
    fn update(&mut self, _time: GameTime) {}
    fn render(&mut self, _time: GameTime) {}
    fn mouse_down(&mut self, _event: &MouseButtonEvent) -> bool {
        false
    }
    fn mouse_up(&mut self, _event: &MouseButtonEvent) -> bool {
        false
    }
    fn mouse_move(&mut self, _event: &MouseMoveEvent) -> bool {
        false
    }
    fn mouse_scroll(&mut self, _event: &MouseScrollEvent) -> bool {
        false
    }
    fn key_down(&mut self, _event: &KeyEvent) -> bool {
        false
    }
    fn key_up(&mut self, _event: &KeyEvent) -> bool {
        false
    }
    fn key_char(&mut self, _event: &KeyCharEvent) -> bool {
        false
    }
}

struct NullPostProcessor;

impl PostProcessor for NullPostProcessor {
    fn load_resources(&mut self) -> Result<()> {
        Ok(())
    }

    fn reallocate_buffers(&mut self, width: u32, height: u32) {
        engine_info!("demo::PostProcess", "Buffers resized to {}x{}", width, height);
    }

    fn apply_settings(&mut self, _settings: &PostProcessSettings) {}

    fn process(&mut self, _source: RenderTargetHandle) {}

    fn unload_resources(&mut self) {}
}

/// Audio output that just tracks its queue depth.
struct NullOutput {
    volume: f32,
    pending: usize,
}

impl AudioOutput for NullOutput {
    fn play(&mut self) {}

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn power(&self) -> f32 {
        0.5
    }

    fn pending_buffer_count(&self) -> usize {
        self.pending
    }

    fn submit_buffer(&mut self, _samples: &[f32]) {
        self.pending += 1;
    }
}

struct NullAudio;

impl AudioBackend for NullAudio {
    fn open_output(&mut self, _sample_rate: u32, _channels: u16) -> Result<Box<dyn AudioOutput>> {
        Ok(Box::new(NullOutput { volume: 1.0, pending: 0 }))
    }
}

/// A generated tone standing in for a decoded song.
struct Tone;

impl AudioSource for Tone {
    fn sample_rate(&self) -> u32 {
        44_100
    }

    fn channels(&self) -> u16 {
        2
    }

    fn read_frame(&mut self) -> Vec<f32> {
        vec![0.0; 512]
    }
}

/// Drifts every Transform2D entity to the right.
struct DriftSystem;

impl System for DriftSystem {
    fn update(&mut self, ctx: &mut SystemContext) {
        let entities: Vec<_> = ctx.registry.view::<(Transform2D,)>().collect();
        for entity in entities {
            if let Some(transform) = ctx.registry.try_get_component_mut::<Transform2D>(entity) {
                transform.position.x += 40.0 * ctx.time.delta;
            }
        }
    }
}

fn main() -> Result<()> {
    let graphics = Arc::new(Mutex::new(HeadlessGraphics::default()));

    let mut scene = Scene::new(SceneDesc {
        config: SceneConfig::default(),
        graphics: graphics.clone(),
        gui: Box::new(NullGui),
        post_processor: Box::new(NullPostProcessor),
        default_font: Arc::new(CellFont),
        hooks: Box::new(NoHooks),
    });

    scene.load(960, 540)?;
    scene.register_system(DriftSystem);

    let sprite = scene.spawn_object()?;
    scene.registry_mut().add_component(sprite, Transform2D {
        position: Vec2::new(100.0, 270.0),
        ..Default::default()
    })?;
    scene.registry_mut().add_component(sprite, Sprite {
        size: Vec2::new(64.0, 64.0),
        color: Color::rgb(0.9, 0.3, 0.2),
        ..Default::default()
    })?;

    let banner = scene.spawn_object()?;
    scene.registry_mut().add_component(banner, Transform2D {
        position: Vec2::new(480.0, 80.0),
        ..Default::default()
    })?;
    scene.registry_mut().add_component(banner, TextComponent {
        text: "squall engine headless demo running without a gpu".to_string(),
        text_align: TextAlign::Center,
        wrap_mode: TextWrapMode::WordWrap,
        wrap_width: 200.0,
        ..Default::default()
    })?;

    let mut music = MusicPlayer::new(Box::new(NullAudio));
    music.play(Box::new(Tone), 0.0)?;
    music.play(Box::new(Tone), 1.0)?;

    let mut time = GameTime::ZERO;
    for frame in 0..180 {
        time.delta = 1.0 / 60.0;
        time.total += time.delta;

        if frame == 60 {
            scene.set_viewport_size(1280, 720);
        }

        scene.update(time)?;
        scene.render(time)?;
        music.update(time.delta as f64);
    }

    engine_info!("demo", "Music power after crossfade: {:.2}", music.power());
    {
        let stats = graphics.lock().unwrap();
        engine_info!(
            "demo",
            "Submitted {} rects and {} text lines",
            stats.rects,
            stats.text_lines
        );
    }

    scene.unload();
    Ok(())
}
