//! Scene lifecycle integration tests
//!
//! Drives a scene through load → ticks → resize → unload against
//! self-contained recording backends, using only the public API.

use std::sync::{Arc, Mutex};

use glam::{Mat4, Vec2};
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
use squall_engine::squall::text::{FontMetrics, TextWrapMode};
use squall_engine::squall::Result;

type Journal = Arc<Mutex<Vec<String>>>;

fn record(journal: &Journal, entry: impl Into<String>) {
    journal.lock().unwrap().push(entry.into());
}

struct RecordingGraphics {
    journal: Journal,
    next_handle: u64,
}

impl GraphicsBackend for RecordingGraphics {
    fn create_render_target(&mut self, width: u32, height: u32) -> Result<RenderTargetHandle> {
        self.next_handle += 1;
        record(&self.journal, format!("create {}x{}", width, height));
        Ok(RenderTargetHandle(self.next_handle))
    }

    fn dispose_render_target(&mut self, target: RenderTargetHandle) {
        record(&self.journal, format!("dispose #{}", target.0));
    }

    fn set_render_target(&mut self, _target: Option<RenderTargetHandle>) {}

    fn clear(&mut self, _color: Color) {
        record(&self.journal, "clear");
    }

    fn begin(&mut self, _projection: Mat4) {}

    fn submit_rect(&mut self, _rect: Rect, _color: Color, _texture: Option<TextureHandle>) {
        record(&self.journal, "rect");
    }

    fn submit_text(&mut self, _font: &dyn Font, text: &str, _position: Vec2, _color: Color) {
        record(&self.journal, format!("text '{}'", text));
    }

    fn submit_text_cache(&mut self, _cache: TextCacheHandle) {}

    fn end(&mut self) {}
}

struct FixedFont;

impl FontMetrics for FixedFont {
    fn measure(&self, text: &str) -> Vec2 {
        let widest = text.split('\n').map(|line| line.chars().count()).max().unwrap_or(0);
        let lines = text.split('\n').count();
        Vec2::new(widest as f32 * 8.0, lines as f32 * 16.0)
    }

    fn line_height(&self) -> f32 {
        16.0
    }
}

impl Font for FixedFont {
    fn draw(&self, _text: &str, _position: Vec2, _color: Color, _layer: i32) -> TextCacheHandle {
        TextCacheHandle(1)
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

struct SilentGui;

impl GuiSystem for SilentGui {
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

struct RecordingPostProcessor {
    journal: Journal,
}

impl PostProcessor for RecordingPostProcessor {
    fn load_resources(&mut self) -> Result<()> {
        record(&self.journal, "pp load");
        Ok(())
    }

    fn reallocate_buffers(&mut self, width: u32, height: u32) {
        record(&self.journal, format!("pp buffers {}x{}", width, height));
    }

    fn apply_settings(&mut self, _settings: &PostProcessSettings) {}

    fn process(&mut self, source: RenderTargetHandle) {
        record(&self.journal, format!("pp process #{}", source.0));
    }

    fn unload_resources(&mut self) {
        record(&self.journal, "pp unload");
    }
}

/// Moves every Transform2D entity right by 1 unit per tick.
struct DriftSystem;

impl System for DriftSystem {
    fn update(&mut self, ctx: &mut SystemContext) {
        let entities: Vec<_> = ctx.registry.view::<(Transform2D,)>().collect();
        for entity in entities {
            if let Some(transform) = ctx.registry.try_get_component_mut::<Transform2D>(entity) {
                transform.position.x += 1.0;
            }
        }
    }
}

fn build_scene(journal: &Journal) -> Scene {
    Scene::new(SceneDesc {
        config: SceneConfig::default(),
        graphics: Arc::new(Mutex::new(RecordingGraphics {
            journal: journal.clone(),
            next_handle: 0,
        })),
        gui: Box::new(SilentGui),
        post_processor: Box::new(RecordingPostProcessor { journal: journal.clone() }),
        default_font: Arc::new(FixedFont),
        hooks: Box::new(NoHooks),
    })
}

fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

#[test]
fn test_full_lifecycle_with_resize() {
    let journal: Journal = Default::default();
    let mut scene = build_scene(&journal);

    scene.load(800, 600).unwrap();
    scene.register_system(DriftSystem);

    let entity = scene.spawn_object().unwrap();
    scene
        .registry_mut()
        .add_component(entity, Transform2D::default())
        .unwrap();
    scene
        .registry_mut()
        .add_component(entity, Sprite { size: Vec2::new(10.0, 10.0), ..Default::default() })
        .unwrap();

    // A few steady-state ticks.
    let mut time = GameTime::ZERO;
    for _ in 0..3 {
        time.delta = 1.0 / 60.0;
        time.total += time.delta;
        scene.update(time).unwrap();
        scene.render(time).unwrap();
    }

    // The system actually ran: 3 ticks of drift.
    let transform = scene
        .registry()
        .get_component::<Transform2D>(entity)
        .unwrap();
    assert_eq!(transform.position.x, 3.0);

    // Mid-run resize reallocates the target + post-process buffers once.
    journal.lock().unwrap().clear();
    scene.set_viewport_size(1280, 720);
    scene.update(time).unwrap();
    scene.render(time).unwrap();

    let log = entries(&journal);
    assert_eq!(log.iter().filter(|e| e.starts_with("dispose")).count(), 1);
    assert_eq!(log.iter().filter(|e| *e == "create 1280x720").count(), 1);
    assert_eq!(log.iter().filter(|e| *e == "pp buffers 1280x720").count(), 1);
    assert!(log.contains(&"pp process #2".to_string()));

    scene.unload();
    let log = entries(&journal);
    assert!(log.contains(&"dispose #2".to_string()));
    assert!(log.contains(&"pp unload".to_string()));
}

#[test]
fn test_scene_text_is_wrapped_through_default_font() {
    let journal: Journal = Default::default();
    let mut scene = build_scene(&journal);
    scene.load(400, 300).unwrap();

    let entity = scene.spawn_object().unwrap();
    scene
        .registry_mut()
        .add_component(entity, Transform2D::default())
        .unwrap();
    scene
        .registry_mut()
        .add_component(
            entity,
            TextComponent {
                text: "hello world".to_string(),
                wrap_mode: TextWrapMode::WordWrap,
                // Exactly measure("hello ") under the 8-unit fixed font.
                wrap_width: 48.0,
                ..Default::default()
            },
        )
        .unwrap();

    scene.render(GameTime::ZERO).unwrap();

    let log = entries(&journal);
    assert!(log.contains(&"text 'hello '".to_string()));
    assert!(log.contains(&"text 'world'".to_string()));
}

#[test]
fn test_render_each_frame_reflects_registry_changes() {
    let journal: Journal = Default::default();
    let mut scene = build_scene(&journal);
    scene.load(400, 300).unwrap();

    let entity = scene.spawn_object().unwrap();
    scene
        .registry_mut()
        .add_component(entity, Transform2D::default())
        .unwrap();
    scene
        .registry_mut()
        .add_component(entity, Sprite::default())
        .unwrap();

    scene.render(GameTime::ZERO).unwrap();
    assert_eq!(entries(&journal).iter().filter(|e| *e == "rect").count(), 1);

    // Destroying the entity removes it from the next frame's view.
    scene.registry_mut().destroy(entity).unwrap();
    journal.lock().unwrap().clear();
    scene.render(GameTime::ZERO).unwrap();
    assert_eq!(entries(&journal).iter().filter(|e| *e == "rect").count(), 0);
}
