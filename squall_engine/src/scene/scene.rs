/// Scene — per-frame update/render pipeline over the entity registry.
///
/// Lifecycle: `Unloaded → Loading → Active → Unloading → Unloaded`.
/// Resource failures during load are fatal; the scene must be discarded.
///
/// Frame ordering guarantees, every tick:
/// 1. render-target resize (with post-process buffer reallocation)
/// 2. systems, in registration order
/// 3. GUI update, then the user update hook
/// 4. camera resolution (last camera entity wins)
/// 5. entity drawing, then GUI render, then post-process hand-off

use std::sync::{Arc, Mutex};
use glam::Vec2;

use crate::camera::{CameraProjectionType, CameraTransform, SceneCamera};
use crate::error::Result;
use crate::graphics::{Color, Font, GraphicsBackend, PostProcessor, Rect, RenderTargetHandle};
use crate::gui::GuiSystem;
use crate::input::{
    InputSystem, Key, KeyCharEvent, KeyEvent, MouseButtonEvent, MouseMoveEvent, MouseScrollEvent,
};
use crate::registry::{Entity, Registry, MAX_ENTITY_COUNT};
use crate::text::{wrap, TextAlign, TextWrapMode};
use crate::{engine_debug, engine_info, engine_warn};

use super::components::{CameraComponent, Name, Sprite, TextComponent, Transform, Transform2D};
use super::system::{NoHooks, SceneComponent, SceneHooks, System, SystemContext};
use super::GameTime;

/// Mouse sensitivity and movement step of the no-clip debug camera
const NO_CLIP_LOOK_SPEED: f32 = 0.5;
const NO_CLIP_MOVE_SPEED: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    /// Entity cap for the scene's registry
    pub max_entities: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self { max_entities: MAX_ENTITY_COUNT }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    Unloaded,
    Loading,
    Active,
    Unloading,
}

/// Everything a scene needs from its collaborators.
pub struct SceneDesc {
    pub config: SceneConfig,
    pub graphics: Arc<Mutex<dyn GraphicsBackend>>,
    pub gui: Box<dyn GuiSystem>,
    pub post_processor: Box<dyn PostProcessor>,
    pub default_font: Arc<dyn Font>,
    pub hooks: Box<dyn SceneHooks>,
}

pub struct Scene {
    state: SceneState,
    registry: Registry,
    camera: SceneCamera,
    systems: Vec<Box<dyn System>>,
    scene_components: Vec<Box<dyn SceneComponent>>,
    hooks: Box<dyn SceneHooks>,
    input: InputSystem,
    graphics: Arc<Mutex<dyn GraphicsBackend>>,
    gui: Box<dyn GuiSystem>,
    post_processor: Box<dyn PostProcessor>,
    default_font: Arc<dyn Font>,
    render_target: Option<RenderTargetHandle>,
    target_size: (u32, u32),
    viewport: (u32, u32),
    paused: bool,
    no_clip: bool,
    next_object_id: u64,
}

impl Scene {
    pub fn new(desc: SceneDesc) -> Self {
        Self {
            state: SceneState::Unloaded,
            registry: Registry::new(desc.config.max_entities),
            camera: SceneCamera::new(),
            systems: Vec::new(),
            scene_components: Vec::new(),
            hooks: desc.hooks,
            input: InputSystem::new(),
            graphics: desc.graphics,
            gui: desc.gui,
            post_processor: desc.post_processor,
            default_font: desc.default_font,
            render_target: None,
            target_size: (0, 0),
            viewport: (0, 0),
            paused: false,
            no_clip: false,
            next_object_id: 0,
        }
    }

    // ===== ACCESSORS =====

    pub fn state(&self) -> SceneState {
        self.state
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// The camera the scene is currently rendering through
    pub fn camera(&self) -> &SceneCamera {
        &self.camera
    }

    /// The generic input-event queue (events the GUI did not consume)
    pub fn input(&self) -> &InputSystem {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputSystem {
        &mut self.input
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn render_target(&self) -> Option<RenderTargetHandle> {
        self.render_target
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause simulation. Render-target sizing and GUI viewport sync keep
    /// running; systems, GUI update, and the user hook do not.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_no_clip(&self) -> bool {
        self.no_clip
    }

    /// Toggle the no-clip debug camera. While active, mouse-move and
    /// key-down drive the primary camera transform directly, bypassing
    /// the GUI and the generic input queue.
    pub fn set_no_clip(&mut self, enabled: bool) {
        self.no_clip = enabled;
    }

    /// Switch the primary camera's projection (no-op without a camera)
    pub fn set_camera_mode(&mut self, mode: CameraProjectionType) {
        if let Some(camera) = self.primary_camera() {
            if let Ok(component) = self.registry.get_component_mut::<CameraComponent>(camera) {
                component.projection_type = mode;
            }
        }
    }

    // ===== LIFECYCLE =====

    /// Load the scene: acquire post-process resources, spawn the default
    /// camera entity, size the render target, and run the user load hook.
    ///
    /// A resource failure is fatal — the error propagates and the scene
    /// must be discarded.
    pub fn load(&mut self, viewport_width: u32, viewport_height: u32) -> Result<()> {
        assert_eq!(
            self.state,
            SceneState::Unloaded,
            "Scene::load on a scene that is not unloaded"
        );

        self.state = SceneState::Loading;
        self.viewport = (viewport_width, viewport_height);
        engine_info!(
            "squall::Scene",
            "Loading scene ({}x{} viewport)",
            viewport_width,
            viewport_height
        );

        self.post_processor.load_resources()?;

        // Spawn the default camera entity so a fresh scene has something
        // to render through.
        let camera = self.spawn_object()?;
        self.registry.add_component(camera, CameraComponent::default())?;
        self.registry.add_component(camera, Transform::default())?;

        self.ensure_render_target_size()?;

        engine_debug!("squall::Scene", "Registered scene debug hooks");

        let mut hooks = std::mem::replace(&mut self.hooks, Box::new(NoHooks));
        {
            let mut ctx = SystemContext {
                registry: &mut self.registry,
                input: &mut self.input,
                time: GameTime::ZERO,
            };
            hooks.on_load(&mut ctx);
        }
        self.hooks = hooks;

        self.state = SceneState::Active;
        engine_info!("squall::Scene", "Scene active");
        Ok(())
    }

    /// Viewport dimensions in integer pixels; the render target follows
    /// on the next update.
    pub fn set_viewport_size(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    /// One update tick.
    pub fn update(&mut self, time: GameTime) -> Result<()> {
        if self.state != SceneState::Active {
            engine_warn!("squall::Scene", "Update on a scene that is not active");
            return Ok(());
        }

        // Resize strictly precedes everything else in the frame.
        self.ensure_render_target_size()?;
        self.gui.set_viewport_size(self.viewport.0, self.viewport.1);

        if self.paused {
            return Ok(());
        }

        let mut systems = std::mem::take(&mut self.systems);
        {
            let mut ctx = SystemContext {
                registry: &mut self.registry,
                input: &mut self.input,
                time,
            };
            for system in systems.iter_mut() {
                system.update(&mut ctx);
            }
        }
        self.systems = systems;

        self.gui.update(time);

        let mut hooks = std::mem::replace(&mut self.hooks, Box::new(NoHooks));
        {
            let mut ctx = SystemContext {
                registry: &mut self.registry,
                input: &mut self.input,
                time,
            };
            hooks.on_update(&mut ctx);
        }
        self.hooks = hooks;

        Ok(())
    }

    /// One render pass into the scene target, handed to the
    /// post-processor for final composition.
    pub fn render(&mut self, time: GameTime) -> Result<()> {
        if self.state != SceneState::Active {
            engine_warn!("squall::Scene", "Render on a scene that is not active");
            return Ok(());
        }

        let Some(target) = self.render_target else {
            return Ok(());
        };

        // Camera resolution: the last entity yielded by the camera view
        // drives this frame.
        let mut resolved: Option<(CameraComponent, Transform)> = None;
        if let Some(entity) = self.registry.view::<(CameraComponent, Transform)>().last() {
            let component = *self.registry.get_component::<CameraComponent>(entity)?;
            let transform = *self.registry.get_component::<Transform>(entity)?;
            resolved = Some((component, transform));
        }

        if let Some((component, transform)) = resolved {
            self.camera.set_transform(CameraTransform {
                position: transform.position,
                rotation: transform.rotation,
                scale: transform.scale,
            });
            self.camera.set_projection_type(component.projection_type);
            self.post_processor.apply_settings(&component.post_process);
        }

        let projection = self
            .camera
            .projection_matrix(self.viewport.0 as f32, self.viewport.1 as f32);

        {
            let mut graphics = self.graphics.lock().unwrap();
            graphics.set_render_target(Some(target));

            match &resolved {
                Some((component, _)) => graphics.clear(component.background_color),
                None => graphics.clear(Color::BLACK),
            }

            for entity in self.registry.view::<(Transform2D,)>() {
                let Some(transform) = self.registry.try_get_component::<Transform2D>(entity)
                else {
                    continue;
                };
                let mvp = projection * transform.matrix();

                if let Some(sprite) = self.registry.try_get_component::<Sprite>(entity) {
                    let rect = Rect::new(
                        -(sprite.size.x * sprite.pivot.x),
                        -(sprite.size.y * sprite.pivot.y),
                        sprite.size.x,
                        sprite.size.y,
                    );

                    graphics.begin(mvp);
                    graphics.submit_rect(rect, sprite.color, sprite.texture);
                    graphics.end();
                }

                if let Some(text) = self.registry.try_get_component::<TextComponent>(entity) {
                    if text.text.trim().is_empty() {
                        continue;
                    }

                    let font: &dyn Font =
                        text.font.as_deref().unwrap_or(self.default_font.as_ref());

                    let wrapped = if text.wrap_width > 0.0 && text.wrap_mode != TextWrapMode::None
                    {
                        wrap(font, &text.text, text.wrap_mode, text.wrap_width)
                    } else {
                        text.text.clone()
                    };

                    let measure = font.measure(&wrapped);
                    let origin = -(measure * text.pivot);

                    graphics.begin(mvp);
                    let mut y = origin.y;
                    for line in wrapped.split('\n') {
                        let line_measure = font.measure(line);
                        let x = match text.text_align {
                            TextAlign::Left => origin.x,
                            TextAlign::Center => origin.x + (measure.x - line_measure.x) / 2.0,
                            TextAlign::Right => origin.x + (measure.x - line_measure.x),
                        };

                        graphics.submit_text(font, line, Vec2::new(x, y), text.color);
                        y += line_measure.y;
                    }
                    graphics.end();
                }
            }

            self.gui.render(time);
            graphics.set_render_target(None);
        }

        self.post_processor.process(target);
        Ok(())
    }

    /// Tear the scene down: systems in reverse registration order, then
    /// scene components, the user hook, and GPU resources.
    pub fn unload(&mut self) {
        if self.state != SceneState::Active {
            engine_warn!("squall::Scene", "Unload on a scene that is not active");
            return;
        }

        self.state = SceneState::Unloading;
        engine_info!("squall::Scene", "Unloading scene");

        let mut systems = std::mem::take(&mut self.systems);
        while let Some(mut system) = systems.pop() {
            system.unload();
        }

        engine_debug!("squall::Scene", "Unregistered scene debug hooks");

        let mut components = std::mem::take(&mut self.scene_components);
        {
            let mut ctx = SystemContext {
                registry: &mut self.registry,
                input: &mut self.input,
                time: GameTime::ZERO,
            };
            for component in components.iter_mut() {
                component.unload(&mut ctx);
            }
        }
        drop(components);

        let mut hooks = std::mem::replace(&mut self.hooks, Box::new(NoHooks));
        {
            let mut ctx = SystemContext {
                registry: &mut self.registry,
                input: &mut self.input,
                time: GameTime::ZERO,
            };
            hooks.on_unload(&mut ctx);
        }
        self.hooks = hooks;

        if let Some(target) = self.render_target.take() {
            self.graphics.lock().unwrap().dispose_render_target(target);
        }
        self.target_size = (0, 0);
        self.post_processor.unload_resources();

        self.state = SceneState::Unloaded;
    }

    // ===== SYSTEMS & SCENE COMPONENTS =====

    /// Register a system; it ticks after every system registered before it.
    pub fn register_system(&mut self, system: impl System + 'static) {
        let mut boxed: Box<dyn System> = Box::new(system);
        {
            let mut ctx = SystemContext {
                registry: &mut self.registry,
                input: &mut self.input,
                time: GameTime::ZERO,
            };
            boxed.init(&mut ctx);
        }
        self.systems.push(boxed);
    }

    /// Add a scene-level component; its load hook runs immediately.
    ///
    /// Ownership moves into the scene, so the same instance can never be
    /// registered twice or bound to two scenes.
    pub fn add_scene_component(&mut self, component: impl SceneComponent + 'static) {
        let mut boxed: Box<dyn SceneComponent> = Box::new(component);
        {
            let mut ctx = SystemContext {
                registry: &mut self.registry,
                input: &mut self.input,
                time: GameTime::ZERO,
            };
            boxed.load(&mut ctx);
        }
        self.scene_components.push(boxed);
    }

    // ===== ENTITIES =====

    /// Create an entity with a generated unique [`Name`].
    pub fn spawn_object(&mut self) -> Result<Entity> {
        let entity = self.registry.create()?;
        self.next_object_id += 1;
        self.registry
            .add_component(entity, Name(format!("object-{}", self.next_object_id)))?;
        Ok(entity)
    }

    /// Exact-name lookup. A miss is an explicit `None`, never an error.
    pub fn find_object_by_name(&self, name: &str) -> Option<Entity> {
        self.registry.view::<(Name,)>().find(|&entity| {
            self.registry
                .try_get_component::<Name>(entity)
                .is_some_and(|n| n.0 == name)
        })
    }

    /// The camera entity driving the current frame: the last entity
    /// yielded by the {Transform, CameraComponent} view (last wins).
    pub fn primary_camera(&self) -> Option<Entity> {
        self.registry.view::<(Transform, CameraComponent)>().last()
    }

    // ===== INPUT DISPATCH =====
    //
    // GUI consumption strictly precedes the generic input queue. No-clip
    // intercepts mouse-move and key-down before either.

    pub fn mouse_down(&mut self, event: MouseButtonEvent) {
        if !self.gui.mouse_down(&event) {
            self.input.fire_mouse_down(event);
        }
    }

    pub fn mouse_up(&mut self, event: MouseButtonEvent) {
        if !self.gui.mouse_up(&event) {
            self.input.fire_mouse_up(event);
        }
    }

    pub fn mouse_move(&mut self, event: MouseMoveEvent) {
        if self.no_clip {
            let delta_yaw = NO_CLIP_LOOK_SPEED * event.delta.x;
            let delta_pitch = NO_CLIP_LOOK_SPEED * -event.delta.y;

            if let Some(camera) = self.primary_camera() {
                if let Ok(transform) = self.registry.get_component_mut::<Transform>(camera) {
                    transform.rotation.y += delta_yaw;
                    transform.rotation.x += delta_pitch;
                }
            }
        } else if !self.gui.mouse_move(&event) {
            self.input.fire_mouse_move(event);
        }
    }

    pub fn mouse_scroll(&mut self, event: MouseScrollEvent) {
        if !self.gui.mouse_scroll(&event) {
            self.input.fire_mouse_scroll(event);
        }
    }

    pub fn key_down(&mut self, event: KeyEvent) {
        if self.no_clip {
            if let Some(camera) = self.primary_camera() {
                if let Ok(transform) = self.registry.get_component_mut::<Transform>(camera) {
                    match event.key {
                        Key::PageUp => transform.position.y += NO_CLIP_MOVE_SPEED,
                        Key::PageDown => transform.position.y -= NO_CLIP_MOVE_SPEED,
                        Key::W => transform.position.z += NO_CLIP_MOVE_SPEED,
                        Key::S => transform.position.z -= NO_CLIP_MOVE_SPEED,
                        Key::A => transform.position.x -= NO_CLIP_MOVE_SPEED,
                        Key::D => transform.position.x += NO_CLIP_MOVE_SPEED,
                        _ => {}
                    }
                }
            }
        } else if !self.gui.key_down(&event) {
            self.input.fire_key_down(event);
        }
    }

    pub fn key_up(&mut self, event: KeyEvent) {
        if !self.gui.key_up(&event) {
            self.input.fire_key_up(event);
        }
    }

    pub fn key_char(&mut self, event: KeyCharEvent) {
        if !self.gui.key_char(&event) {
            self.input.fire_key_char(event);
        }
    }

    // ===== RENDER TARGET =====

    /// Dispose + reallocate the scene target when the viewport changed,
    /// and reallocate the post-process buffers with it. The two always
    /// happen together; a target resize without a post-process resize
    /// would leave the chain rendering stale-sized buffers.
    fn ensure_render_target_size(&mut self) -> Result<()> {
        let (width, height) = self.viewport;
        if self.render_target.is_some() && self.target_size == (width, height) {
            return Ok(());
        }

        let target = {
            let mut graphics = self.graphics.lock().unwrap();
            if let Some(old) = self.render_target.take() {
                graphics.dispose_render_target(old);
            }
            graphics.create_render_target(width, height)?
        };

        self.render_target = Some(target);
        self.target_size = (width, height);
        self.post_processor.reallocate_buffers(width, height);

        engine_debug!(
            "squall::Scene",
            "Scene render target sized to {}x{}",
            width,
            height
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
