//! Scene: the per-frame simulation and render pipeline.
//!
//! One tick = one [`Scene::update`] followed by one [`Scene::render`],
//! driven synchronously by an external frame driver. Systems tick in
//! registration order, GUI event consumption precedes generic input
//! dispatch, the render target is resized before any draw submission,
//! and camera resolution precedes entity drawing.

mod components;
mod scene;
mod system;

pub use components::{
    CameraComponent, Name, Sprite, TextComponent, Transform, Transform2D,
};
pub use scene::{Scene, SceneConfig, SceneDesc, SceneState};
pub use system::{NoHooks, SceneComponent, SceneHooks, System, SystemContext};

/// Frame timing handed in by the external frame driver.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GameTime {
    /// Seconds since the previous tick
    pub delta: f32,
    /// Seconds since the driver started
    pub total: f32,
}

impl GameTime {
    pub const ZERO: GameTime = GameTime { delta: 0.0, total: 0.0 };
}
