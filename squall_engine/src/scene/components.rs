/// Built-in components understood by the scene render pass.
///
/// Plain data records; the registry owns the storage. Any other type can
/// be attached as a component too — these are just the ones the engine
/// itself looks for.

use std::sync::Arc;
use glam::{Mat4, Quat, Vec2, Vec3};

use crate::camera::CameraProjectionType;
use crate::graphics::{Color, Font, PostProcessSettings, TextureHandle};
use crate::text::{TextAlign, TextWrapMode};

/// 3D position/rotation/scale.
///
/// Rotation is Euler degrees: `x` pitch, `y` yaw, `z` roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// 2D position/rotation/scale; rotation in degrees around Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub position: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
}

impl Transform2D {
    /// Derive the transform matrix (never stored).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale.extend(1.0),
            Quat::from_rotation_z(self.rotation.to_radians()),
            self.position.extend(0.0),
        )
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }
}

/// Axis-aligned textured rectangle.
///
/// The pivot is in 0..1 rectangle space; (0.5, 0.5) centers the sprite
/// on its transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub texture: Option<TextureHandle>,
    pub size: Vec2,
    pub pivot: Vec2,
    pub color: Color,
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            texture: None,
            size: Vec2::ONE,
            pivot: Vec2::splat(0.5),
            color: Color::WHITE,
        }
    }
}

/// In-scene text, wrapped and aligned by the render pass.
///
/// `font: None` falls back to the scene's default font. Whitespace-only
/// text is skipped entirely.
#[derive(Clone)]
pub struct TextComponent {
    pub text: String,
    pub font: Option<Arc<dyn Font>>,
    pub color: Color,
    pub pivot: Vec2,
    pub text_align: TextAlign,
    pub wrap_mode: TextWrapMode,
    pub wrap_width: f32,
}

impl Default for TextComponent {
    fn default() -> Self {
        Self {
            text: String::new(),
            font: None,
            color: Color::WHITE,
            pivot: Vec2::splat(0.5),
            text_align: TextAlign::Left,
            wrap_mode: TextWrapMode::None,
            wrap_width: 0.0,
        }
    }
}

/// Marks an entity as a camera.
///
/// When several entities carry both `CameraComponent` and `Transform`,
/// the last one yielded by the view query wins the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraComponent {
    pub projection_type: CameraProjectionType,
    pub background_color: Color,
    pub post_process: PostProcessSettings,
}

impl Default for CameraComponent {
    fn default() -> Self {
        Self {
            projection_type: CameraProjectionType::Orthographic,
            background_color: Color::BLACK,
            post_process: PostProcessSettings::default(),
        }
    }
}

/// Human-readable entity name, attached by [`Scene::spawn_object`](super::Scene::spawn_object).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(pub String);
