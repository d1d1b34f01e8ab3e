/// Scene camera.
///
/// Holds the transform and projection type copied from the primary
/// camera entity during camera resolution (§ render pass ordering: this
/// happens before any entity drawing). Matrices are derived on demand,
/// never stored.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Projection type driven by the primary camera entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraProjectionType {
    Perspective,
    Orthographic,
}

/// Position / rotation / scale of a camera.
///
/// Rotation is Euler degrees: `x` pitch, `y` yaw, `z` roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for CameraTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// The camera object a scene renders through.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneCamera {
    transform: CameraTransform,
    projection_type: CameraProjectionType,
}

impl SceneCamera {
    pub fn new() -> Self {
        Self {
            transform: CameraTransform::default(),
            projection_type: CameraProjectionType::Orthographic,
        }
    }

    pub fn transform(&self) -> &CameraTransform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut CameraTransform {
        &mut self.transform
    }

    pub fn set_transform(&mut self, transform: CameraTransform) {
        self.transform = transform;
    }

    pub fn projection_type(&self) -> CameraProjectionType {
        self.projection_type
    }

    pub fn set_projection_type(&mut self, projection_type: CameraProjectionType) {
        self.projection_type = projection_type;
    }

    /// View matrix: inverse of the camera's world transform.
    pub fn view_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::YXZ,
            self.transform.rotation.y.to_radians(),
            self.transform.rotation.x.to_radians(),
            self.transform.rotation.z.to_radians(),
        );
        Mat4::from_scale_rotation_translation(
            self.transform.scale,
            rotation,
            self.transform.position,
        )
        .inverse()
    }

    /// Projection matrix for the current viewport dimensions.
    ///
    /// Orthographic projection spans the viewport in pixels with the
    /// origin at the top-left, matching the 2D submission contract.
    pub fn projection_matrix(&self, viewport_width: f32, viewport_height: f32) -> Mat4 {
        match self.projection_type {
            CameraProjectionType::Perspective => Mat4::perspective_rh(
                std::f32::consts::FRAC_PI_4,
                viewport_width / viewport_height.max(1.0),
                0.1,
                1000.0,
            ),
            CameraProjectionType::Orthographic => Mat4::orthographic_rh(
                0.0,
                viewport_width,
                viewport_height,
                0.0,
                -1.0,
                1.0,
            ),
        }
    }
}

impl Default for SceneCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
