//! Scene camera: transform + projection, matrices derived on demand.

mod camera;

pub use camera::{CameraProjectionType, CameraTransform, SceneCamera};
