/*!
# Squall Engine

Core types for the Squall real-time game engine.

This crate provides the platform-agnostic heart of the engine: the
entity registry, the scene update/render pipeline, camera resolution,
the text layout engine, the retained GUI text element, and the music
crossfade player. Graphics, audio devices, font rasterization, and the
GUI tree itself live behind narrow trait contracts implemented by
backends.

## Architecture

- **Registry**: sparse-set entity/component storage with view queries
- **Scene**: the per-frame state machine (load → update/render → unload)
- **GraphicsBackend / Font / PostProcessor / GuiSystem**: collaborator
  contracts the scene drives each frame
- **MusicPlayer**: two-output crossfade state machine

Execution is single-threaded and frame-stepped: an external driver calls
`Scene::update` then `Scene::render` once per tick.
*/

// Internal modules
mod engine;
mod error;
pub mod audio;
pub mod camera;
pub mod graphics;
pub mod gui;
pub mod input;
pub mod log;
pub mod registry;
pub mod scene;
pub mod text;

// Main squall namespace module
pub mod squall {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging entry point used by the engine_* macros
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    pub mod audio {
        pub use crate::audio::*;
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod graphics {
        pub use crate::graphics::*;
    }

    pub mod gui {
        pub use crate::gui::*;
    }

    pub mod input {
        pub use crate::input::*;
    }

    pub mod registry {
        pub use crate::registry::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }

    pub mod text {
        pub use crate::text::*;
    }
}

// Re-export math library at crate root
pub use glam;
