//! Audio mixing: backend contracts and the crossfading music player.
//!
//! Device I/O and codec decoding are collaborators behind the traits
//! here; the core only schedules buffers and drives the crossfade.

mod music_player;

pub use music_player::{AudioBackend, AudioOutput, AudioSource, MusicPlayer};
