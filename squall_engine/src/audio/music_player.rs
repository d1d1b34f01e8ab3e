/// Music playback with volume crossfade between two outputs.
///
/// An explicitly constructed service: whoever owns frame-level audio
/// constructs one with its backend and calls `update` every tick. At
/// most two outputs are live at once — the current song fading out and
/// the next fading in, volumes driven by the elapsed/total fade ratio.

use crate::error::Result;
use crate::{engine_debug, engine_info};

/// How many buffers an output keeps queued ahead of the device
const PENDING_BUFFER_TARGET: usize = 3;

/// Decoded audio stream (a song). Decoding itself is a backend concern.
pub trait AudioSource {
    fn sample_rate(&self) -> u32;

    fn channels(&self) -> u16;

    /// Pull the next frame of interleaved PCM samples.
    ///
    /// An empty frame means the source is exhausted; the player keeps
    /// the output open (the driver decides when to stop or switch).
    fn read_frame(&mut self) -> Vec<f32>;
}

/// One device output stream. Submission is fire-and-forget.
pub trait AudioOutput {
    fn play(&mut self);

    fn set_volume(&mut self, volume: f32);

    fn volume(&self) -> f32;

    /// Current output power estimate (for visualizers)
    fn power(&self) -> f32;

    /// Buffers submitted but not yet consumed by the device
    fn pending_buffer_count(&self) -> usize;

    fn submit_buffer(&mut self, samples: &[f32]);
}

/// Audio device contract: opens output streams.
pub trait AudioBackend {
    fn open_output(&mut self, sample_rate: u32, channels: u16) -> Result<Box<dyn AudioOutput>>;
}

/// A source bound to the output it plays through
struct Stream {
    output: Box<dyn AudioOutput>,
    source: Box<dyn AudioSource>,
}

pub struct MusicPlayer {
    backend: Box<dyn AudioBackend>,
    playing: Option<Stream>,
    next: Option<Stream>,
    fade: f64,
    fade_time: f64,
}

impl MusicPlayer {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            playing: None,
            next: None,
            fade: 0.0,
            fade_time: 0.0,
        }
    }

    /// Start a song.
    ///
    /// `fade_time <= 0` stops whatever is playing and starts at once.
    /// A positive fade crossfades from the current song over that many
    /// seconds; starting a new fade while one is in flight promotes the
    /// incoming song to "current" and restarts the fade clock.
    pub fn play(&mut self, source: Box<dyn AudioSource>, fade_time: f64) -> Result<()> {
        if fade_time <= 0.0 {
            self.stop();

            let mut output = self
                .backend
                .open_output(source.sample_rate(), source.channels())?;
            output.play();
            self.playing = Some(Stream { output, source });
            engine_info!("squall::MusicPlayer", "Playing song");
        } else {
            self.fade = 0.0;
            self.fade_time = fade_time;

            // A fade already in flight: the half-faded song becomes the
            // outgoing one.
            if let Some(next) = self.next.take() {
                self.playing = Some(next);
            }

            let mut output = self
                .backend
                .open_output(source.sample_rate(), source.channels())?;
            output.play();
            self.next = Some(Stream { output, source });
            engine_info!("squall::MusicPlayer", "Crossfading to song over {}s", fade_time);
        }

        Ok(())
    }

    /// Drop both outputs and reset the fade clock.
    pub fn stop(&mut self) {
        self.playing = None;
        self.next = None;
        self.fade = 0.0;
        self.fade_time = 0.0;
    }

    pub fn is_playing(&self) -> bool {
        self.playing.is_some() || self.next.is_some()
    }

    /// Advance the crossfade and keep both outputs fed.
    pub fn update(&mut self, delta: f64) {
        if self.fade < self.fade_time && self.fade_time > 0.0 {
            self.fade += delta;

            let volume = (self.fade / self.fade_time).clamp(0.0, 1.0) as f32;

            if let Some(playing) = &mut self.playing {
                playing.output.set_volume(1.0 - volume);
            }
            if let Some(next) = &mut self.next {
                next.output.set_volume(volume);
            }
        } else if self.fade_time > 0.0 {
            // Fade elapsed: the incoming song becomes current, the old
            // output is dropped.
            self.fade = 0.0;
            self.fade_time = 0.0;
            self.playing = self.next.take();
            engine_debug!("squall::MusicPlayer", "Crossfade complete");
        }

        for stream in [&mut self.playing, &mut self.next].into_iter().flatten() {
            if stream.output.pending_buffer_count() < PENDING_BUFFER_TARGET {
                let frame = stream.source.read_frame();
                stream.output.submit_buffer(&frame);
            }
        }
    }

    /// Volume-weighted output power averaged over the live streams.
    pub fn power(&self) -> f32 {
        let mut result = 0.0;
        let mut streams = 0;

        if let Some(playing) = &self.playing {
            streams += 1;
            result += playing.output.power() * playing.output.volume();
        }
        if let Some(next) = &self.next {
            streams += 1;
            result += next.output.power() * next.output.volume();
        }

        if streams == 0 {
            return 0.0;
        }
        result / streams as f32
    }
}

#[cfg(test)]
#[path = "music_player_tests.rs"]
mod tests;
