//! Input events and the generic input-event system.
//!
//! Event sourcing (window pump, OS callbacks) is outside the core. The
//! scene hands each incoming event to the GUI first; only events the GUI
//! does not consume are fired into the [`InputSystem`] queue, where game
//! systems poll them during update.

use std::collections::VecDeque;
use bitflags::bitflags;
use glam::Vec2;

bitflags! {
    /// Modifier keys held during a key or mouse event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keys the engine core cares about.
///
/// Movement keys drive the no-clip camera; the rest exist for GUI and
/// game systems. Backends map their native keycodes onto this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    W,
    A,
    S,
    D,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Space,
    Tab,
    Backspace,
    Delete,
    Home,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseButtonEvent {
    pub position: Vec2,
    pub button: MouseButton,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMoveEvent {
    pub position: Vec2,
    /// Movement since the previous event, in pixels
    pub delta: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseScrollEvent {
    pub position: Vec2,
    pub delta: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyCharEvent {
    pub character: char,
}

/// Any input event, as delivered to game systems
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    MouseDown(MouseButtonEvent),
    MouseUp(MouseButtonEvent),
    MouseMove(MouseMoveEvent),
    MouseScroll(MouseScrollEvent),
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
    KeyChar(KeyCharEvent),
}

/// FIFO queue of input events that were not consumed by the GUI.
#[derive(Debug, Default)]
pub struct InputSystem {
    queue: VecDeque<InputEvent>,
}

impl InputSystem {
    pub fn new() -> Self {
        Self { queue: VecDeque::new() }
    }

    pub fn fire_mouse_down(&mut self, event: MouseButtonEvent) {
        self.queue.push_back(InputEvent::MouseDown(event));
    }

    pub fn fire_mouse_up(&mut self, event: MouseButtonEvent) {
        self.queue.push_back(InputEvent::MouseUp(event));
    }

    pub fn fire_mouse_move(&mut self, event: MouseMoveEvent) {
        self.queue.push_back(InputEvent::MouseMove(event));
    }

    pub fn fire_mouse_scroll(&mut self, event: MouseScrollEvent) {
        self.queue.push_back(InputEvent::MouseScroll(event));
    }

    pub fn fire_key_down(&mut self, event: KeyEvent) {
        self.queue.push_back(InputEvent::KeyDown(event));
    }

    pub fn fire_key_up(&mut self, event: KeyEvent) {
        self.queue.push_back(InputEvent::KeyUp(event));
    }

    pub fn fire_key_char(&mut self, event: KeyCharEvent) {
        self.queue.push_back(InputEvent::KeyChar(event));
    }

    /// Pop the oldest pending event
    pub fn poll(&mut self) -> Option<InputEvent> {
        self.queue.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Drop all pending events
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
