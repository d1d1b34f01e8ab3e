//! GUI layer: the host-system contract and the retained text element.
//!
//! The GUI tree implementation is a collaborator behind [`GuiSystem`];
//! the engine only dictates dispatch order (GUI consumption strictly
//! precedes generic input dispatch) and supplies [`TextBlock`], the
//! layout-tree text node built on the text layout engine. Hosts address
//! their elements through [`ElementKey`] slotmap keys.

mod text_block;

use slotmap::new_key_type;

use crate::input::{KeyCharEvent, KeyEvent, MouseButtonEvent, MouseMoveEvent, MouseScrollEvent};
use crate::scene::GameTime;

pub use text_block::TextBlock;

new_key_type! {
    /// Stable key for an element in a GUI host's tree arena
    pub struct ElementKey;
}

/// Retained GUI system contract.
///
/// Input handlers return `true` when the event was consumed; a consumed
/// event never reaches the generic input-event system.
pub trait GuiSystem {
    /// Keep the GUI viewport in sync with the scene viewport
    fn set_viewport_size(&mut self, width: u32, height: u32);

    /// Update the GUI tree (layout, animation)
    fn update(&mut self, time: GameTime);

    /// Render the GUI tree into the currently bound target
    fn render(&mut self, time: GameTime);

    fn mouse_down(&mut self, event: &MouseButtonEvent) -> bool;
    fn mouse_up(&mut self, event: &MouseButtonEvent) -> bool;
    fn mouse_move(&mut self, event: &MouseMoveEvent) -> bool;
    fn mouse_scroll(&mut self, event: &MouseScrollEvent) -> bool;
    fn key_down(&mut self, event: &KeyEvent) -> bool;
    fn key_up(&mut self, event: &KeyEvent) -> bool;
    fn key_char(&mut self, event: &KeyCharEvent) -> bool;
}
