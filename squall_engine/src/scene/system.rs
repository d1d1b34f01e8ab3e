/// Scene extension points: per-frame systems, scene-level components,
/// and user lifecycle hooks.
///
/// All three are single-interface dynamic dispatch registered into
/// ordered collections on the scene; no inheritance hierarchy beyond
/// the trait itself.

use crate::input::InputSystem;
use crate::registry::Registry;
use super::GameTime;

/// Scene state handed to systems, scene components, and hooks.
///
/// Borrowing the registry and input queue through the context keeps the
/// scene itself out of reach, so a callback can never re-enter the frame
/// loop it is running inside.
pub struct SystemContext<'a> {
    pub registry: &'a mut Registry,
    pub input: &'a mut InputSystem,
    pub time: GameTime,
}

/// A per-frame simulation system.
///
/// Systems tick in registration order every update, deterministically.
pub trait System {
    /// Called once when the system is registered
    fn init(&mut self, _ctx: &mut SystemContext) {}

    /// Called every unpaused update tick
    fn update(&mut self, _ctx: &mut SystemContext) {}

    /// Called during scene unload, in reverse registration order
    fn unload(&mut self) {}
}

/// A scene-level component with load/unload hooks.
///
/// The scene takes ownership at registration, so a component instance
/// can never be bound to two scenes at once.
pub trait SceneComponent {
    /// Called when the component is added to a scene
    fn load(&mut self, _ctx: &mut SystemContext) {}

    /// Called when the scene unloads
    fn unload(&mut self, _ctx: &mut SystemContext) {}
}

/// User-overridable scene lifecycle hooks.
pub trait SceneHooks {
    /// Invoked at the end of a successful load
    fn on_load(&mut self, _ctx: &mut SystemContext) {}

    /// Invoked at the end of every unpaused update
    fn on_update(&mut self, _ctx: &mut SystemContext) {}

    /// Invoked during unload, after systems and components are gone
    fn on_unload(&mut self, _ctx: &mut SystemContext) {}
}

/// Hooks that do nothing; the default for scenes without user logic.
pub struct NoHooks;

impl SceneHooks for NoHooks {}
