use crate::context::SimContext;
use crate::event::{Event, EventKind};

/// A handler registered with the [`crate::Simulation`].
///
/// Listeners are called in registration order for every drained event whose
/// variant they accept. A listener reacts by mutating the world through the
/// context, or by emitting follow-up events with [`SimContext::emit`]; those
/// are dispatched before the current drain returns.
///
/// Interaction effects (a tool wearing down its target, a target changing
/// kind) are added by registering another listener that accepts
/// [`EventKind::Interaction`].
pub trait Listener: std::fmt::Debug {
    /// Human-readable name for this listener.
    fn name(&self) -> &str;

    /// Whether this listener handles events of the given variant.
    fn accepts(&self, kind: EventKind) -> bool;

    /// Handle one event. Failures are absorbed here; there is nothing to return.
    fn on_event(&mut self, event: &Event, ctx: &mut SimContext<'_>);

    /// Support downcasting to concrete types.
    fn as_any(&self) -> &dyn std::any::Any;

    /// Support downcasting to concrete types.
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
