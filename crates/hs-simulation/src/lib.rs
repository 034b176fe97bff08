//! Event-driven, tick-based farm simulation for Homestead.
//!
//! A [`Simulation`] owns the [`hs_core::WorldGrid`], the actors, and a FIFO
//! [`EventQueue`]. Each tick it drains the queue through its registered
//! [`Listener`]s (cascading events included), then advances actor motion and
//! the tile automaton by the elapsed time, unless paused.

/// Actors: movement and inventory.
pub mod character;
/// Simulation clock for tracking ticks and simulated seconds.
pub mod clock;
/// Configuration types for simulation runs.
pub mod config;
/// Mutable context passed to listeners while events drain.
pub mod context;
/// Error types for the simulation crate.
pub mod error;
/// Event types flowing through the queue.
pub mod event;
/// Bounded history of notable outcomes.
pub mod event_log;
/// Handler for control, intent, and generic events.
pub mod gameplay;
/// Interaction resolution and the baseline interaction observer.
pub mod interaction;
/// The trait every event listener implements.
pub mod listener;
/// The append-then-drain event queue.
pub mod queue;
/// Top-level simulation orchestrator.
pub mod simulation;

/// Re-exports of character types.
pub use character::{CharacterId, Characters, MovableCharacter};
/// Re-export of [`clock::SimClock`].
pub use clock::SimClock;
/// Re-export of [`config::SimConfig`].
pub use config::SimConfig;
/// Re-exports of [`context::SimContext`], [`context::SimState`], and [`context::Joystick`].
pub use context::{Joystick, SimContext, SimState};
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of event types.
pub use event::{
    ControlAction, Event, EventKind, IntentKind, Interaction, InteractionTarget, Payload,
};
/// Re-exports of [`event_log::EventLog`], [`event_log::LogEntry`], and [`event_log::Outcome`].
pub use event_log::{EventLog, LogEntry, Outcome};
/// Re-export of [`gameplay::GameplayListener`].
pub use gameplay::GameplayListener;
/// Re-export of [`interaction::InteractionObserver`].
pub use interaction::InteractionObserver;
/// Re-export of [`listener::Listener`].
pub use listener::Listener;
/// Re-export of [`queue::EventQueue`].
pub use queue::EventQueue;
/// Re-export of [`simulation::Simulation`].
pub use simulation::Simulation;
