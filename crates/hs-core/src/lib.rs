//! Core types for Homestead: tiles, transition rules, bodies, and the world grid.
//!
//! This crate holds the data model and the pure tile automaton. It knows
//! nothing about events or actors; [`WorldGrid`] can be built and advanced
//! on its own, which keeps the rules testable in isolation.

/// The tile automaton: one pure step per cell per tick.
pub mod automaton;
/// Free-standing physical objects and their identifiers.
pub mod body;
/// World-space constants shared by every crate.
pub mod constants;
/// Error types used throughout the crate.
pub mod error;
/// The map generation collaborator interface.
pub mod generator;
/// The tile array, the free-body list, and spatial queries.
pub mod grid;
/// Validated transition tables and wetness-response curves.
pub mod rules;
/// Tile kinds and tile cells.
pub mod tile;

/// Re-export of the automaton step types.
pub use automaton::{Step, Transition};
/// Re-export body types.
pub use body::{Body, BodyId, BodyType};
/// Re-export world-space constants.
pub use constants::TILE_SIZE;
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the generator trait.
pub use generator::MapGenerator;
/// Re-export grid types.
pub use grid::{TileReport, WorldGrid};
/// Re-export rule table types.
pub use rules::{TileRules, TileRulesBuilder, WetnessCurve};
/// Re-export tile types.
pub use tile::{MapObjectType, TileCell};
