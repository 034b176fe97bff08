use hs_core::CoreError;

use crate::character::CharacterId;

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised while setting up or steering a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// No actor has the given id.
    #[error("character not found in simulation: {0}")]
    CharacterNotFound(CharacterId),

    /// The configuration cannot be run.
    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),

    /// An error from the world grid or rule tables.
    #[error(transparent)]
    Core(#[from] CoreError),
}
