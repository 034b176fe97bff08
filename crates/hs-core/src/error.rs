use crate::tile::MapObjectType;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the world grid and the rule tables.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// Tile coordinates outside the grid.
    #[error("tile ({u}, {v}) is outside the grid")]
    OutOfBounds {
        /// Column index.
        u: i64,
        /// Row index.
        v: i64,
    },

    /// A grid was requested with a zero dimension.
    #[error("invalid grid size {width}x{height}")]
    InvalidGridSize {
        /// Requested width in tiles.
        width: usize,
        /// Requested height in tiles.
        height: usize,
    },

    /// A decay rule with a zero, negative, or non-finite dwell time.
    #[error("decay time for {kind} must be positive and finite, got {time}")]
    InvalidDecayTime {
        /// The tile kind the rule was registered for.
        kind: MapObjectType,
        /// The rejected dwell time in seconds.
        time: f64,
    },

    /// An evolution rule with a negative or non-finite age threshold.
    #[error("evolve age for {kind} must be non-negative and finite, got {age}")]
    InvalidEvolveAge {
        /// The tile kind the rule was registered for.
        kind: MapObjectType,
        /// The rejected age threshold in seconds.
        age: f64,
    },

    /// A spread rule on a kind that never evolves, so it could never fire.
    #[error("{0} has a spread rule but no evolution rule")]
    SpreadWithoutEvolution(MapObjectType),

    /// A wetness curve with the wrong parameter count or unusable values.
    #[error("malformed wetness curve for {kind}: {reason}")]
    MalformedWetnessCurve {
        /// The tile kind the curve was registered for.
        kind: MapObjectType,
        /// What was wrong with the parameters.
        reason: String,
    },
}
