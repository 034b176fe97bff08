use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Identifier of a body, unique for the lifetime of a [`crate::WorldGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a body is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyType {
    /// The physical body of an actor.
    Person,
    /// A bucket; usable as a tool.
    Bucket,
    /// A harvested potato.
    Potato,
    /// A loose stone.
    Stone,
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Person => write!(f, "person"),
            Self::Bucket => write!(f, "bucket"),
            Self::Potato => write!(f, "potato"),
            Self::Stone => write!(f, "stone"),
        }
    }
}

/// A physical object in the world.
///
/// A body is owned by exactly one container at a time: the grid's free-body
/// list, an actor's inventory, or an actor's equip slot. Moving it between
/// them moves the value, so it can never be in two places at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Stable identifier.
    pub id: BodyId,
    /// What the body is.
    pub kind: BodyType,
    /// World-space position. Only meaningful while the body is free.
    pub position: DVec2,
}

impl Body {
    /// Euclidean distance to a point.
    pub fn distance_to(&self, point: DVec2) -> f64 {
        self.position.distance(point)
    }
}
