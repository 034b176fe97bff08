use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of map object occupying a tile.
///
/// The set is closed: rule tables are indexed directly by [`MapObjectType::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapObjectType {
    /// Bare soil.
    Dirt,
    /// Rotting plant matter; decays back into dirt.
    OrganicRubble,
    /// Broken stone left behind by a collapsed wall.
    StoneRubble,
    /// Grass; spreads to neighbours while it is kept wet.
    Grass,
    /// Standing water; the source of wetness for its neighbours.
    Water,
    /// A freshly planted potato.
    PotatoPlanted,
    /// A young potato plant.
    PotatoSapling,
    /// A grown potato plant.
    PotatoPlant,
    /// A stone wall.
    StoneWall,
}

impl MapObjectType {
    /// Number of tile kinds.
    pub const COUNT: usize = 9;

    /// Every tile kind, in ordinal order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Dirt,
        Self::OrganicRubble,
        Self::StoneRubble,
        Self::Grass,
        Self::Water,
        Self::PotatoPlanted,
        Self::PotatoSapling,
        Self::PotatoPlant,
        Self::StoneWall,
    ];

    /// Ordinal of this kind, used to index rule tables.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Snake-case name, as accepted by [`MapObjectType::parse`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Dirt => "dirt",
            Self::OrganicRubble => "organic_rubble",
            Self::StoneRubble => "stone_rubble",
            Self::Grass => "grass",
            Self::Water => "water",
            Self::PotatoPlanted => "potato_planted",
            Self::PotatoSapling => "potato_sapling",
            Self::PotatoPlant => "potato_plant",
            Self::StoneWall => "stone_wall",
        }
    }

    /// Parse a snake-case name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.name() == lower)
    }

    /// Single-character glyph for text renderings of the map.
    pub fn glyph(self) -> char {
        match self {
            Self::Dirt => '.',
            Self::OrganicRubble => ',',
            Self::StoneRubble => ':',
            Self::Grass => '"',
            Self::Water => '~',
            Self::PotatoPlanted => 'p',
            Self::PotatoSapling => 'q',
            Self::PotatoPlant => 'P',
            Self::StoneWall => '#',
        }
    }
}

impl fmt::Display for MapObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One grid square: a map object kind and how long it has held that kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileCell {
    /// The current map object kind.
    pub kind: MapObjectType,
    /// Seconds since the kind last changed. Never negative.
    pub age: f64,
}

impl TileCell {
    /// A fresh cell of the given kind with age 0.
    pub fn new(kind: MapObjectType) -> Self {
        Self { kind, age: 0.0 }
    }

    /// A cell with an explicit starting age, as produced by map generation.
    pub fn aged(kind: MapObjectType, age: f64) -> Self {
        Self {
            kind,
            age: age.max(0.0),
        }
    }

    /// Replace the kind and reset the age.
    pub fn set_kind(&mut self, kind: MapObjectType) {
        self.kind = kind;
        self.age = 0.0;
    }
}

impl Default for TileCell {
    fn default() -> Self {
        Self::new(MapObjectType::Dirt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_match_all_table() {
        for (i, kind) in MapObjectType::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn parse_accepts_names_in_any_case() {
        assert_eq!(
            MapObjectType::parse("potato_planted"),
            Some(MapObjectType::PotatoPlanted)
        );
        assert_eq!(MapObjectType::parse("GRASS"), Some(MapObjectType::Grass));
        assert_eq!(MapObjectType::parse("lava"), None);
    }

    #[test]
    fn set_kind_resets_age() {
        let mut cell = TileCell::aged(MapObjectType::Grass, 7.5);
        cell.set_kind(MapObjectType::Dirt);
        assert_eq!(cell.kind, MapObjectType::Dirt);
        assert_eq!(cell.age, 0.0);
    }

    #[test]
    fn aged_clamps_negative_age() {
        let cell = TileCell::aged(MapObjectType::Water, -3.0);
        assert_eq!(cell.age, 0.0);
    }
}
