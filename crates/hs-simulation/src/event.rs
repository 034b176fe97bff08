use hs_core::{Body, MapObjectType, TileCell};

use crate::character::CharacterId;

/// Name of the generic event that places a tile in front of the player.
pub const SET_TILE: &str = "setTile";

/// Discrete control actions produced by the input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// Poll the joystick axes and steer the player character.
    ApplyJoystick,
    /// Toggle between running and paused.
    Pause,
    /// Toggle the statistics overlay flag.
    ToggleStats,
    /// Hand control to the next character.
    ChangeCharacter,
}

/// What a character intends to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    /// Pick up or use a tool on whatever is nearby.
    Interact,
    /// Drop the most recently picked-up item.
    Drop,
    /// Equip the inventory item at this index.
    Equip(usize),
    /// Put the equipped item back into the inventory.
    Unequip,
    /// Rotate the inventory by one slot.
    CycleInventory,
}

/// What an interaction is aimed at.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionTarget {
    /// A free body, as it was when the interaction was resolved.
    Body(Body),
    /// A tile, as it was when the interaction was resolved.
    MapObject {
        /// Column of the tile.
        u: i64,
        /// Row of the tile.
        v: i64,
        /// The tile's state.
        cell: TileCell,
    },
}

/// A resolved interaction between an actor, an optional tool, and a target.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    /// The acting character.
    pub actor: CharacterId,
    /// The tool in hand, if any.
    pub tool: Option<Body>,
    /// What the interaction is aimed at.
    pub target: InteractionTarget,
}

impl Interaction {
    /// A tool applied to another body.
    pub fn body_on_body(actor: CharacterId, tool: Body, target: Body) -> Self {
        Self {
            actor,
            tool: Some(tool),
            target: InteractionTarget::Body(target),
        }
    }

    /// A tool applied to a tile.
    pub fn body_on_map_object(actor: CharacterId, tool: Body, u: i64, v: i64, cell: TileCell) -> Self {
        Self {
            actor,
            tool: Some(tool),
            target: InteractionTarget::MapObject { u, v, cell },
        }
    }

    /// Short label for the target kind.
    pub fn target_kind(&self) -> &'static str {
        match self.target {
            InteractionTarget::Body(_) => "body",
            InteractionTarget::MapObject { .. } => "map_object",
        }
    }
}

/// Payload of a generic event.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No payload.
    None,
    /// A tile kind.
    Tile(MapObjectType),
    /// Free text.
    Text(String),
}

/// An immutable record flowing through the [`crate::EventQueue`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A control action from the input collaborator.
    Control(ControlAction),
    /// Something a character wants to do.
    CharacterIntent {
        /// The character acting.
        character: CharacterId,
        /// What it wants to do.
        kind: IntentKind,
    },
    /// A resolved tool interaction.
    Interaction(Interaction),
    /// A named event with a loosely typed payload.
    Generic {
        /// The event name, e.g. [`SET_TILE`].
        name: String,
        /// The payload.
        payload: Payload,
    },
}

/// The variant tag of an [`Event`], used by listeners to declare what they handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// [`Event::Control`].
    Control,
    /// [`Event::CharacterIntent`].
    CharacterIntent,
    /// [`Event::Interaction`].
    Interaction,
    /// [`Event::Generic`].
    Generic,
}

impl Event {
    /// The variant tag of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Control(_) => EventKind::Control,
            Self::CharacterIntent { .. } => EventKind::CharacterIntent,
            Self::Interaction(_) => EventKind::Interaction,
            Self::Generic { .. } => EventKind::Generic,
        }
    }

    /// A character intent.
    pub fn intent(character: CharacterId, kind: IntentKind) -> Self {
        Self::CharacterIntent { character, kind }
    }

    /// The generic event placing `kind` in front of the player.
    pub fn set_tile(kind: MapObjectType) -> Self {
        Self::Generic {
            name: SET_TILE.to_string(),
            payload: Payload::Tile(kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use hs_core::{BodyId, BodyType};

    fn body(id: u64, kind: BodyType) -> Body {
        Body {
            id: BodyId(id),
            kind,
            position: DVec2::ZERO,
        }
    }

    #[test]
    fn kind_tags_match_variants() {
        assert_eq!(
            Event::Control(ControlAction::Pause).kind(),
            EventKind::Control
        );
        assert_eq!(
            Event::intent(CharacterId(0), IntentKind::Drop).kind(),
            EventKind::CharacterIntent
        );
        assert_eq!(
            Event::set_tile(MapObjectType::Grass).kind(),
            EventKind::Generic
        );
        let interaction = Interaction::body_on_body(
            CharacterId(1),
            body(0, BodyType::Bucket),
            body(1, BodyType::Stone),
        );
        assert_eq!(Event::Interaction(interaction).kind(), EventKind::Interaction);
    }

    #[test]
    fn interaction_target_kinds() {
        let on_body = Interaction::body_on_body(
            CharacterId(1),
            body(0, BodyType::Bucket),
            body(1, BodyType::Potato),
        );
        assert_eq!(on_body.target_kind(), "body");

        let on_tile = Interaction::body_on_map_object(
            CharacterId(1),
            body(0, BodyType::Bucket),
            2,
            3,
            TileCell::new(MapObjectType::Water),
        );
        assert_eq!(on_tile.target_kind(), "map_object");
        assert!(on_tile.tool.is_some());
    }

    #[test]
    fn set_tile_event_carries_tile_payload() {
        let event = Event::set_tile(MapObjectType::PotatoPlanted);
        assert_eq!(
            event,
            Event::Generic {
                name: "setTile".into(),
                payload: Payload::Tile(MapObjectType::PotatoPlanted),
            }
        );
    }
}
