use hs_core::{BodyId, BodyType, MapObjectType};
use serde::Serialize;

use crate::character::CharacterId;

/// What happened, as recorded in the [`EventLog`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outcome {
    /// A character picked up a free body.
    PickedUp {
        /// The character.
        character: CharacterId,
        /// The body picked up.
        body: BodyId,
    },
    /// A character dropped a carried body back into the world.
    Dropped {
        /// The character.
        character: CharacterId,
        /// The body dropped.
        body: BodyId,
    },
    /// A character equipped a body from its inventory.
    Equipped {
        /// The character.
        character: CharacterId,
        /// The body now in hand.
        body: BodyId,
    },
    /// A character put its equipped body back into its inventory.
    Unequipped {
        /// The character.
        character: CharacterId,
        /// The body put away.
        body: BodyId,
    },
    /// An interaction event was observed.
    Interacted {
        /// The acting character.
        character: CharacterId,
        /// The tool used.
        tool: Option<BodyType>,
        /// `"body"` or `"map_object"`.
        target: &'static str,
    },
    /// A tile was overridden by the player.
    TileSet {
        /// The character the tile was placed in front of.
        character: CharacterId,
        /// Column.
        u: i64,
        /// Row.
        v: i64,
        /// New tile kind.
        kind: MapObjectType,
    },
    /// The simulation was paused or resumed.
    PauseToggled {
        /// Whether the simulation is now paused.
        paused: bool,
    },
    /// The statistics overlay was toggled.
    StatsToggled {
        /// Whether statistics are now shown.
        visible: bool,
    },
    /// Control moved to a different character.
    PlayerChanged {
        /// The previous player, if any.
        from: Option<CharacterId>,
        /// The new player.
        to: CharacterId,
    },
}

impl Outcome {
    /// Check whether a given character is involved in this outcome.
    pub fn involves(&self, id: CharacterId) -> bool {
        match self {
            Self::PickedUp { character, .. }
            | Self::Dropped { character, .. }
            | Self::Equipped { character, .. }
            | Self::Unequipped { character, .. }
            | Self::Interacted { character, .. }
            | Self::TileSet { character, .. } => *character == id,
            Self::PlayerChanged { from, to } => *from == Some(id) || *to == id,
            Self::PauseToggled { .. } | Self::StatsToggled { .. } => false,
        }
    }
}

/// A record of something that happened during simulation.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// The tick during which the outcome happened.
    pub tick: u64,
    /// What happened.
    pub outcome: Outcome,
    /// A human-readable description.
    pub description: String,
}

impl LogEntry {
    /// Create a new entry.
    pub fn new(tick: u64, outcome: Outcome, description: impl Into<String>) -> Self {
        Self {
            tick,
            outcome,
            description: description.into(),
        }
    }
}

/// Accumulates outcomes during a simulation run.
#[derive(Debug, Default)]
pub struct EventLog {
    entries: Vec<LogEntry>,
    max_entries: usize,
}

impl EventLog {
    /// Create a new log with the given maximum capacity (0 = unlimited).
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    /// Append an entry, dropping the oldest entries if the log exceeds its capacity.
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
        if self.max_entries > 0 && self.entries.len() > self.max_entries {
            let drain_count = self.entries.len() - self.max_entries;
            self.entries.drain(..drain_count);
        }
    }

    /// Return a slice of all recorded entries.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Return all entries recorded at the given tick.
    pub fn entries_at_tick(&self, tick: u64) -> Vec<&LogEntry> {
        self.entries.iter().filter(|e| e.tick == tick).collect()
    }

    /// Return all entries involving the given character.
    pub fn entries_for_character(&self, id: CharacterId) -> Vec<&LogEntry> {
        self.entries
            .iter()
            .filter(|e| e.outcome.involves(id))
            .collect()
    }

    /// Return the number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all recorded entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pickup(character: u32) -> Outcome {
        Outcome::PickedUp {
            character: CharacterId(character),
            body: BodyId(9),
        }
    }

    #[test]
    fn event_log_push_and_query() {
        let mut log = EventLog::new(0);
        log.push(LogEntry::new(1, pickup(0), "c0 picked up #9"));
        log.push(LogEntry::new(2, pickup(1), "c1 picked up #9"));
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries_at_tick(1).len(), 1);
        assert_eq!(log.entries_for_character(CharacterId(1)).len(), 1);
        assert_eq!(log.entries_for_character(CharacterId(1))[0].tick, 2);
    }

    #[test]
    fn event_log_max_entries_trims() {
        let mut log = EventLog::new(2);
        for i in 0..5 {
            log.push(LogEntry::new(i, pickup(0), "test"));
        }
        assert_eq!(log.len(), 2);
        // Oldest entries were dropped, newest remain
        assert_eq!(log.entries()[0].tick, 3);
        assert_eq!(log.entries()[1].tick, 4);
    }

    #[test]
    fn outcome_involves_character() {
        let a = CharacterId(0);
        let b = CharacterId(1);

        assert!(pickup(0).involves(a));
        assert!(!pickup(0).involves(b));

        let change = Outcome::PlayerChanged {
            from: Some(a),
            to: b,
        };
        assert!(change.involves(a));
        assert!(change.involves(b));
        assert!(!change.involves(CharacterId(2)));

        assert!(!Outcome::PauseToggled { paused: true }.involves(a));
    }

    #[test]
    fn event_log_clear() {
        let mut log = EventLog::new(0);
        log.push(LogEntry::new(1, Outcome::StatsToggled { visible: true }, "stats on"));
        assert!(!log.is_empty());
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn outcomes_serialize_with_type_tag() {
        let json = serde_json::to_value(Outcome::PauseToggled { paused: true }).unwrap();
        assert_eq!(json["type"], "pause_toggled");
        assert_eq!(json["paused"], true);
    }
}
