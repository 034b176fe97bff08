use hs_core::constants::facing_tile;
use tracing::{debug, info};

use crate::character::CharacterId;
use crate::context::SimContext;
use crate::event::{Event, EventKind, Interaction};
use crate::event_log::Outcome;
use crate::listener::Listener;

/// Resolve an `Interact` intent for `id`.
///
/// The nearest free body other than the actor's own is the candidate when it
/// lies strictly inside the interaction radius. With nothing equipped the
/// candidate is picked up directly. With a tool equipped a body-on-body
/// interaction is emitted for the candidate, and a body-on-map-object
/// interaction is always emitted for the facing tile.
pub fn resolve_interact(id: CharacterId, ctx: &mut SimContext<'_>) {
    let Some(actor) = ctx.characters.get(id) else {
        debug!(character = %id, "interact from unknown character ignored");
        return;
    };
    let Some(own) = ctx.grid.body(actor.body()) else {
        debug!(character = %id, "interact while carried ignored");
        return;
    };
    let position = own.position;
    let tool = actor.equipped().cloned();
    let full = actor.is_inventory_full();

    let candidate = ctx
        .grid
        .nearest_body(position, Some(actor.body()))
        .filter(|(_, dist)| *dist < ctx.config.interaction_radius)
        .map(|(body, _)| body.clone());

    if let Some(target) = candidate {
        match &tool {
            Some(tool) => {
                ctx.emit(Event::Interaction(Interaction::body_on_body(
                    id,
                    tool.clone(),
                    target,
                )));
            }
            None if full => {
                debug!(character = %id, body = %target.id, "inventory full, pickup ignored");
            }
            None => pick_up(id, target.id, ctx),
        }
    }

    if let Some(tool) = tool {
        let (u, v) = facing_tile(position);
        match ctx.grid.tile_at(u, v) {
            Ok(cell) => ctx.emit(Event::Interaction(Interaction::body_on_map_object(
                id, tool, u, v, cell,
            ))),
            Err(err) => debug!(character = %id, %err, "facing tile outside grid"),
        }
    }
}

fn pick_up(id: CharacterId, body: hs_core::BodyId, ctx: &mut SimContext<'_>) {
    let Some(taken) = ctx.grid.remove_body(body) else {
        return;
    };
    let Some(actor) = ctx.characters.get_mut(id) else {
        ctx.grid.insert_body(taken);
        return;
    };
    match actor.add_to_inventory(taken) {
        Ok(()) => ctx.record(
            Outcome::PickedUp {
                character: id,
                body,
            },
            format!("{id} picked up {body}"),
        ),
        Err(rejected) => ctx.grid.insert_body(rejected),
    }
}

/// Baseline handler for [`Event::Interaction`]: observes and records, never
/// mutates the world.
#[derive(Debug, Default)]
pub struct InteractionObserver {
    observed: usize,
}

impl InteractionObserver {
    /// Create an observer with a zeroed count.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of interactions seen so far.
    pub fn observed(&self) -> usize {
        self.observed
    }
}

impl Listener for InteractionObserver {
    fn name(&self) -> &str {
        "interaction_observer"
    }

    fn accepts(&self, kind: EventKind) -> bool {
        kind == EventKind::Interaction
    }

    fn on_event(&mut self, event: &Event, ctx: &mut SimContext<'_>) {
        let Event::Interaction(interaction) = event else {
            return;
        };
        self.observed += 1;
        let tool = interaction.tool.as_ref().map(|b| b.kind);
        let target = interaction.target_kind();
        info!(
            character = %interaction.actor,
            tool = ?tool,
            target,
            "interaction observed"
        );
        ctx.record(
            Outcome::Interacted {
                character: interaction.actor,
                tool,
                target,
            },
            format!("{} used {:?} on {target}", interaction.actor, tool),
        );
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
