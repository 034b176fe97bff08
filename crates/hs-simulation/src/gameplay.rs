use glam::DVec2;
use hs_core::MapObjectType;
use hs_core::constants::facing_tile;
use tracing::{debug, info};

use crate::character::CharacterId;
use crate::context::SimContext;
use crate::event::{ControlAction, Event, EventKind, IntentKind, Payload, SET_TILE};
use crate::event_log::Outcome;
use crate::interaction::resolve_interact;
use crate::listener::Listener;

/// Handles control actions, character intents, and the `setTile` command.
#[derive(Debug, Default)]
pub struct GameplayListener;

impl GameplayListener {
    /// Create the listener.
    pub fn new() -> Self {
        Self
    }
}

impl Listener for GameplayListener {
    fn name(&self) -> &str {
        "gameplay"
    }

    fn accepts(&self, kind: EventKind) -> bool {
        matches!(
            kind,
            EventKind::Control | EventKind::CharacterIntent | EventKind::Generic
        )
    }

    fn on_event(&mut self, event: &Event, ctx: &mut SimContext<'_>) {
        match event {
            Event::Control(action) => control(*action, ctx),
            Event::CharacterIntent { character, kind } => intent(*character, *kind, ctx),
            Event::Generic { name, payload } if name == SET_TILE => match payload {
                Payload::Tile(kind) => set_tile(*kind, ctx),
                other => debug!(?other, "setTile without a tile payload ignored"),
            },
            Event::Generic { name, .. } => debug!(name = %name, "unhandled generic event"),
            Event::Interaction(_) => {}
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

fn control(action: ControlAction, ctx: &mut SimContext<'_>) {
    match action {
        ControlAction::Pause => {
            ctx.state.paused = !ctx.state.paused;
            let paused = ctx.state.paused;
            info!(paused, "pause toggled");
            let label = if paused { "paused" } else { "resumed" };
            ctx.record(Outcome::PauseToggled { paused }, label);
        }
        ControlAction::ToggleStats => {
            ctx.state.show_stats = !ctx.state.show_stats;
            let visible = ctx.state.show_stats;
            ctx.record(
                Outcome::StatsToggled { visible },
                format!("stats {}", if visible { "shown" } else { "hidden" }),
            );
        }
        ControlAction::ChangeCharacter => change_character(ctx),
        ControlAction::ApplyJoystick => {
            let Some(player) = ctx.state.player else {
                debug!("joystick with no player ignored");
                return;
            };
            let (x, y) = ctx.state.joystick.axes();
            match ctx.characters.get_mut(player) {
                Some(actor) => actor.steer(x, y),
                None => debug!(character = %player, "joystick for unknown player ignored"),
            }
        }
    }
}

fn change_character(ctx: &mut SimContext<'_>) {
    let from = ctx.state.player;
    if let Some(current) = from.and_then(|id| ctx.characters.get_mut(id)) {
        current.halt();
    }
    let next = match from {
        Some(id) => ctx.characters.next_after(id),
        None => ctx.characters.first(),
    };
    let Some(to) = next else {
        debug!("no character to switch to");
        return;
    };
    ctx.state.player = Some(to);
    info!(character = %to, "player changed");
    ctx.record(Outcome::PlayerChanged { from, to }, format!("now playing {to}"));
}

fn intent(id: CharacterId, kind: IntentKind, ctx: &mut SimContext<'_>) {
    if ctx.characters.get(id).is_none() {
        debug!(character = %id, ?kind, "intent from unknown character ignored");
        return;
    }
    match kind {
        IntentKind::Interact => resolve_interact(id, ctx),
        IntentKind::Drop => drop_last(id, ctx),
        IntentKind::Equip(index) => equip(id, index, ctx),
        IntentKind::Unequip => unequip(id, ctx),
        IntentKind::CycleInventory => {
            if let Some(actor) = ctx.characters.get_mut(id) {
                actor.cycle_inventory();
            }
        }
    }
}

fn drop_last(id: CharacterId, ctx: &mut SimContext<'_>) {
    let Some(actor) = ctx.characters.get_mut(id) else {
        return;
    };
    let Some(position) = ctx.grid.body(actor.body()).map(|b| b.position) else {
        debug!(character = %id, "drop while carried ignored");
        return;
    };
    let Some(mut body) = actor.remove_last_from_inventory() else {
        debug!(character = %id, "drop with empty inventory ignored");
        return;
    };
    body.position = position + DVec2::new(0.0, 1.0);
    let dropped = body.id;
    ctx.grid.insert_body(body);
    ctx.record(
        Outcome::Dropped {
            character: id,
            body: dropped,
        },
        format!("{id} dropped {dropped}"),
    );
}

fn equip(id: CharacterId, index: usize, ctx: &mut SimContext<'_>) {
    let Some(actor) = ctx.characters.get_mut(id) else {
        return;
    };
    if !actor.equip_from_inventory(index) {
        debug!(character = %id, index, "equip index out of range ignored");
        return;
    }
    if let Some(body) = actor.equipped().map(|b| b.id) {
        ctx.record(
            Outcome::Equipped {
                character: id,
                body,
            },
            format!("{id} equipped {body}"),
        );
    }
}

fn unequip(id: CharacterId, ctx: &mut SimContext<'_>) {
    let Some(actor) = ctx.characters.get_mut(id) else {
        return;
    };
    let Some(body) = actor.equipped().map(|b| b.id) else {
        return;
    };
    if !actor.unequip_into_inventory() {
        debug!(character = %id, "inventory full, unequip ignored");
        return;
    }
    ctx.record(
        Outcome::Unequipped {
            character: id,
            body,
        },
        format!("{id} unequipped {body}"),
    );
}

fn set_tile(kind: MapObjectType, ctx: &mut SimContext<'_>) {
    let Some(player) = ctx.state.player else {
        debug!(%kind, "setTile with no player ignored");
        return;
    };
    let Some(body) = ctx.characters.get(player).map(|c| c.body()) else {
        debug!(character = %player, "setTile for unknown player ignored");
        return;
    };
    let Some(position) = ctx.grid.body(body).map(|b| b.position) else {
        debug!(character = %player, "setTile while carried ignored");
        return;
    };
    let (u, v) = facing_tile(position);
    match ctx.grid.set_tile(u, v, kind) {
        Ok(()) => ctx.record(
            Outcome::TileSet {
                character: player,
                u,
                v,
                kind,
            },
            format!("{player} set ({u}, {v}) to {kind}"),
        ),
        Err(err) => debug!(%err, "setTile target outside grid"),
    }
}
