//! Scripted input: the headless stand-in for keyboard and joystick polling.

use hs_core::MapObjectType;
use hs_simulation::{ControlAction, Event, IntentKind, Simulation};

/// One discrete input action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Joystick(f64, f64),
    Interact,
    Drop,
    Equip(usize),
    Unequip,
    Cycle,
    Pause,
    Stats,
    Next,
    Plant(MapObjectType),
}

/// An action scheduled before a given tick runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedInput {
    pub tick: u64,
    pub action: Action,
}

/// Parse `TICK:ACTION`.
pub fn parse_input(s: &str) -> Result<ScriptedInput, String> {
    let (tick, action) = s
        .split_once(':')
        .ok_or_else(|| format!("expected TICK:ACTION, got '{s}'"))?;
    let tick = tick
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("invalid tick '{tick}': {e}"))?;
    Ok(ScriptedInput {
        tick,
        action: parse_action(action.trim())?,
    })
}

fn parse_action(s: &str) -> Result<Action, String> {
    let (name, arg) = match s.split_once('=') {
        Some((name, arg)) => (name, Some(arg)),
        None => (s, None),
    };
    let action = match (name.to_ascii_lowercase().as_str(), arg) {
        ("left", None) => Action::Joystick(-1.0, 0.0),
        ("right", None) => Action::Joystick(1.0, 0.0),
        ("up", None) => Action::Joystick(0.0, -1.0),
        ("down", None) => Action::Joystick(0.0, 1.0),
        ("stop", None) => Action::Joystick(0.0, 0.0),
        ("joystick", Some(axes)) => {
            let (x, y) = axes
                .split_once(',')
                .ok_or_else(|| format!("joystick expects X,Y, got '{axes}'"))?;
            Action::Joystick(parse_axis(x)?, parse_axis(y)?)
        }
        ("interact", None) => Action::Interact,
        ("drop", None) => Action::Drop,
        ("equip", Some(index)) => Action::Equip(
            index
                .trim()
                .parse()
                .map_err(|e| format!("invalid inventory index '{index}': {e}"))?,
        ),
        ("unequip", None) => Action::Unequip,
        ("cycle", None) => Action::Cycle,
        ("pause", None) => Action::Pause,
        ("stats", None) => Action::Stats,
        ("next", None) => Action::Next,
        ("plant", Some(kind)) => Action::Plant(
            MapObjectType::parse(kind.trim()).ok_or_else(|| format!("unknown tile type '{kind}'"))?,
        ),
        _ => return Err(format!("unknown action '{s}'")),
    };
    Ok(action)
}

fn parse_axis(s: &str) -> Result<f64, String> {
    s.trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid joystick axis '{s}': {e}"))
}

/// Feed an action into the simulation as the input collaborator would.
///
/// Intents address the current player; with no player they are dropped.
pub fn apply(action: Action, sim: &mut Simulation) {
    let player = sim.player();
    let intent = |kind| player.map(|id| Event::intent(id, kind));
    let event = match action {
        Action::Joystick(x, y) => {
            sim.set_joystick(x, y);
            Some(Event::Control(ControlAction::ApplyJoystick))
        }
        Action::Pause => Some(Event::Control(ControlAction::Pause)),
        Action::Stats => Some(Event::Control(ControlAction::ToggleStats)),
        Action::Next => Some(Event::Control(ControlAction::ChangeCharacter)),
        Action::Plant(kind) => Some(Event::set_tile(kind)),
        Action::Interact => intent(IntentKind::Interact),
        Action::Drop => intent(IntentKind::Drop),
        Action::Equip(index) => intent(IntentKind::Equip(index)),
        Action::Unequip => intent(IntentKind::Unequip),
        Action::Cycle => intent(IntentKind::CycleInventory),
    };
    if let Some(event) = event {
        sim.enqueue(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_presets_and_arguments() {
        assert_eq!(
            parse_input("3:left").unwrap(),
            ScriptedInput {
                tick: 3,
                action: Action::Joystick(-1.0, 0.0)
            }
        );
        assert_eq!(
            parse_input("0:joystick=0.5,-1").unwrap().action,
            Action::Joystick(0.5, -1.0)
        );
        assert_eq!(parse_input("7:equip=2").unwrap().action, Action::Equip(2));
        assert_eq!(
            parse_input("9:plant=Potato_Planted").unwrap().action,
            Action::Plant(MapObjectType::PotatoPlanted)
        );
        assert_eq!(parse_input(" 4 : Interact ").unwrap().action, Action::Interact);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_input("interact").is_err());
        assert!(parse_input("x:interact").is_err());
        assert!(parse_input("1:dance").is_err());
        assert!(parse_input("1:equip").is_err());
        assert!(parse_input("1:equip=first").is_err());
        assert!(parse_input("1:joystick=1").is_err());
        assert!(parse_input("1:plant=cabbage").is_err());
        assert!(parse_input("1:left=2").is_err());
    }
}
