use hs_core::WorldGrid;

use crate::character::{CharacterId, Characters};
use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::event::Event;
use crate::event_log::{EventLog, LogEntry, Outcome};

/// Joystick axes, polled on demand by `ApplyJoystick`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Joystick {
    x: f64,
    y: f64,
}

impl Joystick {
    /// Set both axes, clamped to `[-1, 1]`. NaN reads as centred.
    pub fn set(&mut self, x: f64, y: f64) {
        self.x = clamp_axis(x);
        self.y = clamp_axis(y);
    }

    /// Current `(x, y)` deflection.
    pub fn axes(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

fn clamp_axis(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

/// Orchestrator mode and input state that listeners may change.
#[derive(Debug, Clone, Default)]
pub struct SimState {
    /// While set, elapsed time is forced to zero.
    pub paused: bool,
    /// Statistics overlay flag for the renderer.
    pub show_stats: bool,
    /// The character steered by the joystick and addressed by `setTile`.
    pub player: Option<CharacterId>,
    /// Last joystick deflection reported by the input collaborator.
    pub joystick: Joystick,
}

/// Mutable context passed to each listener while the queue drains.
pub struct SimContext<'a> {
    /// The tile grid and free bodies.
    pub grid: &'a mut WorldGrid,
    /// All actors.
    pub characters: &'a mut Characters,
    /// Mode flags and input state.
    pub state: &'a mut SimState,
    /// Outcome history.
    pub log: &'a mut EventLog,
    /// The clock, read-only during a drain.
    pub clock: &'a SimClock,
    /// Run configuration.
    pub config: &'a SimConfig,
    outbox: &'a mut Vec<Event>,
}

impl<'a> SimContext<'a> {
    pub(crate) fn new(
        grid: &'a mut WorldGrid,
        characters: &'a mut Characters,
        state: &'a mut SimState,
        log: &'a mut EventLog,
        clock: &'a SimClock,
        config: &'a SimConfig,
        outbox: &'a mut Vec<Event>,
    ) -> Self {
        Self {
            grid,
            characters,
            state,
            log,
            clock,
            config,
            outbox,
        }
    }

    /// Enqueue a follow-up event. It is dispatched later in the same drain.
    pub fn emit(&mut self, event: Event) {
        self.outbox.push(event);
    }

    /// Record an outcome at the current tick.
    pub fn record(&mut self, outcome: Outcome, description: impl Into<String>) {
        self.log
            .push(LogEntry::new(self.clock.tick(), outcome, description));
    }

    /// The current tick.
    pub fn tick(&self) -> u64 {
        self.clock.tick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joystick_clamps_axes() {
        let mut stick = Joystick::default();
        stick.set(2.5, -0.25);
        assert_eq!(stick.axes(), (1.0, -0.25));
        stick.set(f64::NAN, -7.0);
        assert_eq!(stick.axes(), (0.0, -1.0));
    }
}
