use hs_core::{BodyId, BodyType, TileReport, WorldGrid};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::character::{CharacterId, Characters};
use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::context::{SimContext, SimState};
use crate::error::{SimError, SimResult};
use crate::event::Event;
use crate::event_log::EventLog;
use crate::gameplay::GameplayListener;
use crate::interaction::InteractionObserver;
use crate::listener::Listener;
use crate::queue::EventQueue;

/// The top-level simulation orchestrator.
///
/// Owns the world grid, actors, event queue, listeners, clock, RNG, and
/// outcome log. Each [`Simulation::update`] drains the queue to completion,
/// then advances actor motion and the tile automaton unless paused.
pub struct Simulation {
    grid: WorldGrid,
    characters: Characters,
    queue: EventQueue,
    listeners: Vec<Box<dyn Listener>>,
    state: SimState,
    clock: SimClock,
    rng: StdRng,
    log: EventLog,
    config: SimConfig,
    tiles: TileReport,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("tick", &self.clock.tick())
            .field("characters", &self.characters.len())
            .field("listeners", &self.listeners.len())
            .field("pending", &self.queue.len())
            .field("paused", &self.state.paused)
            .finish()
    }
}

impl Simulation {
    /// Create a simulation over a generated grid with the built-in listeners:
    /// [`GameplayListener`] followed by [`InteractionObserver`].
    pub fn new(grid: WorldGrid, config: SimConfig) -> SimResult<Self> {
        Self::with_listeners(
            grid,
            config,
            vec![
                Box::new(GameplayListener::new()),
                Box::new(InteractionObserver::new()),
            ],
        )
    }

    /// Create a simulation with an explicit, ordered set of listeners.
    pub fn with_listeners(
        grid: WorldGrid,
        config: SimConfig,
        listeners: Vec<Box<dyn Listener>>,
    ) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            grid,
            characters: Characters::new(),
            queue: EventQueue::new(),
            listeners,
            state: SimState::default(),
            clock: SimClock::new(),
            rng: StdRng::seed_from_u64(config.seed),
            log: EventLog::new(config.max_log_entries),
            config,
            tiles: TileReport::default(),
        })
    }

    /// Register a listener after the existing ones.
    pub fn add_listener<L: Listener + 'static>(&mut self, listener: L) {
        self.listeners.push(Box::new(listener));
    }

    /// Spawn an actor at `(x, y)`. The first actor spawned becomes the player.
    pub fn spawn_character(&mut self, x: f64, y: f64) -> CharacterId {
        let id = self.characters.spawn(
            &mut self.grid,
            x,
            y,
            self.config.move_speed,
            self.config.inventory_capacity,
        );
        if self.state.player.is_none() {
            self.state.player = Some(id);
        }
        id
    }

    /// Spawn a free body at `(x, y)`.
    pub fn spawn_body(&mut self, kind: BodyType, x: f64, y: f64) -> BodyId {
        self.grid.spawn_body(kind, x, y)
    }

    /// Hand control to `id`.
    pub fn set_player(&mut self, id: CharacterId) -> SimResult<()> {
        if self.characters.get(id).is_none() {
            return Err(SimError::CharacterNotFound(id));
        }
        self.state.player = Some(id);
        Ok(())
    }

    /// Queue an event for the next drain.
    pub fn enqueue(&mut self, event: Event) {
        self.queue.enqueue(event);
    }

    /// Report the joystick deflection, read by the next `ApplyJoystick`.
    pub fn set_joystick(&mut self, x: f64, y: f64) {
        self.state.joystick.set(x, y);
    }

    /// Dispatch every queued event, and every event they cause, to the
    /// listeners accepting it. Returns the number of events dispatched.
    pub fn drain_events(&mut self) -> usize {
        let Self {
            grid,
            characters,
            queue,
            listeners,
            state,
            clock,
            log,
            config,
            ..
        } = self;
        queue.drain(|event, outbox| {
            let kind = event.kind();
            let mut ctx = SimContext::new(grid, characters, state, log, clock, config, outbox);
            for listener in listeners.iter_mut() {
                if listener.accepts(kind) {
                    listener.on_event(event, &mut ctx);
                }
            }
        })
    }

    /// Run one tick: drain the queue, then advance actors and tiles by
    /// `elapsed` seconds. While paused the step still runs with zero
    /// elapsed time, so thresholds already crossed still fire.
    pub fn update(&mut self, elapsed: f64) -> TileReport {
        self.clock.advance();
        let dispatched = self.drain_events();
        let seconds = if self.state.paused {
            debug!(tick = self.clock.tick(), dispatched, "paused, stepping with zero elapsed");
            0.0
        } else {
            elapsed
        };
        self.clock.add_elapsed(seconds);
        self.characters.update(seconds, &mut self.grid);
        let report = self
            .grid
            .advance(seconds, &self.config.tile_rules, &mut self.rng);
        self.tiles.merge(report);
        report
    }

    /// Run `ticks` updates of `elapsed` seconds each.
    pub fn run(&mut self, ticks: u64, elapsed: f64) -> TileReport {
        let mut total = TileReport::default();
        for _ in 0..ticks {
            total.merge(self.update(elapsed));
        }
        total
    }

    /// The world grid.
    pub fn grid(&self) -> &WorldGrid {
        &self.grid
    }

    /// The world grid, mutably. Changes bypass the event queue.
    pub fn grid_mut(&mut self) -> &mut WorldGrid {
        &mut self.grid
    }

    /// All actors.
    pub fn characters(&self) -> &Characters {
        &self.characters
    }

    /// The character under player control.
    pub fn player(&self) -> Option<CharacterId> {
        self.state.player
    }

    /// Whether the simulation is paused.
    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    /// Whether the statistics overlay is on.
    pub fn show_stats(&self) -> bool {
        self.state.show_stats
    }

    /// The clock.
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Outcome history.
    pub fn events(&self) -> &EventLog {
        &self.log
    }

    /// Tile transitions accumulated over the run.
    pub fn tile_report(&self) -> TileReport {
        self.tiles
    }

    /// The run configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Access a listener by downcasting to a concrete type.
    pub fn get_listener<T: Listener + 'static>(&self) -> Option<&T> {
        self.listeners
            .iter()
            .find_map(|l| l.as_any().downcast_ref::<T>())
    }

    /// Access a listener mutably by downcasting to a concrete type.
    pub fn get_listener_mut<T: Listener + 'static>(&mut self) -> Option<&mut T> {
        self.listeners
            .iter_mut()
            .find_map(|l| l.as_any_mut().downcast_mut::<T>())
    }
}
