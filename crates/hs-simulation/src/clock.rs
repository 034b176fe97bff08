/// Tracks simulation time: a monotonic tick counter and the simulated
/// seconds that have actually elapsed (paused ticks add none).
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    tick: u64,
    elapsed_seconds: f64,
}

impl SimClock {
    /// Create a clock at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the next tick. Returns the new tick number.
    pub fn advance(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Account for simulated seconds that actually passed.
    pub fn add_elapsed(&mut self, seconds: f64) {
        self.elapsed_seconds += seconds;
    }

    /// Return the current tick number.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Total simulated seconds since the start.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }
}
