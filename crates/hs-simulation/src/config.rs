use hs_core::{TILE_SIZE, TileRules};

use crate::error::{SimError, SimResult};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for deterministic spread decisions.
    pub seed: u64,
    /// Transition tables driving the tile automaton.
    pub tile_rules: TileRules,
    /// Maximum number of bodies an actor can carry, not counting the equipped one.
    pub inventory_capacity: usize,
    /// Actor speed in world units per second at full joystick deflection.
    pub move_speed: f64,
    /// Bodies closer than this can be picked up or used as interaction targets.
    pub interaction_radius: f64,
    /// Maximum event log size (oldest entries dropped when exceeded). 0 = unlimited.
    pub max_log_entries: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tile_rules: TileRules::standard(),
            inventory_capacity: 8,
            move_speed: 48.0,
            interaction_radius: TILE_SIZE,
            max_log_entries: 0,
        }
    }
}

impl SimConfig {
    /// Set the RNG seed for deterministic simulation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the tile transition tables.
    pub fn with_tile_rules(mut self, rules: TileRules) -> Self {
        self.tile_rules = rules;
        self
    }

    /// Set the inventory capacity for newly spawned actors.
    pub fn with_inventory_capacity(mut self, capacity: usize) -> Self {
        self.inventory_capacity = capacity;
        self
    }

    /// Set the movement speed for newly spawned actors.
    pub fn with_move_speed(mut self, speed: f64) -> Self {
        self.move_speed = speed;
        self
    }

    /// Set the pickup and interaction radius.
    pub fn with_interaction_radius(mut self, radius: f64) -> Self {
        self.interaction_radius = radius;
        self
    }

    /// Set the maximum event log size (0 = unlimited).
    pub fn with_max_log_entries(mut self, max: usize) -> Self {
        self.max_log_entries = max;
        self
    }

    /// Reject values that would make the simulation misbehave at runtime.
    pub fn validate(&self) -> SimResult<()> {
        if self.inventory_capacity == 0 {
            return Err(SimError::InvalidConfig(
                "inventory capacity must be at least 1".into(),
            ));
        }
        if !(self.move_speed.is_finite() && self.move_speed >= 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "move speed must be finite and non-negative, got {}",
                self.move_speed
            )));
        }
        if !(self.interaction_radius.is_finite() && self.interaction_radius > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "interaction radius must be finite and positive, got {}",
                self.interaction_radius
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = SimConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.inventory_capacity, 8);
        assert_eq!(config.interaction_radius, TILE_SIZE);
        assert_eq!(config.max_log_entries, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_builder_chain() {
        let config = SimConfig::default()
            .with_seed(123)
            .with_inventory_capacity(2)
            .with_move_speed(10.0)
            .with_interaction_radius(4.0)
            .with_max_log_entries(500)
            .with_tile_rules(TileRules::inert());
        assert_eq!(config.seed, 123);
        assert_eq!(config.inventory_capacity, 2);
        assert!((config.move_speed - 10.0).abs() < f64::EPSILON);
        assert!((config.interaction_radius - 4.0).abs() < f64::EPSILON);
        assert_eq!(config.max_log_entries, 500);
        assert_eq!(config.tile_rules, TileRules::inert());
    }

    #[test]
    fn config_rejects_unusable_values() {
        assert!(
            SimConfig::default()
                .with_inventory_capacity(0)
                .validate()
                .is_err()
        );
        assert!(SimConfig::default().with_move_speed(-1.0).validate().is_err());
        assert!(
            SimConfig::default()
                .with_move_speed(f64::INFINITY)
                .validate()
                .is_err()
        );
        assert!(
            SimConfig::default()
                .with_interaction_radius(0.0)
                .validate()
                .is_err()
        );
    }
}
