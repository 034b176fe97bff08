use std::fmt;

use glam::DVec2;
use hs_core::{Body, BodyId, BodyType, WorldGrid};
use serde::{Deserialize, Serialize};

/// Identifier of an actor, unique and stable for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId(pub u32);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// A mobile actor with a body in the world, a velocity, a bounded
/// inventory, and one equip slot.
///
/// The actor's own body lives in the grid's free-body list and is referred
/// to by id. Carried bodies are owned here, either in the inventory or in the
/// equip slot, never both.
#[derive(Debug, Clone)]
pub struct MovableCharacter {
    id: CharacterId,
    body: BodyId,
    velocity: DVec2,
    speed: f64,
    inventory: Vec<Body>,
    capacity: usize,
    equipped: Option<Body>,
}

impl MovableCharacter {
    /// Create an idle actor with an empty inventory.
    pub fn new(id: CharacterId, body: BodyId, speed: f64, capacity: usize) -> Self {
        Self {
            id,
            body,
            velocity: DVec2::ZERO,
            speed,
            inventory: Vec::with_capacity(capacity),
            capacity,
            equipped: None,
        }
    }

    /// The actor's id.
    pub fn id(&self) -> CharacterId {
        self.id
    }

    /// Id of the actor's own body.
    pub fn body(&self) -> BodyId {
        self.body
    }

    /// Current velocity in world units per second.
    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    /// Speed at unit input.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Carried bodies, oldest pickup first.
    pub fn inventory(&self) -> &[Body] {
        &self.inventory
    }

    /// Maximum inventory size.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True if another pickup would be rejected.
    pub fn is_inventory_full(&self) -> bool {
        self.inventory.len() >= self.capacity
    }

    /// The equipped body, if any.
    pub fn equipped(&self) -> Option<&Body> {
        self.equipped.as_ref()
    }

    /// Set the velocity from an input vector, scaled by the actor's speed.
    /// The vector is not normalised.
    pub fn steer(&mut self, dir_x: f64, dir_y: f64) {
        self.velocity = DVec2::new(dir_x, dir_y) * self.speed;
    }

    /// Stop moving.
    pub fn halt(&mut self) {
        self.velocity = DVec2::ZERO;
    }

    /// Append a body to the inventory. When full, the body is handed back untouched.
    pub fn add_to_inventory(&mut self, body: Body) -> Result<(), Body> {
        if self.is_inventory_full() {
            return Err(body);
        }
        self.inventory.push(body);
        Ok(())
    }

    /// Take the most recently added body.
    pub fn remove_last_from_inventory(&mut self) -> Option<Body> {
        self.inventory.pop()
    }

    /// Move the body at `index` into the equip slot. A previously equipped
    /// body goes to the back of the inventory. Returns `false` and changes
    /// nothing if `index` is out of range.
    pub fn equip_from_inventory(&mut self, index: usize) -> bool {
        if index >= self.inventory.len() {
            return false;
        }
        let body = self.inventory.remove(index);
        if let Some(previous) = self.equipped.replace(body) {
            self.inventory.push(previous);
        }
        true
    }

    /// Move the equipped body to the back of the inventory. Returns `false`
    /// if nothing is equipped or the inventory is full.
    pub fn unequip_into_inventory(&mut self) -> bool {
        if self.equipped.is_none() || self.is_inventory_full() {
            return false;
        }
        match self.equipped.take() {
            Some(body) => {
                self.inventory.push(body);
                true
            }
            None => false,
        }
    }

    /// Rotate the inventory by one: the first item moves to the back.
    pub fn cycle_inventory(&mut self) {
        if !self.inventory.is_empty() {
            self.inventory.rotate_left(1);
        }
    }
}

/// All actors, in spawn order.
#[derive(Debug, Default)]
pub struct Characters {
    actors: Vec<MovableCharacter>,
    next_id: u32,
}

impl Characters {
    /// An empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn an actor with a fresh person body at `(x, y)`.
    pub fn spawn(
        &mut self,
        grid: &mut WorldGrid,
        x: f64,
        y: f64,
        speed: f64,
        capacity: usize,
    ) -> CharacterId {
        let id = CharacterId(self.next_id);
        self.next_id += 1;
        let body = grid.spawn_body(BodyType::Person, x, y);
        self.actors
            .push(MovableCharacter::new(id, body, speed, capacity));
        id
    }

    /// Look up an actor.
    pub fn get(&self, id: CharacterId) -> Option<&MovableCharacter> {
        self.actors.iter().find(|c| c.id == id)
    }

    /// Look up an actor mutably.
    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut MovableCharacter> {
        self.actors.iter_mut().find(|c| c.id == id)
    }

    /// All actors in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &MovableCharacter> {
        self.actors.iter()
    }

    /// Number of actors.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Return `true` if there are no actors.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// The first actor, if any.
    pub fn first(&self) -> Option<CharacterId> {
        self.actors.first().map(|c| c.id)
    }

    /// The actor after `id` in spawn order, wrapping to the first.
    /// An unknown `id` also yields the first actor.
    pub fn next_after(&self, id: CharacterId) -> Option<CharacterId> {
        let next = self
            .actors
            .iter()
            .position(|c| c.id == id)
            .and_then(|i| self.actors.get(i + 1));
        next.or_else(|| self.actors.first()).map(|c| c.id)
    }

    /// Integrate `position += velocity * elapsed` for every actor whose body
    /// is free in the grid. Carried actors stay put.
    pub fn update(&self, elapsed: f64, grid: &mut WorldGrid) {
        for actor in &self.actors {
            if let Some(body) = grid.body_mut(actor.body) {
                body.position += actor.velocity * elapsed;
            }
        }
    }
}
