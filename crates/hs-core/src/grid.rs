use glam::DVec2;
use rand::Rng;
use serde::Serialize;
use tracing::trace;

use crate::automaton::{self, Step, Transition};
use crate::body::{Body, BodyId, BodyType};
use crate::error::{CoreError, CoreResult};
use crate::generator::MapGenerator;
use crate::rules::TileRules;
use crate::tile::{MapObjectType, TileCell};

/// Orthogonal neighbour offsets, in the order spread draws from: N, E, S, W.
const NEIGHBOURS: [(i64, i64); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Counts of tile transitions applied during one or more advances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TileReport {
    /// Cells that decayed.
    pub decayed: usize,
    /// Cells that evolved.
    pub evolved: usize,
    /// Neighbour cells converted by spread.
    pub spread: usize,
}

impl TileReport {
    /// Add another report's counts to this one.
    pub fn merge(&mut self, other: TileReport) {
        self.decayed += other.decayed;
        self.evolved += other.evolved;
        self.spread += other.spread;
    }

    /// Total number of cells that changed kind.
    pub fn total(&self) -> usize {
        self.decayed + self.evolved + self.spread
    }
}

/// Fixed-size tile array plus the bodies lying loose in the world.
///
/// The grid owns every tile mutation. Bodies enter and leave the free list
/// only through [`WorldGrid::spawn_body`], [`WorldGrid::insert_body`], and
/// [`WorldGrid::remove_body`].
#[derive(Debug, Clone)]
pub struct WorldGrid {
    width: usize,
    height: usize,
    cells: Vec<TileCell>,
    moisture: Vec<f64>,
    bodies: Vec<Body>,
    next_body_id: u64,
}

impl WorldGrid {
    /// A grid of bare dirt with a dry moisture field.
    pub fn new(width: usize, height: usize) -> CoreResult<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidGridSize { width, height });
        }
        let len = width * height;
        Ok(Self {
            width,
            height,
            cells: vec![TileCell::default(); len],
            moisture: vec![0.0; len],
            bodies: Vec::new(),
            next_body_id: 0,
        })
    }

    /// Create a grid and hand it to a generator for its one-shot population.
    pub fn generate<G: MapGenerator + ?Sized>(
        width: usize,
        height: usize,
        generator: &mut G,
    ) -> CoreResult<Self> {
        let mut grid = Self::new(width, height)?;
        generator.generate(&mut grid);
        Ok(grid)
    }

    /// Width in tiles.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in tiles.
    pub fn height(&self) -> usize {
        self.height
    }

    /// True if `(u, v)` addresses a cell of this grid.
    pub fn contains(&self, u: i64, v: i64) -> bool {
        self.index(u, v).is_some()
    }

    fn index(&self, u: i64, v: i64) -> Option<usize> {
        let u = usize::try_from(u).ok()?;
        let v = usize::try_from(v).ok()?;
        (u < self.width && v < self.height).then_some(v * self.width + u)
    }

    fn checked_index(&self, u: i64, v: i64) -> CoreResult<usize> {
        self.index(u, v).ok_or(CoreError::OutOfBounds { u, v })
    }

    fn coords(&self, index: usize) -> (i64, i64) {
        ((index % self.width) as i64, (index / self.width) as i64)
    }

    // -----------------------------------------------------------------------
    // Tiles
    // -----------------------------------------------------------------------

    /// The cell at `(u, v)`.
    pub fn tile_at(&self, u: i64, v: i64) -> CoreResult<TileCell> {
        Ok(self.cells[self.checked_index(u, v)?])
    }

    /// Overwrite the kind at `(u, v)`, resetting its age. Bypasses the automaton.
    pub fn set_tile(&mut self, u: i64, v: i64, kind: MapObjectType) -> CoreResult<()> {
        let i = self.checked_index(u, v)?;
        self.cells[i].set_kind(kind);
        Ok(())
    }

    /// Overwrite a whole cell, age included. Intended for map generation.
    pub fn set_cell(&mut self, u: i64, v: i64, cell: TileCell) -> CoreResult<()> {
        let i = self.checked_index(u, v)?;
        self.cells[i] = TileCell::aged(cell.kind, cell.age);
        Ok(())
    }

    /// Set every cell to `kind` with age 0.
    pub fn fill(&mut self, kind: MapObjectType) {
        self.cells.fill(TileCell::new(kind));
    }

    /// Every cell with its coordinates, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (i64, i64, &TileCell)> {
        self.cells.iter().enumerate().map(|(i, cell)| {
            let (u, v) = self.coords(i);
            (u, v, cell)
        })
    }

    /// Number of cells of each kind, indexed by [`MapObjectType::index`].
    pub fn census(&self) -> [usize; MapObjectType::COUNT] {
        let mut counts = [0; MapObjectType::COUNT];
        for cell in &self.cells {
            counts[cell.kind.index()] += 1;
        }
        counts
    }

    // -----------------------------------------------------------------------
    // Moisture
    // -----------------------------------------------------------------------

    /// The external moisture value at `(u, v)`.
    pub fn moisture_at(&self, u: i64, v: i64) -> CoreResult<f64> {
        Ok(self.moisture[self.checked_index(u, v)?])
    }

    /// Set the external moisture value at `(u, v)`, clamped to `[0, 1]`.
    pub fn set_moisture(&mut self, u: i64, v: i64, moisture: f64) -> CoreResult<()> {
        let i = self.checked_index(u, v)?;
        self.moisture[i] = if moisture.is_nan() {
            0.0
        } else {
            moisture.clamp(0.0, 1.0)
        };
        Ok(())
    }

    /// Wetness sample at `(u, v)`: fully wet next to or on water, otherwise
    /// the external moisture value.
    pub fn wetness_at(&self, u: i64, v: i64) -> CoreResult<f64> {
        Ok(self.wetness_of(self.checked_index(u, v)?))
    }

    fn wetness_of(&self, index: usize) -> f64 {
        let (u, v) = self.coords(index);
        let near_water = std::iter::once((0, 0))
            .chain(NEIGHBOURS)
            .filter_map(|(du, dv)| self.index(u + du, v + dv))
            .any(|j| self.cells[j].kind == MapObjectType::Water);
        if near_water { 1.0 } else { self.moisture[index] }
    }

    // -----------------------------------------------------------------------
    // Bodies
    // -----------------------------------------------------------------------

    /// Free bodies in insertion order.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Look up a free body.
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Look up a free body mutably.
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Create a new free body at `(x, y)`.
    pub fn spawn_body(&mut self, kind: BodyType, x: f64, y: f64) -> BodyId {
        let id = BodyId(self.next_body_id);
        self.next_body_id += 1;
        self.bodies.push(Body {
            id,
            kind,
            position: DVec2::new(x, y),
        });
        id
    }

    /// Return a carried body to the free list, at the back.
    pub fn insert_body(&mut self, body: Body) {
        self.bodies.push(body);
    }

    /// Take a body off the free list, keeping the order of the rest.
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        let i = self.bodies.iter().position(|b| b.id == id)?;
        Some(self.bodies.remove(i))
    }

    /// Free bodies within `radius` of `position`, in free-list order.
    pub fn bodies_near(&self, position: DVec2, radius: f64) -> impl Iterator<Item = &Body> {
        self.bodies
            .iter()
            .filter(move |b| b.distance_to(position) <= radius)
    }

    /// The free body closest to `position`, skipping `exclude`.
    ///
    /// Ties go to the body encountered first in free-list order.
    pub fn nearest_body(&self, position: DVec2, exclude: Option<BodyId>) -> Option<(&Body, f64)> {
        let mut best: Option<(&Body, f64)> = None;
        for body in &self.bodies {
            if Some(body.id) == exclude {
                continue;
            }
            let dist = body.distance_to(position);
            if best.is_none_or(|(_, shortest)| dist < shortest) {
                best = Some((body, dist));
            }
        }
        best
    }

    // -----------------------------------------------------------------------
    // Advancement
    // -----------------------------------------------------------------------

    /// Advance every cell once by `elapsed` seconds.
    ///
    /// All steps are computed from the pre-tick state in row-major order,
    /// drawing one neighbour direction from `rng` for each evolving cell that
    /// spreads. Steps are then applied, followed by spreads in row-major
    /// order. A spread only lands on a neighbour that is inside the grid,
    /// merely aged this tick, was not already converted, is not already the
    /// spread kind, and accepts spread under `rules`.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        elapsed: f64,
        rules: &TileRules,
        rng: &mut R,
    ) -> TileReport {
        let steps: Vec<Step> = (0..self.cells.len())
            .map(|i| automaton::step(rules, self.cells[i], elapsed, self.wetness_of(i)))
            .collect();

        let mut spreads = Vec::new();
        for (i, step) in steps.iter().enumerate() {
            if let Transition::Evolved { spread: Some(kind) } = step.transition {
                spreads.push((i, rng.random_range(0..NEIGHBOURS.len()), kind));
            }
        }

        let mut report = TileReport::default();
        let mut mutated = vec![false; self.cells.len()];
        for (i, step) in steps.iter().enumerate() {
            match step.transition {
                Transition::Aged => {}
                Transition::Decayed => report.decayed += 1,
                Transition::Evolved { .. } => report.evolved += 1,
            }
            if step.changed_kind() {
                let (u, v) = self.coords(i);
                trace!(u, v, from = %self.cells[i].kind, to = %step.cell.kind, "tile transition");
                mutated[i] = true;
            }
            self.cells[i] = step.cell;
        }

        for (i, direction, kind) in spreads {
            let (u, v) = self.coords(i);
            let (du, dv) = NEIGHBOURS[direction];
            let Some(j) = self.index(u + du, v + dv) else {
                continue;
            };
            let target = self.cells[j].kind;
            if mutated[j] || target == kind || !rules.accepts_spread(target) {
                continue;
            }
            trace!(u = u + du, v = v + dv, from = %target, to = %kind, "tile spread");
            self.cells[j] = TileCell::new(kind);
            mutated[j] = true;
            report.spread += 1;
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::MapObjectType::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn zero_sized_grid_is_rejected() {
        assert_eq!(
            WorldGrid::new(0, 4).unwrap_err(),
            CoreError::InvalidGridSize {
                width: 0,
                height: 4
            }
        );
    }

    #[test]
    fn tile_at_outside_grid_fails() {
        let grid = WorldGrid::new(4, 3).unwrap();
        assert!(grid.tile_at(3, 2).is_ok());
        assert_eq!(
            grid.tile_at(4, 0).unwrap_err(),
            CoreError::OutOfBounds { u: 4, v: 0 }
        );
        assert!(grid.tile_at(-1, 0).is_err());
        assert!(grid.tile_at(0, 3).is_err());
    }

    #[test]
    fn set_tile_resets_age() {
        let mut grid = WorldGrid::new(2, 2).unwrap();
        grid.set_cell(1, 1, TileCell::aged(Grass, 4.0)).unwrap();
        grid.set_tile(1, 1, PotatoPlanted).unwrap();
        assert_eq!(grid.tile_at(1, 1).unwrap(), TileCell::new(PotatoPlanted));
        assert!(grid.set_tile(2, 0, Grass).is_err());
    }

    #[test]
    fn planted_potato_rots_in_dry_ground() {
        let mut grid = WorldGrid::new(8, 8).unwrap();
        grid.set_tile(3, 3, PotatoPlanted).unwrap();
        let report = grid.advance(15.0, &TileRules::standard(), &mut rng());
        assert_eq!(grid.tile_at(3, 3).unwrap(), TileCell::new(OrganicRubble));
        assert_eq!(report.decayed, 1);
        assert_eq!(report.evolved, 0);
    }

    #[test]
    fn potato_next_to_water_sprouts() {
        let mut grid = WorldGrid::new(8, 8).unwrap();
        grid.set_tile(3, 3, PotatoPlanted).unwrap();
        grid.set_tile(4, 3, Water).unwrap();
        assert_eq!(grid.wetness_at(3, 3).unwrap(), 1.0);
        grid.advance(15.0, &TileRules::standard(), &mut rng());
        assert_eq!(grid.tile_at(3, 3).unwrap(), TileCell::new(PotatoSapling));
    }

    #[test]
    fn wetness_uses_moisture_away_from_water() {
        let mut grid = WorldGrid::new(3, 3).unwrap();
        grid.set_moisture(0, 0, 0.4).unwrap();
        grid.set_moisture(1, 0, 3.0).unwrap();
        assert_eq!(grid.wetness_at(0, 0).unwrap(), 0.4);
        assert_eq!(grid.wetness_at(1, 0).unwrap(), 1.0);
        assert_eq!(grid.wetness_at(2, 2).unwrap(), 0.0);
        grid.set_tile(2, 1, Water).unwrap();
        assert_eq!(grid.wetness_at(2, 2).unwrap(), 1.0);
        assert_eq!(grid.wetness_at(0, 2).unwrap(), 0.0);
    }

    #[test]
    fn ages_advance_without_transitions() {
        let mut grid = WorldGrid::new(2, 1).unwrap();
        let report = grid.advance(2.5, &TileRules::standard(), &mut rng());
        assert_eq!(report, TileReport::default());
        for (_, _, cell) in grid.cells() {
            assert_eq!(*cell, TileCell::aged(Dirt, 2.5));
        }
    }

    #[test]
    fn wet_grass_spreads_to_one_neighbour() {
        let mut grid = WorldGrid::new(3, 3).unwrap();
        grid.set_cell(1, 1, TileCell::aged(Grass, 9.9)).unwrap();
        grid.set_moisture(1, 1, 1.0).unwrap();

        let report = grid.advance(0.1, &TileRules::standard(), &mut rng());

        assert_eq!(report.evolved, 1);
        assert_eq!(report.spread, 1);
        assert_eq!(grid.tile_at(1, 1).unwrap(), TileCell::new(Grass));
        let grown: Vec<_> = NEIGHBOURS
            .iter()
            .filter(|(du, dv)| grid.tile_at(1 + du, 1 + dv).unwrap().kind == Grass)
            .collect();
        assert_eq!(grown.len(), 1);
        assert_eq!(grid.census()[Grass.index()], 2);
    }

    #[test]
    fn spread_is_reproducible_for_a_seed() {
        let build = || {
            let mut grid = WorldGrid::new(5, 5).unwrap();
            for v in 0..5 {
                grid.set_cell(2, v, TileCell::aged(Grass, 9.0)).unwrap();
                for u in 0..5 {
                    grid.set_moisture(u, v, 1.0).unwrap();
                }
            }
            grid
        };
        let rules = TileRules::standard();
        let mut a = build();
        let mut b = build();
        a.advance(1.0, &rules, &mut StdRng::seed_from_u64(99));
        b.advance(1.0, &rules, &mut StdRng::seed_from_u64(99));
        let kinds = |g: &WorldGrid| g.cells().map(|(_, _, c)| c.kind).collect::<Vec<_>>();
        assert_eq!(kinds(&a), kinds(&b));
    }

    #[test]
    fn spread_never_leaves_the_grid() {
        let mut grid = WorldGrid::new(1, 1).unwrap();
        grid.set_cell(0, 0, TileCell::aged(Grass, 10.0)).unwrap();
        grid.set_moisture(0, 0, 1.0).unwrap();
        let report = grid.advance(0.0, &TileRules::standard(), &mut rng());
        assert_eq!(report.evolved, 1);
        assert_eq!(report.spread, 0);
    }

    #[test]
    fn spread_skips_resistant_neighbours() {
        let mut grid = WorldGrid::new(3, 3).unwrap();
        grid.fill(Water);
        grid.set_cell(1, 1, TileCell::aged(Grass, 10.0)).unwrap();
        let report = grid.advance(0.0, &TileRules::standard(), &mut rng());
        assert_eq!(report.evolved, 1);
        assert_eq!(report.spread, 0);
        assert_eq!(grid.census()[Water.index()], 8);
    }

    #[test]
    fn spread_does_not_override_a_pending_transition() {
        let mut grid = WorldGrid::new(3, 3).unwrap();
        for v in 0..3 {
            for u in 0..3 {
                grid.set_cell(u, v, TileCell::aged(OrganicRubble, 119.95))
                    .unwrap();
            }
        }
        grid.set_cell(1, 1, TileCell::aged(Grass, 9.95)).unwrap();
        grid.set_moisture(1, 1, 1.0).unwrap();

        let report = grid.advance(0.1, &TileRules::standard(), &mut rng());

        assert_eq!(report.decayed, 8);
        assert_eq!(report.evolved, 1);
        assert_eq!(report.spread, 0);
        assert_eq!(grid.census()[Dirt.index()], 8);
    }

    #[test]
    fn nearest_body_prefers_first_on_ties() {
        let mut grid = WorldGrid::new(4, 4).unwrap();
        let me = grid.spawn_body(BodyType::Person, 0.0, 0.0);
        let first = grid.spawn_body(BodyType::Bucket, 3.0, 0.0);
        let _second = grid.spawn_body(BodyType::Stone, 0.0, 3.0);
        let far = grid.spawn_body(BodyType::Potato, 30.0, 30.0);

        let (body, dist) = grid.nearest_body(DVec2::ZERO, Some(me)).unwrap();
        assert_eq!(body.id, first);
        assert_eq!(dist, 3.0);

        let near: Vec<BodyId> = grid.bodies_near(DVec2::ZERO, 5.0).map(|b| b.id).collect();
        assert_eq!(near.len(), 3);
        assert!(!near.contains(&far));
    }

    #[test]
    fn nearest_body_with_only_self_is_none() {
        let mut grid = WorldGrid::new(4, 4).unwrap();
        let me = grid.spawn_body(BodyType::Person, 5.0, 5.0);
        assert!(grid.nearest_body(DVec2::new(5.0, 5.0), Some(me)).is_none());
    }

    #[test]
    fn remove_and_insert_move_bodies_out_and_back() {
        let mut grid = WorldGrid::new(4, 4).unwrap();
        let a = grid.spawn_body(BodyType::Bucket, 1.0, 1.0);
        let b = grid.spawn_body(BodyType::Stone, 2.0, 2.0);
        let taken = grid.remove_body(a).unwrap();
        assert_eq!(grid.bodies().len(), 1);
        assert!(grid.body(a).is_none());
        assert!(grid.remove_body(a).is_none());

        grid.insert_body(taken);
        let order: Vec<BodyId> = grid.bodies().iter().map(|b| b.id).collect();
        assert_eq!(order, vec![b, a]);
    }

    #[test]
    fn generator_populates_once() {
        let mut generator = crate::generator::UniformGenerator(Grass);
        let grid = WorldGrid::generate(3, 2, &mut generator).unwrap();
        assert_eq!(grid.census()[Grass.index()], 6);
    }
}
