//! Seeded meadow: the map generation collaborator used by `simulate`.

use hs_core::{BodyType, MapGenerator, MapObjectType, TILE_SIZE, TileCell, WorldGrid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Grass and dirt over a patchy moisture field, with a pond and a stretch of wall.
#[derive(Debug)]
pub struct MeadowGenerator {
    rng: StdRng,
}

impl MeadowGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Centres of `count` distinct tiles to spawn actors on. Capped at the
    /// number of tiles in the grid.
    pub fn camp_sites(&mut self, grid: &WorldGrid, count: usize) -> Vec<(f64, f64)> {
        let count = count.min(grid.width() * grid.height());
        let mut tiles: Vec<(usize, usize)> = Vec::with_capacity(count);
        while tiles.len() < count {
            let tile = (
                self.rng.random_range(0..grid.width()),
                self.rng.random_range(0..grid.height()),
            );
            if !tiles.contains(&tile) {
                tiles.push(tile);
            }
        }
        tiles
            .into_iter()
            .map(|(u, v)| tile_centre(u as i64, v as i64))
            .collect()
    }

    /// Spawn a bucket a quarter tile east of each camp site, so the actor
    /// standing there finds it nearer than anything else.
    pub fn scatter_buckets(grid: &mut WorldGrid, sites: &[(f64, f64)]) {
        for &(x, y) in sites {
            grid.spawn_body(BodyType::Bucket, x + TILE_SIZE / 4.0, y);
        }
    }

    fn ground(&mut self) -> TileCell {
        let roll: f64 = self.rng.random();
        let kind = if roll < 0.55 {
            MapObjectType::Grass
        } else if roll < 0.85 {
            MapObjectType::Dirt
        } else if roll < 0.93 {
            MapObjectType::StoneRubble
        } else {
            MapObjectType::OrganicRubble
        };
        TileCell::aged(kind, self.rng.random_range(0.0..4.0))
    }
}

fn tile_centre(u: i64, v: i64) -> (f64, f64) {
    (
        (u as f64 + 0.5) * TILE_SIZE,
        (v as f64 + 0.5) * TILE_SIZE,
    )
}

impl MapGenerator for MeadowGenerator {
    fn generate(&mut self, grid: &mut WorldGrid) {
        let (width, height) = (grid.width() as i64, grid.height() as i64);

        for v in 0..height {
            for u in 0..width {
                let cell = self.ground();
                let moisture = self.rng.random_range(0.0..1.0);
                let _ = grid.set_cell(u, v, cell);
                let _ = grid.set_moisture(u, v, moisture);
            }
        }

        let pond_u = self.rng.random_range(0..width);
        let pond_v = self.rng.random_range(0..height);
        let radius = self.rng.random_range(1..=2_i64);
        for v in (pond_v - radius)..=(pond_v + radius) {
            for u in (pond_u - radius)..=(pond_u + radius) {
                if (u - pond_u).pow(2) + (v - pond_v).pow(2) <= radius * radius {
                    let _ = grid.set_tile(u, v, MapObjectType::Water);
                }
            }
        }

        let wall_v = self.rng.random_range(0..height);
        let wall_start = self.rng.random_range(0..width);
        let wall_len = self.rng.random_range(2..=5_i64);
        for u in wall_start..(wall_start + wall_len).min(width) {
            let _ = grid.set_tile(u, wall_v, MapObjectType::StoneWall);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meadow(seed: u64) -> WorldGrid {
        WorldGrid::generate(16, 10, &mut MeadowGenerator::new(seed)).unwrap()
    }

    #[test]
    fn same_seed_same_meadow() {
        let a = meadow(9);
        let b = meadow(9);
        let kinds = |g: &WorldGrid| g.cells().map(|(_, _, c)| c.kind).collect::<Vec<_>>();
        assert_eq!(kinds(&a), kinds(&b));
    }

    #[test]
    fn meadow_has_pond_and_wall() {
        let census = meadow(1).census();
        assert!(census[MapObjectType::Water.index()] >= 1);
        assert!(census[MapObjectType::StoneWall.index()] >= 1);
        assert_eq!(census.iter().sum::<usize>(), 160);
    }

    #[test]
    fn camp_sites_are_distinct_and_inside_the_map() {
        let grid = meadow(4);
        let sites = MeadowGenerator::new(4).camp_sites(&grid, 3);
        assert_eq!(sites.len(), 3);
        for (i, &(x, y)) in sites.iter().enumerate() {
            assert!(grid.contains((x / TILE_SIZE) as i64, (y / TILE_SIZE) as i64));
            assert!(!sites[..i].contains(&(x, y)));
        }
    }

    #[test]
    fn camp_sites_are_capped_by_grid_size() {
        let grid = WorldGrid::new(1, 2).unwrap();
        assert_eq!(MeadowGenerator::new(0).camp_sites(&grid, 5).len(), 2);
    }
}
