use glam::DVec2;

/// Linear size of one tile in world units.
pub const TILE_SIZE: f64 = 16.0;

/// Tile coordinates containing a world position.
pub fn tile_coords(position: DVec2) -> (i64, i64) {
    (
        (position.x / TILE_SIZE).floor() as i64,
        (position.y / TILE_SIZE).floor() as i64,
    )
}

/// The tile directly in front of a body: one tile further along +y.
///
/// Both tile placement and tool-on-tile interactions address this tile.
pub fn facing_tile(position: DVec2) -> (i64, i64) {
    (
        (position.x / TILE_SIZE).floor() as i64,
        ((position.y + TILE_SIZE) / TILE_SIZE).floor() as i64,
    )
}
