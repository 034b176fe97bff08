//! ASCII rendering: the read-only renderer collaborator.

use hs_core::constants::tile_coords;
use hs_core::{BodyType, WorldGrid};

fn body_glyph(kind: BodyType) -> char {
    match kind {
        BodyType::Person => '@',
        BodyType::Bucket => 'u',
        BodyType::Potato => 'o',
        BodyType::Stone => '*',
    }
}

/// One line per grid row, tiles as glyphs with free bodies drawn on top.
/// Persons are drawn last so an actor is never hidden by what it stands on.
pub fn render_map(grid: &WorldGrid) -> String {
    let width = grid.width();
    let mut rows: Vec<Vec<char>> = vec![Vec::with_capacity(width); grid.height()];
    for (_, v, cell) in grid.cells() {
        rows[v as usize].push(cell.kind.glyph());
    }

    let (people, things): (Vec<_>, Vec<_>) = grid
        .bodies()
        .iter()
        .partition(|b| b.kind == BodyType::Person);
    for body in things.into_iter().chain(people) {
        let (u, v) = tile_coords(body.position);
        if grid.contains(u, v) {
            rows[v as usize][u as usize] = body_glyph(body.kind);
        }
    }

    rows.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
