use crate::grid::WorldGrid;

/// Populates a freshly created grid with its initial tiles.
///
/// Called exactly once, before the first tick. Implementations may also set
/// the external moisture field and spawn loose bodies.
pub trait MapGenerator {
    /// Fill every cell of `grid`.
    fn generate(&mut self, grid: &mut WorldGrid);
}

/// Fills the whole grid with a single kind. Mostly useful in tests.
#[derive(Debug, Clone, Copy)]
pub struct UniformGenerator(pub crate::tile::MapObjectType);

impl MapGenerator for UniformGenerator {
    fn generate(&mut self, grid: &mut WorldGrid) {
        grid.fill(self.0);
    }
}
