use crate::*;
pub use random::*;

mod random;

/// Source of uniform random indices consumed by mine placement.
pub trait RandomSource {
    /// Uniformly random integer in `[0, upper)`; `upper` is always positive.
    fn next_in_range(&mut self, upper: usize) -> usize;
}

impl<R: rand::Rng> RandomSource for R {
    fn next_in_range(&mut self, upper: usize) -> usize {
        self.random_range(0..upper)
    }
}

/// Strategy that produces the mine tiles for a fresh board.
pub trait MinefieldGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<Vec<Tile>>;
}
