use crate::*;
pub use random::*;

mod random;

/// Produces a mine layout for a validated [`GameConfig`].
pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}
