//! Single-player minesweeper core: board generation, adjacency annotation,
//! iterative flood reveal, flags, win/loss detection, and the session/renderer
//! contract. Rendering itself lives outside this crate; a renderer feeds
//! [`Intent`]s into a [`GameSession`] and paints the [`GameUpdate`]s it gets
//! back.

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;
pub use view::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod session;
mod types;
mod view;

/// Board side of the reference game.
pub const DEFAULT_SIDE: Ix = 10;

/// Mine count of the reference game.
pub const DEFAULT_MINES: Ax = 20;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub side: Ix,
    pub mines: Ax,
}

impl GameConfig {
    pub const fn new_unchecked(side: Ix, mines: Ax) -> Self {
        Self { side, mines }
    }

    /// Validates the configuration: mines must leave at least one safe cell.
    /// A mineless board is accepted (trivial always-win game).
    pub fn new(side: Ix, mines: Ax) -> Result<Self> {
        let cells = mult(side, side);
        if mines >= cells {
            return Err(GameError::InvalidConfig { mines, cells });
        }
        Ok(Self::new_unchecked(side, mines))
    }

    pub const fn total_cells(&self) -> Ax {
        mult(self.side, self.side)
    }

    pub const fn safe_cells(&self) -> Ax {
        self.total_cells() - self.mines
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_SIDE, DEFAULT_MINES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_mines_filling_the_board() {
        assert_eq!(
            GameConfig::new(3, 9),
            Err(GameError::InvalidConfig { mines: 9, cells: 9 })
        );
        assert!(GameConfig::new(3, 25).is_err());
        assert!(GameConfig::new(0, 0).is_err());
    }

    #[test]
    fn config_accepts_a_mineless_board() {
        let config = GameConfig::new(3, 0).unwrap();
        assert_eq!(config.safe_cells(), 9);
    }

    #[test]
    fn default_config_matches_the_reference_game() {
        let config = GameConfig::default();
        assert_eq!((config.side, config.mines), (10, 20));
        assert_eq!(config.total_cells(), 100);
        assert_eq!(config.safe_cells(), 80);
    }
}
