use serde::{Deserialize, Serialize};

/// Runtime state of a single cell.
///
/// `Flagged` is only reachable from `Hidden`; `Revealed` and `Mine` are terminal
/// per cell. `Mine` marks a mine exposed after a loss.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Revealed(u8),
    Flagged,
    Mine,
}

impl CellState {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}
