use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Mine placement for one board: a square boolean mask plus the exact mine count.
///
/// Immutable once generated; all per-cell runtime state lives in the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mines: Array2<bool>,
    count: Ax,
}

impl MineLayout {
    pub fn from_mask(mines: Array2<bool>) -> Self {
        let count = mines
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap();
        Self { mines, count }
    }

    pub fn from_mine_positions(side: Ix, mine_positions: &[Pos]) -> Result<Self> {
        let mut mines: Array2<bool> = Array2::default([side.into(), side.into()]);

        for &pos in mine_positions {
            if pos.0 >= side || pos.1 >= side {
                return Err(GameError::InvalidCellId);
            }
            mines[pos.to_nd_index()] = true;
        }

        Ok(Self::from_mask(mines))
    }

    pub fn side(&self) -> Ix {
        self.mines.dim().0.try_into().unwrap()
    }

    pub fn total_cells(&self) -> Ax {
        self.mines.len().try_into().unwrap()
    }

    pub fn mine_count(&self) -> Ax {
        self.count
    }

    pub fn safe_cell_count(&self) -> Ax {
        self.total_cells() - self.count
    }

    pub fn contains_mine(&self, pos: Pos) -> bool {
        self[pos]
    }

    pub(crate) fn iter_neighbors(&self, pos: Pos) -> NeighborIter {
        self.mines.iter_neighbors(pos)
    }
}

impl Index<Pos> for MineLayout {
    type Output = bool;

    fn index(&self, (row, col): Pos) -> &Self::Output {
        &self.mines[(row as usize, col as usize)]
    }
}

/// A [`MineLayout`] annotated with per-cell adjacent-mine counts.
///
/// Annotation runs exactly once, at construction; it is a pure function of the
/// mask, so rebuilding from the same layout yields the same counts. Counts stored
/// for mine cells are never surfaced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    layout: MineLayout,
    counts: Array2<u8>,
}

impl Board {
    pub fn annotate(layout: MineLayout) -> Self {
        let side = usize::from(layout.side());
        let counts = Array2::from_shape_fn([side, side], |(row, col)| {
            let pos = (row as Ix, col as Ix);
            layout
                .iter_neighbors(pos)
                .filter(|&neighbor| layout[neighbor])
                .count() as u8
        });
        Self { layout, counts }
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }

    pub fn side(&self) -> Ix {
        self.layout.side()
    }

    pub fn adjacent_mines(&self, pos: Pos) -> u8 {
        self.counts[pos.to_nd_index()]
    }

    pub fn contains_mine(&self, pos: Pos) -> bool {
        self.layout.contains_mine(pos)
    }

    pub(crate) fn iter_neighbors(&self, pos: Pos) -> NeighborIter {
        self.layout.iter_neighbors(pos)
    }
}
