use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

use ndarray::Array2;

use crate::*;

/// Valid transitions:
/// - Ready -> Active (first state-changing reveal)
/// - Ready -> Won (trivial boards)
/// - Ready -> Lost (mine on the first reveal)
/// - Active -> Won
/// - Active -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    Ready,
    Active,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// Per-cell reveal/flag state machine over an annotated board.
///
/// Every state change is journaled in application order so the caller can report
/// deltas; flood fill uses a FIFO worklist, so cascade deltas come out in
/// breadth-first order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealEngine {
    board: Board,
    cells: Array2<CellState>,
    revealed_count: Ax,
    flags_placed: Ax,
    state: EngineState,
    triggered_mine: Option<Pos>,
    changes: Vec<CellId>,
}

impl RevealEngine {
    pub fn new(board: Board) -> Self {
        let side = usize::from(board.side());
        Self {
            board,
            cells: Array2::default([side, side]),
            revealed_count: 0,
            flags_placed: 0,
            state: Default::default(),
            triggered_mine: None,
            changes: Vec::new(),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn side(&self) -> Ix {
        self.board.side()
    }

    pub fn total_cells(&self) -> Ax {
        self.board.layout().total_cells()
    }

    pub fn total_mines(&self) -> Ax {
        self.board.layout().mine_count()
    }

    pub fn flags_placed(&self) -> Ax {
        self.flags_placed
    }

    /// Mines not yet flagged; never negative because flags are capped at the
    /// total mine count.
    pub fn flags_remaining(&self) -> Ax {
        self.total_mines() - self.flags_placed
    }

    pub fn cell(&self, id: CellId) -> Result<CellState> {
        Ok(self.cell_at(self.check_id(id)?))
    }

    pub fn cell_at(&self, pos: Pos) -> CellState {
        self.cells[pos.to_nd_index()]
    }

    pub fn adjacent_mines(&self, pos: Pos) -> u8 {
        self.board.adjacent_mines(pos)
    }

    pub fn has_mine_at(&self, pos: Pos) -> bool {
        self.board.contains_mine(pos)
    }

    pub fn triggered_mine(&self) -> Option<Pos> {
        self.triggered_mine
    }

    /// Drains the journal of cells whose state changed since the last call, in
    /// the order the changes were applied.
    pub fn take_changes(&mut self) -> Vec<CellId> {
        std::mem::take(&mut self.changes)
    }

    /// Reveals a hidden cell, cascading through its zero-adjacency region.
    ///
    /// No-op when the game is finished or the cell is not hidden: flagged cells
    /// must be unflagged first, revealed cells are terminal.
    pub fn reveal(&mut self, id: CellId) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let pos = self.check_id(id)?;

        if self.state.is_finished() || !self.cell_at(pos).is_hidden() {
            return Ok(NoChange);
        }

        if self.board.contains_mine(pos) {
            self.triggered_mine = Some(pos);
            self.expose_mines();
            self.state = EngineState::Lost;
            log::debug!("mine hit at {:?}", pos);
            return Ok(HitMine);
        }

        self.reveal_safe(pos);

        if self.revealed_count == self.board.layout().safe_cell_count() {
            self.state = EngineState::Won;
            log::debug!("all safe cells revealed");
            Ok(Won)
        } else {
            self.mark_started();
            Ok(Revealed)
        }
    }

    /// Toggles the flag on a hidden cell.
    ///
    /// No-op when the game is finished, the cell is already revealed, or placing
    /// a new flag would exceed the total mine count. Removing a flag is always
    /// allowed.
    pub fn toggle_flag(&mut self, id: CellId) -> Result<FlagOutcome> {
        use CellState::*;
        use FlagOutcome::*;

        let pos = self.check_id(id)?;

        if self.state.is_finished() {
            return Ok(NoChange);
        }

        Ok(match self.cell_at(pos) {
            Hidden if self.flags_placed == self.total_mines() => {
                log::debug!("flag cap reached, ignoring flag at {:?}", pos);
                NoChange
            }
            Hidden => {
                self.set_cell(pos, Flagged);
                self.flags_placed += 1;
                Changed
            }
            Flagged => {
                self.set_cell(pos, Hidden);
                self.flags_placed -= 1;
                Changed
            }
            Revealed(_) | Mine => NoChange,
        })
    }

    /// Opens a safe cell and flood-fills its zero-adjacency region.
    fn reveal_safe(&mut self, pos: Pos) {
        let count = self.board.adjacent_mines(pos);
        self.set_cell(pos, CellState::Revealed(count));
        self.revealed_count += 1;
        log::trace!("revealed {:?}, adjacent mines: {}", pos, count);

        if count != 0 {
            return;
        }

        let mut visited = HashSet::from([pos]);
        let mut to_visit: VecDeque<_> = self
            .board
            .iter_neighbors(pos)
            .filter(|&neighbor| self.cell_at(neighbor).is_hidden())
            .collect();

        while let Some(visit_pos) = to_visit.pop_front() {
            if !visited.insert(visit_pos) {
                continue;
            }

            // flagged or already-revealed cells stop the cascade
            if !self.cell_at(visit_pos).is_hidden() {
                continue;
            }

            let visit_count = self.board.adjacent_mines(visit_pos);
            self.set_cell(visit_pos, CellState::Revealed(visit_count));
            self.revealed_count += 1;
            log::trace!("cascade revealed {:?}, adjacent mines: {}", visit_pos, visit_count);

            if visit_count == 0 {
                to_visit.extend(
                    self.board
                        .iter_neighbors(visit_pos)
                        .filter(|&neighbor| self.cell_at(neighbor).is_hidden())
                        .filter(|neighbor| !visited.contains(neighbor)),
                );
            }
        }
    }

    /// Turns every mine face-up after a loss, flagged mines included.
    fn expose_mines(&mut self) {
        let side = self.board.side();
        for row in 0..side {
            for col in 0..side {
                let pos = (row, col);
                if self.board.contains_mine(pos) && self.cell_at(pos).is_unrevealed() {
                    self.set_cell(pos, CellState::Mine);
                }
            }
        }
    }

    fn mark_started(&mut self) {
        if matches!(self.state, EngineState::Ready) {
            self.state = EngineState::Active;
        }
    }

    fn set_cell(&mut self, pos: Pos, state: CellState) {
        self.cells[pos.to_nd_index()] = state;
        self.changes.push(id_of(pos, self.board.side()));
    }

    fn check_id(&self, id: CellId) -> Result<Pos> {
        if id < self.total_cells() {
            Ok(pos_of(id, self.board.side()))
        } else {
            Err(GameError::InvalidCellId)
        }
    }
}
