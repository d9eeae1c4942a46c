use ndarray::Array2;

/// Linear dimension, used for individual row/column coordinates and the board side.
pub type Ix = u8;

/// Area dimension, used for mine/cell counts and flat cell ids.
pub type Ax = u16;

/// Flat cell identifier in `0..side * side`, row-major.
pub type CellId = Ax;

/// Shorthand for a `(row, col)` position.
pub type Pos = (Ix, Ix);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Pos {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Ix, b: Ix) -> Ax {
    let a = a as Ax;
    let b = b as Ax;
    a.saturating_mul(b)
}

/// Maps a flat cell id to its `(row, col)` position on a board of the given side.
pub const fn pos_of(id: CellId, side: Ix) -> Pos {
    ((id / side as Ax) as Ix, (id % side as Ax) as Ix)
}

/// Maps a `(row, col)` position back to its flat cell id.
pub const fn id_of((row, col): Pos, side: Ix) -> CellId {
    row as Ax * side as Ax + col as Ax
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Pos) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Pos) -> NeighborIter {
        let dim = self.dim();
        let size = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        NeighborIter::new(index, size)
    }
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `pos`, returning a value only when it remains in bounds.
fn apply_delta(pos: Pos, delta: (isize, isize), bounds: Pos) -> Option<Pos> {
    let (row, col) = pos;
    let (drow, dcol) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(drow.try_into().ok()?)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(dcol.try_into().ok()?)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterator over the up-to-8 in-bounds neighbors of a position.
#[derive(Debug)]
pub struct NeighborIter {
    center: Pos,
    bounds: Pos,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Pos, bounds: Pos) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbors(pos: Pos, side: Ix) -> Vec<Pos> {
        NeighborIter::new(pos, (side, side)).collect()
    }

    #[test]
    fn id_mapping_round_trips() {
        for id in 0..100 {
            assert_eq!(id_of(pos_of(id, 10), 10), id);
        }
        assert_eq!(pos_of(0, 10), (0, 0));
        assert_eq!(pos_of(9, 10), (0, 9));
        assert_eq!(pos_of(10, 10), (1, 0));
        assert_eq!(pos_of(99, 10), (9, 9));
    }

    #[test]
    fn corner_has_three_neighbors() {
        assert_eq!(neighbors((0, 0), 10).len(), 3);
        assert_eq!(neighbors((9, 9), 10).len(), 3);
    }

    #[test]
    fn edge_has_five_neighbors() {
        assert_eq!(neighbors((0, 4), 10).len(), 5);
        assert_eq!(neighbors((4, 9), 10).len(), 5);
    }

    #[test]
    fn interior_has_eight_neighbors() {
        let found = neighbors((4, 4), 10);
        assert_eq!(found.len(), 8);
        assert!(!found.contains(&(4, 4)));
    }
}
