//! Center-first column ordering.

use crate::game::Gameboard;

/// All columns of a board of width `W`, sorted by their distance to the middle
/// column. Ties keep ascending column order, so for `W = 7` this is
/// `[3, 2, 4, 1, 5, 0, 6]`.
///
/// The order only depends on the width. Filtering by legality happens per
/// position in [`Self::ordered_legal_moves`].
#[derive(Debug, PartialOrd, PartialEq, Clone, Eq)]
pub struct ColumnOrder<const W: usize>([usize; W]);

impl<const W: usize> ColumnOrder<W> {
    #[must_use]
    pub fn new() -> Self {
        let middle = W / 2;
        let mut columns: [usize; W] = core::array::from_fn(|col| col);
        // stable
        columns.sort_by_key(|col| col.abs_diff(middle));
        Self(columns)
    }

    #[must_use]
    pub const fn columns(&self) -> &[usize; W] {
        &self.0
    }

    /// Emits the legal columns of `board` in center-first order.
    pub fn ordered_legal_moves<'a, const H: usize>(
        &'a self,
        board: &'a Gameboard<W, H>,
    ) -> impl Iterator<Item = usize> + 'a {
        self.0.iter().copied().filter(|&col| board.is_legal(col))
    }
}

impl<const W: usize> Default for ColumnOrder<W> {
    fn default() -> Self {
        Self::new()
    }
}
