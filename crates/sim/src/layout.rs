//! Toroidal grid topology over the chamber list.
//!
//! Chambers are laid out row-major, [`CHAMBERS_PER_ROW`] per row, and the
//! grid wraps in both axes: stepping right off the end of a row lands on the
//! start of the same row, stepping down off the bottom row lands on the top
//! row. The registered chamber count is rounded up to a full row; the padded
//! slots are navigable but carry no program.

use crate::types::CHAMBERS_PER_ROW;

/// Derived view over the chamber list defining the wrap topology.
#[derive(Copy, Clone, Debug)]
pub struct ChamberLayout {
    num_chambers: usize,
}

impl ChamberLayout {
    /// Builds the layout for `registered` chambers, padding the last row.
    #[must_use]
    pub fn new(registered: usize) -> Self {
        let rows = (registered + CHAMBERS_PER_ROW - 1) / CHAMBERS_PER_ROW;
        Self {
            num_chambers: rows * CHAMBERS_PER_ROW,
        }
    }

    /// Padded chamber count. Always a multiple of [`CHAMBERS_PER_ROW`].
    #[must_use]
    pub fn num_chambers(&self) -> usize {
        self.num_chambers
    }

    /// Cell to the left of `id`, wrapping within the row.
    ///
    /// An empty layout maps every id to itself, as do the other queries, so
    /// a simulation with no chambers still wraps ball positions.
    #[must_use]
    pub fn left(&self, id: usize) -> usize {
        if self.num_chambers == 0 {
            return id;
        }
        if id % CHAMBERS_PER_ROW == 0 {
            (id + CHAMBERS_PER_ROW - 1) % self.num_chambers
        } else {
            id - 1
        }
    }

    /// Cell to the right of `id`, wrapping within the row.
    #[must_use]
    pub fn right(&self, id: usize) -> usize {
        if self.num_chambers == 0 {
            return id;
        }
        if (id + 1) % CHAMBERS_PER_ROW == 0 {
            (id + 1 - CHAMBERS_PER_ROW) % self.num_chambers
        } else {
            id + 1
        }
    }

    /// Cell above `id`, wrapping from the top row to the bottom row.
    #[must_use]
    pub fn up(&self, id: usize) -> usize {
        if id < CHAMBERS_PER_ROW {
            id + self.num_chambers.max(CHAMBERS_PER_ROW) - CHAMBERS_PER_ROW
        } else {
            id - CHAMBERS_PER_ROW
        }
    }

    /// Cell below `id`, wrapping from the bottom row to the top row.
    #[must_use]
    pub fn down(&self, id: usize) -> usize {
        if self.num_chambers == 0 {
            return id;
        }
        (id + CHAMBERS_PER_ROW) % self.num_chambers
    }
}
