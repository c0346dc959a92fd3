//! Grid geometry
//!
//! Checked conversions between logical `(col, row)` coordinates and byte
//! offsets into the text buffer. Construction is the only place bounds are
//! tested; arithmetic on the types cannot leave the grid.

use crate::error::ConsoleError;
use crate::{VGA_HEIGHT, VGA_WIDTH};

/// Bytes per cell (character + attribute)
pub const CELL_BYTES: usize = 2;
/// Cells in the grid
pub const GRID_CELLS: usize = VGA_WIDTH * VGA_HEIGHT;
/// Bytes per grid row
pub const ROW_BYTES: usize = VGA_WIDTH * CELL_BYTES;
/// Bytes in the grid
pub const GRID_BYTES: usize = GRID_CELLS * CELL_BYTES;

/// A validated grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    /// Top-left cell
    pub const ORIGIN: Position = Position { row: 0, col: 0 };

    /// Creates a position, rejecting coordinates outside the grid
    pub const fn new(col: usize, row: usize) -> Result<Self, ConsoleError> {
        if col >= VGA_WIDTH || row >= VGA_HEIGHT {
            return Err(ConsoleError::OutOfBounds { col, row });
        }
        Ok(Self { row, col })
    }

    /// Column, `0..VGA_WIDTH`
    pub const fn col(self) -> usize {
        self.col
    }

    /// Row, `0..VGA_HEIGHT`
    pub const fn row(self) -> usize {
        self.row
    }

    /// Byte offset of this cell: `2 * (row * VGA_WIDTH + col)`
    pub const fn offset(self) -> CellOffset {
        CellOffset(CELL_BYTES * (self.row * VGA_WIDTH + self.col))
    }
}

/// Byte offset of an insertion point in the grid
///
/// Either the offset of a cell (even, below [`GRID_BYTES`]) or
/// [`CellOffset::END`], the point just past the bottom-right cell that
/// output reaches when it fills the grid exactly. Only cell offsets ever
/// address the text buffer; `END` is resolved by scrolling first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellOffset(usize);

impl CellOffset {
    /// Offset of the top-left cell
    pub const ORIGIN: CellOffset = CellOffset(0);

    /// Offset of column 0 on the bottom row
    pub const LAST_ROW_START: CellOffset = CellOffset(GRID_BYTES - ROW_BYTES);

    /// Just past the bottom-right cell
    pub const END: CellOffset = CellOffset(GRID_BYTES);

    /// Converts a cell index (as held by the cursor registers) to an offset
    ///
    /// Index [`GRID_CELLS`] maps to [`CellOffset::END`]; anything larger is
    /// out of bounds.
    pub const fn from_cell_index(index: usize) -> Result<Self, ConsoleError> {
        if index > GRID_CELLS {
            return Err(ConsoleError::OutOfBounds {
                col: index % VGA_WIDTH,
                row: index / VGA_WIDTH,
            });
        }
        Ok(Self(index * CELL_BYTES))
    }

    /// Byte offset into the text buffer
    pub const fn get(self) -> usize {
        self.0
    }

    /// Cell index, `offset / 2`
    pub const fn cell_index(self) -> usize {
        self.0 / CELL_BYTES
    }

    pub const fn is_end(self) -> bool {
        self.0 >= GRID_BYTES
    }

    pub const fn row(self) -> usize {
        self.0 / ROW_BYTES
    }

    pub const fn col(self) -> usize {
        (self.0 - self.row() * ROW_BYTES) / CELL_BYTES
    }

    /// Decomposes the offset back into its coordinate
    ///
    /// `None` for [`CellOffset::END`], which names no cell.
    pub const fn position(self) -> Option<Position> {
        if self.is_end() {
            return None;
        }
        Some(Position {
            row: self.row(),
            col: self.col(),
        })
    }

    /// Offset of the last cell on this offset's row
    pub const fn end_of_row(self) -> CellOffset {
        if self.is_end() {
            return self;
        }
        CellOffset(CELL_BYTES * (self.row() * VGA_WIDTH + VGA_WIDTH - 1))
    }

    /// One cell forward; the bottom-right cell advances to `END`
    pub const fn advance(self) -> CellOffset {
        let next = self.0 + CELL_BYTES;
        if next >= GRID_BYTES {
            CellOffset::END
        } else {
            CellOffset(next)
        }
    }

    /// The preceding cell, or `None` at the origin
    pub const fn prev(self) -> Option<CellOffset> {
        if self.0 == 0 {
            None
        } else {
            Some(CellOffset(self.0 - CELL_BYTES))
        }
    }
}
