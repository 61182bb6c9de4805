//! Board Model and Adjacency
//!
//! An R×C matrix of single lowercase letters, constructed fresh from a
//! flattened row-major input string and immutable for one solve invocation.

use serde::{Deserialize, Serialize};

/// All 8 compass-direction offsets, row-major order.
const OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A 0-indexed grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major index of this cell within a grid of `cols` columns.
    #[inline]
    pub fn index(&self, cols: usize) -> usize {
        self.row * cols + self.col
    }
}

/// An immutable R×C grid of lowercase letters.
#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    cols: usize,
    letters: Vec<u8>,
}

impl Board {
    /// Parse a flattened row-major board string.
    ///
    /// The input must contain exactly `rows * cols` ASCII-alphabetic
    /// characters after trimming; letters are lowercased.
    pub fn parse(text: &str, rows: usize, cols: usize) -> crate::Result<Self> {
        let text = text.trim();
        let expected = rows * cols;
        if expected == 0 {
            return Err(crate::Error::Board("board dimensions must be nonzero".to_string()));
        }
        if text.len() != expected {
            return Err(crate::Error::Board(format!(
                "expected {} letters for a {}x{} board, got {}",
                expected,
                rows,
                cols,
                text.len()
            )));
        }
        if let Some(bad) = text.chars().find(|c| !c.is_ascii_alphabetic()) {
            return Err(crate::Error::Board(format!(
                "board contains non-alphabetic character {:?}",
                bad
            )));
        }

        Ok(Self {
            rows,
            cols,
            letters: text.bytes().map(|b| b.to_ascii_lowercase()).collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Letter at a cell (lowercase ASCII).
    #[inline]
    pub fn letter(&self, cell: Cell) -> u8 {
        self.letters[cell.index(self.cols)]
    }

    /// Iterate all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Cell::new(row, col)))
    }

    /// The up-to-8 in-bounds neighbors of a cell, in row-major offset order.
    ///
    /// A pure function of the grid dimensions; board content never affects
    /// adjacency.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        let (rows, cols) = (self.rows as i32, self.cols as i32);
        OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let r = cell.row as i32 + dr;
            let c = cell.col as i32 + dc;
            (r >= 0 && r < rows && c >= 0 && c < cols).then(|| Cell::new(r as usize, c as usize))
        })
    }
}
