//! Cell → Device Coordinate Mapping
//!
//! Two deployment modes share one mapper: an exact per-cell calibration
//! table, or linear interpolation between two calibrated corner points. Both
//! clamp into the absolute coordinate space; out-of-range results are
//! clamped, never wrapped.

use crate::board::grid::Cell;
use crate::gesture::calibration::CalibrationProfile;
use crate::pointer::state::{clamp_axis, AXIS_MAX};

/// Maps a grid cell to the device coordinate of its center.
#[derive(Debug, Clone)]
pub enum CellMapper {
    /// Exact lookup into a validated dense calibration table.
    Table {
        rows: usize,
        cols: usize,
        targets: Vec<(u16, u16)>,
    },
    /// Linear interpolation between calibrated top-left and bottom-right
    /// cell centers. The x coordinate derives from the column index, y from
    /// the row index.
    Interpolated {
        rows: usize,
        cols: usize,
        origin: (f64, f64),
        step_x: f64,
        step_y: f64,
    },
}

impl CellMapper {
    /// Table mode from a calibration profile.
    ///
    /// Fails with a calibration error if any cell of the grid is missing
    /// from the profile.
    pub fn from_profile(profile: &CalibrationProfile) -> crate::Result<Self> {
        Ok(Self::Table {
            rows: profile.rows,
            cols: profile.cols,
            targets: profile.table()?,
        })
    }

    /// Interpolation mode from two corner cell centers.
    ///
    /// `top_left` is the center of cell (0, 0); `bottom_right` the center of
    /// cell (rows-1, cols-1). Per-axis step is `span / (dim - 1)`.
    pub fn interpolated(
        top_left: (i32, i32),
        bottom_right: (i32, i32),
        rows: usize,
        cols: usize,
    ) -> crate::Result<Self> {
        if rows < 2 || cols < 2 {
            return Err(crate::Error::Calibration(format!(
                "interpolation needs at least a 2x2 grid, got {rows}x{cols}"
            )));
        }
        for &(x, y) in &[top_left, bottom_right] {
            if !(0..=AXIS_MAX).contains(&x) || !(0..=AXIS_MAX).contains(&y) {
                return Err(crate::Error::Calibration(format!(
                    "corner ({x}, {y}) outside device range"
                )));
            }
        }

        Ok(Self::Interpolated {
            rows,
            cols,
            origin: (top_left.0 as f64, top_left.1 as f64),
            step_x: (bottom_right.0 - top_left.0) as f64 / (cols - 1) as f64,
            step_y: (bottom_right.1 - top_left.1) as f64 / (rows - 1) as f64,
        })
    }

    /// Grid geometry this mapper was built for.
    pub fn geometry(&self) -> (usize, usize) {
        match self {
            Self::Table { rows, cols, .. } | Self::Interpolated { rows, cols, .. } => (*rows, *cols),
        }
    }

    /// Device coordinate for a cell.
    ///
    /// Fails if the cell lies outside the grid this mapper was built for.
    pub fn target(&self, cell: Cell) -> crate::Result<(u16, u16)> {
        let (rows, cols) = self.geometry();
        if cell.row >= rows || cell.col >= cols {
            return Err(crate::Error::Calibration(format!(
                "cell ({}, {}) outside {}x{} grid",
                cell.row, cell.col, rows, cols
            )));
        }

        match self {
            Self::Table { cols, targets, .. } => Ok(targets[cell.index(*cols)]),
            Self::Interpolated {
                origin,
                step_x,
                step_y,
                ..
            } => {
                let x = origin.0 + cell.col as f64 * step_x;
                let y = origin.1 + cell.row as f64 * step_y;
                Ok((
                    clamp_axis(x.round() as i32),
                    clamp_axis(y.round() as i32),
                ))
            }
        }
    }
}
