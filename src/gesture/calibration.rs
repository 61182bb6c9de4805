//! Calibration Profile Persistence
//!
//! A calibration profile maps each grid cell (row-major index) to the device
//! coordinate the pointer must reach to touch that cell on the host screen.
//! Profiles are produced by the interactive `calibrate` command and treated
//! as read-only input by the solver.

use crate::pointer::state::AXIS_MAX;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Current calibration file format version
pub const CURRENT_FORMAT_VERSION: &str = "1.0";

/// One calibrated cell: row-major index and its device coordinate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CalibrationPoint {
    pub cell: usize,
    pub x: u16,
    pub y: u16,
}

/// Calibration profile metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationMetadata {
    /// Unique profile ID
    pub id: Uuid,
    /// Capture time
    pub created_at: DateTime<Utc>,
    /// Version of the calibration file format
    pub format_version: String,
}

impl Default for CalibrationMetadata {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            format_version: CURRENT_FORMAT_VERSION.to_string(),
        }
    }
}

/// A persisted per-cell calibration table for one grid geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationProfile {
    pub metadata: CalibrationMetadata,
    pub rows: usize,
    pub cols: usize,
    pub points: Vec<CalibrationPoint>,
}

impl CalibrationProfile {
    /// Create an empty profile for a grid geometry.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            metadata: CalibrationMetadata::default(),
            rows,
            cols,
            points: Vec::with_capacity(rows * cols),
        }
    }

    /// Record (or overwrite) the coordinate for a cell index.
    pub fn set(&mut self, cell: usize, x: u16, y: u16) {
        match self.points.iter_mut().find(|p| p.cell == cell) {
            Some(point) => {
                point.x = x;
                point.y = y;
            }
            None => self.points.push(CalibrationPoint { cell, x, y }),
        }
    }

    /// Build the dense row-major lookup table.
    ///
    /// Fails if any cell index in `0..rows*cols` is missing, or if any
    /// coordinate lies outside the absolute axis range.
    pub fn table(&self) -> crate::Result<Vec<(u16, u16)>> {
        let total = self.rows * self.cols;
        let mut table = vec![None; total];

        for point in &self.points {
            if point.cell >= total {
                return Err(crate::Error::Calibration(format!(
                    "cell index {} outside {}x{} grid",
                    point.cell, self.rows, self.cols
                )));
            }
            if point.x as i32 > AXIS_MAX || point.y as i32 > AXIS_MAX {
                return Err(crate::Error::Calibration(format!(
                    "cell {} coordinate ({}, {}) outside device range",
                    point.cell, point.x, point.y
                )));
            }
            table[point.cell] = Some((point.x, point.y));
        }

        table
            .into_iter()
            .enumerate()
            .map(|(cell, entry)| {
                entry.ok_or_else(|| {
                    crate::Error::Calibration(format!("cell {cell} has no calibrated coordinate"))
                })
            })
            .collect()
    }

    /// Save the profile as pretty JSON (profiles are small and hand-edited).
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a profile from a file.
    ///
    /// Logs a warning if the profile was saved with a different format
    /// version, but still attempts to deserialize it.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let profile: CalibrationProfile = serde_json::from_str(&content)?;
        if profile.metadata.format_version != CURRENT_FORMAT_VERSION {
            tracing::warn!(
                found = %profile.metadata.format_version,
                expected = CURRENT_FORMAT_VERSION,
                "Calibration profile has different format version"
            );
        }
        Ok(profile)
    }
}
