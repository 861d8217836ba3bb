use crate::error::{Error, Result};
use crate::geom::{Size, size};
use serde::{Deserialize, Serialize};

/// Cell geometry shared by every track on a map, in drawing units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackStyle {
    /// Length of one cell along the track.
    pub cell_width: f64,
    /// Thickness of one cell across the track.
    pub cell_height: f64,
    /// Gap between neighbouring cells, along and across the track.
    pub cell_spacing: f64,
}

impl Default for TrackStyle {
    fn default() -> Self {
        Self {
            cell_width: 25.4,
            cell_height: 10.0,
            cell_spacing: 2.0,
        }
    }
}

impl TrackStyle {
    /// Center-to-center distance of consecutive cells along a track.
    pub fn pitch(&self) -> f64 {
        self.cell_width + self.cell_spacing
    }

    /// Center-to-center distance of the two tracks of a dual connection.
    pub fn track_gap(&self) -> f64 {
        self.cell_height + self.cell_spacing
    }

    pub fn cell_size(&self) -> Size {
        size(self.cell_width, self.cell_height)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.cell_width) || !positive(self.cell_height) {
            return Err(Error::InvalidTrackStyle {
                message: format!(
                    "cell size must be positive, got {}x{}",
                    self.cell_width, self.cell_height
                ),
            });
        }
        if !(self.cell_spacing.is_finite() && self.cell_spacing >= 0.0) {
            return Err(Error::InvalidTrackStyle {
                message: format!("cell spacing must be >= 0, got {}", self.cell_spacing),
            });
        }
        Ok(())
    }
}
