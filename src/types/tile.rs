//! Tile restriction

use crate::error::PartitionError;
use std::ops::Range;

/// A rectangular sub-region of the image to which partitioning is restricted.
///
/// Both ranges are half-open: the tile covers columns `w_min..w_max` and
/// scanlines `h_min..h_max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    /// First column
    pub w_min: usize,
    /// One past the last column
    pub w_max: usize,
    /// First scanline
    pub h_min: usize,
    /// One past the last scanline
    pub h_max: usize,
}

impl Tile {
    /// Create new
    pub fn new(w_min: usize, w_max: usize, h_min: usize, h_max: usize) -> Self {
        Self {
            w_min,
            w_max,
            h_min,
            h_max,
        }
    }

    /// Columns covered by the tile
    pub fn columns(&self) -> Range<usize> {
        self.w_min..self.w_max
    }

    /// Scanlines covered by the tile
    pub fn scanlines(&self) -> Range<usize> {
        self.h_min..self.h_max
    }

    /// Check that the tile is non-empty and fits inside a `width` x `height` image
    pub fn validate(&self, width: usize, height: usize) -> Result<(), PartitionError> {
        if self.w_min >= self.w_max
            || self.h_min >= self.h_max
            || self.w_max > width
            || self.h_max > height
        {
            return Err(PartitionError::InvalidTile {
                w_min: self.w_min,
                w_max: self.w_max,
                h_min: self.h_min,
                h_max: self.h_max,
                width,
                height,
            });
        }
        Ok(())
    }
}
