//! Partitioning options
use super::Tile;
use crate::error::PartitionError;

/// Default divisor used to normalise the global workload histogram
pub const DEFAULT_WORKLOAD_SCALE: u64 = 1000;
/// Default factor of the target workload above which a partition is closed early
pub const DEFAULT_HIGH_WATERMARK: f64 = 1.5;
/// Default factor of the target workload a partition must hold before it may be closed early
pub const DEFAULT_LOW_WATERMARK: f64 = 1.0;

/// Options controlling how an image is partitioned.
///
/// With the `serde` feature enabled, missing fields take their default values
/// when the options are read from RON.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PartitioningOptions {
    /// Restrict partitioning to this tile
    pub tile: Option<Tile>,
    /// Extend every partition by one scanline on its low edge
    pub produce_overlaps: bool,
    /// Divisor used to normalise the global workload
    pub workload_scale: u64,
    /// Factor of the target workload used as the high watermark
    pub high_watermark: f64,
    /// Factor of the target workload used as the low watermark
    pub low_watermark: f64,
}

impl Default for PartitioningOptions {
    fn default() -> Self {
        Self {
            tile: None,
            produce_overlaps: false,
            workload_scale: DEFAULT_WORKLOAD_SCALE,
            high_watermark: DEFAULT_HIGH_WATERMARK,
            low_watermark: DEFAULT_LOW_WATERMARK,
        }
    }
}

impl PartitioningOptions {
    /// Restrict partitioning to a tile
    pub fn with_tile(mut self, tile: Tile) -> Self {
        self.tile = Some(tile);
        self
    }

    /// Set whether partitions overlap by one scanline
    pub fn with_overlaps(mut self, produce_overlaps: bool) -> Self {
        self.produce_overlaps = produce_overlaps;
        self
    }

    /// Set the workload normalisation divisor
    pub fn with_workload_scale(mut self, workload_scale: u64) -> Self {
        self.workload_scale = workload_scale;
        self
    }

    /// Set the high and low watermark factors
    pub fn with_watermarks(mut self, high: f64, low: f64) -> Self {
        self.high_watermark = high;
        self.low_watermark = low;
        self
    }

    /// Check that the options are usable for a `width` x `height` image
    pub fn validate(&self, width: usize, height: usize) -> Result<(), PartitionError> {
        if width == 0 || height == 0 {
            return Err(PartitionError::EmptyImage { width, height });
        }
        if let Some(tile) = &self.tile {
            tile.validate(width, height)?;
        }
        if self.workload_scale == 0 {
            return Err(PartitionError::InvalidOptions(String::from(
                "workload scale must be positive",
            )));
        }
        if !self.high_watermark.is_finite()
            || !self.low_watermark.is_finite()
            || self.low_watermark <= 0.0
            || self.high_watermark <= 0.0
        {
            return Err(PartitionError::InvalidOptions(format!(
                "watermarks must be positive and finite, got high={} low={}",
                self.high_watermark, self.low_watermark
            )));
        }
        if self.low_watermark > self.high_watermark {
            return Err(PartitionError::InvalidOptions(format!(
                "low watermark {} exceeds high watermark {}",
                self.low_watermark, self.high_watermark
            )));
        }
        Ok(())
    }

    /// Read options from a RON string
    #[cfg(feature = "serde")]
    pub fn from_ron_str(s: &str) -> Result<Self, PartitionError> {
        ron::from_str(s).map_err(|e| PartitionError::Ron(e.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let o = PartitioningOptions::default();
        assert!(o.validate(640, 480).is_ok());
        assert_eq!(o.workload_scale, 1000);
        assert!(!o.produce_overlaps);
        assert!(o.tile.is_none());
    }

    #[test]
    fn test_empty_image() {
        let o = PartitioningOptions::default();
        assert_eq!(
            o.validate(0, 10),
            Err(PartitionError::EmptyImage {
                width: 0,
                height: 10
            })
        );
    }

    #[test]
    fn test_bad_watermarks() {
        let o = PartitioningOptions::default().with_watermarks(1.0, 2.0);
        assert!(matches!(
            o.validate(4, 4),
            Err(PartitionError::InvalidOptions(_))
        ));
        let o = PartitioningOptions::default().with_watermarks(f64::NAN, 1.0);
        assert!(o.validate(4, 4).is_err());
    }

    #[test]
    fn test_zero_scale() {
        let o = PartitioningOptions::default().with_workload_scale(0);
        assert!(o.validate(4, 4).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_ron() {
        let o = PartitioningOptions::from_ron_str(
            "(produce_overlaps: true, tile: Some((w_min: 0, w_max: 4, h_min: 2, h_max: 6)))",
        )
        .unwrap();
        assert!(o.produce_overlaps);
        assert_eq!(o.tile, Some(Tile::new(0, 4, 2, 6)));
        assert_eq!(o.workload_scale, DEFAULT_WORKLOAD_SCALE);
    }
}
