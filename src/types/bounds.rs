//! Pixel bounds of a partition

/// The pixel rectangle of one partition.
///
/// All four bounds are inclusive. A partition with no scanlines has
/// `min_h > max_h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartitionBounds {
    /// First column
    pub min_w: usize,
    /// Last column
    pub max_w: usize,
    /// First scanline
    pub min_h: usize,
    /// Last scanline
    pub max_h: usize,
}

impl PartitionBounds {
    /// Is this partition free of scanlines?
    pub fn is_empty(&self) -> bool {
        self.min_h > self.max_h
    }

    /// Number of scanlines
    pub fn scanline_count(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.max_h - self.min_h + 1
        }
    }

    /// Number of pixels
    pub fn pixel_count(&self) -> usize {
        (self.max_w + 1 - self.min_w) * self.scanline_count()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_counts() {
        let b = PartitionBounds {
            min_w: 0,
            max_w: 9,
            min_h: 5,
            max_h: 9,
        };
        assert!(!b.is_empty());
        assert_eq!(b.scanline_count(), 5);
        assert_eq!(b.pixel_count(), 50);
    }

    #[test]
    fn test_empty() {
        let b = PartitionBounds {
            min_w: 0,
            max_w: 9,
            min_h: 10,
            max_h: 9,
        };
        assert!(b.is_empty());
        assert_eq!(b.pixel_count(), 0);
    }
}
