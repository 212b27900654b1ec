//! A computed partitioning of an image
use super::boundaries::{load_imbalance, ScanlineSplit};
use crate::{
    error::PartitionError,
    types::{PartitionBounds, Tile},
};
use std::ops::{Range, RangeInclusive};

/// Scanline ranges of all partitions and the processor that owns each of them.
///
/// This holds everything needed to answer queries about a partitioning. It
/// involves no communication and can be stored or sent elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartitionScheme {
    width: usize,
    height: usize,
    tile: Option<Tile>,
    produce_overlaps: bool,
    partition_starts_on_scanline: Vec<usize>,
    partition_stops_on_scanline: Vec<usize>,
    ptp_assignments: Vec<usize>,
    workloads: Vec<u64>,
}

impl PartitionScheme {
    /// Create a scheme in which the whole active range belongs to partition 0.
    ///
    /// Partition `p` is owned by processor `p`. The image and any tile must be non-empty.
    pub(crate) fn new(
        width: usize,
        height: usize,
        tile: Option<Tile>,
        produce_overlaps: bool,
        num_partitions: usize,
    ) -> Self {
        let mut scheme = Self {
            width,
            height,
            tile,
            produce_overlaps,
            partition_starts_on_scanline: vec![],
            partition_stops_on_scanline: vec![],
            ptp_assignments: (0..num_partitions).collect(),
            workloads: vec![0; num_partitions],
        };
        let scanlines = scheme.active_scanlines();
        scheme.partition_starts_on_scanline = vec![scanlines.end; num_partitions];
        scheme.partition_stops_on_scanline = vec![scanlines.end - 1; num_partitions];
        if num_partitions > 0 {
            scheme.partition_starts_on_scanline[0] = scanlines.start;
        }
        scheme
    }

    pub(crate) fn set_boundaries(&mut self, split: ScanlineSplit) {
        self.partition_starts_on_scanline = split.starts;
        self.partition_stops_on_scanline = split.stops;
        self.workloads = split.workloads;
        self.ptp_assignments = (0..self.num_partitions()).collect();
    }

    pub(crate) fn set_assignments(&mut self, ptp_assignments: Vec<usize>) {
        self.ptp_assignments = ptp_assignments;
    }

    /// Image width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile restriction, if any
    pub fn tile(&self) -> Option<&Tile> {
        self.tile.as_ref()
    }

    /// Do partitions overlap their lower neighbour by one scanline?
    pub fn produce_overlaps(&self) -> bool {
        self.produce_overlaps
    }

    /// Scanlines being partitioned
    pub fn active_scanlines(&self) -> Range<usize> {
        match &self.tile {
            Some(t) => t.scanlines(),
            None => 0..self.height,
        }
    }

    /// Columns being partitioned
    pub fn active_columns(&self) -> Range<usize> {
        match &self.tile {
            Some(t) => t.columns(),
            None => 0..self.width,
        }
    }

    /// Number of partitions
    pub fn num_partitions(&self) -> usize {
        self.ptp_assignments.len()
    }

    /// First scanline of every partition
    pub fn partition_starts_on_scanline(&self) -> &[usize] {
        &self.partition_starts_on_scanline
    }

    /// Last scanline of every partition
    pub fn partition_stops_on_scanline(&self) -> &[usize] {
        &self.partition_stops_on_scanline
    }

    /// Owning processor of every partition
    pub fn assignments(&self) -> &[usize] {
        &self.ptp_assignments
    }

    /// Normalised workload of every partition
    pub fn workloads(&self) -> &[u64] {
        &self.workloads
    }

    /// Ratio of the largest to the mean partition workload
    pub fn load_imbalance(&self) -> f64 {
        load_imbalance(&self.workloads)
    }

    fn check_partition(&self, partition: usize) -> Result<(), PartitionError> {
        if partition >= self.num_partitions() {
            Err(PartitionError::PartitionOutOfRange {
                partition,
                count: self.num_partitions(),
            })
        } else {
            Ok(())
        }
    }

    /// Pixel bounds of a partition.
    ///
    /// With overlaps enabled the low edge is moved down one scanline unless it is
    /// already at scanline 0.
    pub fn partition(&self, partition: usize) -> Result<PartitionBounds, PartitionError> {
        self.check_partition(partition)?;
        let columns = self.active_columns();
        let mut min_h = self.partition_starts_on_scanline[partition];
        if self.produce_overlaps && min_h > 0 {
            min_h -= 1;
        }
        Ok(PartitionBounds {
            min_w: columns.start,
            max_w: columns.end - 1,
            min_h,
            max_h: self.partition_stops_on_scanline[partition],
        })
    }

    /// Scanlines owned by a partition, without overlap. `None` if the partition is empty.
    pub fn scanline_range(
        &self,
        partition: usize,
    ) -> Result<Option<RangeInclusive<usize>>, PartitionError> {
        self.check_partition(partition)?;
        let start = self.partition_starts_on_scanline[partition];
        let stop = self.partition_stops_on_scanline[partition];
        Ok(if start > stop {
            None
        } else {
            Some(start..=stop)
        })
    }

    /// Processor that owns a partition
    pub fn processor_for_partition(&self, partition: usize) -> Result<usize, PartitionError> {
        self.check_partition(partition)?;
        Ok(self.ptp_assignments[partition])
    }

    /// Partition owned by a processor
    pub fn partition_for_processor(&self, processor: usize) -> Result<usize, PartitionError> {
        self.ptp_assignments
            .iter()
            .position(|p| *p == processor)
            .ok_or(PartitionError::ProcessorOutOfRange {
                processor,
                count: self.num_partitions(),
            })
    }

    /// Partition that owns a scanline, or `None` if the scanline is outside the active range
    pub fn partition_for_scanline(&self, scanline: usize) -> Option<usize> {
        if !self.active_scanlines().contains(&scanline) {
            return None;
        }
        // Non-empty partitions appear in ascending scanline order.
        let non_empty = (0..self.num_partitions())
            .filter(|p| {
                self.partition_starts_on_scanline[*p] <= self.partition_stops_on_scanline[*p]
            })
            .collect::<Vec<_>>();
        let index = non_empty
            .partition_point(|p| self.partition_stops_on_scanline[*p] < scanline);
        non_empty
            .get(index)
            .copied()
            .filter(|p| self.partition_starts_on_scanline[*p] <= scanline)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn example_scheme(produce_overlaps: bool) -> PartitionScheme {
        //! Ten scanlines split as [0,3], [4,9] plus one empty partition
        let mut s = PartitionScheme::new(8, 10, None, produce_overlaps, 3);
        s.set_boundaries(ScanlineSplit {
            starts: vec![0, 4, 10],
            stops: vec![3, 9, 9],
            workloads: vec![4, 6, 0],
        });
        s
    }

    #[test]
    fn test_initial_scheme() {
        let s = PartitionScheme::new(8, 10, None, false, 2);
        assert_eq!(s.partition_starts_on_scanline(), &[0, 10]);
        assert_eq!(s.partition_stops_on_scanline(), &[9, 9]);
        assert_eq!(s.assignments(), &[0, 1]);
    }

    #[test]
    fn test_partition_bounds() {
        let s = example_scheme(false);
        assert_eq!(
            s.partition(1).unwrap(),
            PartitionBounds {
                min_w: 0,
                max_w: 7,
                min_h: 4,
                max_h: 9
            }
        );
        assert!(s.partition(2).unwrap().is_empty());
        assert!(matches!(
            s.partition(3),
            Err(PartitionError::PartitionOutOfRange {
                partition: 3,
                count: 3
            })
        ));
    }

    #[test]
    fn test_overlaps() {
        let s = example_scheme(true);
        assert_eq!(s.partition(0).unwrap().min_h, 0);
        assert_eq!(s.partition(1).unwrap().min_h, 3);
        // The stored range is unaffected.
        assert_eq!(s.scanline_range(1).unwrap(), Some(4..=9));
    }

    #[test]
    fn test_overlaps_empty_partition() {
        //! Overlap mode moves the low edge of an empty partition onto the last scanline
        let s = example_scheme(true);
        let b = s.partition(2).unwrap();
        assert_eq!((b.min_h, b.max_h), (9, 9));
        assert!(!b.is_empty());
        assert_eq!(s.scanline_range(2).unwrap(), None);
        assert!(example_scheme(false).partition(2).unwrap().is_empty());
    }

    #[test]
    fn test_tile_columns() {
        let tile = Tile::new(2, 6, 4, 8);
        let s = PartitionScheme::new(8, 10, Some(tile), false, 1);
        let b = s.partition(0).unwrap();
        assert_eq!((b.min_w, b.max_w, b.min_h, b.max_h), (2, 5, 4, 7));
    }

    #[test]
    fn test_scanline_lookup() {
        let s = example_scheme(false);
        assert_eq!(s.partition_for_scanline(0), Some(0));
        assert_eq!(s.partition_for_scanline(3), Some(0));
        assert_eq!(s.partition_for_scanline(4), Some(1));
        assert_eq!(s.partition_for_scanline(9), Some(1));
        assert_eq!(s.partition_for_scanline(10), None);
    }

    #[test]
    fn test_processor_lookup() {
        let mut s = example_scheme(false);
        s.set_assignments(vec![2, 0, 1]);
        assert_eq!(s.processor_for_partition(0).unwrap(), 2);
        assert_eq!(s.partition_for_processor(0).unwrap(), 1);
        assert!(s.partition_for_processor(5).is_err());
        assert_eq!(s.scanline_range(2).unwrap(), None);
    }
}
