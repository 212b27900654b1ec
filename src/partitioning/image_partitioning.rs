//! Partitioning an image across a process group
use super::{
    assignment::{match_processors, matched_volume},
    boundaries::{normalize_workload, split_scanlines},
    PartitionScheme,
};
use crate::{
    collective::SerialCollective,
    error::PartitionError,
    traits::Collective,
    types::{PartitionBounds, PartitioningOptions, Stage, Tile},
};
use log::{debug, info};
use std::ops::{Range, RangeInclusive};

/// The partitioning of one frame (or one tile of a frame) for sort-last compositing.
///
/// Each process creates one of these, calls
/// [`establish_partition_boundaries`](Self::establish_partition_boundaries) with
/// its local per-scanline workload, then
/// [`determine_assignments`](Self::determine_assignments) with the number of bytes it
/// expects to send to each partition. Both calls are collective. After that every
/// process holds the same partitioning and can query it freely.
#[derive(Debug)]
pub struct ImagePartitioning<C: Collective> {
    collective: C,
    num_processors: usize,
    this_processor: usize,
    this_partition: usize,
    options: PartitioningOptions,
    scheme: PartitionScheme,
    stage: Stage,
}

impl ImagePartitioning<SerialCollective> {
    /// Create new partitioning for a single process
    pub fn serial(width: usize, height: usize) -> Result<Self, PartitionError> {
        Self::new(SerialCollective, width, height)
    }
}

impl<C: Collective> ImagePartitioning<C> {
    /// Create new
    pub fn new(collective: C, width: usize, height: usize) -> Result<Self, PartitionError> {
        Self::new_with_options(collective, width, height, PartitioningOptions::default())
    }

    /// Create new with options
    pub fn new_with_options(
        collective: C,
        width: usize,
        height: usize,
        options: PartitioningOptions,
    ) -> Result<Self, PartitionError> {
        options.validate(width, height)?;
        let num_processors = collective.size();
        let this_processor = collective.rank();
        let scheme = PartitionScheme::new(
            width,
            height,
            options.tile,
            options.produce_overlaps,
            num_processors,
        );
        Ok(Self {
            collective,
            num_processors,
            this_processor,
            this_partition: this_processor,
            options,
            scheme,
            stage: Stage::Created,
        })
    }

    /// Fix the scanline range of every partition.
    ///
    /// `local_workload[i]` is this process's share of the work on the `i`-th
    /// scanline of the active range. The histograms of all processes are summed,
    /// so every process in the group must call this with a slice of the same
    /// length. Calling it again recomputes the boundaries and discards any
    /// assignment.
    pub fn establish_partition_boundaries(
        &mut self,
        local_workload: &[u64],
    ) -> Result<(), PartitionError> {
        let scanlines = self.scheme.active_scanlines();
        if local_workload.len() != scanlines.len() {
            return Err(PartitionError::WorkloadLength {
                expected: scanlines.len(),
                actual: local_workload.len(),
            });
        }

        let global_workload = self.collective.sum_across_group(local_workload);
        let normalized = normalize_workload(&global_workload, self.options.workload_scale);
        let split = split_scanlines(
            &normalized,
            scanlines.start,
            self.num_processors,
            self.options.high_watermark,
            self.options.low_watermark,
        );

        debug!(
            "[{}] partition boundaries: starts {:?}, stops {:?}",
            self.this_processor, split.starts, split.stops
        );

        self.scheme.set_boundaries(split);
        self.this_partition = self.this_processor;
        self.stage = Stage::BoundariesEstablished;

        debug!(
            "[{}] workloads {:?}, imbalance {:.3}",
            self.this_processor,
            self.scheme.workloads(),
            self.scheme.load_imbalance()
        );
        Ok(())
    }

    /// Bind each partition to a processor.
    ///
    /// `local_volume[p]` is the number of bytes this process expects to send
    /// towards partition `p`. The volumes of all processes are gathered and every
    /// process then computes the same assignment independently.
    pub fn determine_assignments(&mut self, local_volume: &[u64]) -> Result<(), PartitionError> {
        if self.stage == Stage::Created {
            return Err(PartitionError::AssignmentsBeforeBoundaries);
        }
        if local_volume.len() != self.num_processors {
            return Err(PartitionError::VolumeLength {
                expected: self.num_processors,
                actual: local_volume.len(),
            });
        }

        let n = self.num_processors;
        let volumes = self.collective.all_gather(local_volume);
        let ptp_assignments = match_processors(&volumes, n);

        let total = volumes.iter().sum::<u64>();
        let kept = matched_volume(&volumes, n, &ptp_assignments);
        info!(
            "[{}] assignments {:?}: {} of {} bytes stay local, {} bytes exchanged",
            self.this_processor,
            ptp_assignments,
            kept,
            total,
            total - kept
        );

        self.scheme.set_assignments(ptp_assignments);
        self.this_partition = self.scheme.partition_for_processor(self.this_processor)?;
        self.stage = Stage::Assigned;
        Ok(())
    }

    /// Pixel bounds of a partition
    pub fn partition(&self, partition: usize) -> Result<PartitionBounds, PartitionError> {
        self.scheme.partition(partition)
    }

    /// Pixel bounds of the partition owned by this process
    pub fn this_partition_bounds(&self) -> Result<PartitionBounds, PartitionError> {
        self.scheme.partition(self.this_partition)
    }

    /// Partition owned by this process
    pub fn this_partition(&self) -> usize {
        self.this_partition
    }

    /// Index of this process
    pub fn this_processor(&self) -> usize {
        self.this_processor
    }

    /// Number of processes
    pub fn num_processors(&self) -> usize {
        self.num_processors
    }

    /// Number of partitions. This always equals the number of processes.
    pub fn num_partitions(&self) -> usize {
        self.scheme.num_partitions()
    }

    /// Owning processor of every partition
    pub fn assignments(&self) -> &[usize] {
        self.scheme.assignments()
    }

    /// First scanline of every partition
    pub fn partition_starts_on_scanline(&self) -> &[usize] {
        self.scheme.partition_starts_on_scanline()
    }

    /// Last scanline of every partition
    pub fn partition_stops_on_scanline(&self) -> &[usize] {
        self.scheme.partition_stops_on_scanline()
    }

    /// Processor that owns a partition
    pub fn processor_for_partition(&self, partition: usize) -> Result<usize, PartitionError> {
        self.scheme.processor_for_partition(partition)
    }

    /// Partition owned by a processor
    pub fn partition_for_processor(&self, processor: usize) -> Result<usize, PartitionError> {
        self.scheme.partition_for_processor(processor)
    }

    /// Partition that owns a scanline
    pub fn partition_for_scanline(&self, scanline: usize) -> Option<usize> {
        self.scheme.partition_for_scanline(scanline)
    }

    /// Scanlines owned by a partition, without overlap
    pub fn scanline_range(
        &self,
        partition: usize,
    ) -> Result<Option<RangeInclusive<usize>>, PartitionError> {
        self.scheme.scanline_range(partition)
    }

    /// Scanlines being partitioned
    pub fn active_scanlines(&self) -> Range<usize> {
        self.scheme.active_scanlines()
    }

    /// Tile restriction, if any
    pub fn tile(&self) -> Option<&Tile> {
        self.scheme.tile()
    }

    /// Normalised workload of every partition
    pub fn workloads(&self) -> &[u64] {
        self.scheme.workloads()
    }

    /// Ratio of the largest to the mean partition workload
    pub fn load_imbalance(&self) -> f64 {
        self.scheme.load_imbalance()
    }

    /// Progress of the partitioning
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Options
    pub fn options(&self) -> &PartitioningOptions {
        &self.options
    }

    /// Collective used to agree on the partitioning
    pub fn collective(&self) -> &C {
        &self.collective
    }

    /// The partitioning computed so far
    pub fn scheme(&self) -> &PartitionScheme {
        &self.scheme
    }

    /// Consume and return the partitioning computed so far
    pub fn into_scheme(self) -> PartitionScheme {
        self.scheme
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_serial_single_partition() {
        let mut p = ImagePartitioning::serial(4, 10).unwrap();
        assert_eq!(p.stage(), Stage::Created);
        p.establish_partition_boundaries(&[3000; 10]).unwrap();
        assert_eq!(p.partition_starts_on_scanline(), &[0]);
        assert_eq!(p.partition_stops_on_scanline(), &[9]);
        p.determine_assignments(&[123]).unwrap();
        assert_eq!(p.assignments(), &[0]);
        assert_eq!(p.this_partition(), 0);
        assert_eq!(p.stage(), Stage::Assigned);
    }

    #[test]
    fn test_assignments_before_boundaries() {
        let mut p = ImagePartitioning::serial(4, 4).unwrap();
        assert_eq!(
            p.determine_assignments(&[1]),
            Err(PartitionError::AssignmentsBeforeBoundaries)
        );
    }

    #[test]
    fn test_wrong_lengths() {
        let mut p = ImagePartitioning::serial(4, 4).unwrap();
        assert_eq!(
            p.establish_partition_boundaries(&[1, 2]),
            Err(PartitionError::WorkloadLength {
                expected: 4,
                actual: 2
            })
        );
        p.establish_partition_boundaries(&[1; 4]).unwrap();
        assert_eq!(
            p.determine_assignments(&[1, 2]),
            Err(PartitionError::VolumeLength {
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn test_tile_restricts_scanlines() {
        let options = PartitioningOptions::default()
            .with_tile(Tile::new(0, 4, 2, 6))
            .with_overlaps(true);
        let mut p =
            ImagePartitioning::new_with_options(SerialCollective, 8, 8, options).unwrap();
        assert!(matches!(
            p.establish_partition_boundaries(&[1; 8]),
            Err(PartitionError::WorkloadLength { expected: 4, .. })
        ));
        p.establish_partition_boundaries(&[1; 4]).unwrap();
        let b = p.this_partition_bounds().unwrap();
        assert_eq!((b.min_w, b.max_w, b.min_h, b.max_h), (0, 3, 1, 5));
    }

    #[test]
    fn test_invalid_construction() {
        assert!(matches!(
            ImagePartitioning::serial(0, 4),
            Err(PartitionError::EmptyImage { .. })
        ));
        let options = PartitioningOptions::default().with_tile(Tile::new(0, 4, 2, 20));
        assert!(matches!(
            ImagePartitioning::new_with_options(SerialCollective, 8, 8, options),
            Err(PartitionError::InvalidTile { .. })
        ));
    }
}
