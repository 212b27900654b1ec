//! Errors

use thiserror::Error;

/// Errors raised while partitioning an image or querying a partitioning
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PartitionError {
    /// Assignments were requested before the partition boundaries were established
    #[error("partition boundaries must be established before assignments are determined")]
    AssignmentsBeforeBoundaries,

    /// The workload histogram does not have one entry per scanline
    #[error("workload has {actual} entries but the active range has {expected} scanlines")]
    WorkloadLength {
        /// Number of scanlines in the active range
        expected: usize,
        /// Length of the supplied workload
        actual: usize,
    },

    /// The volume array does not have one entry per partition
    #[error("volume has {actual} entries but there are {expected} partitions")]
    VolumeLength {
        /// Number of partitions
        expected: usize,
        /// Length of the supplied volume
        actual: usize,
    },

    /// The image (or the active tile) contains no pixels
    #[error("cannot partition an empty image of size {width}x{height}")]
    EmptyImage {
        /// Width
        width: usize,
        /// Height
        height: usize,
    },

    /// The tile is empty or does not lie inside the image
    #[error("tile [{w_min}, {w_max}) x [{h_min}, {h_max}) is not a non-empty subrectangle of a {width}x{height} image")]
    InvalidTile {
        /// Lower width bound
        w_min: usize,
        /// Upper width bound (exclusive)
        w_max: usize,
        /// Lower height bound
        h_min: usize,
        /// Upper height bound (exclusive)
        h_max: usize,
        /// Image width
        width: usize,
        /// Image height
        height: usize,
    },

    /// The partitioning options are inconsistent
    #[error("invalid partitioning options: {0}")]
    InvalidOptions(String),

    /// A partition index outside `0..count` was queried
    #[error("partition {partition} does not exist (there are {count} partitions)")]
    PartitionOutOfRange {
        /// Requested partition
        partition: usize,
        /// Number of partitions
        count: usize,
    },

    /// A processor index outside `0..count` was queried
    #[error("processor {processor} does not exist (there are {count} processors)")]
    ProcessorOutOfRange {
        /// Requested processor
        processor: usize,
        /// Number of processors
        count: usize,
    },

    /// Reading or writing RON failed
    #[cfg(feature = "serde")]
    #[error("RON error: {0}")]
    Ron(String),

    /// Reading or writing a file failed
    #[cfg(feature = "serde")]
    #[error("I/O error: {0}")]
    Io(String),
}
