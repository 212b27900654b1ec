//! Progress of a partitioning

/// How far the two-step partitioning protocol has progressed
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Stage {
    /// Nothing has been computed yet
    Created,
    /// Scanline ranges are fixed; partitions are still owned by the processor of the same index
    BoundariesEstablished,
    /// Every partition has been bound to a processor
    Assigned,
}
