//! Volume triples

/// Projected number of bytes a processor would send towards a partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VolumeTriple {
    /// Projected bytes
    pub bytes: u64,
    /// Sending processor
    pub processor: usize,
    /// Receiving partition
    pub partition: usize,
}

impl VolumeTriple {
    /// Create new
    pub fn new(bytes: u64, processor: usize, partition: usize) -> Self {
        Self {
            bytes,
            processor,
            partition,
        }
    }
}
