//! Collective communication used to agree on a partitioning

pub trait Collective {
    //! A group of cooperating processes.
    //!
    //! Every process in the group must call each collective operation the
    //! same number of times, in the same order and with buffers of the same
    //! length. Violations are not detected and may deadlock or corrupt data.

    /// Number of processes in the group
    fn size(&self) -> usize;

    /// Index of this process in the group
    fn rank(&self) -> usize;

    /// Element-wise sum of `local` across the group. Every process receives the same result.
    fn sum_across_group(&self, local: &[u64]) -> Vec<u64>;

    /// Gather `local` from every process.
    ///
    /// The result has `size() * local.len()` entries and is ordered by the rank of
    /// the sending process, so entry `j` of process `i` is at `i * local.len() + j`.
    fn all_gather(&self, local: &[u64]) -> Vec<u64>;
}

impl<T: Collective + ?Sized> Collective for &T {
    fn size(&self) -> usize {
        (**self).size()
    }
    fn rank(&self) -> usize {
        (**self).rank()
    }
    fn sum_across_group(&self, local: &[u64]) -> Vec<u64> {
        (**self).sum_across_group(local)
    }
    fn all_gather(&self, local: &[u64]) -> Vec<u64> {
        (**self).all_gather(local)
    }
}
