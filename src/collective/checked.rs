//! Call sequence checking
use crate::traits::Collective;
use itertools::Itertools;
use log::{error, trace};
use std::cell::Cell;

/// A collective that verifies that all processes take part in the same call.
///
/// Before each collective operation the processes exchange a call sequence
/// number and the length of their buffer. If any two processes disagree, the
/// process panics instead of silently combining unrelated buffers. This costs
/// one extra all-gather per operation.
#[derive(Debug)]
pub struct SequenceChecked<C: Collective> {
    inner: C,
    sequence: Cell<u64>,
}

impl<C: Collective> SequenceChecked<C> {
    /// Create new
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            sequence: Cell::new(0),
        }
    }

    /// Number of collective operations performed so far
    pub fn sequence(&self) -> u64 {
        self.sequence.get()
    }

    /// The wrapped collective
    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn check(&self, operation: &str, len: usize) {
        let sequence = self.sequence.get();
        let probe = [sequence, len as u64];
        let gathered = self.inner.all_gather(&probe);
        for (rank, (other_sequence, other_len)) in gathered.iter().tuples().enumerate() {
            if *other_sequence != sequence || *other_len != len as u64 {
                error!(
                    "[{}] {operation} #{sequence} with {len} entries does not match process {rank} (call #{other_sequence} with {other_len} entries)",
                    self.inner.rank()
                );
                panic!(
                    "Collective {operation} mismatch: call #{sequence} with {len} entries on process {} but call #{other_sequence} with {other_len} entries on process {rank}",
                    self.inner.rank()
                );
            }
        }
        trace!("[{}] {operation} #{sequence} verified", self.inner.rank());
        self.sequence.set(sequence + 1);
    }
}

impl<C: Collective> Collective for SequenceChecked<C> {
    fn size(&self) -> usize {
        self.inner.size()
    }
    fn rank(&self) -> usize {
        self.inner.rank()
    }
    fn sum_across_group(&self, local: &[u64]) -> Vec<u64> {
        self.check("sum", local.len());
        self.inner.sum_across_group(local)
    }
    fn all_gather(&self, local: &[u64]) -> Vec<u64> {
        self.check("all-gather", local.len());
        self.inner.all_gather(local)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::collective::SerialCollective;

    #[test]
    fn test_sequence_counts_calls() {
        let c = SequenceChecked::new(SerialCollective);
        assert_eq!(c.sequence(), 0);
        assert_eq!(c.sum_across_group(&[4, 5]), vec![4, 5]);
        assert_eq!(c.all_gather(&[1]), vec![1]);
        assert_eq!(c.sequence(), 2);
    }

    struct Disagreeing;

    impl Collective for Disagreeing {
        fn size(&self) -> usize {
            2
        }
        fn rank(&self) -> usize {
            0
        }
        fn sum_across_group(&self, local: &[u64]) -> Vec<u64> {
            local.to_vec()
        }
        fn all_gather(&self, local: &[u64]) -> Vec<u64> {
            // The other process is one call ahead.
            let mut out = local.to_vec();
            out.push(local[0] + 1);
            out.extend_from_slice(&local[1..]);
            out
        }
    }

    #[test]
    #[should_panic]
    fn test_mismatch_panics() {
        let c = SequenceChecked::new(Disagreeing);
        let _ = c.sum_across_group(&[1, 2, 3]);
    }
}
