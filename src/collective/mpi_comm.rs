//! MPI collective
use crate::traits::Collective;
use mpi::{
    collective::SystemOperation,
    traits::{Communicator, CommunicatorCollectives},
};

/// Collective operations over an MPI communicator
#[derive(Debug)]
pub struct MpiCollective<'a, C: Communicator> {
    comm: &'a C,
}

impl<'a, C: Communicator> MpiCollective<'a, C> {
    /// Create new
    pub fn new(comm: &'a C) -> Self {
        Self { comm }
    }

    /// MPI communicator
    pub fn comm(&self) -> &C {
        self.comm
    }
}

impl<C: Communicator> Collective for MpiCollective<'_, C> {
    fn size(&self) -> usize {
        self.comm.size() as usize
    }

    fn rank(&self) -> usize {
        self.comm.rank() as usize
    }

    fn sum_across_group(&self, local: &[u64]) -> Vec<u64> {
        // A single process has nothing to exchange.
        if self.comm.size() == 1 {
            return local.to_vec();
        }
        let mut global = vec![0; local.len()];
        self.comm
            .all_reduce_into(local, &mut global[..], SystemOperation::sum());
        global
    }

    fn all_gather(&self, local: &[u64]) -> Vec<u64> {
        if self.comm.size() == 1 {
            return local.to_vec();
        }
        let mut gathered = vec![0; local.len() * self.comm.size() as usize];
        self.comm.all_gather_into(local, &mut gathered[..]);
        gathered
    }
}
