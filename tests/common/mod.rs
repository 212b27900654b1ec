//! An in-process stand-in for a process group.
//!
//! Each rank runs on its own thread and exchanges buffers through shared slots
//! guarded by a barrier, so the collective semantics match those of MPI.
#![allow(dead_code)]

use sortlast::traits::Collective;
use std::sync::{Arc, Barrier, Mutex};

struct Exchange {
    slots: Mutex<Vec<Vec<u64>>>,
    barrier: Barrier,
}

/// One rank of a thread-backed group
pub struct ThreadCollective {
    rank: usize,
    size: usize,
    exchange: Arc<Exchange>,
}

impl ThreadCollective {
    fn exchange(&self, local: &[u64]) -> Vec<Vec<u64>> {
        self.exchange.slots.lock().unwrap()[self.rank] = local.to_vec();
        self.exchange.barrier.wait();
        let all = self.exchange.slots.lock().unwrap().clone();
        // Nobody may overwrite a slot before every rank has read it.
        self.exchange.barrier.wait();
        for (rank, buffer) in all.iter().enumerate() {
            assert_eq!(
                buffer.len(),
                local.len(),
                "rank {rank} passed a buffer of a different length"
            );
        }
        all
    }
}

impl Collective for ThreadCollective {
    fn size(&self) -> usize {
        self.size
    }
    fn rank(&self) -> usize {
        self.rank
    }
    fn sum_across_group(&self, local: &[u64]) -> Vec<u64> {
        let all = self.exchange(local);
        (0..local.len())
            .map(|i| all.iter().map(|buffer| buffer[i]).sum())
            .collect()
    }
    fn all_gather(&self, local: &[u64]) -> Vec<u64> {
        self.exchange(local).concat()
    }
}

/// Create the ranks of a group of `size` processes
pub fn thread_group(size: usize) -> Vec<ThreadCollective> {
    let exchange = Arc::new(Exchange {
        slots: Mutex::new(vec![vec![]; size]),
        barrier: Barrier::new(size),
    });
    (0..size)
        .map(|rank| ThreadCollective {
            rank,
            size,
            exchange: Arc::clone(&exchange),
        })
        .collect()
}

/// Run `f` on every rank of a group of `size` processes and collect the results by rank
pub fn run_on_group<T: Send, F: Fn(ThreadCollective) -> T + Sync>(size: usize, f: F) -> Vec<T> {
    let f = &f;
    std::thread::scope(|scope| {
        let handles = thread_group(size)
            .into_iter()
            .map(|c| scope.spawn(move || f(c)))
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect()
    })
}

/// A deterministic, uneven per-scanline workload for one rank
pub fn example_workload(rank: usize, height: usize) -> Vec<u64> {
    (0..height)
        .map(|s| {
            let band = (s * 7 + rank * 13) % 11;
            if band < 3 {
                0
            } else {
                (band as u64) * 450 + (rank as u64 + 1) * 100
            }
        })
        .collect()
}

/// A deterministic projected byte count from one rank towards every partition
pub fn example_volume(rank: usize, size: usize) -> Vec<u64> {
    (0..size)
        .map(|p| ((rank * 31 + p * 17) % 23) as u64 * 64)
        .collect()
}
