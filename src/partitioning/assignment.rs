//! Matching processors to partitions
use super::sort::sort_triples;
use crate::types::VolumeTriple;
use itertools::{izip, Itertools};
use log::trace;

/// Collect a triple for every strictly positive entry of a dense `n` x `n`
/// volume matrix, in row-major order.
pub fn volume_triples(volumes: &[u64], n: usize) -> Vec<VolumeTriple> {
    debug_assert_eq!(volumes.len(), n * n);
    volumes
        .iter()
        .enumerate()
        .filter(|(_, bytes)| **bytes > 0)
        .map(|(index, bytes)| VolumeTriple::new(*bytes, index / n, index % n))
        .collect()
}

/// Bind every partition to a processor so that large projected transfers stay local.
///
/// `volumes[proc * n + partition]` is the number of bytes processor `proc`
/// would send towards `partition`. The returned vector maps each partition to
/// its owning processor and is always a permutation of `0..n`.
///
/// Pairs are matched greedily from the largest volume downwards. Processors and
/// partitions left over are then paired in ascending index order.
pub fn match_processors(volumes: &[u64], n: usize) -> Vec<usize> {
    let mut triples = volume_triples(volumes, n);
    sort_triples(&mut triples);

    let mut ptp = vec![0; n];
    let mut partition_matched = vec![false; n];
    let mut processor_matched = vec![false; n];
    let mut matches = 0;

    for t in triples.iter().rev() {
        if matches == n {
            break;
        }
        if processor_matched[t.processor] || partition_matched[t.partition] {
            continue;
        }
        trace!(
            "partition {} -> processor {} ({} bytes)",
            t.partition,
            t.processor,
            t.bytes
        );
        ptp[t.partition] = t.processor;
        partition_matched[t.partition] = true;
        processor_matched[t.processor] = true;
        matches += 1;
    }

    // Every greedy match removes one processor and one partition, so the
    // leftovers pair up exactly.
    let free_partitions = partition_matched.iter().positions(|m| !*m);
    let free_processors = processor_matched.iter().positions(|m| !*m);
    for (partition, processor) in izip!(free_partitions, free_processors) {
        ptp[partition] = processor;
    }
    ptp
}

/// Number of bytes that stay on their producing processor under `assignments`
pub fn matched_volume(volumes: &[u64], n: usize, assignments: &[usize]) -> u64 {
    assignments
        .iter()
        .enumerate()
        .map(|(partition, proc)| volumes[proc * n + partition])
        .sum()
}
