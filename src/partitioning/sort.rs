//! Sorting of volume triples
use crate::types::VolumeTriple;

/// Sort triples by ascending `bytes`.
///
/// This is a median-of-three quicksort. The relative order in which it leaves
/// triples of equal volume decides which of them wins a match during
/// assignment, so every process must use this exact algorithm rather than a
/// library sort.
pub fn sort_triples(triples: &mut [VolumeTriple]) {
    let mut rest = triples;
    loop {
        let current = rest;
        let n = current.len();
        if n <= 1 {
            return;
        }
        if n == 2 {
            if current[0].bytes > current[1].bytes {
                current.swap(0, 1);
            }
            return;
        }

        move_median_to_front(current);
        let split = partition(current);

        if split == n {
            // The pivot is a maximum: park it at the end and sort the rest.
            current.swap(0, n - 1);
            rest = &mut current[..n - 1];
            continue;
        }

        current.swap(0, split - 1);
        let (low, high) = current.split_at_mut(split);
        let low = &mut low[..split - 1];

        // Recurse into the shorter side so the stack depth stays logarithmic.
        if low.len() < high.len() {
            sort_triples(low);
            rest = high;
        } else {
            sort_triples(high);
            rest = low;
        }
    }
}

/// Swap the median of the first, middle and last entries into position 0
fn move_median_to_front(triples: &mut [VolumeTriple]) {
    let mid = triples.len() / 2;
    let last = triples.len() - 1;
    let a = triples[0].bytes;
    let b = triples[mid].bytes;
    let c = triples[last].bytes;

    if (b <= a && a <= c) || (c <= a && a <= b) {
        return;
    }
    if (a <= b && b <= c) || (c <= b && b <= a) {
        triples.swap(0, mid);
    } else {
        triples.swap(0, last);
    }
}

/// Partition `triples[1..]` around the pivot in `triples[0]`.
///
/// Returns `i` such that `triples[1..i]` are no larger than the pivot and
/// `triples[i..]` are larger.
fn partition(triples: &mut [VolumeTriple]) -> usize {
    let pivot = triples[0].bytes;
    let mut i = 1;
    let mut j = triples.len() - 1;
    loop {
        while i <= j && triples[i].bytes <= pivot {
            i += 1;
        }
        while j >= i && triples[j].bytes > pivot {
            j -= 1;
        }
        if i >= j {
            return i;
        }
        triples.swap(i, j);
    }
}
