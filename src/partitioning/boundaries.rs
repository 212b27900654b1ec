//! Scanline boundaries from a workload histogram

/// Scanline ranges of every partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanlineSplit {
    /// First scanline of each partition
    pub starts: Vec<usize>,
    /// Last scanline of each partition (inclusive). Empty partitions have `stop < start`.
    pub stops: Vec<usize>,
    /// Normalised workload assigned to each partition
    pub workloads: Vec<u64>,
}

/// Scale a global workload histogram down so that sums do not overflow.
///
/// Zero stays zero, any positive value below `scale` becomes one, and
/// everything else is divided by `scale`.
pub fn normalize_workload(global: &[u64], scale: u64) -> Vec<u64> {
    global
        .iter()
        .map(|&w| match w {
            0 => 0,
            w if w < scale => 1,
            w => w / scale,
        })
        .collect()
}

/// Split the scanlines `first..first + workload.len()` into `num_partitions`
/// contiguous ranges of roughly equal workload.
///
/// The target per partition is `max(1, total / num_partitions)`. A partition
/// is closed as soon as it holds the target. It is also closed before a
/// scanline that would push it past `high_watermark * target`, provided it
/// already holds `low_watermark * target`. The last partition that was opened
/// takes every remaining scanline, and partitions that were never opened are
/// left empty with `start = first + workload.len()`.
pub fn split_scanlines(
    workload: &[u64],
    first: usize,
    num_partitions: usize,
    high_watermark: f64,
    low_watermark: f64,
) -> ScanlineSplit {
    debug_assert!(!workload.is_empty());
    debug_assert!(num_partitions > 0);

    let end = first + workload.len();
    let total = workload.iter().sum::<u64>();
    let target = std::cmp::max(1, total / num_partitions as u64);
    let high = high_watermark * target as f64;
    let low = low_watermark * target as f64;

    let mut starts = vec![end; num_partitions];
    let mut stops = vec![end - 1; num_partitions];
    let mut workloads = vec![0; num_partitions];

    let mut current = 0;
    let mut amount = 0;
    starts[0] = first;

    for (offset, &w) in workload.iter().enumerate() {
        let scanline = first + offset;
        let partitions_remain = current + 1 < num_partitions;

        if partitions_remain && (amount + w) as f64 > high && amount as f64 >= low {
            stops[current] = scanline - 1;
            workloads[current] = amount;
            current += 1;
            starts[current] = scanline;
            amount = 0;
        }

        amount += w;

        if current + 1 < num_partitions && amount >= target && scanline + 1 < end {
            stops[current] = scanline;
            workloads[current] = amount;
            current += 1;
            starts[current] = scanline + 1;
            amount = 0;
        }
    }
    stops[current] = end - 1;
    workloads[current] = amount;

    ScanlineSplit {
        starts,
        stops,
        workloads,
    }
}

/// Ratio of the largest to the mean partition workload. A perfectly balanced split gives 1.
pub fn load_imbalance(workloads: &[u64]) -> f64 {
    let total = workloads.iter().sum::<u64>();
    if total == 0 || workloads.is_empty() {
        return 1.0;
    }
    let max = workloads.iter().copied().max().unwrap_or(0);
    max as f64 * workloads.len() as f64 / total as f64
}
