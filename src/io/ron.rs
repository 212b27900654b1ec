//! RON I/O
use crate::{
    error::PartitionError,
    partitioning::{ImagePartitioning, PartitionScheme},
    traits::{Collective, RONExport, RONImport},
};
use itertools::Itertools;

impl RONExport for PartitionScheme {
    fn to_ron_string(&self) -> Result<String, PartitionError> {
        ron::to_string(self).map_err(|e| PartitionError::Ron(e.to_string()))
    }
}

impl<C: Collective> RONExport for ImagePartitioning<C> {
    fn to_ron_string(&self) -> Result<String, PartitionError> {
        self.scheme().to_ron_string()
    }
}

impl RONImport for PartitionScheme {
    fn from_ron_string(s: &str) -> Result<Self, PartitionError> {
        let scheme: PartitionScheme =
            ron::from_str(s).map_err(|e| PartitionError::Ron(e.to_string()))?;
        check_consistent(&scheme)?;
        Ok(scheme)
    }
}

/// Reject schemes that could not have been produced by a partitioning
fn check_consistent(scheme: &PartitionScheme) -> Result<(), PartitionError> {
    if scheme.width() == 0 || scheme.height() == 0 {
        return Err(PartitionError::EmptyImage {
            width: scheme.width(),
            height: scheme.height(),
        });
    }
    if let Some(tile) = scheme.tile() {
        tile.validate(scheme.width(), scheme.height())?;
    }
    let n = scheme.num_partitions();
    if scheme.partition_starts_on_scanline().len() != n
        || scheme.partition_stops_on_scanline().len() != n
        || scheme.workloads().len() != n
    {
        return Err(PartitionError::Ron(format!(
            "expected {n} entries for every partition array"
        )));
    }
    if !scheme.assignments().iter().copied().sorted().eq(0..n) {
        return Err(PartitionError::Ron(String::from(
            "partition assignments are not a permutation",
        )));
    }
    // Non-empty partitions must tile the active scanlines in partition order,
    // and empty ones must sit just past the last scanline.
    let scanlines = scheme.active_scanlines();
    let mut next = scanlines.start;
    for (partition, (start, stop)) in scheme
        .partition_starts_on_scanline()
        .iter()
        .zip(scheme.partition_stops_on_scanline())
        .enumerate()
    {
        if start > stop {
            if *start != scanlines.end || *stop != scanlines.end - 1 {
                return Err(PartitionError::Ron(format!(
                    "empty partition {partition} must be ({}, {})",
                    scanlines.end,
                    scanlines.end - 1
                )));
            }
            continue;
        }
        if *start != next || *stop >= scanlines.end {
            return Err(PartitionError::Ron(format!(
                "partition {partition} covers [{start}, {stop}] but should start at scanline {next}"
            )));
        }
        next = stop + 1;
    }
    if next != scanlines.end {
        return Err(PartitionError::Ron(format!(
            "scanlines {next}..{} are not covered by any partition",
            scanlines.end
        )));
    }
    Ok(())
}
