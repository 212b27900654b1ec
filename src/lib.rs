//! Image-space partitioning for sort-last parallel compositing.
//!
//! An image is split into contiguous scanline ranges, one per process, so that
//! the rendering workload is balanced. Each range is then bound to the
//! process that already holds most of its data. Both decisions are reached
//! with one collective sum and one all-gather, after which every process
//! holds an identical partitioning.
#![cfg_attr(feature = "strict", deny(warnings), deny(unused_crate_dependencies))]
#![warn(missing_docs)]

pub mod collective;
pub mod error;
mod io;
pub mod partitioning;
pub mod traits;
pub mod types;

#[cfg(feature = "mpi")]
pub use collective::MpiCollective;
pub use collective::{SequenceChecked, SerialCollective};
pub use error::PartitionError;
pub use partitioning::{ImagePartitioning, PartitionScheme};
