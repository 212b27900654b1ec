//! Partitioning of an image into scanline ranges
pub mod assignment;
pub mod boundaries;
mod image_partitioning;
mod scheme;
pub mod sort;

pub use image_partitioning::ImagePartitioning;
pub use scheme::PartitionScheme;
