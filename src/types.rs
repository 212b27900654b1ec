//! Types

mod bounds;
mod options;
mod stage;
mod tile;
mod triple;

pub use bounds::PartitionBounds;
pub use options::{
    PartitioningOptions, DEFAULT_HIGH_WATERMARK, DEFAULT_LOW_WATERMARK, DEFAULT_WORKLOAD_SCALE,
};
pub use stage::Stage;
pub use tile::Tile;
pub use triple::VolumeTriple;
