use sortlast::{
    types::{PartitioningOptions, Tile},
    ImagePartitioning, SerialCollective,
};

/// Partitioning an image on a single process
fn main() {
    env_logger::init();

    // Restrict the work to the central tile of a 320x240 image
    let options = PartitioningOptions::default()
        .with_tile(Tile::new(80, 240, 60, 180))
        .with_overlaps(true);
    let mut partitioning =
        ImagePartitioning::new_with_options(SerialCollective, 320, 240, options).unwrap();

    // The estimated number of samples on each scanline of the tile
    let workload = (0..120).map(|s| 400 + 30 * s as u64).collect::<Vec<_>>();
    partitioning
        .establish_partition_boundaries(&workload)
        .unwrap();

    // With one process all data stays local
    partitioning.determine_assignments(&[1 << 20]).unwrap();

    let bounds = partitioning.this_partition_bounds().unwrap();
    println!(
        "Rendering columns {}..={} and scanlines {}..={}",
        bounds.min_w, bounds.max_w, bounds.min_h, bounds.max_h
    );
}
