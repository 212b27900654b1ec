use mpi::{environment::Universe, traits::Communicator};
use sortlast::{ImagePartitioning, MpiCollective};

/// Partitioning an image across MPI processes
fn main() {
    env_logger::init();

    let universe: Universe = mpi::initialize().unwrap();
    let world = universe.world();
    let rank = world.rank() as usize;
    let size = world.size() as usize;

    let (width, height) = (512, 384);
    let mut partitioning = ImagePartitioning::new(MpiCollective::new(&world), width, height).unwrap();

    // Each process holds part of the volume; here process `rank` mostly samples
    // a horizontal band of the image.
    let band = (height / size).max(1);
    let workload = (0..height)
        .map(|s| {
            if s / band == rank {
                5000
            } else {
                200
            }
        })
        .collect::<Vec<_>>();
    partitioning
        .establish_partition_boundaries(&workload)
        .unwrap();

    // After a trial pass, estimate how many bytes this process would send to
    // each partition: the samples it produced inside that partition.
    let volume = (0..size)
        .map(|p| {
            let range = partitioning.scanline_range(p).unwrap();
            range.map_or(0, |r| {
                r.map(|s| workload[s]).sum::<u64>() * width as u64
            })
        })
        .collect::<Vec<_>>();
    partitioning.determine_assignments(&volume).unwrap();

    let bounds = partitioning.this_partition_bounds().unwrap();
    println!(
        "[{rank}] partition {} covers scanlines {}..={}",
        partitioning.this_partition(),
        bounds.min_h,
        bounds.max_h
    );
}
