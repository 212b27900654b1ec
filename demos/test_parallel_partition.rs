use itertools::Itertools;
use mpi::{
    collective::SystemOperation,
    environment::Universe,
    traits::{Communicator, CommunicatorCollectives},
};
use sortlast::{ImagePartitioning, MpiCollective, SequenceChecked};

/// Test that every scanline is owned by exactly one process
fn test_scanlines_owned_once<C: Communicator>(comm: &C) {
    let rank = comm.rank() as usize;
    let height = 200;
    let collective = SequenceChecked::new(MpiCollective::new(comm));
    let mut p = ImagePartitioning::new(collective, 64, height).unwrap();

    let workload = (0..height)
        .map(|s| ((s * 31 + rank * 7) % 17) as u64 * 300)
        .collect_vec();
    p.establish_partition_boundaries(&workload).unwrap();
    let volume = (0..p.num_partitions())
        .map(|q| ((q + rank) % 3) as u64 * 1000)
        .collect_vec();
    p.determine_assignments(&volume).unwrap();

    let owned = p
        .scanline_range(p.this_partition())
        .unwrap()
        .map_or(0, |r| r.count());
    let mut total = 0;
    comm.all_reduce_into(&owned, &mut total, SystemOperation::sum());
    assert_eq!(total, height);

    assert!(p.assignments().iter().copied().sorted().eq(0..p.num_processors()));
    assert_eq!(p.assignments()[p.this_partition()], rank);
}

/// Test that processes agree on the assignment
fn test_agreement<C: Communicator>(comm: &C) {
    let rank = comm.rank() as usize;
    let mut p = ImagePartitioning::new(MpiCollective::new(comm), 16, 48).unwrap();
    p.establish_partition_boundaries(&[1000; 48]).unwrap();
    let volume = (0..p.num_partitions())
        .map(|q| if q == rank { 10 } else { 20 })
        .collect_vec();
    p.determine_assignments(&volume).unwrap();

    let mine = p.assignments().iter().map(|a| *a as u64).collect_vec();
    let mut max = vec![0; mine.len()];
    let mut min = vec![0; mine.len()];
    comm.all_reduce_into(&mine[..], &mut max[..], SystemOperation::max());
    comm.all_reduce_into(&mine[..], &mut min[..], SystemOperation::min());
    assert_eq!(max, mine);
    assert_eq!(min, mine);
}

/// Run tests
fn main() {
    let universe: Universe = mpi::initialize().unwrap();
    let world = universe.world();
    let rank = world.rank();

    if rank == 0 {
        println!("Testing scanline ownership");
    }
    test_scanlines_owned_once(&world);
    if rank == 0 {
        println!("Testing agreement on assignments");
    }
    test_agreement(&world);
}
