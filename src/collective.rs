//! Collective implementations
mod checked;
#[cfg(feature = "mpi")]
mod mpi_comm;
mod serial;

pub use checked::SequenceChecked;
#[cfg(feature = "mpi")]
pub use mpi_comm::MpiCollective;
pub use serial::SerialCollective;
