//! Traits

mod collective;
#[cfg(feature = "serde")]
mod io;

pub use collective::Collective;
#[cfg(feature = "serde")]
pub use io::{RONExport, RONImport};
