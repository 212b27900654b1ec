//! Input and output
#[cfg(feature = "serde")]
mod ron;
