//! Shared vocabulary for the modthree crates.
//!
//! - [`residue`] -- Residue classes modulo three and their arithmetic
//! - [`bit`] -- Binary digits and their character form

pub mod bit;
pub mod residue;

pub use bit::{Bit, NotABit};
pub use residue::Residue;
