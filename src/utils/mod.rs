//! Stateless helpers shared across the crate.

pub mod collections;
pub mod math;

pub use collections::{all_equal, extract_components, extract_with, make_filled_1d, make_filled_2d};
pub use math::{PositiveMod, positive_mod, positive_mod_unsigned};
