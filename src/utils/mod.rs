//! # Utilities Module
//!
//! Number theory and the random number capability shared by generation.

pub mod math;
pub mod rng;

pub use math::*;
pub use rng::*;
