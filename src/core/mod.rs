//! Core types and constants for the trilateration visualizer

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
