//! Game of Light - library crate.
//!
//! Simulates a grid of coupled LED / phototransistor cells, and provides the
//! rendering helpers used by the desktop application and the probe binary.

pub mod circuit;
pub mod command;
pub mod error;
pub mod image_io;
pub mod lattice;
pub mod palette;
pub mod params;
pub mod sim;
pub mod stimulus;
