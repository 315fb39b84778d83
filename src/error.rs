//! Configuration errors raised while building a simulation.

use thiserror::Error;

use crate::lattice::{BrightnessKernel, Topology};

/// Everything that can go wrong at initialization. Once a
/// [`Simulation`](crate::sim::Simulation) exists, no further operation fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("grid {width}x{height} leaves no active region inside a sensing range of {psr}")]
    GridTooSmall { width: usize, height: usize, psr: usize },

    #[error("sensing range must be at least 1")]
    ZeroSensingRange,

    #[error("unknown topology \"{0}\" (expected \"hex\" or \"square\")")]
    UnknownTopology(String),

    #[error("brightness kernel {} cannot run on a {} grid", .kernel.name(), .topology.name())]
    KernelMismatch {
        kernel: BrightnessKernel,
        topology: Topology,
    },

    #[error("variation spread {0} is outside [0, 1)")]
    InvalidVariation(f64),

    #[error("variation sampler rejected its range: {0}")]
    Variation(String),
}
