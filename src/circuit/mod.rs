//! Per-cell analog feedback circuit.
//!
//! Each cell is a phototransistor divider feeding the gates of an N/P FET
//! pair; the pair drives an LED branch whose light reaches the neighbors'
//! phototransistors on the next step.

pub mod mask;
pub mod state;
pub mod step;
pub mod transfer;
pub mod variation;

pub use mask::ActiveMask;
pub use state::{CircuitState, FieldStats};
pub use step::StepEngine;
pub use variation::{Variation, VariationConfig};

/// Supply voltage [V].
pub const VDD: f64 = 5.0;
/// A bit below the N-FET gate threshold [V].
pub const V_N: f64 = 1.5;
/// A bit above the P-FET gate threshold [V].
pub const V_P: f64 = VDD - 1.5;
/// Combined FET on-resistance at Vgs = VDD / 2 [Ohm].
pub const RQ_ON: f64 = 10.0;
/// Scales the conductance parabola so it peaks at 1 / RQ_ON [1/kOhm].
pub const RQI_BASE: f64 = 1000.0 / (((V_P - V_N) / 2.0) * ((V_P - V_N) / 2.0)) / RQ_ON;
