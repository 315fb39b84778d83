//! Tunable circuit parameters.
//!
//! Values only move through bounded increments; anything past a limit
//! saturates.

/// Lowest allowed phototransistor reference voltage [V].
pub const VG_MIN: f64 = -15.0;
/// Highest allowed phototransistor reference voltage [V].
pub const VG_MAX: f64 = 10.0;

pub const SENSITIVITY_MAX: f64 = 1.0;
pub const SENSITIVITY_STEP: f64 = 0.001;
pub const V_REF_LOW_STEP: f64 = 0.1;
pub const V_REF_HIGH_STEP: f64 = 0.05;

/// Step scales move by whole powers of this factor.
pub const STEP_SCALE_BASE: f64 = 1.1;
/// Smallest step scale, as a power of [`STEP_SCALE_BASE`].
pub const STEP_SCALE_MIN_EXP: i32 = -120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    Sensitivity,
    VRefLow,
    VRefHigh,
    GateStepScale,
    DrainStepScale,
    /// Gate and drain step scales together.
    BothStepScales,
}

impl Parameter {
    pub const ALL: &[Parameter] = &[
        Parameter::Sensitivity,
        Parameter::VRefLow,
        Parameter::VRefHigh,
        Parameter::GateStepScale,
        Parameter::DrainStepScale,
        Parameter::BothStepScales,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Parameter::Sensitivity => "Sensitivity",
            Parameter::VRefLow => "Low VRef",
            Parameter::VRefHigh => "High VRef",
            Parameter::GateStepScale => "Vg Step Size",
            Parameter::DrainStepScale => "Vd Step Size",
            Parameter::BothStepScales => "Vg+Vd Step Size",
        }
    }
}

fn step_scale_min() -> f64 {
    STEP_SCALE_BASE.powi(STEP_SCALE_MIN_EXP)
}

fn clamp_step_scale(scale: f64) -> f64 {
    scale.clamp(step_scale_min(), 1.0)
}

/// Step scales stand in for the gate and drain capacitances: close to 1 is
/// a tiny capacitor, close to 0 a large one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    sensitivity: f64,
    v_ref_low: f64,
    v_ref_high: f64,
    gate_step_scale: f64,
    drain_step_scale: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            sensitivity: 0.085,
            v_ref_low: -0.6,
            v_ref_high: 4.95,
            gate_step_scale: STEP_SCALE_BASE.powi(-19),
            drain_step_scale: STEP_SCALE_BASE.powi(-53),
        }
    }
}

impl Parameters {
    /// Starting values, each clamped into its range.
    pub fn new(
        sensitivity: f64,
        v_ref_low: f64,
        v_ref_high: f64,
        gate_step_scale: f64,
        drain_step_scale: f64,
    ) -> Self {
        Self {
            sensitivity: sensitivity.clamp(0.0, SENSITIVITY_MAX),
            v_ref_low: v_ref_low.clamp(VG_MIN, VG_MAX),
            v_ref_high: v_ref_high.clamp(VG_MIN, VG_MAX),
            gate_step_scale: clamp_step_scale(gate_step_scale),
            drain_step_scale: clamp_step_scale(drain_step_scale),
        }
    }

    pub fn with_sensitivity(self, sensitivity: f64) -> Self {
        Self::new(
            sensitivity,
            self.v_ref_low,
            self.v_ref_high,
            self.gate_step_scale,
            self.drain_step_scale,
        )
    }

    pub fn with_v_ref_low(self, v_ref_low: f64) -> Self {
        Self::new(
            self.sensitivity,
            v_ref_low,
            self.v_ref_high,
            self.gate_step_scale,
            self.drain_step_scale,
        )
    }

    /// Brightness → steady-state gate voltage gain.
    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    pub fn v_ref_low(&self) -> f64 {
        self.v_ref_low
    }

    /// Gate voltage ceiling.
    pub fn v_ref_high(&self) -> f64 {
        self.v_ref_high
    }

    pub fn gate_step_scale(&self) -> f64 {
        self.gate_step_scale
    }

    pub fn drain_step_scale(&self) -> f64 {
        self.drain_step_scale
    }

    pub fn value(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Sensitivity => self.sensitivity,
            Parameter::VRefLow => self.v_ref_low,
            Parameter::VRefHigh => self.v_ref_high,
            Parameter::GateStepScale | Parameter::BothStepScales => self.gate_step_scale,
            Parameter::DrainStepScale => self.drain_step_scale,
        }
    }

    /// Move `parameter` by `steps` increments (negative steps go down).
    pub fn adjust(&mut self, parameter: Parameter, steps: i32) {
        match parameter {
            Parameter::Sensitivity => self.adjust_sensitivity(steps),
            Parameter::VRefLow => self.adjust_v_ref_low(steps),
            Parameter::VRefHigh => self.adjust_v_ref_high(steps),
            Parameter::GateStepScale => self.scale_gate_step(steps),
            Parameter::DrainStepScale => self.scale_drain_step(steps),
            Parameter::BothStepScales => {
                self.scale_gate_step(steps);
                self.scale_drain_step(steps);
            }
        }
    }

    pub fn adjust_sensitivity(&mut self, steps: i32) {
        self.sensitivity =
            (self.sensitivity + steps as f64 * SENSITIVITY_STEP).clamp(0.0, SENSITIVITY_MAX);
    }

    pub fn adjust_v_ref_low(&mut self, steps: i32) {
        self.v_ref_low = (self.v_ref_low + steps as f64 * V_REF_LOW_STEP).clamp(VG_MIN, VG_MAX);
    }

    pub fn adjust_v_ref_high(&mut self, steps: i32) {
        self.v_ref_high = (self.v_ref_high + steps as f64 * V_REF_HIGH_STEP).clamp(VG_MIN, VG_MAX);
    }

    pub fn scale_gate_step(&mut self, steps: i32) {
        self.gate_step_scale = clamp_step_scale(self.gate_step_scale * STEP_SCALE_BASE.powi(steps));
    }

    pub fn scale_drain_step(&mut self, steps: i32) {
        self.drain_step_scale =
            clamp_step_scale(self.drain_step_scale * STEP_SCALE_BASE.powi(steps));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_settings() {
        let p = Parameters::default();
        assert_eq!(p.sensitivity(), 0.085);
        assert_eq!(p.v_ref_low(), -0.6);
        assert_eq!(p.v_ref_high(), 4.95);
        assert!(p.gate_step_scale() < 0.5);
        assert!(p.drain_step_scale() < p.gate_step_scale());
    }

    #[test]
    fn additive_steps() {
        let mut p = Parameters::default();
        p.adjust(Parameter::Sensitivity, 5);
        assert!((p.sensitivity() - 0.090).abs() < 1e-12);
        p.adjust(Parameter::VRefLow, -4);
        assert!((p.v_ref_low() + 1.0).abs() < 1e-12);
        p.adjust(Parameter::VRefHigh, 1);
        assert!((p.v_ref_high() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn references_saturate() {
        let mut p = Parameters::default();
        p.adjust(Parameter::VRefLow, 10_000);
        assert_eq!(p.v_ref_low(), VG_MAX);
        p.adjust(Parameter::VRefHigh, -10_000);
        assert_eq!(p.v_ref_high(), VG_MIN);
        p.adjust(Parameter::Sensitivity, -1_000);
        assert_eq!(p.sensitivity(), 0.0);
        p.adjust(Parameter::Sensitivity, 5_000);
        assert_eq!(p.sensitivity(), SENSITIVITY_MAX);
    }

    #[test]
    fn step_scales_are_multiplicative() {
        let mut p = Parameters::default();
        let gate = p.gate_step_scale();
        let drain = p.drain_step_scale();
        p.adjust(Parameter::GateStepScale, 2);
        assert!((p.gate_step_scale() - gate * 1.21).abs() < 1e-12);
        assert_eq!(p.drain_step_scale(), drain);

        p.adjust(Parameter::BothStepScales, -1);
        assert!((p.gate_step_scale() - gate * 1.1).abs() < 1e-12);
        assert!((p.drain_step_scale() - drain / 1.1).abs() < 1e-12);
    }

    #[test]
    fn step_scales_saturate() {
        let mut p = Parameters::default();
        p.adjust(Parameter::DrainStepScale, 500);
        assert_eq!(p.drain_step_scale(), 1.0);
        p.adjust(Parameter::GateStepScale, -500);
        assert_eq!(p.gate_step_scale(), STEP_SCALE_BASE.powi(STEP_SCALE_MIN_EXP));
    }

    #[test]
    fn construction_clamps() {
        let p = Parameters::new(-1.0, -40.0, 40.0, 2.0, 0.0);
        assert_eq!(p.sensitivity(), 0.0);
        assert_eq!(p.v_ref_low(), VG_MIN);
        assert_eq!(p.v_ref_high(), VG_MAX);
        assert_eq!(p.gate_step_scale(), 1.0);
        assert!(p.drain_step_scale() > 0.0);
    }
}
