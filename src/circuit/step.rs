use super::transfer::{conductance, led_current};
use super::{ActiveMask, CircuitState, VDD};
use crate::error::ConfigError;
use crate::lattice::{BrightnessKernel, DistanceWeights, Lattice, Tap};
use crate::params::Parameters;

/// Advances a [`CircuitState`] by one discrete tick.
///
/// The kernel is compiled to taps once; `advance` then does no allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct StepEngine {
    kernel: BrightnessKernel,
    taps: Vec<Tap>,
}

impl StepEngine {
    pub fn new(
        kernel: BrightnessKernel,
        lattice: &Lattice,
        weights: &DistanceWeights,
    ) -> Result<Self, ConfigError> {
        let taps = kernel.compile(lattice, weights)?;
        Ok(Self { kernel, taps })
    }

    pub fn kernel(&self) -> BrightnessKernel {
        self.kernel
    }

    pub fn taps(&self) -> &[Tap] {
        &self.taps
    }

    /// Brightness seen by the phototransistor at `idx`, from last tick's LED
    /// currents plus the external stimulus.
    #[inline]
    fn brightness_at(&self, idx: usize, current: &[f64], stimulus: &[f64]) -> f64 {
        let neighbors: f64 = self
            .taps
            .iter()
            .map(|tap| tap.weight * current[(idx as isize + tap.stride) as usize])
            .sum();
        neighbors + stimulus[idx]
    }

    /// One tick over the active region.
    ///
    /// Pass 1 integrates gate and drain voltages against the previous LED
    /// currents; pass 2 then refreshes every LED current. The padding band
    /// is never touched.
    pub fn advance(
        &self,
        lattice: &Lattice,
        mask: &ActiveMask,
        params: &Parameters,
        state: &mut CircuitState,
    ) {
        let CircuitState {
            brightness,
            gate,
            conductance: rqi,
            drain,
            current,
            stimulus,
            variation,
        } = state;

        let sensitivity = params.sensitivity();
        let v_ref_low = params.v_ref_low();
        let v_ref_high = params.v_ref_high();
        let gate_step = params.gate_step_scale();
        let drain_step = params.drain_step_scale();

        for (x, y) in lattice.active_region() {
            let idx = lattice.index(x, y);
            if !mask.is_active(idx) {
                brightness[idx] = 0.0;
                gate[idx] = 0.0;
                rqi[idx] = 0.0;
                drain[idx] = 0.0;
                continue;
            }

            let b = self.brightness_at(idx, current, stimulus);
            brightness[idx] = b;

            let target = b * sensitivity * variation.sensitivity(idx) + v_ref_low;
            let vg = (gate[idx] + (target - gate[idx]) * gate_step).min(v_ref_high);
            gate[idx] = vg;

            let g = conductance(vg);
            rqi[idx] = g;

            let vd = drain[idx] + ((VDD - drain[idx]) * g - current[idx]) * drain_step;
            drain[idx] = vd.min(VDD);
        }

        for (x, y) in lattice.active_region() {
            let idx = lattice.index(x, y);
            current[idx] = if mask.is_active(idx) {
                led_current(drain[idx]) * variation.current(idx)
            } else {
                0.0
            };
        }
    }
}
