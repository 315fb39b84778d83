use super::{ActiveMask, Variation};
use crate::lattice::Lattice;

/// LED current above which a cell counts as lit in [`FieldStats`].
pub const LIT_CURRENT: f64 = 1.0;

/// The five per-cell circuit arrays plus the external stimulus overlay, all
/// flat row-major over the full grid (padding included).
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitState {
    pub(crate) brightness: Vec<f64>,
    pub(crate) gate: Vec<f64>,
    pub(crate) conductance: Vec<f64>,
    pub(crate) drain: Vec<f64>,
    pub(crate) current: Vec<f64>,
    pub(crate) stimulus: Vec<f64>,
    pub(crate) variation: Variation,
}

impl CircuitState {
    pub fn new(len: usize, variation: Variation) -> Self {
        Self {
            brightness: vec![0.0; len],
            gate: vec![0.0; len],
            conductance: vec![0.0; len],
            drain: vec![0.0; len],
            current: vec![0.0; len],
            stimulus: vec![0.0; len],
            variation,
        }
    }

    /// Discharge everything: all circuit arrays and the stimulus go to zero.
    /// The variation tables belong to the hardware and survive.
    pub fn power_cycle(&mut self) {
        for field in [
            &mut self.brightness,
            &mut self.gate,
            &mut self.conductance,
            &mut self.drain,
            &mut self.current,
            &mut self.stimulus,
        ] {
            field.fill(0.0);
        }
    }

    pub fn brightness(&self) -> &[f64] {
        &self.brightness
    }

    pub fn gate_voltage(&self) -> &[f64] {
        &self.gate
    }

    pub fn conductance(&self) -> &[f64] {
        &self.conductance
    }

    pub fn drain_voltage(&self) -> &[f64] {
        &self.drain
    }

    pub fn led_current(&self) -> &[f64] {
        &self.current
    }

    pub fn external_stimulus(&self) -> &[f64] {
        &self.stimulus
    }

    pub(crate) fn stimulus_mut(&mut self) -> &mut [f64] {
        &mut self.stimulus
    }

    pub fn variation(&self) -> &Variation {
        &self.variation
    }

    /// Summary of the simulated region, for the HUD and the probe.
    pub fn stats(&self, lattice: &Lattice, mask: &ActiveMask) -> FieldStats {
        let mut stats = FieldStats::default();
        let mut current_sum = 0.0;
        let mut gate_sum = 0.0;
        for (x, y) in lattice.active_region() {
            let idx = lattice.index(x, y);
            if self.stimulus[idx] > 0.0 {
                stats.stimulated_cells += 1;
            }
            if !mask.is_active(idx) {
                continue;
            }
            let current = self.current[idx];
            stats.active_cells += 1;
            if current > LIT_CURRENT {
                stats.lit_cells += 1;
            }
            stats.peak_current = stats.peak_current.max(current);
            current_sum += current;
            gate_sum += self.gate[idx];
        }
        if stats.active_cells > 0 {
            stats.mean_current = current_sum / stats.active_cells as f64;
            stats.mean_gate_voltage = gate_sum / stats.active_cells as f64;
        }
        stats
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldStats {
    pub active_cells: usize,
    pub lit_cells: usize,
    pub stimulated_cells: usize,
    pub mean_current: f64,
    pub peak_current: f64,
    pub mean_gate_voltage: f64,
}

impl FieldStats {
    /// Fraction of active cells that are lit.
    pub fn lit_fraction(&self) -> f64 {
        if self.active_cells == 0 {
            0.0
        } else {
            self.lit_cells as f64 / self.active_cells as f64
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{}/{} lit, mean iD={:.2}, peak iD={:.2}, mean Vg={:.2}V",
            self.lit_cells,
            self.active_cells,
            self.mean_current,
            self.peak_current,
            self.mean_gate_voltage,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Topology;

    #[test]
    fn power_cycle_zeroes_every_array() {
        let mut state = CircuitState::new(9, Variation::none());
        state.brightness[1] = 3.0;
        state.gate[2] = 1.0;
        state.conductance[3] = 4.0;
        state.drain[4] = 2.5;
        state.current[5] = 0.7;
        state.stimulus[6] = 140.0;
        state.power_cycle();
        assert_eq!(state, CircuitState::new(9, Variation::none()));
    }

    #[test]
    fn stats_skip_padding_and_inactive_cells() {
        let lattice = Lattice::new(4, 4, Topology::Square, 1).unwrap();
        let mut mask = ActiveMask::new(&lattice);
        let mut state = CircuitState::new(lattice.len(), Variation::none());
        // padding
        state.current[lattice.index(0, 0)] = 100.0;
        state.current[lattice.index(1, 1)] = 4.0;
        state.current[lattice.index(2, 1)] = 0.5;
        state.current[lattice.index(2, 2)] = 9.0;
        mask.set(lattice.index(2, 2), false);

        let stats = state.stats(&lattice, &mask);
        assert_eq!(stats.active_cells, 3);
        assert_eq!(stats.lit_cells, 1);
        assert_eq!(stats.peak_current, 4.0);
        assert!((stats.mean_current - 1.5).abs() < 1e-12);
        assert!((stats.lit_fraction() - 1.0 / 3.0).abs() < 1e-12);
    }
}
