//! The owned simulation: lattice, circuit state, parameters and brush,
//! driven one tick at a time.

use crate::circuit::{ActiveMask, CircuitState, FieldStats, StepEngine, Variation, VariationConfig};
use crate::command::Command;
use crate::error::ConfigError;
use crate::lattice::{BrightnessKernel, Cell, DistanceWeights, Lattice, Topology};
use crate::params::{Parameter, Parameters};
use crate::stimulus::Flashlight;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridPreset {
    HexB3,
    HexB6,
    SquareB4,
    HexB3Variation,
}

impl GridPreset {
    pub const ALL: &[GridPreset] = &[
        GridPreset::HexB3,
        GridPreset::HexB6,
        GridPreset::SquareB4,
        GridPreset::HexB3Variation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GridPreset::HexB3 => "Hex B_3",
            GridPreset::HexB6 => "Hex B_6",
            GridPreset::SquareB4 => "Square B_4",
            GridPreset::HexB3Variation => "Hex B_3 + variation",
        }
    }

    pub fn config(self) -> GridConfig {
        let base = GridConfig::default();
        match self {
            GridPreset::HexB3 => base,
            GridPreset::HexB6 => GridConfig {
                kernel: Some(BrightnessKernel::Hex6),
                params: Parameters::default()
                    .with_sensitivity(0.025)
                    .with_v_ref_low(0.4),
                ..base
            },
            GridPreset::SquareB4 => GridConfig {
                topology: Topology::Square,
                kernel: Some(BrightnessKernel::Square4),
                params: Parameters::default().with_sensitivity(0.06),
                ..base
            },
            GridPreset::HexB3Variation => GridConfig {
                variation: VariationConfig {
                    sensitivity: true,
                    current: true,
                    ..VariationConfig::default()
                },
                ..base
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    pub topology: Topology,
    /// Phototransistor sensing range in cells.
    pub psr: usize,
    /// `None` picks [`GridConfig::resolved_kernel`]'s default.
    pub kernel: Option<BrightnessKernel>,
    pub params: Parameters,
    pub variation: VariationConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 41,
            height: 41,
            topology: Topology::Hex,
            psr: 1,
            kernel: None,
            params: Parameters::default(),
            variation: VariationConfig::default(),
        }
    }
}

impl GridConfig {
    /// The configured kernel, or the topology's own at unit range and the
    /// radial kernel beyond it.
    pub fn resolved_kernel(&self) -> BrightnessKernel {
        match self.kernel {
            Some(kernel) => kernel,
            None if self.psr > 1 => BrightnessKernel::Radial,
            None => self.topology.default_kernel(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Simulation {
    config: GridConfig,
    lattice: Lattice,
    weights: DistanceWeights,
    engine: StepEngine,
    mask: ActiveMask,
    params: Parameters,
    flashlight: Flashlight,
    state: CircuitState,
    tick: u64,
}

impl Simulation {
    pub fn new(config: &GridConfig) -> Result<Self, ConfigError> {
        let lattice = Lattice::new(config.width, config.height, config.topology, config.psr)?;
        let weights = DistanceWeights::new(config.topology, config.psr);
        let engine = StepEngine::new(config.resolved_kernel(), &lattice, &weights)?;
        let variation = Variation::sample(lattice.len(), &config.variation)?;
        let mask = ActiveMask::new(&lattice);
        let state = CircuitState::new(lattice.len(), variation);

        log::info!(
            "grid {}x{} {} psr={} kernel={} ({} taps), {} active cells, variation {}",
            lattice.width(),
            lattice.height(),
            lattice.topology().name(),
            lattice.psr(),
            engine.kernel().name(),
            engine.taps().len(),
            mask.count_simulated(&lattice),
            if config.variation.enabled() { "on" } else { "off" },
        );

        Ok(Self {
            config: config.clone(),
            lattice,
            weights,
            engine,
            mask,
            params: config.params,
            flashlight: Flashlight::default(),
            state,
            tick: 0,
        })
    }

    /// A grid with every other setting at its default.
    pub fn initialize(
        width: usize,
        height: usize,
        topology: Topology,
        sensing_radius: usize,
    ) -> Result<Self, ConfigError> {
        Self::new(&GridConfig {
            width,
            height,
            topology,
            psr: sensing_radius,
            ..GridConfig::default()
        })
    }

    pub fn advance(&mut self) {
        self.engine
            .advance(&self.lattice, &self.mask, &self.params, &mut self.state);
        self.tick += 1;
    }

    pub fn run(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.advance();
        }
    }

    pub fn power_cycle(&mut self) {
        self.state.power_cycle();
        log::debug!("power cycle at tick {}", self.tick);
    }

    pub fn reset_active_nodes(&mut self) {
        self.mask.reset(&self.lattice);
        log::debug!(
            "active nodes reset, {} simulated",
            self.mask.count_simulated(&self.lattice)
        );
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::StepOnce => self.advance(),
            Command::ToggleNode(cell) => self.toggle_node(cell),
            Command::ApplyStimulus(cell) => self.apply_stimulus(cell),
            Command::ClearStimulus(cell) => self.clear_stimulus(cell),
            Command::MoveStimulus(cell) => self.move_stimulus(cell),
            Command::ResizeBrush(delta) => self.resize_brush(delta),
            Command::AdjustBrushBrightness(delta) => self.adjust_brush_brightness(delta),
            Command::AdjustParameter { parameter, steps } => {
                self.adjust_parameter(parameter, steps)
            }
            Command::PowerCycle => self.power_cycle(),
            Command::ResetActiveNodes => self.reset_active_nodes(),
        }
    }

    pub fn toggle_node(&mut self, cell: Cell) {
        self.flashlight
            .toggle_active(&self.lattice, &mut self.mask, cell);
    }

    pub fn apply_stimulus(&mut self, cell: Cell) {
        self.flashlight
            .apply(&self.lattice, self.state.stimulus_mut(), cell);
    }

    pub fn clear_stimulus(&mut self, cell: Cell) {
        self.flashlight
            .clear(&self.lattice, self.state.stimulus_mut(), cell);
    }

    pub fn move_stimulus(&mut self, cell: Cell) {
        self.flashlight
            .move_to(&self.lattice, self.state.stimulus_mut(), cell);
    }

    /// Resize the brush, redrawing it if it is currently on the grid.
    pub fn resize_brush(&mut self, delta: i32) {
        let cursor = self.flashlight.cursor();
        if let Some(cell) = cursor {
            self.clear_stimulus(cell);
        }
        self.flashlight.resize(delta);
        if let Some(cell) = cursor {
            self.apply_stimulus(cell);
        }
    }

    pub fn adjust_brush_brightness(&mut self, delta: f64) {
        self.flashlight.adjust_brightness(delta);
        if let Some(cell) = self.flashlight.cursor() {
            self.apply_stimulus(cell);
        }
    }

    pub fn adjust_parameter(&mut self, parameter: Parameter, steps: i32) {
        self.params.adjust(parameter, steps);
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn weights(&self) -> &DistanceWeights {
        &self.weights
    }

    pub fn kernel(&self) -> BrightnessKernel {
        self.engine.kernel()
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn flashlight(&self) -> &Flashlight {
        &self.flashlight
    }

    pub fn active_mask(&self) -> &ActiveMask {
        &self.mask
    }

    pub fn state(&self) -> &CircuitState {
        &self.state
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn brightness(&self) -> &[f64] {
        self.state.brightness()
    }

    pub fn gate_voltage(&self) -> &[f64] {
        self.state.gate_voltage()
    }

    pub fn conductance(&self) -> &[f64] {
        self.state.conductance()
    }

    pub fn drain_voltage(&self) -> &[f64] {
        self.state.drain_voltage()
    }

    pub fn led_current(&self) -> &[f64] {
        self.state.led_current()
    }

    pub fn external_stimulus(&self) -> &[f64] {
        self.state.external_stimulus()
    }

    pub fn stats(&self) -> FieldStats {
        self.state.stats(&self.lattice, &self.mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::VDD;
    use crate::stimulus::DEFAULT_BRIGHTNESS;

    fn scripted(sim: &mut Simulation) {
        sim.apply(Command::MoveStimulus(Cell::new(20, 20)));
        sim.run(200);
        sim.apply(Command::MoveStimulus(Cell::new(12, 25)));
        sim.run(200);
    }

    #[test]
    fn every_preset_builds() {
        for &preset in GridPreset::ALL {
            let sim = Simulation::new(&preset.config()).unwrap();
            assert_eq!(sim.lattice().len(), 41 * 41);
            assert!(sim.kernel().supports(sim.lattice().topology()));
        }
    }

    #[test]
    fn initialize_reports_config_errors() {
        assert_eq!(
            Simulation::initialize(0, 5, Topology::Hex, 1).err(),
            Some(ConfigError::EmptyGrid { width: 0, height: 5 })
        );
        let config = GridConfig {
            kernel: Some(BrightnessKernel::Square4),
            ..GridConfig::default()
        };
        assert!(matches!(
            Simulation::new(&config),
            Err(ConfigError::KernelMismatch { .. })
        ));
    }

    #[test]
    fn wider_range_defaults_to_radial() {
        let sim = Simulation::initialize(21, 21, Topology::Square, 3).unwrap();
        assert_eq!(sim.kernel(), BrightnessKernel::Radial);
        let sim = Simulation::initialize(21, 21, Topology::Hex, 1).unwrap();
        assert_eq!(sim.kernel(), BrightnessKernel::Hex3);
    }

    #[test]
    fn identical_runs_are_bit_identical() {
        let config = GridPreset::HexB3Variation.config();
        let mut a = Simulation::new(&config).unwrap();
        let mut b = Simulation::new(&config).unwrap();
        scripted(&mut a);
        scripted(&mut b);
        assert_eq!(a.state(), b.state());
        assert_eq!(a.tick(), 400);
    }

    #[test]
    fn single_cell_scenario() {
        let mut sim = Simulation::initialize(3, 3, Topology::Hex, 1).unwrap();
        let center = Cell::new(1, 1);
        let idx = sim.lattice().index(1, 1);
        sim.apply(Command::ApplyStimulus(center));
        assert_eq!(sim.external_stimulus()[idx], DEFAULT_BRIGHTNESS);

        sim.apply(Command::StepOnce);

        let target = DEFAULT_BRIGHTNESS * 0.085 - 0.6;
        let vg = sim.gate_voltage()[idx];
        assert!(vg > 0.0 && vg < target);
        assert!(vg <= 4.95);

        sim.run(500);
        assert!(sim.gate_voltage()[idx] <= 4.95);
        assert!(sim.drain_voltage()[idx] <= VDD);
    }

    #[test]
    fn power_cycle_keeps_mask_and_params() {
        let mut sim = Simulation::new(&GridConfig::default()).unwrap();
        scripted(&mut sim);
        sim.apply(Command::ToggleNode(Cell::new(30, 30)));
        sim.apply(Command::AdjustParameter {
            parameter: Parameter::VRefHigh,
            steps: -3,
        });
        let mask = sim.active_mask().clone();
        let params = *sim.params();

        sim.apply(Command::PowerCycle);
        let once = sim.state().clone();
        sim.apply(Command::PowerCycle);

        assert_eq!(sim.state(), &once);
        assert!(sim.led_current().iter().all(|&i| i == 0.0));
        assert!(sim.external_stimulus().iter().all(|&b| b == 0.0));
        assert_eq!(sim.active_mask(), &mask);
        assert_eq!(sim.params(), &params);
    }

    #[test]
    fn inactive_cells_stay_dark() {
        let mut sim = Simulation::new(&GridConfig::default()).unwrap();
        sim.apply(Command::ToggleNode(Cell::new(20, 20)));
        scripted(&mut sim);
        let lattice = sim.lattice().clone();
        for (x, y) in lattice.active_region() {
            let idx = lattice.index(x, y);
            if sim.active_mask().is_active(idx) {
                continue;
            }
            assert_eq!(sim.brightness()[idx], 0.0);
            assert_eq!(sim.gate_voltage()[idx], 0.0);
            assert_eq!(sim.conductance()[idx], 0.0);
            assert_eq!(sim.drain_voltage()[idx], 0.0);
            assert_eq!(sim.led_current()[idx], 0.0);
        }
    }

    #[test]
    fn reset_restores_default_mask() {
        let mut sim = Simulation::new(&GridConfig::default()).unwrap();
        let pristine = sim.active_mask().clone();
        sim.apply(Command::ToggleNode(Cell::new(10, 10)));
        assert_ne!(sim.active_mask(), &pristine);
        sim.apply(Command::ResetActiveNodes);
        assert_eq!(sim.active_mask(), &pristine);
    }

    #[test]
    fn brush_edits_redraw_at_cursor() {
        let mut sim = Simulation::new(&GridConfig::default()).unwrap();
        sim.apply(Command::MoveStimulus(Cell::new(20, 20)));
        let lit = |sim: &Simulation| sim.external_stimulus().iter().filter(|&&b| b > 0.0).count();
        assert_eq!(lit(&sim), 19);

        sim.apply(Command::ResizeBrush(-1));
        assert_eq!(lit(&sim), 7);

        sim.apply(Command::AdjustBrushBrightness(-40.0));
        let idx = sim.lattice().index(20, 20);
        assert_eq!(sim.external_stimulus()[idx], DEFAULT_BRIGHTNESS - 40.0);
        assert_eq!(lit(&sim), 7);
    }

    #[test]
    fn brush_off_grid_does_nothing() {
        let mut sim = Simulation::new(&GridConfig::default()).unwrap();
        sim.apply(Command::ApplyStimulus(Cell::new(-5, -5)));
        sim.apply(Command::ToggleNode(Cell::new(41, 3)));
        assert!(sim.external_stimulus().iter().all(|&b| b == 0.0));
        assert_eq!(sim.active_mask(), &ActiveMask::new(sim.lattice()));
    }
}
