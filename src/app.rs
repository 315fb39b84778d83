use eframe::egui;
use web_time::Instant;

use game_of_light::command::Command;
use game_of_light::lattice::DotLayout;
use game_of_light::params::Parameter;
use game_of_light::sim::{GridPreset, Simulation};

use crate::led_display;

/// Key bindings, one command per press.
const KEY_MAP: &[(egui::Key, Command)] = &[
    (egui::Key::R, Command::PowerCycle),
    (egui::Key::T, Command::ResetActiveNodes),
    (egui::Key::F, Command::ResizeBrush(1)),
    (egui::Key::D, Command::ResizeBrush(-1)),
    (egui::Key::V, Command::AdjustBrushBrightness(10.0)),
    (egui::Key::C, Command::AdjustBrushBrightness(-10.0)),
    (egui::Key::W, adjust(Parameter::VRefLow, 1)),
    (egui::Key::S, adjust(Parameter::VRefLow, -1)),
    (egui::Key::Q, adjust(Parameter::VRefHigh, 1)),
    (egui::Key::A, adjust(Parameter::VRefHigh, -1)),
    (egui::Key::I, adjust(Parameter::BothStepScales, 1)),
    (egui::Key::K, adjust(Parameter::BothStepScales, -1)),
    (egui::Key::O, adjust(Parameter::DrainStepScale, 1)),
    (egui::Key::L, adjust(Parameter::DrainStepScale, -1)),
    (egui::Key::U, adjust(Parameter::Sensitivity, 1)),
    (egui::Key::J, adjust(Parameter::Sensitivity, -1)),
];

const fn adjust(parameter: Parameter, steps: i32) -> Command {
    Command::AdjustParameter { parameter, steps }
}

pub struct LightApp {
    sim: Simulation,
    preset: GridPreset,
    running: bool,
    steps_per_frame: usize,
    rate_window_start: Instant,
    steps_in_window: u64,
    step_rate: f64,
    status: String,
}

impl LightApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, sim: Simulation) -> Self {
        Self {
            sim,
            preset: GridPreset::HexB3,
            running: true,
            steps_per_frame: 1,
            rate_window_start: Instant::now(),
            steps_in_window: 0,
            step_rate: 0.0,
            status: String::new(),
        }
    }

    fn load_preset(&mut self, preset: GridPreset) {
        match Simulation::new(&preset.config()) {
            Ok(sim) => {
                self.sim = sim;
                self.status = format!("Loaded {}", preset.name());
            }
            Err(e) => {
                log::warn!("preset {} rejected: {e}", preset.name());
                self.status = format!("Error: {e}");
            }
        }
    }

    fn save_frame(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name("light.png")
            .save_file()
        {
            let layout = DotLayout::new(self.sim.lattice());
            let img = game_of_light::image_io::render_frame(&self.sim, &layout);
            match game_of_light::image_io::save_image(&img, &path) {
                Ok(()) => self.status = format!("Saved {}", path.display()),
                Err(e) => {
                    log::warn!("{e}");
                    self.status = e;
                }
            }
        }
    }

    fn read_keys(&mut self, ctx: &egui::Context) -> Vec<Command> {
        if ctx.wants_keyboard_input() {
            return Vec::new();
        }
        ctx.input(|i| {
            if i.key_pressed(egui::Key::Space) {
                self.running = !self.running;
            }
            let mut commands: Vec<Command> = KEY_MAP
                .iter()
                .filter(|(key, _)| i.key_pressed(*key))
                .map(|&(_, command)| command)
                .collect();
            if !self.running && i.key_pressed(egui::Key::N) {
                commands.push(Command::StepOnce);
            }
            commands
        })
    }

    fn measure_rate(&mut self, steps: u64) {
        self.steps_in_window += steps;
        let elapsed = self.rate_window_start.elapsed().as_secs_f64();
        if elapsed >= 0.5 {
            self.step_rate = self.steps_in_window as f64 / elapsed;
            self.steps_in_window = 0;
            self.rate_window_start = Instant::now();
        }
    }
}

impl eframe::App for LightApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut commands = self.read_keys(ctx);

        // Top panel: preset selection and run control
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Preset:");
                let mut selected = self.preset;
                egui::ComboBox::from_id_salt("grid_preset")
                    .selected_text(self.preset.name())
                    .show_ui(ui, |ui| {
                        for &preset in GridPreset::ALL {
                            ui.selectable_value(&mut selected, preset, preset.name());
                        }
                    });
                if selected != self.preset {
                    self.preset = selected;
                    self.load_preset(selected);
                }

                ui.separator();
                let run_label = if self.running { "Pause" } else { "Run" };
                if ui.button(run_label).clicked() {
                    self.running = !self.running;
                }
                if ui
                    .add_enabled(!self.running, egui::Button::new("Step"))
                    .clicked()
                {
                    commands.push(Command::StepOnce);
                }
                if ui.button("Power Cycle").clicked() {
                    commands.push(Command::PowerCycle);
                }
                if ui.button("Reset Nodes").clicked() {
                    commands.push(Command::ResetActiveNodes);
                }
                if ui.button("Save Frame").clicked() {
                    self.save_frame();
                }

                ui.separator();
                ui.label(format!("tick {} | {:.0} steps/s", self.sim.tick(), self.step_rate));
                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(&self.status);
                }
            });
        });

        // Left panel: HUD
        egui::SidePanel::left("hud")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui_circuit(ui, &self.sim, &mut commands);
                    ui_flashlight(ui, &self.sim, &mut commands);
                    ui_grid(ui, &self.sim, &mut self.steps_per_frame);
                });
            });

        let mut events = led_display::GridEvents::default();
        egui::CentralPanel::default().show(ctx, |ui| {
            events = led_display::draw_grid(ui, &self.sim);
        });

        if let Some(cell) = events.hovered {
            if self.sim.flashlight().cursor() != Some(cell) {
                commands.push(Command::MoveStimulus(cell));
            }
        }
        if let Some(cell) = events.clicked {
            commands.push(Command::ToggleNode(cell));
        }

        let ticks_before = self.sim.tick();
        for command in commands {
            self.sim.apply(command);
        }
        if self.running {
            self.sim.run(self.steps_per_frame);
            ctx.request_repaint();
        }
        self.measure_rate(self.sim.tick() - ticks_before);
    }
}

// --- HUD Section Builders ---

fn param_row(ui: &mut egui::Ui, sim: &Simulation, parameter: Parameter, commands: &mut Vec<Command>) {
    ui.horizontal(|ui| {
        if ui.small_button("-").clicked() {
            commands.push(adjust(parameter, -1));
        }
        if ui.small_button("+").clicked() {
            commands.push(adjust(parameter, 1));
        }
        let value = sim.params().value(parameter);
        match parameter {
            Parameter::GateStepScale | Parameter::DrainStepScale | Parameter::BothStepScales => {
                ui.label(format!("{}: {:.3e}", parameter.name(), value))
            }
            _ => ui.label(format!("{}: {:.3}", parameter.name(), value)),
        };
    });
}

fn ui_circuit(ui: &mut egui::Ui, sim: &Simulation, commands: &mut Vec<Command>) {
    egui::CollapsingHeader::new("Circuit")
        .default_open(true)
        .show(ui, |ui| {
            for &parameter in Parameter::ALL {
                if parameter == Parameter::BothStepScales {
                    continue;
                }
                param_row(ui, sim, parameter, commands);
            }
            ui.label("U/J sens, W/S low, Q/A high, I/K both steps, O/L Vd step");
        });
}

fn ui_flashlight(ui: &mut egui::Ui, sim: &Simulation, commands: &mut Vec<Command>) {
    egui::CollapsingHeader::new("Flashlight")
        .default_open(true)
        .show(ui, |ui| {
            let light = sim.flashlight();
            ui.horizontal(|ui| {
                if ui.small_button("-").clicked() {
                    commands.push(Command::ResizeBrush(-1));
                }
                if ui.small_button("+").clicked() {
                    commands.push(Command::ResizeBrush(1));
                }
                ui.label(format!("Radius: {}", light.radius()));
            });
            ui.horizontal(|ui| {
                if ui.small_button("-").clicked() {
                    commands.push(Command::AdjustBrushBrightness(-10.0));
                }
                if ui.small_button("+").clicked() {
                    commands.push(Command::AdjustBrushBrightness(10.0));
                }
                ui.label(format!("Brightness: {:.0}", light.brightness()));
            });
            ui.label("F/D radius, V/C brightness, click toggles nodes");
        });
}

fn ui_grid(ui: &mut egui::Ui, sim: &Simulation, steps_per_frame: &mut usize) {
    egui::CollapsingHeader::new("Grid")
        .default_open(true)
        .show(ui, |ui| {
            let lattice = sim.lattice();
            ui.label(format!(
                "{}x{} {} | kernel {} | PSR {}",
                lattice.width(),
                lattice.height(),
                lattice.topology().name(),
                sim.kernel().name(),
                lattice.psr()
            ));
            let stats = sim.stats();
            ui.label(format!("Lit: {} / {}", stats.lit_cells, stats.active_cells));
            ui.label(format!("Mean iD: {:.2}", stats.mean_current));
            ui.label(format!("Peak iD: {:.2}", stats.peak_current));
            ui.label(format!("Mean Vg: {:.2} V", stats.mean_gate_voltage));
            ui.add(egui::Slider::new(steps_per_frame, 1..=64).text("Steps / frame"));
            ui.label("Space pause, N step, R power cycle, T reset nodes");
        });
}
