//! Headless scenario harness.
//!
//! Runs every grid preset under a scripted flashlight, checks the circuit
//! invariants after each phase and writes a PNG frame per preset.
//!
//! Usage: cargo run --bin light_probe

use game_of_light::circuit::VDD;
use game_of_light::command::Command;
use game_of_light::lattice::{BrightnessKernel, Cell, DistanceWeights, DotLayout, Lattice, Topology};
use game_of_light::params::Parameter;
use game_of_light::sim::{GridPreset, Simulation};
use game_of_light::image_io;

use std::path::Path;

const WARMUP_TICKS: usize = 300;
const SETTLE_TICKS: usize = 300;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let output_dir = Path::new("probe_output");
    if let Err(e) = std::fs::create_dir_all(output_dir) {
        eprintln!("Failed to create {}: {e}", output_dir.display());
        std::process::exit(1);
    }

    println!("=== Game of Light Probe ===\n");

    let mut all_pass = true;

    all_pass &= test_kernel_equivalence();

    for &preset in GridPreset::ALL {
        all_pass &= test_preset(preset, output_dir);
    }

    all_pass &= test_power_cycle();

    println!("\n=== Results ===");
    if all_pass {
        println!("ALL CHECKS PASSED");
    } else {
        println!("SOME CHECKS FAILED - check output above");
        std::process::exit(1);
    }
    println!("\nFrames in: {}", output_dir.display());
}

fn print_result(name: &str, pass: bool, detail: &str) {
    let status = if pass { "PASS" } else { "FAIL" };
    println!("  [{}] {} - {}", status, name, detail);
}

/// Flashlight path: hold at the center, then sweep to an off-center spot
/// with a narrower, brighter beam, then switch the light off.
fn script(sim: &mut Simulation) {
    let (w, h) = (sim.lattice().width() as i32, sim.lattice().height() as i32);
    sim.apply(Command::MoveStimulus(Cell::new(w / 2, h / 2)));
    sim.run(WARMUP_TICKS);
    sim.apply(Command::ResizeBrush(-1));
    sim.apply(Command::AdjustBrushBrightness(60.0));
    sim.apply(Command::MoveStimulus(Cell::new(w / 3, h / 2)));
    sim.run(WARMUP_TICKS);
    if let Some(cell) = sim.flashlight().cursor() {
        sim.apply(Command::ClearStimulus(cell));
    }
    sim.run(SETTLE_TICKS);
}

fn clamps_hold(sim: &Simulation) -> (bool, String) {
    let lattice = sim.lattice();
    let v_ref_high = sim.params().v_ref_high();
    let mut worst_vg = f64::MIN;
    let mut worst_vd = f64::MIN;
    let mut min_rqi = f64::MAX;
    for (x, y) in lattice.active_region() {
        let idx = lattice.index(x, y);
        worst_vg = worst_vg.max(sim.gate_voltage()[idx]);
        worst_vd = worst_vd.max(sim.drain_voltage()[idx]);
        min_rqi = min_rqi.min(sim.conductance()[idx]);
    }
    let pass = worst_vg <= v_ref_high && worst_vd <= VDD && min_rqi >= 0.0;
    (
        pass,
        format!("max Vg={worst_vg:.3} (<= {v_ref_high}), max Vd={worst_vd:.3}, min rqi={min_rqi:.3}"),
    )
}

fn inactive_dark(sim: &Simulation) -> (bool, usize) {
    let lattice = sim.lattice();
    let mask = sim.active_mask();
    let mut inactive = 0;
    let mut dark = true;
    for (x, y) in lattice.active_region() {
        let idx = lattice.index(x, y);
        if mask.is_active(idx) {
            continue;
        }
        inactive += 1;
        dark &= sim.brightness()[idx] == 0.0
            && sim.gate_voltage()[idx] == 0.0
            && sim.conductance()[idx] == 0.0
            && sim.drain_voltage()[idx] == 0.0
            && sim.led_current()[idx] == 0.0;
    }
    (dark, inactive)
}

fn padding_untouched(sim: &Simulation) -> bool {
    let lattice = sim.lattice();
    (0..lattice.len()).all(|idx| {
        let (x, y) = (idx % lattice.width(), idx / lattice.width());
        lattice.in_active_region(x, y)
            || (sim.gate_voltage()[idx] == 0.0
                && sim.drain_voltage()[idx] == 0.0
                && sim.led_current()[idx] == 0.0)
    })
}

// === Checks ===

fn test_kernel_equivalence() -> bool {
    println!("Check: radial kernel at unit range");
    let mut all_pass = true;
    for (topology, fixed) in [
        (Topology::Hex, BrightnessKernel::Hex6),
        (Topology::Square, BrightnessKernel::Square4),
    ] {
        let pass = match Lattice::new(9, 9, topology, 1) {
            Ok(lattice) => {
                let weights = DistanceWeights::new(topology, 1);
                let radial = BrightnessKernel::Radial.compile(&lattice, &weights);
                let named = fixed.compile(&lattice, &weights);
                matches!((radial, named), (Ok(a), Ok(b)) if a == b)
            }
            Err(_) => false,
        };
        print_result(
            &format!("radial == {}", fixed.name()),
            pass,
            topology.name(),
        );
        all_pass &= pass;
    }
    all_pass
}

fn test_preset(preset: GridPreset, output_dir: &Path) -> bool {
    println!("\nCheck: preset {}", preset.name());
    let config = preset.config();

    let (mut a, mut b) = match (Simulation::new(&config), Simulation::new(&config)) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(e), _) | (_, Err(e)) => {
            print_result("build", false, &e.to_string());
            return false;
        }
    };

    // Knock a hole in the grid so the inactive checks have something to see.
    let hole = Cell::new(a.lattice().width() as i32 * 2 / 3, a.lattice().height() as i32 / 2);
    for sim in [&mut a, &mut b] {
        sim.apply(Command::ToggleNode(hole));
        script(sim);
    }

    let mut all_pass = true;

    let deterministic = a.state() == b.state();
    print_result("determinism", deterministic, &format!("{} ticks", a.tick()));
    all_pass &= deterministic;

    let (pass, detail) = clamps_hold(&a);
    print_result("clamps", pass, &detail);
    all_pass &= pass;

    let (pass, inactive) = inactive_dark(&a);
    print_result("inactive cells dark", pass, &format!("{inactive} inactive"));
    all_pass &= pass;

    let pass = padding_untouched(&a);
    print_result("padding untouched", pass, &format!("psr {}", a.lattice().psr()));
    all_pass &= pass;

    println!("  stats: {}", a.stats().summary());

    let layout = DotLayout::new(a.lattice());
    let img = image_io::render_frame(&a, &layout);
    let file = format!("{}.png", preset.name().to_lowercase().replace([' ', '+'], "_"));
    match image_io::save_image(&img, &output_dir.join(&file)) {
        Ok(()) => println!("  Saved: {file}"),
        Err(e) => {
            print_result("save frame", false, &e);
            all_pass = false;
        }
    }

    all_pass
}

fn test_power_cycle() -> bool {
    println!("\nCheck: power cycle");
    let mut sim = match Simulation::new(&GridPreset::HexB3.config()) {
        Ok(sim) => sim,
        Err(e) => {
            print_result("build", false, &e.to_string());
            return false;
        }
    };
    script(&mut sim);
    sim.apply(Command::AdjustParameter {
        parameter: Parameter::Sensitivity,
        steps: 3,
    });
    let mask = sim.active_mask().clone();
    let params = *sim.params();

    sim.apply(Command::PowerCycle);
    let once = sim.state().clone();
    sim.apply(Command::PowerCycle);

    let idempotent = sim.state() == &once;
    print_result("idempotent", idempotent, "second cycle is a no-op");

    let zeroed = sim.led_current().iter().all(|&i| i == 0.0)
        && sim.external_stimulus().iter().all(|&b| b == 0.0);
    print_result("zeroed", zeroed, "currents and stimulus");

    let kept = sim.active_mask() == &mask && sim.params() == &params;
    print_result("mask and params kept", kept, "");

    let lit = sim.stats().lit_cells;
    print_result("dark grid", lit == 0, &format!("{lit} lit cells"));

    idempotent && zeroed && kept && lit == 0
}
