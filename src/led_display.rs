use eframe::egui;

use game_of_light::image_io::BACKGROUND;
use game_of_light::lattice::{Cell, DotLayout};
use game_of_light::palette;
use game_of_light::sim::Simulation;

/// Pointer activity over the LED grid during one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridEvents {
    pub hovered: Option<Cell>,
    pub clicked: Option<Cell>,
}

const BRUSH_RING: egui::Color32 = egui::Color32::from_rgb(255, 120, 60);

/// Draw every LED as a dot, scaled to fit the available area, and report
/// which cell the pointer is over.
pub fn draw_grid(ui: &mut egui::Ui, sim: &Simulation) -> GridEvents {
    let available = ui.available_size();
    let lattice = sim.lattice();

    // Fit the canvas plus a one-dot margin on each side.
    let (unit_w, unit_h) = DotLayout::new(lattice).scaled(1.0).canvas_size();
    let spacing = f32::min(available.x / (unit_w + 2.0), available.y / (unit_h + 2.0)).max(2.0);
    let layout = DotLayout::new(lattice).scaled(spacing);
    let (cw, ch) = layout.canvas_size();

    let (response, painter) = ui.allocate_painter(
        egui::vec2(cw + 2.0 * spacing, ch + 2.0 * spacing),
        egui::Sense::click(),
    );
    let origin = response.rect.min + egui::vec2(spacing, spacing);

    let [r, g, b] = BACKGROUND;
    painter.rect_filled(response.rect, 4.0, egui::Color32::from_rgb(r, g, b));

    let mask = sim.active_mask();
    let stimulus = sim.external_stimulus();
    let current = sim.led_current();
    for y in 0..lattice.height() {
        for x in 0..lattice.width() {
            let idx = lattice.index(x, y);
            let [r, g, b] = palette::cell_color(mask.is_active(idx), stimulus[idx], current[idx]);
            let (px, py) = layout.dot_position(x, y);
            painter.circle_filled(
                origin + egui::vec2(px, py),
                layout.dot_radius(),
                egui::Color32::from_rgb(r, g, b),
            );
        }
    }

    let hovered = response.hover_pos().and_then(|pos| {
        let rel = pos - origin;
        let cell = layout.cell_at(rel.x, rel.y);
        lattice.in_bounds(cell.x, cell.y).then_some(cell)
    });

    if let Some(cell) = hovered {
        let (px, py) = layout.dot_position(cell.x as usize, cell.y as usize);
        let radius = (sim.flashlight().radius() as f32 + 0.5) * spacing;
        painter.circle_stroke(
            origin + egui::vec2(px, py),
            radius,
            egui::Stroke::new(1.0, BRUSH_RING.gamma_multiply(0.6)),
        );
    }

    GridEvents {
        hovered,
        clicked: if response.clicked() { hovered } else { None },
    }
}
