use image::{ImageBuffer, Rgb, RgbImage};
use std::path::Path;

use crate::lattice::DotLayout;
use crate::palette;
use crate::sim::Simulation;

pub const BACKGROUND: [u8; 3] = [8, 8, 12];

/// Rasterize the current LED field, one filled dot per cell, with a margin
/// of one dot spacing around the grid.
pub fn render_frame(sim: &Simulation, layout: &DotLayout) -> RgbImage {
    let margin = layout.spacing();
    let (cw, ch) = layout.canvas_size();
    let img_w = (cw + 2.0 * margin).ceil() as u32;
    let img_h = (ch + 2.0 * margin).ceil() as u32;
    let mut output = ImageBuffer::from_pixel(img_w, img_h, Rgb(BACKGROUND));

    let lattice = sim.lattice();
    let mask = sim.active_mask();
    let stimulus = sim.external_stimulus();
    let current = sim.led_current();
    let r = layout.dot_radius();

    for y in 0..lattice.height() {
        for x in 0..lattice.width() {
            let idx = lattice.index(x, y);
            let color = palette::cell_color(mask.is_active(idx), stimulus[idx], current[idx]);
            let (px, py) = layout.dot_position(x, y);
            fill_circle(&mut output, px + margin, py + margin, r, Rgb(color));
        }
    }
    output
}

fn fill_circle(img: &mut RgbImage, cx: f32, cy: f32, r: f32, color: Rgb<u8>) {
    let (w, h) = img.dimensions();
    let x0 = (cx - r).floor().max(0.0) as u32;
    let y0 = (cy - r).floor().max(0.0) as u32;
    let x1 = ((cx + r).ceil() as u32).min(w.saturating_sub(1));
    let y1 = ((cy + r).ceil() as u32).min(h.saturating_sub(1));
    let r2 = r * r;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= r2 {
                img.put_pixel(x, y, color);
            }
        }
    }
}

pub fn save_image(img: &RgbImage, path: &Path) -> Result<(), String> {
    img.save(path).map_err(|e| format!("Failed to save image: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{Cell, Topology};

    #[test]
    fn frame_covers_the_canvas() {
        let sim = Simulation::initialize(9, 7, Topology::Square, 1).unwrap();
        let layout = DotLayout::new(sim.lattice());
        let img = render_frame(&sim, &layout);
        let (cw, ch) = layout.canvas_size();
        assert!(img.width() as f32 >= cw + 2.0 * layout.spacing());
        assert!(img.height() as f32 >= ch + 2.0 * layout.spacing());
    }

    #[test]
    fn stimulated_dot_is_drawn_red() {
        let mut sim = Simulation::initialize(11, 11, Topology::Hex, 1).unwrap();
        sim.apply_stimulus(Cell::new(5, 5));
        let layout = DotLayout::new(sim.lattice());
        let img = render_frame(&sim, &layout);
        let (px, py) = layout.dot_position(5, 5);
        let m = layout.spacing();
        let pixel = img.get_pixel((px + m) as u32, (py + m) as u32);
        assert_eq!(pixel.0, [140, 0, 0]);
        // gap between dots stays background
        assert_eq!(img.get_pixel(0, 0).0, BACKGROUND);
    }
}
