//! Screen placement of LED dots and the pointer → cell inverse.

use super::{Cell, Lattice, Topology};

/// Reference dot spacing in pixels.
pub const DOT_SPACING: f32 = 28.0;
/// Reference dot radius in pixels.
pub const DOT_RADIUS: f32 = 12.0;

const HEX_ROW_PITCH: f64 = 0.866_025_403_784_438_6; // √3 / 2

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotLayout {
    topology: Topology,
    width: usize,
    height: usize,
    spacing: f32,
    radius: f32,
}

impl DotLayout {
    pub fn new(lattice: &Lattice) -> Self {
        Self {
            topology: lattice.topology(),
            width: lattice.width(),
            height: lattice.height(),
            spacing: DOT_SPACING,
            radius: DOT_RADIUS,
        }
    }

    /// Same layout drawn at a different scale.
    pub fn scaled(self, spacing: f32) -> Self {
        Self {
            spacing,
            radius: spacing * DOT_RADIUS / DOT_SPACING,
            ..self
        }
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn dot_radius(&self) -> f32 {
        self.radius
    }

    /// Pixel size of the area the whole grid is drawn into.
    pub fn canvas_size(&self) -> (f32, f32) {
        let ds = self.spacing as f64;
        let (w, h) = (self.width as f64, self.height as f64);
        let (cw, ch) = match self.topology {
            Topology::Hex => ((w + h / 2.0) * ds, HEX_ROW_PITCH * (h + 1.0) * ds),
            Topology::Square => (w * ds, h * ds),
        };
        (cw as f32, ch as f32)
    }

    /// Center of the dot for cell (x, y). Hex rows shear left by half a
    /// dot per row and sit √3/2 apart.
    pub fn dot_position(&self, x: usize, y: usize) -> (f32, f32) {
        let ds = self.spacing as f64;
        let (x, y) = (x as f64, y as f64);
        let (px, py) = match self.topology {
            Topology::Hex => (
                (x - y / 2.0 + self.height as f64 / 2.0) * ds,
                HEX_ROW_PITCH * (y + 1.0) * ds,
            ),
            Topology::Square => (x * ds, y * ds),
        };
        (px as f32, py as f32)
    }

    /// The cell whose dot center is nearest to the pointer, row first.
    /// May lie off the grid; callers check bounds.
    pub fn cell_at(&self, px: f32, py: f32) -> Cell {
        let ds = self.spacing as f64;
        let (px, py) = (px as f64, py as f64);
        match self.topology {
            Topology::Hex => {
                let y = (py / (HEX_ROW_PITCH * ds) - 1.0).round();
                let x = (px / ds + y / 2.0 - self.height as f64 / 2.0).round();
                Cell::new(x as i32, y as i32)
            }
            Topology::Square => Cell::new((px / ds).round() as i32, (py / ds).round() as i32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(topology: Topology) -> DotLayout {
        DotLayout::new(&Lattice::new(41, 41, topology, 1).unwrap())
    }

    #[test]
    fn every_dot_maps_back_to_its_cell() {
        for &topology in Topology::ALL {
            let layout = layout(topology);
            for x in 0..41 {
                for y in 0..41 {
                    let (px, py) = layout.dot_position(x, y);
                    assert_eq!(
                        layout.cell_at(px, py),
                        Cell::new(x as i32, y as i32),
                        "{} dot ({x}, {y})",
                        topology.name()
                    );
                }
            }
        }
    }

    #[test]
    fn pointer_near_a_dot_snaps_to_it() {
        let layout = layout(Topology::Hex);
        let (px, py) = layout.dot_position(12, 30);
        let r = layout.dot_radius() * 0.9;
        assert_eq!(layout.cell_at(px + r, py), Cell::new(12, 30));
        assert_eq!(layout.cell_at(px, py - r), Cell::new(12, 30));
    }

    #[test]
    fn canvas_covers_every_dot() {
        for &topology in Topology::ALL {
            let layout = layout(topology);
            let (cw, ch) = layout.canvas_size();
            for x in 0..41 {
                for y in 0..41 {
                    let (px, py) = layout.dot_position(x, y);
                    assert!(px >= 0.0 && px <= cw, "{px} > {cw}");
                    assert!(py >= 0.0 && py <= ch, "{py} > {ch}");
                }
            }
        }
    }

    #[test]
    fn pointer_left_of_the_grid_is_off_grid() {
        let layout = layout(Topology::Square);
        let cell = layout.cell_at(-40.0, 10.0);
        assert_eq!(cell.x, -1);
    }

    #[test]
    fn scaled_layout_keeps_proportions() {
        let layout = layout(Topology::Square).scaled(14.0);
        assert_eq!(layout.dot_radius(), 6.0);
        assert_eq!(layout.dot_position(2, 3), (28.0, 42.0));
    }
}
