//! The flashlight: a brush that shines external light onto a patch of
//! phototransistors, or toggles which cells take part.

use crate::circuit::ActiveMask;
use crate::lattice::{Cell, Lattice};

/// Largest brush radius, in cells.
pub const FLR_MAX: u32 = 18;
/// Brightest brush setting.
pub const FLB_MAX: f64 = 250.0;
pub const DEFAULT_RADIUS: u32 = 2;
pub const DEFAULT_BRIGHTNESS: f64 = 140.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flashlight {
    radius: u32,
    brightness: f64,
    cursor: Option<Cell>,
}

impl Default for Flashlight {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            brightness: DEFAULT_BRIGHTNESS,
            cursor: None,
        }
    }
}

impl Flashlight {
    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn brightness(&self) -> f64 {
        self.brightness
    }

    /// Where the brush was last moved to, if anywhere.
    pub fn cursor(&self) -> Option<Cell> {
        self.cursor
    }

    pub fn resize(&mut self, delta: i32) {
        self.radius = (self.radius as i64 + delta as i64).clamp(0, FLR_MAX as i64) as u32;
    }

    pub fn adjust_brightness(&mut self, delta: f64) {
        self.brightness = (self.brightness + delta).clamp(0.0, FLB_MAX);
    }

    /// Zero the stimulus under the brush at `cell`.
    pub fn clear(&self, lattice: &Lattice, stimulus: &mut [f64], cell: Cell) {
        for idx in lattice.footprint(cell, self.radius) {
            stimulus[idx] = 0.0;
        }
    }

    /// Shine the brush at `cell`.
    pub fn apply(&self, lattice: &Lattice, stimulus: &mut [f64], cell: Cell) {
        for idx in lattice.footprint(cell, self.radius) {
            stimulus[idx] = self.brightness;
        }
    }

    /// Flip every node under the brush at `cell`.
    pub fn toggle_active(&self, lattice: &Lattice, mask: &mut ActiveMask, cell: Cell) {
        for idx in lattice.footprint(cell, self.radius) {
            mask.toggle(idx);
        }
    }

    /// Lift the brush from its previous spot and shine it at `cell`.
    pub fn move_to(&mut self, lattice: &Lattice, stimulus: &mut [f64], cell: Cell) {
        if let Some(previous) = self.cursor {
            self.clear(lattice, stimulus, previous);
        }
        self.cursor = Some(cell);
        self.apply(lattice, stimulus, cell);
    }
}
