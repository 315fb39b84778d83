//! Neighbor-brightness kernels.
//!
//! A kernel is compiled once into a list of taps; the step engine then sums
//! `weight * led_current[index + stride]` over the taps for each cell.

use super::{DistanceWeights, Lattice, Topology};
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrightnessKernel {
    /// Three LEDs at 120°. A fixed offset set rather than a cut of the
    /// radial scheme; it gives the liveliest patterns on hex grids.
    Hex3,
    /// All six adjacent LEDs of a hex cell.
    Hex6,
    /// The four edge-adjacent LEDs of a square cell.
    Square4,
    /// Inverse-square weighting out to the sensing range.
    Radial,
}

impl BrightnessKernel {
    pub const ALL: &[BrightnessKernel] = &[
        BrightnessKernel::Hex3,
        BrightnessKernel::Hex6,
        BrightnessKernel::Square4,
        BrightnessKernel::Radial,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BrightnessKernel::Hex3 => "B_3",
            BrightnessKernel::Hex6 => "B_6",
            BrightnessKernel::Square4 => "B_4",
            BrightnessKernel::Radial => "radial",
        }
    }

    pub fn supports(self, topology: Topology) -> bool {
        match self {
            BrightnessKernel::Hex3 | BrightnessKernel::Hex6 => topology == Topology::Hex,
            BrightnessKernel::Square4 => topology == Topology::Square,
            BrightnessKernel::Radial => true,
        }
    }

    /// Fixed unit-weight offsets; `None` for the radial kernel.
    fn fixed_offsets(self) -> Option<&'static [(i32, i32)]> {
        match self {
            BrightnessKernel::Hex3 => Some(&[(1, 0), (0, 1), (-1, -1)]),
            // Listed in the radial enumeration order so PSR = 1 sums match bit for bit.
            BrightnessKernel::Hex6 => Some(&[(1, 0), (0, 1), (-1, -1), (1, 1), (-1, 0), (0, -1)]),
            BrightnessKernel::Square4 => Some(&[(1, 0), (0, 1), (-1, 0), (0, -1)]),
            BrightnessKernel::Radial => None,
        }
    }

    /// Resolve this kernel against a concrete grid.
    pub fn compile(
        self,
        lattice: &Lattice,
        weights: &DistanceWeights,
    ) -> Result<Vec<Tap>, ConfigError> {
        let topology = lattice.topology();
        if !self.supports(topology) {
            return Err(ConfigError::KernelMismatch {
                kernel: self,
                topology,
            });
        }

        let width = lattice.width();
        if let Some(offsets) = self.fixed_offsets() {
            return Ok(offsets
                .iter()
                .map(|&(dx, dy)| Tap::new(dx, dy, 1.0, width))
                .collect());
        }

        let psr = weights.psr() as i32;
        let mut taps = Vec::new();
        for i in 1..=psr {
            for j in 0..=psr {
                let weight = weights.get(i as usize, j as usize);
                if weight == 0.0 {
                    continue;
                }
                for (dx, dy) in topology.rotations(i, j) {
                    taps.push(Tap::new(dx, dy, weight, width));
                }
            }
        }
        Ok(taps)
    }
}

/// One neighbor contribution: lattice offset, weight and the matching
/// flat-array stride.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tap {
    pub dx: i32,
    pub dy: i32,
    pub weight: f64,
    pub stride: isize,
}

impl Tap {
    pub fn new(dx: i32, dy: i32, weight: f64, width: usize) -> Self {
        Self {
            dx,
            dy,
            weight,
            stride: dy as isize * width as isize + dx as isize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiled(kernel: BrightnessKernel, topology: Topology, psr: usize) -> Vec<Tap> {
        let lattice = Lattice::new(9, 9, topology, psr).unwrap();
        let weights = DistanceWeights::new(topology, psr);
        kernel.compile(&lattice, &weights).unwrap()
    }

    fn offsets(taps: &[Tap]) -> Vec<(i32, i32)> {
        taps.iter().map(|t| (t.dx, t.dy)).collect()
    }

    #[test]
    fn radial_psr1_matches_hex6() {
        let radial = compiled(BrightnessKernel::Radial, Topology::Hex, 1);
        let hex6 = compiled(BrightnessKernel::Hex6, Topology::Hex, 1);
        assert_eq!(radial, hex6);
    }

    #[test]
    fn radial_psr1_matches_square4() {
        let radial = compiled(BrightnessKernel::Radial, Topology::Square, 1);
        let square4 = compiled(BrightnessKernel::Square4, Topology::Square, 1);
        assert_eq!(radial, square4);
    }

    #[test]
    fn hex3_keeps_its_own_offsets() {
        let hex3 = compiled(BrightnessKernel::Hex3, Topology::Hex, 1);
        assert_eq!(offsets(&hex3), vec![(1, 0), (0, 1), (-1, -1)]);
        assert!(hex3.iter().all(|t| t.weight == 1.0));
        let hex6 = compiled(BrightnessKernel::Hex6, Topology::Hex, 1);
        assert!(offsets(&hex3).iter().all(|o| offsets(&hex6).contains(o)));
    }

    #[test]
    fn radial_hex_psr2_covers_two_rings() {
        let taps = compiled(BrightnessKernel::Radial, Topology::Hex, 2);
        assert_eq!(taps.len(), 18);
        let mut seen = offsets(&taps);
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 18);
        assert!(!seen.contains(&(0, 0)));
        let ring2 = taps.iter().filter(|t| (t.weight - 0.25).abs() < 1e-12).count();
        assert_eq!(ring2, 6);
    }

    #[test]
    fn radial_square_psr2_stays_inside_disc() {
        let taps = compiled(BrightnessKernel::Radial, Topology::Square, 2);
        // 4 at distance 1, 4 diagonals at √2, 4 at distance 2; no √5 or √8
        assert_eq!(taps.len(), 12);
        assert!(taps.iter().all(|t| t.dx * t.dx + t.dy * t.dy <= 4));
    }

    #[test]
    fn strides_follow_row_major_layout() {
        let taps = compiled(BrightnessKernel::Square4, Topology::Square, 1);
        let strides: Vec<isize> = taps.iter().map(|t| t.stride).collect();
        assert_eq!(strides, vec![1, 9, -1, -9]);
    }

    #[test]
    fn kernel_topology_mismatch_is_rejected() {
        let lattice = Lattice::new(9, 9, Topology::Square, 1).unwrap();
        let weights = DistanceWeights::new(Topology::Square, 1);
        assert_eq!(
            BrightnessKernel::Hex3.compile(&lattice, &weights),
            Err(ConfigError::KernelMismatch {
                kernel: BrightnessKernel::Hex3,
                topology: Topology::Square,
            })
        );
    }
}
