//! Inverse-square distance weights for neighbor LEDs.
//!
//! `get(i, j)` is `1 / |(i, j)|²` in lattice units for offsets inside the
//! sensing disc of radius `psr`, and 0 for the origin and anything beyond.
//! Only the non-negative wedge is stored; kernels rotate it.

use super::Topology;

#[derive(Debug, Clone, PartialEq)]
pub struct DistanceWeights {
    psr: usize,
    table: Vec<f64>,
}

impl DistanceWeights {
    pub fn new(topology: Topology, psr: usize) -> Self {
        let side = psr + 1;
        let reach = (psr * psr) as i32;
        let mut table = vec![0.0; side * side];
        for i in 0..side {
            for j in 0..side {
                let d2 = topology.lattice_distance_sq(i as i32, j as i32);
                if d2 > 0 && d2 <= reach {
                    table[i * side + j] = 1.0 / d2 as f64;
                }
            }
        }
        Self { psr, table }
    }

    pub fn psr(&self) -> usize {
        self.psr
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        let side = self.psr + 1;
        if i >= side || j >= side {
            return 0.0;
        }
        self.table[i * side + j]
    }
}
