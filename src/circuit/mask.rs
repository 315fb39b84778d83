use crate::lattice::Lattice;

/// Which cells take part in the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveMask {
    width: usize,
    cells: Vec<bool>,
}

impl ActiveMask {
    /// The topology's default pattern.
    pub fn new(lattice: &Lattice) -> Self {
        let mut mask = Self {
            width: lattice.width(),
            cells: vec![false; lattice.len()],
        };
        mask.reset(lattice);
        mask
    }

    pub fn reset(&mut self, lattice: &Lattice) {
        let topology = lattice.topology();
        let width = lattice.width();
        for (idx, cell) in self.cells.iter_mut().enumerate() {
            *cell = topology.default_active(idx % width, idx / width, width);
        }
    }

    #[inline]
    pub fn is_active(&self, idx: usize) -> bool {
        self.cells[idx]
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x]
    }

    pub fn toggle(&mut self, idx: usize) {
        self.cells[idx] = !self.cells[idx];
    }

    pub fn set(&mut self, idx: usize, active: bool) {
        self.cells[idx] = active;
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }

    /// Active cells that are actually simulated (padding excluded).
    pub fn count_simulated(&self, lattice: &Lattice) -> usize {
        lattice
            .active_region()
            .filter(|&(x, y)| self.get(x, y))
            .count()
    }
}
