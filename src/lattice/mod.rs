//! Grid geometry: lattice shape, coordinates, padding and footprints.
//!
//! Cells live in a flat row-major array (`y * width + x`). A band of `psr`
//! cells around the edge is never simulated, so every kernel tap taken from
//! an active-region cell lands inside the grid without bounds checks.

pub mod kernel;
pub mod layout;
pub mod weights;

pub use kernel::{BrightnessKernel, Tap};
pub use layout::DotLayout;
pub use weights::DistanceWeights;

use std::str::FromStr;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Hex,
    Square,
}

impl Topology {
    pub const ALL: &[Topology] = &[Topology::Hex, Topology::Square];

    pub fn name(self) -> &'static str {
        match self {
            Topology::Hex => "hex",
            Topology::Square => "square",
        }
    }

    pub fn default_kernel(self) -> BrightnessKernel {
        match self {
            Topology::Hex => BrightnessKernel::Hex3,
            Topology::Square => BrightnessKernel::Square4,
        }
    }

    /// Squared Euclidean length of lattice offset (i, j).
    ///
    /// Hex offsets are axial: unit neighbors are (±1, 0), (0, ±1) and ±(1, 1).
    pub fn lattice_distance_sq(self, i: i32, j: i32) -> i32 {
        match self {
            Topology::Hex => i * i - i * j + j * j,
            Topology::Square => i * i + j * j,
        }
    }

    /// The symmetric images of a wedge offset: three 120° turns on the hex
    /// lattice, four 90° turns on the square one.
    pub fn rotations(self, i: i32, j: i32) -> Vec<(i32, i32)> {
        match self {
            Topology::Hex => vec![(i, j), (-j, i - j), (j - i, -i)],
            Topology::Square => vec![(i, j), (-j, i), (-i, -j), (j, -i)],
        }
    }

    /// Whether cell (x, y) starts out enabled on a `width`-wide grid.
    pub fn default_active(self, x: usize, y: usize, width: usize) -> bool {
        match self {
            Topology::Hex => {
                let half = (width as f64 - 1.0) / 2.0;
                let (x, y) = (x as f64, y as f64);
                x - y < half && y - x < half
            }
            Topology::Square => true,
        }
    }

    /// Whether offset (i, j) from the brush center lies inside a brush of
    /// radius `r`. Callers only pass offsets within [-r, r]².
    pub fn in_footprint(self, i: i32, j: i32, r: i32) -> bool {
        match self {
            Topology::Hex => (i - j).abs() <= r,
            Topology::Square => true,
        }
    }
}

impl FromStr for Topology {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hex" | "hexagonal" => Ok(Topology::Hex),
            "square" => Ok(Topology::Square),
            _ => Err(ConfigError::UnknownTopology(s.to_string())),
        }
    }
}

/// A grid coordinate. Signed so that pointer mapping can produce positions
/// outside the grid; those are filtered by [`Lattice::in_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Grid shape and size, validated once at initialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    topology: Topology,
    width: usize,
    height: usize,
    psr: usize,
}

impl Lattice {
    pub fn new(
        width: usize,
        height: usize,
        topology: Topology,
        psr: usize,
    ) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        if psr == 0 {
            return Err(ConfigError::ZeroSensingRange);
        }
        if width <= 2 * psr || height <= 2 * psr {
            return Err(ConfigError::GridTooSmall { width, height, psr });
        }
        Ok(Self {
            topology,
            width,
            height,
            psr,
        })
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Sensing range, also the width of the inactive padding band.
    pub fn psr(&self) -> usize {
        self.psr
    }

    /// Number of cells including padding.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn cell_index(&self, cell: Cell) -> Option<usize> {
        if self.in_bounds(cell.x, cell.y) {
            Some(self.index(cell.x as usize, cell.y as usize))
        } else {
            None
        }
    }

    pub fn in_active_region(&self, x: usize, y: usize) -> bool {
        (self.psr..self.width - self.psr).contains(&x)
            && (self.psr..self.height - self.psr).contains(&y)
    }

    /// Every simulated coordinate, column by column.
    pub fn active_region(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let ys = self.psr..self.height - self.psr;
        (self.psr..self.width - self.psr).flat_map(move |x| ys.clone().map(move |y| (x, y)))
    }

    /// Array indices covered by a brush of `radius` centered on `center`.
    ///
    /// Empty when the center itself is off the grid; cells of the footprint
    /// that fall off the edge are skipped.
    pub fn footprint(&self, center: Cell, radius: u32) -> impl Iterator<Item = usize> + '_ {
        let r = radius as i32;
        let valid = self.in_bounds(center.x, center.y);
        let topology = self.topology;
        (-r..=r)
            .flat_map(move |i| (-r..=r).map(move |j| (i, j)))
            .filter(move |&(i, j)| valid && topology.in_footprint(i, j, r))
            .filter_map(move |(i, j)| self.cell_index(center.offset(i, j)))
    }
}
