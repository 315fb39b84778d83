//! Per-cell manufacturing spread.
//!
//! Phototransistor sensitivity and LED output vary from part to part. Each
//! table is drawn once from a seeded generator when the grid is built and is
//! never resampled.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Uniform};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariationConfig {
    pub sensitivity: bool,
    pub current: bool,
    /// Multipliers are uniform in [1 - spread, 1 + spread].
    pub spread: f64,
    pub seed: u64,
}

impl Default for VariationConfig {
    fn default() -> Self {
        Self {
            sensitivity: false,
            current: false,
            spread: 0.1,
            seed: 0x11A7_5EED,
        }
    }
}

impl VariationConfig {
    pub fn enabled(&self) -> bool {
        self.sensitivity || self.current
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Variation {
    sensitivity: Option<Vec<f64>>,
    current: Option<Vec<f64>>,
}

impl Variation {
    /// No spread: every multiplier is exactly 1.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn sample(len: usize, config: &VariationConfig) -> Result<Self, ConfigError> {
        if !config.enabled() {
            return Ok(Self::none());
        }
        if !(0.0..1.0).contains(&config.spread) {
            return Err(ConfigError::InvalidVariation(config.spread));
        }

        let dist = Uniform::new_inclusive(1.0 - config.spread, 1.0 + config.spread)
            .map_err(|e| ConfigError::Variation(e.to_string()))?;
        let mut rng = StdRng::seed_from_u64(config.seed);

        // Always draw both tables so enabling one never shifts the other.
        let sensitivity: Vec<f64> = (0..len).map(|_| dist.sample(&mut rng)).collect();
        let current: Vec<f64> = (0..len).map(|_| dist.sample(&mut rng)).collect();

        log::debug!(
            "sampled variation tables for {} cells (spread {}, seed {:#x})",
            len,
            config.spread,
            config.seed
        );

        Ok(Self {
            sensitivity: config.sensitivity.then_some(sensitivity),
            current: config.current.then_some(current),
        })
    }

    #[inline]
    pub fn sensitivity(&self, idx: usize) -> f64 {
        self.sensitivity.as_ref().map_or(1.0, |t| t[idx])
    }

    #[inline]
    pub fn current(&self, idx: usize) -> f64 {
        self.current.as_ref().map_or(1.0, |t| t[idx])
    }

    pub fn sensitivity_table(&self) -> Option<&[f64]> {
        self.sensitivity.as_deref()
    }

    pub fn current_table(&self) -> Option<&[f64]> {
        self.current.as_deref()
    }
}
