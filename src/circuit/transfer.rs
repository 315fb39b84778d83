//! Static device curves: FET-pair conductance and LED branch current.

use super::{RQI_BASE, V_N, V_P};

// Fit of the measured LED + current-limiting resistor branch.
pub const SLOPE: f64 = 0.174_214_85;
pub const V_Q_TH: f64 = 2.386_097_6;
pub const QA: f64 = 2.604_213;
pub const QB: f64 = -7.083_13;
pub const QC: f64 = 2.776_874;

/// LED current at drain voltage `v`: linear below `V_Q_TH`, quadratic fit
/// from the threshold up.
#[inline]
pub fn led_current(v: f64) -> f64 {
    if v >= V_Q_TH {
        QA * v * v + QB * v + QC
    } else {
        SLOPE * v
    }
}

/// Inverse resistance of the series FET pair at gate voltage `vg`.
///
/// Both FETs conduct only while `V_N < vg < V_P`; outside that window the
/// parabola goes negative and is clamped to zero.
#[inline]
pub fn conductance(vg: f64) -> f64 {
    ((vg - V_N) * (V_P - vg) * RQI_BASE).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{RQ_ON, VDD};

    #[test]
    fn linear_region_below_threshold() {
        assert_eq!(led_current(0.0), 0.0);
        assert!((led_current(1.0) - SLOPE).abs() < 1e-15);
        assert!((led_current(2.0) - 2.0 * SLOPE).abs() < 1e-15);
    }

    #[test]
    fn quadratic_region_from_threshold_up() {
        let at = led_current(V_Q_TH);
        let expected = QA * V_Q_TH * V_Q_TH + QB * V_Q_TH + QC;
        assert!((at - expected).abs() < 1e-12);
        let v = 4.0;
        assert!((led_current(v) - (QA * 16.0 + QB * 4.0 + QC)).abs() < 1e-12);
    }

    #[test]
    fn current_grows_across_the_drain_range() {
        let mut last = led_current(V_Q_TH);
        let mut v = V_Q_TH;
        while v <= VDD {
            let i = led_current(v);
            assert!(i >= last);
            last = i;
            v += 0.05;
        }
    }

    #[test]
    fn conductance_window() {
        assert_eq!(conductance(0.0), 0.0);
        assert_eq!(conductance(V_N), 0.0);
        assert_eq!(conductance(V_P), 0.0);
        assert_eq!(conductance(VDD), 0.0);
        let mid = (V_N + V_P) / 2.0;
        // peak is 1 / RQ_ON expressed in 1/kOhm
        assert!((conductance(mid) - 1000.0 / RQ_ON).abs() < 1e-9);
        assert!(conductance(mid - 0.5) < conductance(mid));
        assert!(conductance(mid - 0.5) > 0.0);
    }
}
