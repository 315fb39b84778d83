/// LED current → 8-bit intensity gain.
pub const CURRENT_GAIN: f64 = 7.0;
/// Fill for disabled nodes.
pub const INACTIVE: [u8; 3] = [24, 24, 32];

fn channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Dot color for one cell: external light in red, LED output in green and
/// blue. Disabled nodes are drawn flat.
pub fn cell_color(active: bool, stimulus: f64, current: f64) -> [u8; 3] {
    if !active {
        return INACTIVE;
    }
    let led = channel(current * CURRENT_GAIN);
    [channel(stimulus), led, led]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_active_cell_is_black() {
        assert_eq!(cell_color(true, 0.0, 0.0), [0, 0, 0]);
    }

    #[test]
    fn channels_saturate() {
        assert_eq!(cell_color(true, 400.0, 100.0), [255, 255, 255]);
        assert_eq!(cell_color(true, -3.0, -1.0), [0, 0, 0]);
    }

    #[test]
    fn stimulus_red_led_cyan() {
        assert_eq!(cell_color(true, 140.0, 10.0), [140, 70, 70]);
    }

    #[test]
    fn inactive_ignores_state() {
        assert_eq!(cell_color(false, 140.0, 30.0), INACTIVE);
    }
}
