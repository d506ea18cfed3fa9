// Audio mixer - the APU's non-linear output stage
//
// The 2A03 mixes its channels through two resistor ladders, giving the
// famous non-linear response:
//
// ```text
// pulse_out = 95.88 / (8128 / (pulse1 + pulse2) + 100)
// tnd_out   = 159.79 / (1 / (triangle/8227 + noise/12241 + dmc/22638) + 100)
// ```
//
// Both curves depend only on small integer sums (0-30 for the pulses,
// 3*triangle + 2*noise + dmc = 0-202 for the rest), so they are
// precomputed into the two canonical lookup tables at construction.

/// Size of the pulse lookup table: pulse1 + pulse2 in 0..=30
const PULSE_TABLE_LEN: usize = 31;

/// Size of the TND lookup table: 3*triangle + 2*noise + dmc in 0..=202
const TND_TABLE_LEN: usize = 203;

/// Non-linear channel mixer with precomputed lookup tables
pub struct Mixer {
    pulse_table: [f32; PULSE_TABLE_LEN],
    tnd_table: [f32; TND_TABLE_LEN],
}

impl Mixer {
    pub fn new() -> Self {
        let mut pulse_table = [0.0f32; PULSE_TABLE_LEN];
        for (n, entry) in pulse_table.iter_mut().enumerate().skip(1) {
            *entry = 95.52 / (8128.0 / n as f32 + 100.0);
        }

        let mut tnd_table = [0.0f32; TND_TABLE_LEN];
        for (n, entry) in tnd_table.iter_mut().enumerate().skip(1) {
            *entry = 163.67 / (24329.0 / n as f32 + 100.0);
        }

        Mixer {
            pulse_table,
            tnd_table,
        }
    }

    /// Mix the raw channel levels into one sample in [0.0, 1.0)
    ///
    /// Inputs are the channels' direct outputs: 0-15 for pulse,
    /// triangle and noise, 0-127 for DMC.
    pub fn mix(&self, pulse1: u8, pulse2: u8, triangle: u8, noise: u8, dmc: u8) -> f32 {
        let pulse = self.pulse_table[(pulse1 + pulse2) as usize];
        let tnd_index = 3 * triangle as usize + 2 * noise as usize + dmc as usize;
        let tnd = self.tnd_table[tnd_index];
        pulse + tnd
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_mixes_to_zero() {
        let mixer = Mixer::new();
        assert_eq!(mixer.mix(0, 0, 0, 0, 0), 0.0);
    }

    #[test]
    fn test_pulse_entry_matches_formula() {
        let mixer = Mixer::new();
        let mixed = mixer.mix(8, 8, 0, 0, 0);
        let expected = 95.52 / (8128.0 / 16.0 + 100.0);
        assert!((mixed - expected).abs() < 1e-6);
    }

    #[test]
    fn test_tnd_entry_matches_formula() {
        let mixer = Mixer::new();
        let mixed = mixer.mix(0, 0, 8, 8, 64);
        let n = (3 * 8 + 2 * 8 + 64) as f32;
        let expected = 163.67 / (24329.0 / n + 100.0);
        assert!((mixed - expected).abs() < 1e-6);
    }

    #[test]
    fn test_full_scale_stays_below_one() {
        let mixer = Mixer::new();
        let mixed = mixer.mix(15, 15, 15, 15, 127);
        assert!(mixed > 0.0 && mixed < 1.0);
    }

    #[test]
    fn test_monotonic_in_pulse_sum() {
        let mixer = Mixer::new();
        let mut previous = -1.0f32;
        for level in 0..=15u8 {
            let mixed = mixer.mix(level, level, 0, 0, 0);
            assert!(mixed > previous);
            previous = mixed;
        }
    }
}
