// Audio resampler - CPU-rate APU samples down to host audio rates
//
// The APU produces one mixed sample per CPU cycle (~1.79 MHz). Host
// audio wants 44.1/48 kHz. Conversion is zero-order hold: each output
// sample takes the most recent input sample at its position, which
// matches how the spec'd mixer behaves between host-rate sample points.

/// NTSC CPU clock rate in Hz, the APU's native sample rate
pub const CPU_CLOCK_HZ: f64 = 1_789_773.0;

/// Resample CPU-rate samples to `target_rate`, quantized to i16
///
/// Input samples are in [0.0, 1.0) straight from the mixer; output is
/// centered full-scale PCM.
pub fn resample_to_i16(samples: &[f32], source_rate: f64, target_rate: f64) -> Vec<i16> {
    if samples.is_empty() || target_rate <= 0.0 {
        return Vec::new();
    }

    let output_len = (samples.len() as f64 * target_rate / source_rate) as usize;
    let step = source_rate / target_rate;

    let mut output = Vec::with_capacity(output_len);
    for index in 0..output_len {
        let source_index = ((index as f64 * step) as usize).min(samples.len() - 1);
        let sample = samples[source_index].clamp(0.0, 1.0);
        output.push(((sample * 2.0 - 1.0) * i16::MAX as f32) as i16);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(resample_to_i16(&[], CPU_CLOCK_HZ, 44_100.0).is_empty());
    }

    #[test]
    fn test_output_length_follows_rate_ratio() {
        let samples = vec![0.5f32; 1_789_773 / 60];
        let output = resample_to_i16(&samples, CPU_CLOCK_HZ, 44_100.0);
        // One frame of samples -> roughly 735 output samples
        assert!((output.len() as i64 - 735).abs() <= 1);
    }

    #[test]
    fn test_hold_behavior() {
        // Two halves at different levels; a 4x downsample must see both
        let mut samples = vec![0.25f32; 100];
        samples.extend(vec![0.75f32; 100]);

        let output = resample_to_i16(&samples, 200.0, 4.0);
        assert_eq!(output.len(), 4);
        assert!(output[0] < 0);
        assert!(output[3] > 0);
    }

    #[test]
    fn test_full_scale_mapping() {
        let output = resample_to_i16(&[0.0, 1.0], 2.0, 2.0);
        assert_eq!(output[0], -i16::MAX);
        assert_eq!(output[1], i16::MAX);
    }
}
