//! PCM sample-rate conversion.
//!
//! Whole-buffer linear interpolation over signed 16-bit mono samples. The
//! output length is `round(input_len * target / source)`, so audible
//! duration is preserved proportionally to within one sample of rounding.
//!
//! There is no error path: rate validation (positive, within the configured
//! maximum) happens in the orchestrator before this module is invoked.

/// Resample `input` from `source_rate` Hz to `target_rate` Hz.
///
/// Returns the input unchanged when the rates match or the input is empty.
#[must_use]
pub fn resample(input: &[i16], source_rate: u32, target_rate: u32) -> Vec<i16> {
    if source_rate == target_rate || input.is_empty() {
        return input.to_vec();
    }

    let ratio = f64::from(target_rate) / f64::from(source_rate);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let output_len = (input.len() as f64 * ratio).round() as usize;

    let inv_ratio = f64::from(source_rate) / f64::from(target_rate);
    let mut output = Vec::with_capacity(output_len);

    for i in 0..output_len {
        let src_pos = i as f64 * inv_ratio;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let idx = src_pos as usize;

        if idx + 1 >= input.len() {
            output.push(input[input.len() - 1]);
        } else {
            let frac = src_pos - idx as f64;
            let a = f64::from(input[idx]);
            let b = f64::from(input[idx + 1]);
            #[allow(clippy::cast_possible_truncation)]
            output.push((a + (b - a) * frac).round() as i16);
        }
    }

    output
}

/// Reinterpret raw little-endian bytes as i16 samples.
///
/// A trailing odd byte (malformed payload) is dropped.
#[must_use]
pub fn pcm_from_bytes(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

/// Encode i16 samples as raw little-endian bytes.
#[must_use]
pub fn pcm_to_bytes(samples: &[i16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_when_rates_match() {
        let input = vec![0_i16, 100, -100, 32_000];
        assert_eq!(resample(&input, 22_050, 22_050), input);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(resample(&[], 22_050, 16_000).is_empty());
    }

    #[test]
    fn downsample_length_preserves_duration() {
        // 22 050 Hz → 16 000 Hz over one second of audio.
        let input = vec![0_i16; 22_050];
        let output = resample(&input, 22_050, 16_000);
        let expected = (22_050_f64 * 16_000.0 / 22_050.0).round() as usize;
        let delta = output.len().abs_diff(expected);
        assert!(delta <= 1, "expected ~{expected} samples, got {}", output.len());
    }

    #[test]
    fn upsample_length_preserves_duration() {
        let input = vec![0_i16; 1_000];
        let output = resample(&input, 16_000, 48_000);
        let expected = (1_000_f64 * 48_000.0 / 16_000.0).round() as usize;
        let delta = output.len().abs_diff(expected);
        assert!(delta <= 1, "expected ~{expected} samples, got {}", output.len());
    }

    #[test]
    fn odd_buffer_lengths_round_correctly() {
        let input = vec![0_i16; 441];
        let output = resample(&input, 44_100, 16_000);
        let expected = (441_f64 * 16_000.0 / 44_100.0).round() as usize;
        assert!(output.len().abs_diff(expected) <= 1);
    }

    #[test]
    fn constant_signal_stays_constant() {
        let input = vec![1_234_i16; 2_000];
        let output = resample(&input, 22_050, 16_000);
        assert!(output.iter().all(|&s| s == 1_234));
    }

    #[test]
    fn interpolation_stays_within_input_range() {
        let input: Vec<i16> = (0..1_000).map(|i| ((i % 200) * 300 - 30_000) as i16).collect();
        let min = *input.iter().min().unwrap();
        let max = *input.iter().max().unwrap();
        let output = resample(&input, 48_000, 16_000);
        assert!(output.iter().all(|&s| s >= min && s <= max));
    }

    #[test]
    fn byte_round_trip() {
        let samples = vec![0_i16, -1, 1, i16::MIN, i16::MAX];
        assert_eq!(pcm_from_bytes(&pcm_to_bytes(&samples)), samples);
    }

    #[test]
    fn trailing_odd_byte_is_dropped() {
        assert_eq!(pcm_from_bytes(&[0x34, 0x12, 0xff]), vec![0x1234_i16]);
    }
}
