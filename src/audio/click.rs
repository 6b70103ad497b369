//! Metronome click synthesis.
//!
//! A click is a short burst of white noise whose gain ramps exponentially
//! from [`CLICK_START_GAIN`] down to [`CLICK_END_GAIN`] over
//! [`CLICK_DURATION_SECS`]. Noise comes from a seeded `ChaCha8Rng`, so the
//! same seed always yields the same click.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub const CLICK_DURATION_SECS: f64 = 0.02;
pub const CLICK_START_GAIN: f64 = 0.3;
pub const CLICK_END_GAIN: f64 = 0.01;

/// Gain envelope at normalized time `norm` in 0.0..=1.0.
pub fn click_gain(norm: f64) -> f64 {
    CLICK_START_GAIN * (CLICK_END_GAIN / CLICK_START_GAIN).powf(norm.clamp(0.0, 1.0))
}

/// Generate one mono click at `sample_rate`.
pub fn generate_click(sample_rate: u32, seed: u64) -> Vec<f32> {
    let num_samples = (sample_rate as f64 * CLICK_DURATION_SECS).round() as usize;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    (0..num_samples)
        .map(|i| {
            let norm = i as f64 / num_samples as f64;
            let noise: f64 = rng.gen_range(-1.0..1.0);
            (noise * click_gain(norm)) as f32
        })
        .collect()
}

/// Duplicate a mono buffer across `channels` interleaved channels.
pub fn interleave(mono: &[f32], channels: u16) -> Vec<f32> {
    let channels = channels.max(1) as usize;
    mono.iter()
        .flat_map(|&s| std::iter::repeat(s).take(channels))
        .collect()
}
