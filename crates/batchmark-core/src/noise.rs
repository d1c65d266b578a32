//! Synthetic grain.
//!
//! Every visible pixel receives one uniform offset, shared by its R, G and B
//! channels, so the grain is luminance-only. Randomness is injected through
//! [`NoiseSource`] so tests can pin the offsets.

use rand::Rng;

use crate::decode::Bitmap;

/// Supplies per-pixel noise offsets.
pub trait NoiseSource {
    /// Return an offset in `[-amplitude / 2, amplitude / 2]`.
    fn offset(&mut self, amplitude: f32) -> f32;
}

/// Uniform noise backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomNoise<R> {
    rng: R,
}

impl<R: Rng> RandomNoise<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomNoise<rand::rngs::ThreadRng> {
    /// Noise from the thread-local generator. Not reproducible across runs.
    pub fn thread_local() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> NoiseSource for RandomNoise<R> {
    fn offset(&mut self, amplitude: f32) -> f32 {
        if amplitude <= 0.0 {
            return 0.0;
        }
        let half = amplitude / 2.0;
        self.rng.gen_range(-half..=half)
    }
}

/// Always returns the same fraction of the amplitude. Deterministic grain
/// for previews and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedNoise {
    /// Fraction in `[-0.5, 0.5]`.
    pub fraction: f32,
}

impl FixedNoise {
    pub fn new(fraction: f32) -> Self {
        Self {
            fraction: fraction.clamp(-0.5, 0.5),
        }
    }
}

impl NoiseSource for FixedNoise {
    fn offset(&mut self, amplitude: f32) -> f32 {
        self.fraction * amplitude
    }
}

/// Add grain of the given amplitude (0..=100) to every pixel whose alpha is
/// non-zero. An amplitude of 0 leaves the bitmap byte identical.
pub fn apply_noise(bitmap: &mut Bitmap, amplitude: f32, source: &mut impl NoiseSource) {
    if amplitude.is_nan() || amplitude <= 0.0 {
        return;
    }
    let amplitude = amplitude.min(100.0);

    for chunk in bitmap.pixels.chunks_exact_mut(4) {
        if chunk[3] == 0 {
            continue;
        }
        let offset = source.offset(amplitude);
        for c in &mut chunk[0..3] {
            *c = (*c as f32 + offset).round().clamp(0.0, 255.0) as u8;
        }
    }
}
