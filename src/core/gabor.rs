//! Gabor patch renderer: sinusoidal carrier under an anisotropic Gaussian
//! envelope, mapped to 8-bit luminance around a background level.
//!
//! All arithmetic is f64; the grid origin sits at the continuous centre
//! `(size - 1) / 2`, so even sizes have no pixel exactly at the origin.

use std::f64::consts::PI;

use tracing::trace;

use super::stimulus::{Carrier, StimulusParams};

/// Peaks below this are treated as an all-zero signal and left unscaled.
pub const NORMALIZE_EPS: f64 = 1e-8;
/// Luminance swing for a unit signal.
pub const LUMA_SWING: f64 = 127.0;

/// Square 8-bit grayscale image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LumaImage {
    pub size: u32,
    pub pixels: Vec<u8>,
}

impl LumaImage {
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.pixels[y as usize * self.size as usize + x as usize]
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }
}

/// Unnormalized carrier x envelope, row-major, `size * size` samples.
pub fn raw_signal(params: &StimulusParams) -> Vec<f64> {
    let n = params.size as usize;
    let side = params.size as f64;
    let center = (side - 1.0) / 2.0;

    let (sin_t, cos_t) = params.orientation_deg.to_radians().sin_cos();
    let f_cpp = params.cycles_per_image / side;
    let phase = params.phase_deg.to_radians();
    let diag = (side * side + side * side).sqrt();
    let sigma = (params.sigma_ratio * diag).max(1.0);
    let two_sigma_sq = 2.0 * sigma * sigma;
    let gamma_sq = params.gamma * params.gamma;

    let mut out = Vec::with_capacity(n * n);
    for row in 0..n {
        let y = row as f64 - center;
        for col in 0..n {
            let x = col as f64 - center;
            // carrier-aligned frame
            let xp = x * cos_t + y * sin_t;
            let yp = -x * sin_t + y * cos_t;

            let envelope = (-(xp * xp + gamma_sq * yp * yp) / two_sigma_sq).exp();
            let arg = 2.0 * PI * f_cpp * xp + phase;
            let carrier = match params.carrier {
                Carrier::Cos => arg.cos(),
                Carrier::Sin => arg.sin(),
            };
            out.push(carrier * envelope);
        }
    }
    out
}

/// Scale `signal` so its peak magnitude is 1. Returns the peak found; a peak
/// below [`NORMALIZE_EPS`] leaves the signal untouched.
pub fn normalize_peak(signal: &mut [f64]) -> f64 {
    let peak = signal.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    if peak >= NORMALIZE_EPS {
        for v in signal.iter_mut() {
            *v /= peak;
        }
    }
    peak
}

#[inline]
fn to_luma(value: f64, contrast: f64, background: u8) -> u8 {
    // clip, then truncate like an 8-bit cast
    (background as f64 + LUMA_SWING * (contrast * value)).clamp(0.0, 255.0) as u8
}

/// Render one patch. Deterministic: identical parameters give identical pixels.
pub fn render(params: &StimulusParams) -> LumaImage {
    let mut signal = raw_signal(params);
    if params.normalize {
        let peak = normalize_peak(&mut signal);
        trace!(size = params.size, peak, "normalized gabor signal");
    }

    let pixels = signal
        .iter()
        .map(|&v| to_luma(v, params.contrast, params.background_level))
        .collect();

    LumaImage {
        size: params.size,
        pixels,
    }
}
