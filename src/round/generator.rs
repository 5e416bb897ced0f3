//! Round generation: one base stimulus placed at two random positions, and
//! fourteen jittered distractors everywhere else.

use std::ops::RangeInclusive;

use rand::Rng;
use tracing::debug;

use super::Round;
use super::difficulty::{Difficulty, JitterProfile};
use crate::core::stimulus::{
    CYCLES_RANGE, Carrier, GAMMA_RANGE, SIGMA_RATIO_RANGE, StimulusParams, clamp_to,
};

/// Items per round.
pub const ROUND_LEN: usize = 16;
/// Patch sizes accepted for round generation.
pub const ROUND_SIZE_RANGE: RangeInclusive<u32> = 64..=256;

const BACKGROUND_LEVEL: u8 = 127;

#[inline]
fn round_to(v: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (v * scale).round() / scale
}

#[inline]
fn wrap_phase(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can land on 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Draw the base stimulus. Displayed precision: angles 0.1 deg, cycles 0.01,
/// sigma/gamma/contrast 0.001.
pub fn sample_base<R: Rng + ?Sized>(rng: &mut R, size: u32) -> StimulusParams {
    let cycles_per_image = round_to(rng.random_range(4.0..10.0), 2);
    let orientation_deg = round_to(rng.random_range(0.0..180.0), 1);
    let phase_deg = wrap_phase(round_to(rng.random_range(0.0..360.0), 1));
    let sigma_ratio = round_to(rng.random_range(0.18..0.30), 3);
    let gamma = round_to(rng.random_range(0.8..1.2), 3);
    let contrast = round_to(rng.random_range(0.8..1.0), 3);

    StimulusParams {
        size,
        cycles_per_image,
        orientation_deg,
        phase_deg,
        sigma_ratio,
        gamma,
        contrast,
        background_level: BACKGROUND_LEVEL,
        carrier: Carrier::Cos,
        normalize: true,
    }
}

#[inline]
fn jitter<R: Rng + ?Sized>(rng: &mut R, amplitude: f64) -> f64 {
    rng.random_range(-amplitude..=amplitude)
}

/// Perturb `base` within `profile`. Orientation is not wrapped; phase wraps
/// into [0, 360); cycles, sigma and gamma are clamped to their global ranges.
/// Contrast, background, carrier, normalization and size are copied.
pub fn perturb<R: Rng + ?Sized>(
    rng: &mut R,
    base: &StimulusParams,
    profile: &JitterProfile,
) -> StimulusParams {
    let orientation_deg = round_to(base.orientation_deg + jitter(rng, profile.orientation_deg), 1);
    let cycles = clamp_to(base.cycles_per_image + jitter(rng, profile.cycles), &CYCLES_RANGE);
    let phase_deg = wrap_phase(round_to(base.phase_deg + jitter(rng, profile.phase_deg), 1));
    let sigma = clamp_to(base.sigma_ratio + jitter(rng, profile.sigma_ratio), &SIGMA_RATIO_RANGE);
    let gamma = clamp_to(base.gamma + jitter(rng, profile.gamma), &GAMMA_RANGE);

    StimulusParams {
        cycles_per_image: round_to(cycles, 2),
        orientation_deg,
        phase_deg,
        sigma_ratio: round_to(sigma, 3),
        gamma: round_to(gamma, 3),
        ..*base
    }
}

/// Two distinct positions in `0..ROUND_LEN`, uniformly, ascending.
pub fn pick_answer<R: Rng + ?Sized>(rng: &mut R) -> [usize; 2] {
    let first = rng.random_range(0..ROUND_LEN);
    let mut second = rng.random_range(0..ROUND_LEN - 1);
    if second >= first {
        second += 1;
    }
    [first.min(second), first.max(second)]
}

/// Generate one round. `size` is clamped into [`ROUND_SIZE_RANGE`].
///
/// The caller owns the random source; pass a seeded generator for reproducible
/// rounds and a separate generator per concurrent caller.
pub fn generate_round<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty, size: u32) -> Round {
    let size = size.clamp(*ROUND_SIZE_RANGE.start(), *ROUND_SIZE_RANGE.end());
    let base = sample_base(rng, size);
    let profile = difficulty.jitter();
    let answer = pick_answer(rng);

    let items = (0..ROUND_LEN)
        .map(|i| {
            if answer.contains(&i) {
                base
            } else {
                perturb(rng, &base, &profile)
            }
        })
        .collect();

    debug!(%difficulty, size, ?answer, "generated round");
    Round { items, answer }
}
