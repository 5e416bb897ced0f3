//! Stimulus parameters for a single Gabor patch and the boundary that builds
//! them from untrusted text (query strings, CLI flags).
//!
//! External keys: `size, freq, theta, phase, sigma, gamma, contrast, bg, mode, normalize`.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Patch side length accepted by the single-patch path.
pub const SIZE_RANGE: RangeInclusive<u32> = 64..=512;
/// Carrier cycles across the image width.
pub const CYCLES_RANGE: RangeInclusive<f64> = 0.2..=32.0;
pub const ORIENTATION_RANGE: RangeInclusive<f64> = 0.0..=180.0;
pub const PHASE_RANGE: RangeInclusive<f64> = 0.0..=360.0;
/// Envelope sigma as a fraction of the patch diagonal.
pub const SIGMA_RATIO_RANGE: RangeInclusive<f64> = 0.02..=0.9;
pub const GAMMA_RANGE: RangeInclusive<f64> = 0.1..=3.0;
pub const CONTRAST_RANGE: RangeInclusive<f64> = 0.0..=1.0;

#[inline]
pub(crate) fn clamp_to(v: f64, range: &RangeInclusive<f64>) -> f64 {
    v.clamp(*range.start(), *range.end())
}

/// Sinusoid used as the carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Carrier {
    #[default]
    Cos,
    Sin,
}

impl Carrier {
    /// Case-insensitive `cos`/`sin`; an empty string means `cos`.
    pub fn parse(raw: &str) -> Result<Self> {
        let mode = raw.trim().to_ascii_lowercase();
        match mode.as_str() {
            "" | "cos" => Ok(Self::Cos),
            "sin" => Ok(Self::Sin),
            _ => Err(Error::InvalidMode(raw.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cos => "cos",
            Self::Sin => "sin",
        }
    }
}

/// One Gabor patch. Immutable value; the `with_*` methods return a modified copy.
///
/// The renderer assumes every field is finite and inside its domain. Text input
/// goes through [`PatchQuery::resolve`], programmatic input through
/// [`StimulusParams::clamp_to_domain`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StimulusParams {
    /// Side length in pixels (square patch).
    pub size: u32,
    #[serde(rename = "freq")]
    pub cycles_per_image: f64,
    #[serde(rename = "theta")]
    pub orientation_deg: f64,
    #[serde(rename = "phase")]
    pub phase_deg: f64,
    #[serde(rename = "sigma")]
    pub sigma_ratio: f64,
    /// Envelope aspect ratio; values above 1 compress the envelope along y'.
    pub gamma: f64,
    pub contrast: f64,
    #[serde(rename = "bg")]
    pub background_level: u8,
    #[serde(rename = "mode")]
    pub carrier: Carrier,
    #[serde(with = "flag_as_int")]
    pub normalize: bool,
}

impl Default for StimulusParams {
    fn default() -> Self {
        Self {
            size: 128,
            cycles_per_image: 6.0,
            orientation_deg: 0.0,
            phase_deg: 0.0,
            sigma_ratio: 0.22,
            gamma: 1.0,
            contrast: 0.9,
            background_level: 127,
            carrier: Carrier::Cos,
            normalize: true,
        }
    }
}

impl StimulusParams {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn with_cycles(mut self, cycles_per_image: f64) -> Self {
        self.cycles_per_image = cycles_per_image;
        self
    }

    pub fn with_orientation(mut self, orientation_deg: f64) -> Self {
        self.orientation_deg = orientation_deg;
        self
    }

    pub fn with_phase(mut self, phase_deg: f64) -> Self {
        self.phase_deg = phase_deg;
        self
    }

    pub fn with_sigma_ratio(mut self, sigma_ratio: f64) -> Self {
        self.sigma_ratio = sigma_ratio;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_contrast(mut self, contrast: f64) -> Self {
        self.contrast = contrast;
        self
    }

    pub fn with_background(mut self, background_level: u8) -> Self {
        self.background_level = background_level;
        self
    }

    pub fn with_carrier(mut self, carrier: Carrier) -> Self {
        self.carrier = carrier;
        self
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    #[inline]
    pub fn use_sine(&self) -> bool {
        self.carrier == Carrier::Sin
    }

    /// Clamp every field into the single-patch domain. Non-finite floats take the
    /// lower bound of their range.
    pub fn clamp_to_domain(self) -> Self {
        let fix = |v: f64, range: &RangeInclusive<f64>| {
            if v.is_finite() {
                clamp_to(v, range)
            } else {
                *range.start()
            }
        };
        Self {
            size: self.size.clamp(*SIZE_RANGE.start(), *SIZE_RANGE.end()),
            cycles_per_image: fix(self.cycles_per_image, &CYCLES_RANGE),
            orientation_deg: fix(self.orientation_deg, &ORIENTATION_RANGE),
            phase_deg: fix(self.phase_deg, &PHASE_RANGE),
            sigma_ratio: fix(self.sigma_ratio, &SIGMA_RATIO_RANGE),
            gamma: fix(self.gamma, &GAMMA_RANGE),
            contrast: fix(self.contrast, &CONTRAST_RANGE),
            ..self
        }
    }
}

/// Serializes `normalize` as `0`/`1`.
mod flag_as_int {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(flag: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(u8::from(*flag))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(i64::deserialize(d)? != 0)
    }
}

/// Raw, unvalidated patch request: each field is the text given for its key,
/// `None` when the key was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchQuery {
    pub size: Option<String>,
    pub freq: Option<String>,
    pub theta: Option<String>,
    pub phase: Option<String>,
    pub sigma: Option<String>,
    pub gamma: Option<String>,
    pub contrast: Option<String>,
    pub bg: Option<String>,
    pub mode: Option<String>,
    pub normalize: Option<String>,
}

/// Parse a float; `absent` when the key is missing, `fallback` when the text is
/// not a finite number.
fn float_or(raw: Option<&str>, absent: f64, fallback: f64) -> f64 {
    match raw {
        None => absent,
        Some(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(fallback),
    }
}

fn int_or(raw: Option<&str>, absent: i64, fallback: i64) -> i64 {
    match raw {
        None => absent,
        Some(text) => text.trim().parse::<i64>().unwrap_or(fallback),
    }
}

impl PatchQuery {
    /// Collect known keys from `(key, value)` pairs; unknown keys are ignored and
    /// a repeated key keeps its first value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "size" => &mut query.size,
                "freq" => &mut query.freq,
                "theta" => &mut query.theta,
                "phase" => &mut query.phase,
                "sigma" => &mut query.sigma,
                "gamma" => &mut query.gamma,
                "contrast" => &mut query.contrast,
                "bg" => &mut query.bg,
                "mode" => &mut query.mode,
                "normalize" => &mut query.normalize,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }

    /// Turn the request into valid parameters. Unparsable numbers fall back to
    /// per-key defaults and everything is clamped into range; only an unknown
    /// carrier mode is rejected.
    pub fn resolve(&self) -> Result<StimulusParams> {
        let carrier = match self.mode.as_deref() {
            Some(mode) => Carrier::parse(mode)?,
            None => Carrier::Cos,
        };

        let size = match self.size.as_deref().map(str::trim) {
            None | Some("") => 160,
            Some(text) => text.parse::<i64>().unwrap_or(160),
        };
        let bg = int_or(self.bg.as_deref(), 127, 127).clamp(0, 255);

        let params = StimulusParams {
            size: size.clamp(*SIZE_RANGE.start() as i64, *SIZE_RANGE.end() as i64) as u32,
            cycles_per_image: float_or(self.freq.as_deref(), 6.0, 0.2),
            orientation_deg: float_or(self.theta.as_deref(), 0.0, 0.0),
            phase_deg: float_or(self.phase.as_deref(), 0.0, 0.0),
            sigma_ratio: float_or(self.sigma.as_deref(), 0.22, 0.02),
            gamma: float_or(self.gamma.as_deref(), 1.0, 1.0),
            contrast: float_or(self.contrast.as_deref(), 0.9, 0.9),
            background_level: bg as u8,
            carrier,
            normalize: int_or(self.normalize.as_deref(), 1, 1) != 0,
        };
        Ok(params.clamp_to_domain())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_resolves_to_live_defaults() {
        let p = PatchQuery::default().resolve().unwrap();
        assert_eq!(p, StimulusParams::new(160));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let q = PatchQuery::from_pairs([
            ("size", "4096"),
            ("freq", "100"),
            ("theta", "-5"),
            ("phase", "720"),
            ("sigma", "0.001"),
            ("gamma", "9"),
            ("contrast", "1.5"),
            ("bg", "300"),
        ]);
        let p = q.resolve().unwrap();
        assert_eq!(p.size, 512);
        assert_eq!(p.cycles_per_image, 32.0);
        assert_eq!(p.orientation_deg, 0.0);
        assert_eq!(p.phase_deg, 360.0);
        assert_eq!(p.sigma_ratio, 0.02);
        assert_eq!(p.gamma, 3.0);
        assert_eq!(p.contrast, 1.0);
        assert_eq!(p.background_level, 255);
    }

    #[test]
    fn unparsable_numbers_take_fallbacks() {
        let q = PatchQuery::from_pairs([
            ("size", "big"),
            ("freq", "abc"),
            ("sigma", "nan"),
            ("gamma", ""),
            ("bg", "1.5"),
            ("normalize", "yes"),
        ]);
        let p = q.resolve().unwrap();
        assert_eq!(p.size, 160);
        assert_eq!(p.cycles_per_image, 0.2);
        assert_eq!(p.sigma_ratio, 0.02);
        assert_eq!(p.gamma, 1.0);
        assert_eq!(p.background_level, 127);
        assert!(p.normalize);
    }

    #[test]
    fn mode_is_case_insensitive_and_validated() {
        let sin = PatchQuery::from_pairs([("mode", "SIN")]).resolve().unwrap();
        assert!(sin.use_sine());
        let empty = PatchQuery::from_pairs([("mode", "")]).resolve().unwrap();
        assert_eq!(empty.carrier, Carrier::Cos);
        let err = PatchQuery::from_pairs([("mode", "square")]).resolve();
        assert!(matches!(err, Err(Error::InvalidMode(m)) if m == "square"));
    }

    #[test]
    fn normalize_zero_disables_normalization() {
        let p = PatchQuery::from_pairs([("normalize", "0")]).resolve().unwrap();
        assert!(!p.normalize);
    }

    #[test]
    fn from_pairs_keeps_first_value_and_ignores_unknown_keys() {
        let q = PatchQuery::from_pairs([("freq", "3"), ("freq", "9"), ("color", "red")]);
        assert_eq!(q.freq.as_deref(), Some("3"));
        assert_eq!(q.resolve().unwrap().cycles_per_image, 3.0);
    }

    #[test]
    fn serializes_with_external_keys() {
        let p = StimulusParams::default().with_carrier(Carrier::Sin);
        let v = serde_json::to_value(p).unwrap();
        assert_eq!(v["freq"], 6.0);
        assert_eq!(v["theta"], 0.0);
        assert_eq!(v["sigma"], 0.22);
        assert_eq!(v["bg"], 127);
        assert_eq!(v["mode"], "sin");
        assert_eq!(v["normalize"], 1);

        let back: StimulusParams = serde_json::from_value(v).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn clamp_to_domain_replaces_non_finite_values() {
        let p = StimulusParams::new(8)
            .with_cycles(f64::NAN)
            .with_gamma(f64::INFINITY)
            .clamp_to_domain();
        assert_eq!(p.size, 64);
        assert_eq!(p.cycles_per_image, 0.2);
        assert_eq!(p.gamma, 0.1);
    }
}
