//! Difficulty levels and the jitter applied to distractors at each level.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Maximum absolute perturbation per field for one difficulty level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JitterProfile {
    pub orientation_deg: f64,
    pub cycles: f64,
    pub phase_deg: f64,
    pub sigma_ratio: f64,
    pub gamma: f64,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Case-insensitive; anything unrecognized is `Normal`.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Self::Easy,
            "hard" => Self::Hard,
            _ => Self::Normal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }

    pub fn jitter(self) -> JitterProfile {
        match self {
            Self::Easy => JitterProfile {
                orientation_deg: 25.0,
                cycles: 2.0,
                phase_deg: 90.0,
                sigma_ratio: 0.05,
                gamma: 0.25,
            },
            Self::Normal => JitterProfile {
                orientation_deg: 15.0,
                cycles: 1.2,
                phase_deg: 45.0,
                sigma_ratio: 0.03,
                gamma: 0.12,
            },
            Self::Hard => JitterProfile {
                orientation_deg: 8.0,
                cycles: 0.6,
                phase_deg: 25.0,
                sigma_ratio: 0.015,
                gamma: 0.07,
            },
        }
    }
}

impl FromStr for Difficulty {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
