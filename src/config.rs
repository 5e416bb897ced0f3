use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::round::Difficulty;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundConfig {
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Patch size for rounds; clamped to 64..=256 at generation time.
    #[serde(default = "RoundConfig::default_size")]
    pub size: u32,
}

impl RoundConfig {
    fn default_size() -> u32 {
        128
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            size: Self::default_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchConfig {
    /// Size used when a single-patch request omits one.
    #[serde(default = "PatchConfig::default_size")]
    pub size: u32,
}

impl PatchConfig {
    fn default_size() -> u32 {
        160
    }
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            size: Self::default_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "ExportConfig::default_out_dir")]
    pub out_dir: String,
}

impl ExportConfig {
    fn default_out_dir() -> String {
        "output".to_string()
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            out_dir: Self::default_out_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub round: RoundConfig,
    #[serde(default)]
    pub patch: PatchConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl AppConfig {
    /// Comment out every key so the written file documents defaults without
    /// pinning them.
    fn commented_defaults(text: &str) -> String {
        let mut commented = String::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || (trimmed.starts_with('[') && trimmed.ends_with(']')) {
                commented.push_str(line);
            } else {
                commented.push_str("# ");
                commented.push_str(line);
            }
            commented.push('\n');
        }
        commented
    }

    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        warn!("Failed to parse config {path}: {err}. Using defaults.");
                    }
                },
                Err(err) => {
                    warn!("Failed to read config {path}: {err}. Using defaults.");
                }
            }
            return Self::default();
        }

        // File does not exist: write defaults and return them.
        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                if let Err(err) = fs::write(path_obj, Self::commented_defaults(&text)) {
                    warn!("Failed to write default config to {path}: {err}");
                }
            }
            Err(err) => warn!("Failed to serialize default config: {err}; continuing with defaults"),
        }
        default_cfg
    }
}
