use clap::{Parser, Subcommand};

use gaborgrid::core::PatchQuery;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path to config TOML
    #[arg(long, default_value = "config.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate one round and write 16 PNGs plus meta.json
    Round(RoundArgs),
    /// Render a single patch to a PNG file
    Patch(PatchArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct RoundArgs {
    /// easy, normal or hard (anything else means normal; overrides config)
    #[arg(long)]
    pub difficulty: Option<String>,

    /// Patch size, clamped to 64..=256 (overrides config)
    #[arg(long)]
    pub size: Option<u32>,

    /// Output directory (overrides config)
    #[arg(long)]
    pub outdir: Option<String>,

    /// RNG seed; drawn from entropy when absent
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Patch flags are taken as text and resolved like query parameters.
#[derive(clap::Args, Debug, Clone)]
pub struct PatchArgs {
    /// Output PNG path
    #[arg(long)]
    pub out: String,

    #[arg(long, allow_hyphen_values = true)]
    pub size: Option<String>,
    /// Cycles per image
    #[arg(long, allow_hyphen_values = true)]
    pub freq: Option<String>,
    /// Orientation in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub theta: Option<String>,
    /// Phase in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub phase: Option<String>,
    /// Envelope sigma as a fraction of the diagonal
    #[arg(long, allow_hyphen_values = true)]
    pub sigma: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub gamma: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub contrast: Option<String>,
    /// Background level 0..255
    #[arg(long, allow_hyphen_values = true)]
    pub bg: Option<String>,
    /// cos or sin
    #[arg(long)]
    pub mode: Option<String>,
    /// 1 to normalize the peak, 0 to keep the raw amplitude
    #[arg(long, allow_hyphen_values = true)]
    pub normalize: Option<String>,
}

impl PatchArgs {
    pub fn to_query(&self, default_size: u32) -> PatchQuery {
        PatchQuery {
            size: Some(
                self.size
                    .clone()
                    .unwrap_or_else(|| default_size.to_string()),
            ),
            freq: self.freq.clone(),
            theta: self.theta.clone(),
            phase: self.phase.clone(),
            sigma: self.sigma.clone(),
            gamma: self.gamma.clone(),
            contrast: self.contrast.clone(),
            bg: self.bg.clone(),
            mode: self.mode.clone(),
            normalize: self.normalize.clone(),
        }
    }
}
