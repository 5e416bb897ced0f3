// Entry point: batch export of rounds and single patches.
mod cli;

use std::error::Error;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gaborgrid::config::AppConfig;
use gaborgrid::core::render;
use gaborgrid::export::{save_png, write_round_bundle};
use gaborgrid::round::{Difficulty, generate_round};

use crate::cli::{Args, Command, PatchArgs, RoundArgs};

fn run_round(args: &RoundArgs, cfg: &AppConfig) -> Result<(), Box<dyn Error>> {
    let difficulty = args
        .difficulty
        .as_deref()
        .map(Difficulty::parse_lenient)
        .unwrap_or(cfg.round.difficulty);
    let size = args.size.unwrap_or(cfg.round.size);
    let outdir = args.outdir.as_deref().unwrap_or(&cfg.export.out_dir);
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(%difficulty, size, seed, "generating round");

    let mut rng = StdRng::seed_from_u64(seed);
    let round = generate_round(&mut rng, difficulty, size);
    let summary = write_round_bundle(&round, outdir)?;

    println!(
        "Saved {} images and {} to: {outdir}",
        summary.images.len(),
        summary.meta.display()
    );
    Ok(())
}

fn run_patch(args: &PatchArgs, cfg: &AppConfig) -> Result<(), Box<dyn Error>> {
    let params = args.to_query(cfg.patch.size).resolve()?;
    info!(?params, out = %args.out, "rendering patch");
    save_png(&render(&params), &args.out)?;
    println!("Saved {}", args.out);
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let cfg = AppConfig::load_or_default(&args.config);

    match &args.command {
        Command::Round(round_args) => run_round(round_args, &cfg),
        Command::Patch(patch_args) => run_patch(patch_args, &cfg),
    }
}
