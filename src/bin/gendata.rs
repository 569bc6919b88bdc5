//! Generates training records for one of the post-flop value networks
//! using the "cheap method" (random board-compatible ranges, exact
//! utility-matrix targets, no CFR re-solve) and writes them to disk.

use anyhow::{bail, Context};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use resolver::cards::street::Stage;
use resolver::valuenet::training::{generate_training_example, save_dataset};
use resolver::GameConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "Generate training records for a post-flop value network")]
struct Args {
    /// Stage to generate records for: flop, turn, or river.
    #[arg(long)]
    stage: String,

    /// Use the 24-card limited deck instead of the full 52.
    #[arg(long)]
    limited: bool,

    /// Number of records to generate.
    #[arg(long, default_value_t = 10_000)]
    count: usize,

    /// Output path for the serialized dataset.
    #[arg(long)]
    out: PathBuf,

    /// RNG seed, for reproducible datasets.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

/// Generates `count` independent records. Each record only depends on
/// its own RNG draw, so with the `parallel` feature this fans out over
/// `rayon`, one independently-seeded RNG per record, matching the
/// teacher's own data-parallel `par_iter` usage over independent
/// per-point work in its k-means clustering.
#[cfg(feature = "parallel")]
fn generate_records(
    stage: Stage,
    config: &GameConfig,
    count: usize,
    seed: u64,
    progress: &indicatif::ProgressBar,
) -> Vec<resolver::valuenet::training::TrainingRecord> {
    use rayon::prelude::*;
    (0..count)
        .into_par_iter()
        .map(|i| {
            let mut rng = SmallRng::seed_from_u64(seed ^ (i as u64).wrapping_mul(0x9E3779B97F4A7C15));
            let record = generate_training_example(stage, config, &mut rng);
            progress.inc(1);
            record
        })
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn generate_records(
    stage: Stage,
    config: &GameConfig,
    count: usize,
    seed: u64,
    progress: &indicatif::ProgressBar,
) -> Vec<resolver::valuenet::training::TrainingRecord> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let record = generate_training_example(stage, config, &mut rng);
            progress.inc(1);
            record
        })
        .collect()
}

fn parse_stage(s: &str) -> anyhow::Result<Stage> {
    match s.to_ascii_lowercase().as_str() {
        "flop" => Ok(Stage::Flop),
        "turn" => Ok(Stage::Turn),
        "river" | "rive" => Ok(Stage::Rive),
        other => bail!("unknown stage {other:?}; expected flop, turn, or river"),
    }
}

fn main() -> anyhow::Result<()> {
    resolver::init();
    let args = Args::parse();
    let stage = parse_stage(&args.stage)?;
    let config = if args.limited {
        GameConfig::limited()
    } else {
        GameConfig::default()
    };

    log::info!(
        "generating {} {stage} records ({} deck)",
        args.count,
        if args.limited { "limited" } else { "full" }
    );

    let progress = resolver::progress(args.count);
    let records = generate_records(stage, &config, args.count, args.seed, &progress);
    progress.finish();

    save_dataset(&records, &args.out)
        .with_context(|| format!("writing dataset to {}", args.out.display()))?;
    log::info!("wrote {} records to {}", records.len(), args.out.display());
    Ok(())
}
