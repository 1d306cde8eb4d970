use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use nedc_config::BenchmarkRunConfig;
use nedc_core::{AnnotationFile, dp, epoch, ira, overlap, taes};

mod tracing_init;

#[derive(Parser)]
#[command(name = "nedc", about = "Score EEG annotation fixtures against the scoring core")]
struct Cli {
    /// Path to an `nedc.toml` file; scorer defaults are used if omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fractional time-aligned event scoring.
    Taes(FilePair),
    /// Binary any-overlap event scoring.
    Overlap(FilePair),
    /// Edit-distance label sequence alignment.
    Dp(FilePair),
    /// Fixed-window midpoint sampling with gap augmentation.
    Epoch(FilePair),
    /// Cohen's kappa over the epoch sampling grid.
    Ira(FilePair),
}

#[derive(clap::Args)]
struct FilePair {
    /// Path to the reference annotation JSON fixture.
    reference: PathBuf,
    /// Path to the hypothesis annotation JSON fixture.
    hypothesis: PathBuf,
}

fn load_fixture(path: &Path) -> Result<AnnotationFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading fixture {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing fixture {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => BenchmarkRunConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BenchmarkRunConfig::default(),
    };
    tracing_init::init_tracing(&config.logging);

    match cli.command {
        Commands::Taes(pair) => {
            let reference = load_fixture(&pair.reference)?;
            let hypothesis = load_fixture(&pair.hypothesis)?;
            let result = taes::score(&reference, &hypothesis, &config.taes);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Overlap(pair) => {
            let reference = load_fixture(&pair.reference)?;
            let hypothesis = load_fixture(&pair.hypothesis)?;
            let result = overlap::score(&reference, &hypothesis);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Dp(pair) => {
            let reference = load_fixture(&pair.reference)?;
            let hypothesis = load_fixture(&pair.hypothesis)?;
            let result = dp::align(&reference.labels(), &hypothesis.labels(), &config.dp);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Epoch(pair) => {
            let reference = load_fixture(&pair.reference)?;
            let hypothesis = load_fixture(&pair.hypothesis)?;
            let file_duration = reference.duration;
            let result = epoch::score(&reference, &hypothesis, file_duration, &config.epoch)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Ira(pair) => {
            let reference = load_fixture(&pair.reference)?;
            let hypothesis = load_fixture(&pair.hypothesis)?;
            let file_duration = reference.duration;
            let result = ira::score_events(&reference, &hypothesis, file_duration, &config.ira)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
