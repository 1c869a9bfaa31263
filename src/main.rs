mod cfg;
mod dataset;
mod layout;
mod stats;

use anyhow::{Context, Result};
use clap::Parser;
use layout::Layout;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Generate random integers, store them, reload them and report statistics
#[derive(Parser, Debug)]
#[command(name = "datagen")]
struct Args {
    /// Path to the JSON config file
    #[arg(short, long, default_value = cfg::DEFAULT_PATH)]
    config: PathBuf,

    /// Seed the generator to make the dataset reproducible
    #[arg(long)]
    seed: Option<u64>,

    /// Verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(std::io::stdout().is_terminal())
        .with_target(verbose >= 2)
        .init();
}

fn generate(size: usize, seed: Option<u64>) -> Result<Vec<i64>> {
    match seed {
        Some(seed) => {
            tracing::debug!("seeding generator with {}", seed);
            dataset::generate(size, &mut StdRng::seed_from_u64(seed))
        }
        None => dataset::generate(size, &mut rand::rng()),
    }
}

fn run(args: &Args) -> Result<()> {
    let layout = Layout::new(".");
    layout.ensure().context("failed to prepare directories")?;

    let mut config = cfg::load(&args.config).context("failed to load config")?;
    tracing::debug!("effective config: {:?}", config);

    let data = generate(config.data_size, args.seed)?;
    let data_path = layout.dataset_path(&config.output_file);
    dataset::save(&data_path, &data)?;

    let reloaded = dataset::reload_or_empty(&data_path)?;
    stats::report(&reloaded);

    config.last_run = Some(chrono::Local::now());
    config.save(&args.config).context("failed to save config")?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    if let Err(err) = run(&args) {
        tracing::error!("run failed: {:?}", err);
        std::process::exit(1);
    }
}
