//! Match processing worker binary.
//!
//! ```text
//! crease-worker run <track.json>
//! crease-worker train <dataset_dir> <model.json>
//! ```

use std::path::Path;

use anyhow::{bail, Context};
use crease_vision::ShotClassifierConfig;
use crease_worker::{init_tracing, metrics, train_from_dir, MatchProcessor, MatchTrack, WorkerConfig};
use tracing::{error, info};

const USAGE: &str = "usage: crease-worker run <track.json> | crease-worker train <dataset_dir> <model.json>";

fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> anyhow::Result<()> {
    let config = WorkerConfig::from_env();
    info!("Worker config: {:?}", config);

    let prometheus = if config.metrics_enabled {
        Some(metrics::init_metrics().context("failed to install Prometheus recorder")?)
    } else {
        None
    };

    match args {
        [command, track] if command == "run" => run_track(config, Path::new(track))?,
        [command, dataset, model] if command == "train" => {
            let samples = train_from_dir(dataset, model, ShotClassifierConfig::default())
                .with_context(|| format!("training from {} failed", dataset))?;
            info!(samples, model = %model, "Shot classifier saved");
        }
        _ => bail!(USAGE),
    }

    if let Some(handle) = prometheus {
        eprintln!("{}", handle.render());
    }
    Ok(())
}

fn run_track(config: WorkerConfig, path: &Path) -> anyhow::Result<()> {
    info!("Starting crease-worker on {}", path.display());

    let mut track = MatchTrack::from_file(path)
        .with_context(|| format!("failed to load track {}", path.display()))?;
    let processor = MatchProcessor::from_config(config)?;

    // The track plays all three roles; detection and hints read from a snapshot.
    let recorded = track.clone();
    let report = processor.process(&mut track, &recorded, &recorded)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
