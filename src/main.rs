use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use typology::{process_building, BuildingAttributes, BuildingOutputs, Config, SamplingContext};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // ─── 2) parse arguments ──────────────────────────────────────────
    let mut args = std::env::args().skip(1);
    let Some(buildings_path) = args.next() else {
        bail!("usage: typology <buildings.json> [config.json]");
    };
    let config = match args.next() {
        Some(config_path) => read_json::<Config>(Path::new(&config_path))
            .with_context(|| format!("loading config {config_path}"))?,
        None => Config::default(),
    };

    // ─── 3) build the shared context once ────────────────────────────
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, tables_dir = %config.tables_dir.display(), "startup");
    let ctx = SamplingContext::new(config);

    let buildings: Vec<BuildingAttributes> = read_json(Path::new(&buildings_path))
        .with_context(|| format!("loading buildings {buildings_path}"))?;
    info!("{} buildings to process", buildings.len());

    // ─── 4) resolve and sample, in parallel across buildings ─────────
    let outputs: Vec<BuildingOutputs> = buildings
        .par_iter()
        .enumerate()
        .map(|(i, building)| {
            let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(i as u64));
            process_building(&ctx, building, &mut rng)
                .with_context(|| format!("processing building `{}`", building.name))
        })
        .collect::<Result<Vec<_>>>()?;

    // ─── 5) emit to the job-configuration collaborator ───────────────
    serde_json::to_writer_pretty(std::io::stdout().lock(), &outputs)
        .context("writing outputs")?;
    println!();
    info!("processed {} buildings", outputs.len());

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))
}
