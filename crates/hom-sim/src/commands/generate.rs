use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use hom_exp::{generate_single, generate_sweep, load_config, ArtifactLayout};
use tracing::info;

use super::plan_or_default;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Sweep plan (YAML or JSON); built-in defaults when omitted.
    #[arg(long)]
    pub plan: Option<PathBuf>,
    /// Generator configuration for a single composite instead of a sweep.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output raster for single generation; defaults to the layout path under `--root`.
    #[arg(long, requires = "config")]
    pub image: Option<PathBuf>,
    /// Output ground truth for single generation; defaults to the layout path under `--root`.
    #[arg(long, requires = "config")]
    pub gt: Option<PathBuf>,
    /// Overrides the configured or planned seed.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Artifact root directory.
    #[arg(long)]
    pub root: PathBuf,
}

pub fn run(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    let mut plan = plan_or_default(args.plan.as_deref())?;
    let layout = ArtifactLayout::new(&args.root);

    let Some(config_path) = &args.config else {
        if let Some(seed) = args.seed {
            plan.seed = seed;
        }
        let manifest = generate_sweep(&plan, &layout)?;
        info!(
            combinations = manifest.combinations.len(),
            manifest = %layout.manifest_path().display(),
            "sweep generated"
        );
        return Ok(());
    };

    let config = load_config(config_path)?.with_seed_override(args.seed);
    let image = args
        .image
        .clone()
        .unwrap_or_else(|| layout.image_path(config.distribution, config.snr_db));
    let gt = args
        .gt
        .clone()
        .unwrap_or_else(|| layout.ground_truth_path(config.distribution, config.snr_db));
    generate_single(&config, &plan, &image, &gt)?;
    Ok(())
}
