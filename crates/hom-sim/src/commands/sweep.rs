use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use hom_exp::{run_sweep, ArtifactLayout};
use tracing::info;

use super::{plan_or_default, print_verdicts};

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Sweep plan (YAML or JSON); built-in defaults when omitted.
    #[arg(long)]
    pub plan: Option<PathBuf>,
    /// Artifact root directory.
    #[arg(long)]
    pub root: PathBuf,
}

pub fn run(args: &SweepArgs) -> Result<(), Box<dyn Error>> {
    let plan = plan_or_default(args.plan.as_deref())?;
    let outcome = run_sweep(&plan, &ArtifactLayout::new(&args.root))?;
    info!(
        evaluated = outcome.evaluated,
        skipped = outcome.assessment.skipped.len(),
        "sweep complete"
    );
    print_verdicts(&outcome.assessment.summary)
}
