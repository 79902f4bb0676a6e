use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use hom_exp::{assess_sweep, ArtifactLayout};

use super::{plan_or_default, print_verdicts};

#[derive(Args, Debug)]
pub struct AssessArgs {
    /// Sweep plan the artifacts were generated from.
    #[arg(long)]
    pub plan: Option<PathBuf>,
    /// Artifact root directory.
    #[arg(long)]
    pub root: PathBuf,
}

pub fn run(args: &AssessArgs) -> Result<(), Box<dyn Error>> {
    let plan = plan_or_default(args.plan.as_deref())?;
    let assessment = assess_sweep(&plan, &ArtifactLayout::new(&args.root))?;
    print_verdicts(&assessment.summary)
}
