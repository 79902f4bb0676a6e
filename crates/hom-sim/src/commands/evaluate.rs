use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use hom_exp::evaluate_image;
use tracing::info;

use super::plan_or_default;

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Composite raster to evaluate.
    #[arg(long)]
    pub image: PathBuf,
    /// Destination of the evaluation JSON.
    #[arg(long)]
    pub out: PathBuf,
    /// Plan whose geometry the composite follows; defaults when omitted.
    #[arg(long)]
    pub plan: Option<PathBuf>,
}

pub fn run(args: &EvaluateArgs) -> Result<(), Box<dyn Error>> {
    let plan = plan_or_default(args.plan.as_deref())?;
    let record = evaluate_image(&args.image, &args.out, &plan.geometry)?;
    info!(
        image = %args.image.display(),
        out = %args.out.display(),
        cells = record.cells.len(),
        "evaluation written"
    );
    Ok(())
}
