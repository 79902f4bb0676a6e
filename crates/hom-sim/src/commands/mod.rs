use std::error::Error;
use std::path::Path;

use hom_exp::{load_plan, AssessmentSummary, SweepPlan};

pub mod assess;
pub mod evaluate;
pub mod generate;
pub mod init_config;
pub mod sweep;

/// Plan from `path`, or the built-in defaults.
pub fn plan_or_default(path: Option<&Path>) -> Result<SweepPlan, Box<dyn Error>> {
    match path {
        Some(path) => Ok(load_plan(path)?),
        None => Ok(SweepPlan::default()),
    }
}

/// Prints the per-distribution verdicts as JSON on stdout.
pub fn print_verdicts(summary: &AssessmentSummary) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(&summary.verdicts)?);
    Ok(())
}
