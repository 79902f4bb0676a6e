use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    assess::{self, AssessArgs},
    evaluate::{self, EvaluateArgs},
    generate::{self, GenerateArgs},
    init_config::{self, InitConfigArgs},
    sweep::{self, SweepArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "hom-sim",
    about = "Higher-order moment estimator robustness benchmark"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the default generator configuration.
    InitConfig(InitConfigArgs),
    /// Generate composites and ground truth for a sweep or a single configuration.
    Generate(GenerateArgs),
    /// Estimate per-cell moments of one composite.
    Evaluate(EvaluateArgs),
    /// Compare evaluations with ground truth and export the aggregate.
    Assess(AssessArgs),
    /// Generate, evaluate and assess a full sweep.
    Sweep(SweepArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::InitConfig(args) => init_config::run(&args),
        Command::Generate(args) => generate::run(&args),
        Command::Evaluate(args) => evaluate::run(&args),
        Command::Assess(args) => assess::run(&args),
        Command::Sweep(args) => sweep::run(&args),
    }
}
