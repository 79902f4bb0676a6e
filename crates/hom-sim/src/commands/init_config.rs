use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use hom_exp::write_default_config;
use tracing::info;

#[derive(Args, Debug)]
pub struct InitConfigArgs {
    /// Destination of the generator configuration JSON.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &InitConfigArgs) -> Result<(), Box<dyn Error>> {
    let config = write_default_config(&args.out)?;
    info!(path = %args.out.display(), seed = config.seed, "default configuration written");
    Ok(())
}
