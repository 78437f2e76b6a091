use clap::{Parser, Subcommand};

use self::{estimate::EstimateArg, inspect::InspectArg};

mod estimate;
mod inspect;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Estimate power for a record read as JSON from stdin
    Estimate(EstimateArg),
    /// Print the engine's learning diagnostics
    Inspect(InspectArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match &args.mode {
        Mode::Estimate(arg) => estimate::run(arg),
        Mode::Inspect(arg) => inspect::run(arg),
    }
}
