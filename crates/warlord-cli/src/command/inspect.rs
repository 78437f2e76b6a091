//! The `inspect` subcommand: prints the diagnostics bundle without
//! estimating.

use std::path::PathBuf;

use clap::Args;
use warlord_engine::PowerEngine;

#[derive(Debug, Clone, Args)]
pub struct InspectArg {
    /// Directory holding the corpus and model blobs
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
}

pub fn run(arg: &InspectArg) -> anyhow::Result<()> {
    let engine = PowerEngine::open(&arg.data_dir);
    println!("{}", serde_json::to_string(&engine.diagnostics())?);
    Ok(())
}
