//! The `estimate` subcommand: bridges a JSON request envelope on stdin to
//! the engine and prints a JSON response envelope on stdout.

use std::{collections::BTreeMap, io::Read, path::PathBuf};

use anyhow::Context;
use clap::Args;
use serde::{Deserialize, Serialize};
use warlord_engine::PowerEngine;
use warlord_record::CharacterRecord;

#[derive(Debug, Clone, Args)]
pub struct EstimateArg {
    /// Directory holding the corpus and model blobs
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
}

/// Request envelope: a character record with an optional ground-truth score.
#[derive(Debug, Deserialize)]
struct EstimateRequest {
    #[serde(flatten)]
    record: CharacterRecord,
    #[serde(rename = "actualPower")]
    actual_power: Option<f32>,
}

#[derive(Debug, Serialize)]
struct EstimateResponse {
    success: bool,
    predicted_power: i64,
    feature_importance: BTreeMap<String, f32>,
    learning_data_count: usize,
    is_trained: bool,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

pub fn run(arg: &EstimateArg) -> anyhow::Result<()> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read request from stdin")?;
    let request: EstimateRequest =
        serde_json::from_str(&input).context("invalid request envelope")?;

    let mut engine = PowerEngine::open(&arg.data_dir);
    match engine.estimate(&request.record, request.actual_power) {
        Ok(estimate) => {
            let response = EstimateResponse {
                success: true,
                predicted_power: estimate.estimated_power,
                feature_importance: estimate.feature_importance,
                learning_data_count: estimate.learning_data_count,
                is_trained: estimate.is_trained,
            };
            println!("{}", serde_json::to_string(&response)?);
            Ok(())
        }
        Err(error) => {
            // the caller parses stdout, so the failure is reported there too
            let response = ErrorResponse {
                success: false,
                error: error.to_string(),
            };
            println!("{}", serde_json::to_string(&response)?);
            Err(error.into())
        }
    }
}
