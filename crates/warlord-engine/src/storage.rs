//! Durable storage for the learning corpus and the fitted model.
//!
//! Two independent JSON blobs live in the engine's data directory:
//! `corpus.json` and `model.json`. Absence or unreadability of either blob
//! at load time means "begin fresh" and is logged, never surfaced; write
//! failures are surfaced because the in-memory state is then ahead of the
//! durable state.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;
use warlord_learn::{LearningCorpus, RegressionForest};

const CORPUS_FILE: &str = "corpus.json";
const MODEL_FILE: &str = "model.json";

/// A durable blob could not be written.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum StorageError {
    #[display("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[display("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Blob IO for one engine data directory.
#[derive(Debug)]
pub struct EngineStorage {
    corpus_path: PathBuf,
    model_path: PathBuf,
}

impl EngineStorage {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            corpus_path: data_dir.join(CORPUS_FILE),
            model_path: data_dir.join(MODEL_FILE),
        }
    }

    /// Loads the corpus blob, degrading to an empty corpus when the blob is
    /// absent or unreadable.
    #[must_use]
    pub fn load_corpus(&self) -> LearningCorpus {
        load_blob(&self.corpus_path).unwrap_or_default()
    }

    /// Loads the model blob. `None` (start untrained) when the blob is
    /// absent or unreadable.
    #[must_use]
    pub fn load_model(&self) -> Option<RegressionForest> {
        load_blob(&self.model_path)
    }

    pub fn save_corpus(&self, corpus: &LearningCorpus) -> Result<(), StorageError> {
        save_blob(&self.corpus_path, corpus)
    }

    pub fn save_model(&self, model: &RegressionForest) -> Result<(), StorageError> {
        save_blob(&self.model_path, model)
    }
}

fn load_blob<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(error) => {
            if error.kind() != io::ErrorKind::NotFound {
                warn!(path = %path.display(), %error, "blob unreadable, starting fresh");
            }
            return None;
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(path = %path.display(), %error, "blob undecodable, starting fresh");
            None
        }
    }
}

fn save_blob<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_vec(value).map_err(|source| StorageError::Encode {
        path: path.to_owned(),
        source,
    })?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::Write {
            path: path.to_owned(),
            source,
        })?;
    }
    fs::write(path, json).map_err(|source| StorageError::Write {
        path: path.to_owned(),
        source,
    })
}
