//! Engine facade for warlord power estimation.
//!
//! [`PowerEngine`] is the single entry point external collaborators use: it
//! accepts a character record (plus an optional observed score), orchestrates
//! corpus update, conditional retrain, prediction, and diagnostics, and owns
//! load/save of the corpus and model across process restarts.
//!
//! The engine is an explicit object, not a hidden global: construct one per
//! data directory and pass it by reference. It is synchronous and not
//! reentrant-safe; a concurrent host must serialize access.
//!
//! # Examples
//!
//! ```no_run
//! use warlord_engine::PowerEngine;
//! # let record: warlord_record::CharacterRecord = serde_json::from_str(
//! #     r#"{"level": 10, "generalGrade": 3,
//! #         "baseStats": {"command": 40, "force": 40, "intelligence": 40, "politics": 40, "charm": 40},
//! #         "skills": {}, "equipment": {}}"#,
//! # ).unwrap();
//!
//! let mut engine = PowerEngine::open("data");
//!
//! // learn from a ground-truth score, then estimate
//! let estimate = engine.estimate(&record, Some(720.0)).unwrap();
//! println!("{} (trained: {})", estimate.estimated_power, estimate.is_trained);
//! ```

pub use self::diagnostics::EngineDiagnostics;
pub use self::engine::{EngineError, PowerEngine, PowerEstimate};
pub use self::storage::{EngineStorage, StorageError};

pub mod diagnostics;
pub mod engine;
pub mod storage;
