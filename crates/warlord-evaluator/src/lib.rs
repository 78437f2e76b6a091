//! Record evaluation features for warlord power estimation.
//!
//! This crate turns a [`CharacterRecord`](warlord_record::CharacterRecord)
//! into the fixed-order numeric vector the learning stack trains on, and
//! provides the deterministic baseline formula used while no trained model
//! exists.
//!
//! # Feature Architecture
//!
//! Each feature is a [`record_feature::RecordFeatureSource`] that extracts one
//! scalar from a record. The single ordered table returned by
//! [`record_feature::all_record_feature_sources`] defines both the extraction
//! order of [`record_feature::FeatureVector`] and the ids under which model
//! importances are reported. Persisted model coefficients are only meaningful
//! against this exact order, so the table is the one place it is defined.
//!
//! # Examples
//!
//! ```
//! use warlord_evaluator::record_feature::{FEATURE_COUNT, FeatureExtractor};
//! # let record: warlord_record::CharacterRecord = serde_json::from_str(
//! #     r#"{"level": 1, "generalGrade": 1,
//! #         "baseStats": {"command": 1, "force": 1, "intelligence": 1, "politics": 1, "charm": 1},
//! #         "skills": {}, "equipment": {}}"#,
//! # ).unwrap();
//!
//! let extractor = FeatureExtractor::new();
//! let features = extractor.extract(&record).unwrap();
//! assert_eq!(features.as_slice().len(), FEATURE_COUNT);
//! ```

pub use self::record_feature::{
    FEATURE_COUNT, FeatureExtractor, FeatureVector, MalformedRecordError,
};

pub mod baseline;
pub mod record_feature;
