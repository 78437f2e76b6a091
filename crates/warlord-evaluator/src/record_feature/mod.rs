//! Feature extraction from character records.
//!
//! A feature source extracts one scalar measurement from a record. The
//! ordered source table ([`all_record_feature_sources`]) produces the
//! 15-element [`FeatureVector`] consumed by the learning stack:
//!
//! 1. `level`, `generalGrade`
//! 2. the five base attributes (`command`, `force`, `intelligence`,
//!    `politics`, `charm`)
//! 3. derived totals (`totalStats`, `skillCount`, `equipmentGrade`,
//!    `equipmentCount`)
//! 4. pairwise interaction terms (`level_grade`, `stats_level`,
//!    `equipment_level`, `skill_level`)
//!
//! The interaction terms let a shallow ensemble capture multiplicative
//! effects (stat value matters more at high level) without manual non-linear
//! transforms.
//!
//! Extraction is pure: the same record always yields a bit-identical vector.

use serde::{Deserialize, Serialize};
use warlord_record::CharacterRecord;

pub use self::source::{BoxedRecordFeatureSource, RecordFeatureSource, all_record_feature_sources};

pub mod source;

/// Number of features extracted from a record. Part of the persistence
/// contract: model blobs trained against a different width are invalid.
pub const FEATURE_COUNT: usize = 15;

/// A required field was absent or ill-shaped during feature extraction.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MalformedRecordError {
    #[display("base stats missing attribute '{attribute}'")]
    MissingBaseStat { attribute: String },
}

/// Fixed-order numeric vector derived from a character record.
///
/// The element order follows [`all_record_feature_sources`] and is
/// contractual; see [`FEATURE_COUNT`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f32; FEATURE_COUNT]);

impl FeatureVector {
    #[must_use]
    pub fn new(values: [f32; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl std::ops::Index<usize> for FeatureVector {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.0[index]
    }
}

/// Extracts feature vectors from records using the canonical source table.
///
/// The extractor owns one instance of the table; both vector order and
/// feature ids come from it, so the two can never drift apart.
#[derive(Debug)]
pub struct FeatureExtractor {
    sources: Vec<BoxedRecordFeatureSource>,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureExtractor {
    /// # Panics
    ///
    /// Panics if the source table does not match [`FEATURE_COUNT`].
    #[must_use]
    pub fn new() -> Self {
        let sources = all_record_feature_sources();
        assert_eq!(sources.len(), FEATURE_COUNT);
        Self { sources }
    }

    /// Builds the feature vector for a record.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedRecordError`] if any of the five named base
    /// attributes is missing from the record.
    pub fn extract(&self, record: &CharacterRecord) -> Result<FeatureVector, MalformedRecordError> {
        let mut values = [0.0; FEATURE_COUNT];
        for (value, source) in values.iter_mut().zip(&self.sources) {
            *value = source.extract_raw(record)?;
        }
        Ok(FeatureVector(values))
    }

    /// Feature ids in extraction order.
    pub fn feature_ids(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|source| source.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> CharacterRecord {
        serde_json::from_str(
            r#"{
                "level": 10,
                "generalGrade": 3,
                "baseStats": {
                    "command": 50, "force": 45, "intelligence": 40,
                    "politics": 35, "charm": 30
                },
                "skills": {"slot1": "Charge", "slot2": "Rally", "slot3": ""},
                "equipment": {"weapon": {"grade": 20}, "armor": {"grade": 10}}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn extracts_fifteen_features_in_order() {
        let extractor = FeatureExtractor::new();
        let features = extractor.extract(&sample_record()).unwrap();
        let expected = [
            10.0, 3.0, // level, grade
            50.0, 45.0, 40.0, 35.0, 30.0, // base attributes
            200.0, 2.0, 30.0, 2.0, // totals
            30.0, 2000.0, 300.0, 20.0, // interactions
        ];
        assert_eq!(features.as_slice(), &expected);
    }

    #[test]
    fn extraction_is_deterministic() {
        let extractor = FeatureExtractor::new();
        let record = sample_record();
        let first = extractor.extract(&record).unwrap();
        let second = extractor.extract(&record).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_attribute_is_rejected() {
        let extractor = FeatureExtractor::new();
        let mut record = sample_record();
        record.base_stats.remove("politics");
        let err = extractor.extract(&record).unwrap_err();
        assert_eq!(
            err,
            MalformedRecordError::MissingBaseStat {
                attribute: "politics".to_owned()
            }
        );
    }

    #[test]
    fn feature_ids_match_reporting_names() {
        let extractor = FeatureExtractor::new();
        let ids = extractor.feature_ids().collect::<Vec<_>>();
        assert_eq!(
            ids,
            [
                "level",
                "generalGrade",
                "command",
                "force",
                "intelligence",
                "politics",
                "charm",
                "totalStats",
                "skillCount",
                "equipmentGrade",
                "equipmentCount",
                "level_grade",
                "stats_level",
                "equipment_level",
                "skill_level",
            ]
        );
    }

    #[test]
    fn vector_round_trips_through_serde() {
        let extractor = FeatureExtractor::new();
        let features = extractor.extract(&sample_record()).unwrap();
        let json = serde_json::to_string(&features).unwrap();
        let restored: FeatureVector = serde_json::from_str(&json).unwrap();
        assert_eq!(features, restored);
    }
}
