//! Feature source types for extracting raw values from character records.
//!
//! These types implement [`RecordFeatureSource`]. Their ids double as the
//! keys of the feature-importance report, so renaming one is a breaking
//! change for consumers of that report.

use std::fmt;

use warlord_record::{BASE_ATTRIBUTES, CharacterRecord};

use super::MalformedRecordError;

/// The canonical ordered feature table. Extraction order and importance
/// naming both derive from this single list.
#[must_use]
pub fn all_record_feature_sources() -> Vec<BoxedRecordFeatureSource> {
    vec![
        // base features
        Box::new(Level),
        Box::new(GeneralGrade),
        Box::new(BaseAttribute::new("command", "Command")),
        Box::new(BaseAttribute::new("force", "Force")),
        Box::new(BaseAttribute::new("intelligence", "Intelligence")),
        Box::new(BaseAttribute::new("politics", "Politics")),
        Box::new(BaseAttribute::new("charm", "Charm")),
        // derived totals
        Box::new(TotalStats),
        Box::new(SkillCount),
        Box::new(EquipmentGradeSum),
        Box::new(EquipmentCount),
        // interaction terms
        Box::new(LevelTimesGrade),
        Box::new(StatsTimesLevel),
        Box::new(EquipmentTimesLevel),
        Box::new(SkillsTimesLevel),
    ]
}

pub trait RecordFeatureSource: fmt::Debug + Send + Sync {
    #[must_use]
    fn id(&self) -> &str;
    #[must_use]
    fn name(&self) -> &str;
    #[must_use]
    fn clone_boxed(&self) -> BoxedRecordFeatureSource;
    fn extract_raw(&self, record: &CharacterRecord) -> Result<f32, MalformedRecordError>;
}

pub type BoxedRecordFeatureSource = Box<dyn RecordFeatureSource>;

impl Clone for BoxedRecordFeatureSource {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

impl RecordFeatureSource for BoxedRecordFeatureSource {
    fn id(&self) -> &str {
        self.as_ref().id()
    }

    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn clone_boxed(&self) -> BoxedRecordFeatureSource {
        self.as_ref().clone_boxed()
    }

    fn extract_raw(&self, record: &CharacterRecord) -> Result<f32, MalformedRecordError> {
        self.as_ref().extract_raw(record)
    }
}

/// Looks up a named base attribute, rejecting records that omit it.
fn named_base_stat(record: &CharacterRecord, attribute: &str) -> Result<i64, MalformedRecordError> {
    record
        .base_stat(attribute)
        .ok_or_else(|| MalformedRecordError::MissingBaseStat {
            attribute: attribute.to_owned(),
        })
}

/// Sum of the five named base attributes.
#[expect(clippy::cast_precision_loss)]
pub(crate) fn total_base_stats(record: &CharacterRecord) -> Result<f32, MalformedRecordError> {
    let mut total = 0;
    for attribute in BASE_ATTRIBUTES {
        total += named_base_stat(record, attribute)?;
    }
    Ok(total as f32)
}

/// Character level.
#[derive(Debug, Clone)]
pub struct Level;

impl RecordFeatureSource for Level {
    fn id(&self) -> &'static str {
        "level"
    }
    fn name(&self) -> &'static str {
        "Level"
    }
    fn clone_boxed(&self) -> BoxedRecordFeatureSource {
        Box::new(self.clone())
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract_raw(&self, record: &CharacterRecord) -> Result<f32, MalformedRecordError> {
        Ok(record.level as f32)
    }
}

/// General grade.
#[derive(Debug, Clone)]
pub struct GeneralGrade;

impl RecordFeatureSource for GeneralGrade {
    fn id(&self) -> &'static str {
        "generalGrade"
    }
    fn name(&self) -> &'static str {
        "General Grade"
    }
    fn clone_boxed(&self) -> BoxedRecordFeatureSource {
        Box::new(self.clone())
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract_raw(&self, record: &CharacterRecord) -> Result<f32, MalformedRecordError> {
        Ok(record.grade as f32)
    }
}

/// One of the five named base attributes.
///
/// The attribute name is the feature id, matching the record's `baseStats`
/// keys.
#[derive(Debug, Clone)]
pub struct BaseAttribute {
    attribute: &'static str,
    name: &'static str,
}

impl BaseAttribute {
    #[must_use]
    pub fn new(attribute: &'static str, name: &'static str) -> Self {
        Self { attribute, name }
    }
}

impl RecordFeatureSource for BaseAttribute {
    fn id(&self) -> &str {
        self.attribute
    }
    fn name(&self) -> &str {
        self.name
    }
    fn clone_boxed(&self) -> BoxedRecordFeatureSource {
        Box::new(self.clone())
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract_raw(&self, record: &CharacterRecord) -> Result<f32, MalformedRecordError> {
        Ok(named_base_stat(record, self.attribute)? as f32)
    }
}

/// Sum of the five base attribute values.
#[derive(Debug, Clone)]
pub struct TotalStats;

impl RecordFeatureSource for TotalStats {
    fn id(&self) -> &'static str {
        "totalStats"
    }
    fn name(&self) -> &'static str {
        "Total Stats"
    }
    fn clone_boxed(&self) -> BoxedRecordFeatureSource {
        Box::new(self.clone())
    }
    fn extract_raw(&self, record: &CharacterRecord) -> Result<f32, MalformedRecordError> {
        total_base_stats(record)
    }
}

/// Count of skill slots whose text is non-empty after trimming.
#[derive(Debug, Clone)]
pub struct SkillCount;

impl RecordFeatureSource for SkillCount {
    fn id(&self) -> &'static str {
        "skillCount"
    }
    fn name(&self) -> &'static str {
        "Skill Count"
    }
    fn clone_boxed(&self) -> BoxedRecordFeatureSource {
        Box::new(self.clone())
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract_raw(&self, record: &CharacterRecord) -> Result<f32, MalformedRecordError> {
        Ok(record.filled_skill_count() as f32)
    }
}

/// Sum of equipment grades across all slots. Grades <= 0 contribute 0.
#[derive(Debug, Clone)]
pub struct EquipmentGradeSum;

impl RecordFeatureSource for EquipmentGradeSum {
    fn id(&self) -> &'static str {
        "equipmentGrade"
    }
    fn name(&self) -> &'static str {
        "Equipment Grade Sum"
    }
    fn clone_boxed(&self) -> BoxedRecordFeatureSource {
        Box::new(self.clone())
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract_raw(&self, record: &CharacterRecord) -> Result<f32, MalformedRecordError> {
        Ok(record.equipment_grade_sum() as f32)
    }
}

/// Count of equipment slots with grade > 0.
#[derive(Debug, Clone)]
pub struct EquipmentCount;

impl RecordFeatureSource for EquipmentCount {
    fn id(&self) -> &'static str {
        "equipmentCount"
    }
    fn name(&self) -> &'static str {
        "Equipment Count"
    }
    fn clone_boxed(&self) -> BoxedRecordFeatureSource {
        Box::new(self.clone())
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract_raw(&self, record: &CharacterRecord) -> Result<f32, MalformedRecordError> {
        Ok(record.equipment_count() as f32)
    }
}

/// Level multiplied by grade.
#[derive(Debug, Clone)]
pub struct LevelTimesGrade;

impl RecordFeatureSource for LevelTimesGrade {
    fn id(&self) -> &'static str {
        "level_grade"
    }
    fn name(&self) -> &'static str {
        "Level x Grade"
    }
    fn clone_boxed(&self) -> BoxedRecordFeatureSource {
        Box::new(self.clone())
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract_raw(&self, record: &CharacterRecord) -> Result<f32, MalformedRecordError> {
        Ok((record.level as f32) * (record.grade as f32))
    }
}

/// Total stats multiplied by level.
#[derive(Debug, Clone)]
pub struct StatsTimesLevel;

impl RecordFeatureSource for StatsTimesLevel {
    fn id(&self) -> &'static str {
        "stats_level"
    }
    fn name(&self) -> &'static str {
        "Total Stats x Level"
    }
    fn clone_boxed(&self) -> BoxedRecordFeatureSource {
        Box::new(self.clone())
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract_raw(&self, record: &CharacterRecord) -> Result<f32, MalformedRecordError> {
        Ok(total_base_stats(record)? * (record.level as f32))
    }
}

/// Equipment grade sum multiplied by level.
#[derive(Debug, Clone)]
pub struct EquipmentTimesLevel;

impl RecordFeatureSource for EquipmentTimesLevel {
    fn id(&self) -> &'static str {
        "equipment_level"
    }
    fn name(&self) -> &'static str {
        "Equipment Grade x Level"
    }
    fn clone_boxed(&self) -> BoxedRecordFeatureSource {
        Box::new(self.clone())
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract_raw(&self, record: &CharacterRecord) -> Result<f32, MalformedRecordError> {
        Ok((record.equipment_grade_sum() as f32) * (record.level as f32))
    }
}

/// Skill count multiplied by level.
#[derive(Debug, Clone)]
pub struct SkillsTimesLevel;

impl RecordFeatureSource for SkillsTimesLevel {
    fn id(&self) -> &'static str {
        "skill_level"
    }
    fn name(&self) -> &'static str {
        "Skill Count x Level"
    }
    fn clone_boxed(&self) -> BoxedRecordFeatureSource {
        Box::new(self.clone())
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract_raw(&self, record: &CharacterRecord) -> Result<f32, MalformedRecordError> {
        Ok((record.filled_skill_count() as f32) * (record.level as f32))
    }
}
