//! Deterministic fallback formula for the untrained case.

use warlord_record::CharacterRecord;

use crate::record_feature::{MalformedRecordError, source::total_base_stats};

/// Closed-form power estimate used whenever no trained model exists.
///
/// ```text
/// power = level*10 + grade*5 + totalStats*0.5 + skillCount*20 + equipmentGrade*15
/// ```
///
/// truncated toward zero. No randomness: every request, including the very
/// first one ever made, returns a reproducible estimate.
///
/// # Errors
///
/// Returns [`MalformedRecordError`] if any of the five named base attributes
/// is missing from the record.
///
/// # Examples
///
/// ```
/// use warlord_evaluator::baseline::baseline_power;
/// # let record: warlord_record::CharacterRecord = serde_json::from_str(
/// #     r#"{"level": 10, "generalGrade": 3,
/// #         "baseStats": {"command": 40, "force": 40, "intelligence": 40, "politics": 40, "charm": 40},
/// #         "skills": {"a": "Charge", "b": "Rally"},
/// #         "equipment": {"weapon": {"grade": 30}}}"#,
/// # ).unwrap();
///
/// // 100 + 15 + 100 + 40 + 450
/// assert_eq!(baseline_power(&record).unwrap(), 705);
/// ```
#[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn baseline_power(record: &CharacterRecord) -> Result<i64, MalformedRecordError> {
    let total_stats = total_base_stats(record)?;
    let skill_count = record.filled_skill_count() as f32;
    let equipment_grade = record.equipment_grade_sum() as f32;

    let power = (record.level as f32) * 10.0
        + (record.grade as f32) * 5.0
        + total_stats * 0.5
        + skill_count * 20.0
        + equipment_grade * 15.0;

    Ok(power as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> CharacterRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn matches_reference_example() {
        let record = record(
            r#"{
                "level": 10,
                "generalGrade": 3,
                "baseStats": {
                    "command": 40, "force": 40, "intelligence": 40,
                    "politics": 40, "charm": 40
                },
                "skills": {"slot1": "Charge", "slot2": "Rally"},
                "equipment": {"weapon": {"grade": 30}}
            }"#,
        );
        assert_eq!(baseline_power(&record).unwrap(), 705);
    }

    #[test]
    fn fractional_stat_term_truncates() {
        // totalStats*0.5 = 2.5, everything else 0
        let record = record(
            r#"{
                "level": 0,
                "generalGrade": 0,
                "baseStats": {
                    "command": 5, "force": 0, "intelligence": 0,
                    "politics": 0, "charm": 0
                },
                "skills": {},
                "equipment": {}
            }"#,
        );
        assert_eq!(baseline_power(&record).unwrap(), 2);
    }

    #[test]
    fn missing_attribute_is_rejected() {
        let record = record(
            r#"{
                "level": 1,
                "generalGrade": 1,
                "baseStats": {"command": 1},
                "skills": {},
                "equipment": {}
            }"#,
        );
        assert!(baseline_power(&record).is_err());
    }
}
