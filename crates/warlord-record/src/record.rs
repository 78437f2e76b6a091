use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The five named base attributes every record must carry, in canonical order.
pub const BASE_ATTRIBUTES: [&str; 5] = ["command", "force", "intelligence", "politics", "charm"];

/// A character's stat/skill/equipment snapshot submitted for power estimation.
///
/// Records are immutable once handed to the engine. `base_stats` is kept as a
/// mapping rather than fixed fields because the wire payload is
/// semi-structured; completeness of the five named attributes is checked at
/// feature-extraction time, not here.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    /// Character level (non-negative).
    pub level: u32,
    /// General grade (non-negative).
    #[serde(rename = "generalGrade")]
    pub grade: u32,
    /// Named integer attributes; must include all of [`BASE_ATTRIBUTES`].
    pub base_stats: BTreeMap<String, i64>,
    /// Skill slots keyed by slot name. A slot is filled iff its text is
    /// non-empty after trimming.
    pub skills: BTreeMap<String, String>,
    /// Equipment slots keyed by slot name.
    pub equipment: BTreeMap<String, EquipmentSlot>,
}

/// A single equipment slot. Items without an explicit grade count as grade 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct EquipmentSlot {
    #[serde(default)]
    pub grade: i64,
}

impl CharacterRecord {
    /// Looks up one of the named base attributes.
    #[must_use]
    pub fn base_stat(&self, attribute: &str) -> Option<i64> {
        self.base_stats.get(attribute).copied()
    }

    /// Number of skill slots whose text is non-empty after trimming.
    #[must_use]
    pub fn filled_skill_count(&self) -> usize {
        self.skills
            .values()
            .filter(|text| !text.trim().is_empty())
            .count()
    }

    /// Sum of equipment grades. Slots with grade <= 0 contribute 0.
    #[must_use]
    pub fn equipment_grade_sum(&self) -> i64 {
        self.equipment
            .values()
            .map(|slot| slot.grade.max(0))
            .sum()
    }

    /// Number of equipment slots with grade > 0.
    #[must_use]
    pub fn equipment_count(&self) -> usize {
        self.equipment.values().filter(|slot| slot.grade > 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> CharacterRecord {
        serde_json::from_str(
            r#"{
                "level": 12,
                "generalGrade": 4,
                "baseStats": {
                    "command": 80, "force": 75, "intelligence": 60,
                    "politics": 40, "charm": 55
                },
                "skills": {"slot1": "Charge", "slot2": "  ", "slot3": "Rally"},
                "equipment": {
                    "weapon": {"grade": 4},
                    "armor": {"grade": 0},
                    "mount": {},
                    "relic": {"grade": -2}
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn wire_field_names() {
        let record = sample_record();
        assert_eq!(record.level, 12);
        assert_eq!(record.grade, 4);
        assert_eq!(record.base_stat("command"), Some(80));

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("generalGrade").is_some());
        assert!(json.get("baseStats").is_some());
        assert!(json.get("grade").is_none());
    }

    #[test]
    fn missing_skills_is_a_shape_error() {
        let result: Result<CharacterRecord, _> = serde_json::from_str(
            r#"{"level": 1, "generalGrade": 1, "baseStats": {}, "equipment": {}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn skill_slots_trim_whitespace() {
        let record = sample_record();
        assert_eq!(record.filled_skill_count(), 2);
    }

    #[test]
    fn equipment_totals_ignore_non_positive_grades() {
        let record = sample_record();
        assert_eq!(record.equipment_grade_sum(), 4);
        assert_eq!(record.equipment_count(), 1);
    }

    #[test]
    fn equipment_grade_defaults_to_zero() {
        let slot: EquipmentSlot = serde_json::from_str("{}").unwrap();
        assert_eq!(slot.grade, 0);
    }
}
