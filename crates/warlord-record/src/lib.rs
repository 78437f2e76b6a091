//! Character record data model for the warlord power estimation engine.
//!
//! This crate defines the input payload shared by every other crate in the
//! workspace: a snapshot of a character's level, grade, base stats, skills,
//! and equipment. The serde representation matches the wire field names used
//! by the surrounding CRUD layer (`baseStats`, `generalGrade`, ...), so a
//! record deserialized from a request body can be handed to the engine as-is.
//!
//! # Examples
//!
//! ```
//! use warlord_record::CharacterRecord;
//!
//! let json = r#"{
//!     "level": 10,
//!     "generalGrade": 3,
//!     "baseStats": {"command": 80, "force": 75, "intelligence": 60, "politics": 40, "charm": 55},
//!     "skills": {"slot1": "Charge", "slot2": ""},
//!     "equipment": {"weapon": {"grade": 4}, "armor": {}}
//! }"#;
//! let record: CharacterRecord = serde_json::from_str(json).unwrap();
//! assert_eq!(record.filled_skill_count(), 1);
//! assert_eq!(record.equipment_grade_sum(), 4);
//! ```

pub use self::record::{BASE_ATTRIBUTES, CharacterRecord, EquipmentSlot};

mod record;
