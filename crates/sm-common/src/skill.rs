use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matching::weights::LEVEL_WEIGHTS;

/// Input that must be rejected before any scoring happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("skill name must not be blank")]
    BlankSkillName,
    #[error("unknown proficiency level: {0:?}")]
    UnknownProficiency(String),
    #[error("years of experience for {skill:?} must be >= 0 (got {years})")]
    NegativeExperience { skill: String, years: f64 },
    #[error("years of experience for {skill:?} must be a finite number")]
    NonFiniteExperience { skill: String },
    #[error("minimum score must be within 0..=100 (got {0})")]
    MinScoreOutOfRange(f64),
}

/// Ordinal proficiency scale. The discriminant indexes [`LEVEL_WEIGHTS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
#[repr(u8)]
pub enum ProficiencyLevel {
    Beginner = 0,
    Intermediate = 1,
    Advanced = 2,
    Expert = 3,
}

impl ProficiencyLevel {
    pub const ALL: [ProficiencyLevel; 4] = [
        ProficiencyLevel::Beginner,
        ProficiencyLevel::Intermediate,
        ProficiencyLevel::Advanced,
        ProficiencyLevel::Expert,
    ];

    pub const fn ordinal(self) -> usize {
        self as usize
    }

    pub const fn weight(self) -> f64 {
        LEVEL_WEIGHTS[self.ordinal()]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ProficiencyLevel::Beginner => "BEGINNER",
            ProficiencyLevel::Intermediate => "INTERMEDIATE",
            ProficiencyLevel::Advanced => "ADVANCED",
            ProficiencyLevel::Expert => "EXPERT",
        }
    }
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProficiencyLevel {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::UnknownProficiency(raw.to_string()))
    }
}

impl TryFrom<String> for ProficiencyLevel {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Skill entry as it arrives from storage or over the wire, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub name: String,
    pub level: String,
    pub years_of_experience: f64,
}

impl SkillRecord {
    pub fn new(name: impl Into<String>, level: impl Into<String>, years_of_experience: f64) -> Self {
        Self {
            name: name.into(),
            level: level.into(),
            years_of_experience,
        }
    }
}

/// A validated skill. Used both for a person's skill profile and for a
/// project's requirements; the two share one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SkillRecord")]
pub struct Skill {
    name: String,
    level: ProficiencyLevel,
    years_of_experience: f64,
}

pub type SkillProfile = Skill;
pub type SkillRequirement = Skill;

impl Skill {
    pub fn new(
        name: impl Into<String>,
        level: ProficiencyLevel,
        years_of_experience: f64,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::BlankSkillName);
        }
        if !years_of_experience.is_finite() {
            return Err(ValidationError::NonFiniteExperience { skill: name });
        }
        if years_of_experience < 0.0 {
            return Err(ValidationError::NegativeExperience {
                skill: name,
                years: years_of_experience,
            });
        }

        Ok(Self {
            name,
            level,
            years_of_experience,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> ProficiencyLevel {
        self.level
    }

    pub fn years_of_experience(&self) -> f64 {
        self.years_of_experience
    }
}

impl TryFrom<SkillRecord> for Skill {
    type Error = ValidationError;

    fn try_from(record: SkillRecord) -> Result<Self, Self::Error> {
        let level = record.level.parse()?;
        Skill::new(record.name, level, record.years_of_experience)
    }
}

/// Validate a whole skill list, stopping at the first malformed entry.
pub fn validate_skills(records: Vec<SkillRecord>) -> Result<Vec<Skill>, ValidationError> {
    records.into_iter().map(Skill::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_by_ordinal() {
        assert!(ProficiencyLevel::Beginner < ProficiencyLevel::Intermediate);
        assert!(ProficiencyLevel::Intermediate < ProficiencyLevel::Advanced);
        assert!(ProficiencyLevel::Advanced < ProficiencyLevel::Expert);
        assert_eq!(ProficiencyLevel::Expert.ordinal(), 3);
    }

    #[test]
    fn level_weights_follow_fixed_table() {
        assert_eq!(ProficiencyLevel::Beginner.weight(), 0.3);
        assert_eq!(ProficiencyLevel::Intermediate.weight(), 0.6);
        assert_eq!(ProficiencyLevel::Advanced.weight(), 0.8);
        assert_eq!(ProficiencyLevel::Expert.weight(), 1.0);
    }

    #[test]
    fn parses_levels_case_insensitively() {
        assert_eq!(
            " advanced ".parse::<ProficiencyLevel>(),
            Ok(ProficiencyLevel::Advanced)
        );
        assert_eq!("EXPERT".parse::<ProficiencyLevel>(), Ok(ProficiencyLevel::Expert));
        assert_eq!(
            "guru".parse::<ProficiencyLevel>(),
            Err(ValidationError::UnknownProficiency("guru".into()))
        );
    }

    #[test]
    fn rejects_negative_and_non_finite_years() {
        assert!(matches!(
            Skill::new("Rust", ProficiencyLevel::Advanced, -1.0),
            Err(ValidationError::NegativeExperience { .. })
        ));
        assert!(matches!(
            Skill::new("Rust", ProficiencyLevel::Advanced, f64::NAN),
            Err(ValidationError::NonFiniteExperience { .. })
        ));
        assert!(Skill::new("Rust", ProficiencyLevel::Advanced, 0.0).is_ok());
    }

    #[test]
    fn rejects_blank_names() {
        assert_eq!(
            Skill::new("   ", ProficiencyLevel::Beginner, 1.0),
            Err(ValidationError::BlankSkillName)
        );
    }

    #[test]
    fn deserialization_validates_records() {
        let ok: Skill = serde_json::from_str(
            r#"{"name":"React","level":"advanced","years_of_experience":2}"#,
        )
        .unwrap();
        assert_eq!(ok.level(), ProficiencyLevel::Advanced);
        assert_eq!(ok.years_of_experience(), 2.0);

        let unknown = serde_json::from_str::<Skill>(
            r#"{"name":"React","level":"NINJA","years_of_experience":2}"#,
        );
        assert!(unknown.unwrap_err().to_string().contains("NINJA"));

        let negative = serde_json::from_str::<Skill>(
            r#"{"name":"React","level":"EXPERT","years_of_experience":-3}"#,
        );
        assert!(negative.is_err());
    }

    #[test]
    fn serializes_level_as_upper_case_name() {
        let skill = Skill::new("Go", ProficiencyLevel::Intermediate, 1.5).unwrap();
        let json = serde_json::to_value(&skill).unwrap();
        assert_eq!(json["level"], "INTERMEDIATE");
        assert_eq!(json["name"], "Go");
    }

    #[test]
    fn validate_skills_stops_at_first_bad_entry() {
        let err = validate_skills(vec![
            SkillRecord::new("Rust", "EXPERT", 4.0),
            SkillRecord::new("SQL", "wizard", 1.0),
        ])
        .unwrap_err();
        assert_eq!(err, ValidationError::UnknownProficiency("wizard".into()));
    }
}
