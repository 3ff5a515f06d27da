pub mod api;
pub mod db;
pub mod directory;
pub mod logging;
pub mod matching;
pub mod run_id;
pub mod skill;

use serde::{Deserialize, Serialize};

pub use skill::{
    ProficiencyLevel, Skill, SkillProfile, SkillRecord, SkillRequirement, ValidationError,
};

/// An open project and the skills it asks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub required_skills: Vec<SkillRequirement>,
}

/// A user and the skills they currently have.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub skills: Vec<SkillProfile>,
}

/// Project as read from a directory, before its skills are validated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: i64,
    pub required_skills: Vec<SkillRecord>,
}

/// User as read from a directory, before their skills are validated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub skills: Vec<SkillRecord>,
}

impl TryFrom<ProjectRecord> for Project {
    type Error = ValidationError;

    fn try_from(record: ProjectRecord) -> Result<Self, Self::Error> {
        Ok(Project {
            id: record.id,
            required_skills: skill::validate_skills(record.required_skills)?,
        })
    }
}

impl TryFrom<UserRecord> for User {
    type Error = ValidationError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        Ok(User {
            id: record.id,
            skills: skill::validate_skills(record.skills)?,
        })
    }
}
