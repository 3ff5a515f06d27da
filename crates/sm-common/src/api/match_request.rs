use serde::Deserialize;

use crate::{matching::MinScore, skill::Skill};

/// Find open projects for a person's skill profile.
///
/// Skills and the threshold are validated while deserializing, so a request
/// that reaches the engine is already well formed.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectMatchRequest {
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub min_score: Option<MinScore>,
}

/// Find users whose skills fit a project's requirements.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateMatchRequest {
    pub required_skills: Vec<Skill>,
    #[serde(default)]
    pub min_score: Option<MinScore>,
}
