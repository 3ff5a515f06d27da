use serde::{Deserialize, Serialize};

use super::{
    experience::experience_score,
    level::level_score,
    similarity::{normalize_skill_name, normalized_similarity},
    weights::{EXPERIENCE_MATCH_WEIGHTS, MAX_SCORE, PARTIAL_MATCH_WEIGHT, SIMILARITY_THRESHOLD},
};
use crate::skill::{ProficiencyLevel, Skill};

/// A requirement satisfied by a profile skill with the same normalized name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedSkill {
    pub name: String,
    pub user_level: ProficiencyLevel,
    pub project_level: ProficiencyLevel,
    /// Average of level and experience compatibility, 0.0〜1.0
    pub experience_match: f64,
}

/// A requirement approximated by a differently named profile skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialMatch {
    /// Requirement name
    pub name: String,
    /// Profile skill name that approximated it
    pub matched_with: String,
    pub user_level: ProficiencyLevel,
    pub project_level: ProficiencyLevel,
    /// Always >= SIMILARITY_THRESHOLD
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchBreakdown {
    /// 0.0〜100.0
    pub score: f64,
    pub matched_skills: Vec<MatchedSkill>,
    pub missing_skills: Vec<String>,
    pub partial_matches: Vec<PartialMatch>,
}

impl MatchBreakdown {
    pub fn summary(&self) -> String {
        let required = self.matched_skills.len() + self.missing_skills.len();
        format!(
            "{:.1} points: {}/{} required skills matched (missing: {}) / {} partial",
            self.score,
            self.matched_skills.len(),
            required,
            if self.missing_skills.is_empty() {
                "none".to_string()
            } else {
                self.missing_skills.join(", ")
            },
            self.partial_matches.len()
        )
    }
}

/// Score one skill profile against one set of requirements.
///
/// Pure: identical inputs always produce identical output.
pub fn calculate_match_breakdown(user_skills: &[Skill], project_skills: &[Skill]) -> MatchBreakdown {
    let user_names: Vec<String> = user_skills
        .iter()
        .map(|skill| normalize_skill_name(skill.name()))
        .collect();
    let project_names: Vec<String> = project_skills
        .iter()
        .map(|skill| normalize_skill_name(skill.name()))
        .collect();

    let mut matched_skills = Vec::new();
    let mut missing_skills = Vec::new();

    for (requirement, requirement_name) in project_skills.iter().zip(&project_names) {
        match user_names.iter().position(|name| name == requirement_name) {
            Some(idx) => matched_skills.push(exact_match(&user_skills[idx], requirement)),
            None => missing_skills.push(requirement.name().to_string()),
        }
    }

    // An exactly matched requirement can still collect partial credit from a
    // differently named profile skill (e.g. "React" plus "ReactJS").
    let mut partial_matches = Vec::new();
    for (user_skill, user_name) in user_skills.iter().zip(&user_names) {
        for (requirement, requirement_name) in project_skills.iter().zip(&project_names) {
            if user_name == requirement_name {
                continue;
            }
            let Some(similarity) = normalized_similarity(user_name, requirement_name) else {
                continue;
            };
            if similarity < SIMILARITY_THRESHOLD {
                continue;
            }

            partial_matches.push(PartialMatch {
                name: requirement.name().to_string(),
                matched_with: user_skill.name().to_string(),
                user_level: user_skill.level(),
                project_level: requirement.level(),
                similarity,
            });
        }
    }

    let score = total_score(&matched_skills, &partial_matches, project_skills.len());

    MatchBreakdown {
        score,
        matched_skills,
        missing_skills,
        partial_matches,
    }
}

fn exact_match(user_skill: &Skill, requirement: &Skill) -> MatchedSkill {
    let level = level_score(user_skill.level(), requirement.level());
    let experience = experience_score(
        user_skill.years_of_experience(),
        requirement.years_of_experience(),
    );

    MatchedSkill {
        name: requirement.name().to_string(),
        user_level: user_skill.level(),
        project_level: requirement.level(),
        experience_match: EXPERIENCE_MATCH_WEIGHTS.combine(level, experience),
    }
}

fn total_score(
    matched_skills: &[MatchedSkill],
    partial_matches: &[PartialMatch],
    requirement_count: usize,
) -> f64 {
    if requirement_count == 0 {
        return 0.0;
    }

    // fold from +0.0: an empty f64 sum is -0.0, which would sort below +0.0
    let exact = matched_skills
        .iter()
        .fold(0.0, |acc, m| acc + m.experience_match);
    let partial = partial_matches.iter().fold(0.0, |acc, p| acc + p.similarity);
    let raw = (exact + PARTIAL_MATCH_WEIGHT * partial) / requirement_count as f64 * MAX_SCORE;

    raw.clamp(0.0, MAX_SCORE)
}
