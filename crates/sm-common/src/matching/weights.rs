/// Weight per proficiency level, indexed by `ProficiencyLevel::ordinal()`.
/// BEGINNER / INTERMEDIATE / ADVANCED / EXPERT
pub const LEVEL_WEIGHTS: [f64; 4] = [0.3, 0.6, 0.8, 1.0];

/// Partial matches below this similarity are ignored.
pub const SIMILARITY_THRESHOLD: f64 = 0.7;

/// A partial match counts for half of an exact match.
pub const PARTIAL_MATCH_WEIGHT: f64 = 0.5;

pub const MAX_SCORE: f64 = 100.0;

/// How level and experience are blended into `experience_match` for an exact match.
pub const EXPERIENCE_MATCH_WEIGHTS: ExperienceMatchWeights = ExperienceMatchWeights {
    level: 0.5,
    experience: 0.5,
};

#[derive(Debug, Clone, Copy)]
pub struct ExperienceMatchWeights {
    pub level: f64,
    pub experience: f64,
}

impl ExperienceMatchWeights {
    pub fn sum(&self) -> f64 {
        self.level + self.experience
    }

    pub fn combine(&self, level_score: f64, experience_score: f64) -> f64 {
        level_score * self.level + experience_score * self.experience
    }
}
