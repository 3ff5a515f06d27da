pub mod breakdown;
pub mod experience;
pub mod level;
pub mod pipeline;
pub mod similarity;
pub mod weights;

pub use breakdown::{calculate_match_breakdown, MatchBreakdown, MatchedSkill, PartialMatch};
pub use experience::experience_score;
pub use level::level_score;
pub use pipeline::{
    MatchBatch, MatchingEngine, MatchingEngineConfig, MinScore, ProjectMatch, SkippedRecord,
    UserMatch,
};
pub use similarity::{is_similar, normalize_skill_name, skill_similarity};
