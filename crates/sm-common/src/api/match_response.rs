use serde::{Deserialize, Serialize};

use crate::matching::{MatchBatch, MinScore, SkippedRecord};

/// Response body for both match endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchBatchResponse<T> {
    pub run_id: String,
    /// Threshold that was applied
    pub min_score: f64,
    pub total: usize,
    /// Sorted by score, highest first
    pub matches: Vec<T>,
    /// Directory records that were malformed and left out
    pub skipped: Vec<SkippedRecord>,
}

impl<T> MatchBatchResponse<T> {
    pub fn from_batch(batch: MatchBatch<T>, min_score: MinScore) -> Self {
        Self {
            run_id: batch.run_id,
            min_score: min_score.value(),
            total: batch.matches.len(),
            matches: batch.matches,
            skipped: batch.skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{MatchBreakdown, ProjectMatch};
    use crate::Project;

    #[test]
    fn builds_response_from_batch() {
        let batch = MatchBatch {
            run_id: "01J0000000000000000000TEST".into(),
            matches: vec![ProjectMatch {
                project: Project {
                    id: 4,
                    required_skills: vec![],
                },
                match_breakdown: MatchBreakdown {
                    score: 88.0,
                    ..MatchBreakdown::default()
                },
            }],
            skipped: vec![SkippedRecord {
                id: 9,
                reason: "unknown proficiency level: \"GURU\"".into(),
            }],
        };

        let response = MatchBatchResponse::from_batch(batch, MinScore::default());

        assert_eq!(response.total, 1);
        assert_eq!(response.min_score, 60.0);
        assert_eq!(response.skipped[0].id, 9);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["matches"][0]["project"]["id"], 4);
        assert_eq!(json["matches"][0]["match_breakdown"]["score"], 88.0);
    }
}
