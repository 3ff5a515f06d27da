use std::{cmp::Ordering, time::Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::breakdown::{calculate_match_breakdown, MatchBreakdown};
use crate::{
    directory::{DirectoryRecord, ProjectDirectory, UserDirectory},
    run_id,
    skill::{Skill, ValidationError},
    Project, User,
};

const DEFAULT_MIN_SCORE: f64 = 60.0;

/// Lowest score a match must reach to be returned, within 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct MinScore(f64);

impl MinScore {
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if value.is_finite() && (0.0..=100.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::MinScoreOutOfRange(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for MinScore {
    fn default() -> Self {
        Self(DEFAULT_MIN_SCORE)
    }
}

impl TryFrom<f64> for MinScore {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MinScore> for f64 {
    fn from(value: MinScore) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchingEngineConfig {
    /// Threshold used when the caller does not pass one.
    pub default_min_score: MinScore,
}

impl MatchingEngineConfig {
    /// Reads `SM_MIN_MATCH_SCORE`; invalid values fall back to the default.
    pub fn from_env() -> Self {
        let default_min_score = match std::env::var("SM_MIN_MATCH_SCORE") {
            Ok(raw) => match raw.parse::<f64>().map(MinScore::new) {
                Ok(Ok(min_score)) => min_score,
                _ => {
                    warn!(value = %raw, "invalid SM_MIN_MATCH_SCORE; using default");
                    MinScore::default()
                }
            },
            Err(_) => MinScore::default(),
        };

        Self { default_min_score }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMatch {
    pub project: Project,
    pub match_breakdown: MatchBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMatch {
    pub user: User,
    pub match_breakdown: MatchBreakdown,
}

/// A directory record that could not be scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRecord {
    pub id: i64,
    pub reason: String,
}

/// Result of one batch call: ranked matches plus the records that were skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchBatch<T> {
    pub run_id: String,
    pub matches: Vec<T>,
    pub skipped: Vec<SkippedRecord>,
}

trait Scored {
    fn score(&self) -> f64;
}

impl Scored for ProjectMatch {
    fn score(&self) -> f64 {
        self.match_breakdown.score
    }
}

impl Scored for UserMatch {
    fn score(&self) -> f64 {
        self.match_breakdown.score
    }
}

pub struct MatchingEngine<D> {
    directory: D,
    config: MatchingEngineConfig,
}

impl<D> MatchingEngine<D> {
    pub fn new(directory: D, config: MatchingEngineConfig) -> Self {
        Self { directory, config }
    }

    pub fn with_default_config(directory: D) -> Self {
        Self::new(directory, MatchingEngineConfig::default())
    }

    pub fn config(&self) -> &MatchingEngineConfig {
        &self.config
    }
}

impl<D: ProjectDirectory> MatchingEngine<D> {
    /// Score every open project against `profile` and return those reaching
    /// `min_score`, best first.
    #[instrument(skip(self, profile), fields(profile_skills = profile.len()))]
    pub async fn find_matching_projects(
        &self,
        profile: &[Skill],
        min_score: Option<MinScore>,
    ) -> Result<MatchBatch<ProjectMatch>, <D as ProjectDirectory>::Error> {
        let min_score = min_score.unwrap_or(self.config.default_min_score);
        let started = Instant::now();

        let records = self.directory.list_open_projects().await?;
        let (projects, skipped) = validate_records::<_, Project>(records, "project");

        let scored: Vec<ProjectMatch> = projects
            .into_iter()
            .map(|project| {
                let match_breakdown = calculate_match_breakdown(profile, &project.required_skills);
                debug!(
                    project_id = project.id,
                    breakdown = %match_breakdown.summary(),
                    "scored project"
                );
                ProjectMatch {
                    project,
                    match_breakdown,
                }
            })
            .collect();

        Ok(finish_batch("project", scored, skipped, min_score, started))
    }
}

impl<D: UserDirectory> MatchingEngine<D> {
    /// Score every user against `requirements` and return those reaching
    /// `min_score`, best first.
    #[instrument(skip(self, requirements), fields(required_skills = requirements.len()))]
    pub async fn find_matching_candidates(
        &self,
        requirements: &[Skill],
        min_score: Option<MinScore>,
    ) -> Result<MatchBatch<UserMatch>, <D as UserDirectory>::Error> {
        let min_score = min_score.unwrap_or(self.config.default_min_score);
        let started = Instant::now();

        let records = self.directory.list_users_with_skills().await?;
        let (users, skipped) = validate_records::<_, User>(records, "user");

        let scored: Vec<UserMatch> = users
            .into_iter()
            .map(|user| {
                let match_breakdown = calculate_match_breakdown(&user.skills, requirements);
                debug!(
                    user_id = user.id,
                    breakdown = %match_breakdown.summary(),
                    "scored candidate"
                );
                UserMatch {
                    user,
                    match_breakdown,
                }
            })
            .collect();

        Ok(finish_batch("user", scored, skipped, min_score, started))
    }
}

/// Split directory records into valid entities and skipped ones. A malformed
/// record never aborts the batch.
fn validate_records<R, T>(records: Vec<R>, kind: &'static str) -> (Vec<T>, Vec<SkippedRecord>)
where
    R: DirectoryRecord,
    T: TryFrom<R, Error = ValidationError>,
{
    let mut valid = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();

    for record in records {
        let id = record.record_id();
        match T::try_from(record) {
            Ok(entity) => valid.push(entity),
            Err(err) => {
                warn!(kind, id, error = %err, "skipping malformed record");
                skipped.push(SkippedRecord {
                    id,
                    reason: err.to_string(),
                });
            }
        }
    }

    (valid, skipped)
}

/// Drop matches below `min_score` and order the rest by score, highest first.
/// The sort is stable, so equal scores keep directory order. `-0.0` and `0.0`
/// compare equal here.
fn rank_matches<M: Scored>(mut matches: Vec<M>, min_score: MinScore) -> Vec<M> {
    matches.retain(|m| m.score() >= min_score.value());
    matches.sort_by(|a, b| {
        b.score()
            .partial_cmp(&a.score())
            .unwrap_or(Ordering::Equal)
    });
    matches
}

fn finish_batch<M: Scored>(
    kind: &'static str,
    scored: Vec<M>,
    skipped: Vec<SkippedRecord>,
    min_score: MinScore,
    started: Instant,
) -> MatchBatch<M> {
    let evaluated = scored.len();
    let matches = rank_matches(scored, min_score);
    let run_id = run_id::generate();
    let elapsed = started.elapsed();

    metrics::counter!("skill_match_batches_total", "kind" => kind).increment(1);
    metrics::counter!("skill_match_results_total", "kind" => kind).increment(matches.len() as u64);
    metrics::counter!("skill_match_skipped_records_total", "kind" => kind)
        .increment(skipped.len() as u64);
    metrics::histogram!("skill_match_batch_duration_seconds", "kind" => kind)
        .record(elapsed.as_secs_f64());

    info!(
        run_id = %run_id,
        kind,
        evaluated,
        matched = matches.len(),
        skipped = skipped.len(),
        min_score = min_score.value(),
        elapsed_ms = elapsed.as_millis() as u64,
        "match batch completed"
    );

    MatchBatch {
        run_id,
        matches,
        skipped,
    }
}
