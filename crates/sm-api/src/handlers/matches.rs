use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use sm_common::api::{CandidateMatchRequest, MatchBatchResponse, ProjectMatchRequest};
use sm_common::matching::{ProjectMatch, UserMatch};
use tracing::info;

use crate::error::ApiError;
use crate::SharedState;

/// `POST /api/matches/projects`: open projects that fit the posted skill profile.
pub async fn match_projects(
    State(state): State<SharedState>,
    payload: Result<Json<ProjectMatchRequest>, JsonRejection>,
) -> Result<Json<MatchBatchResponse<ProjectMatch>>, ApiError> {
    let Json(request) = payload?;
    let min_score = request
        .min_score
        .unwrap_or(state.engine.config().default_min_score);

    let batch = state
        .engine
        .find_matching_projects(&request.skills, Some(min_score))
        .await?;

    info!(
        run_id = %batch.run_id,
        matches = batch.matches.len(),
        skipped = batch.skipped.len(),
        "matched projects"
    );

    Ok(Json(MatchBatchResponse::from_batch(batch, min_score)))
}

/// `POST /api/matches/candidates`: users whose skills fit the posted requirements.
pub async fn match_candidates(
    State(state): State<SharedState>,
    payload: Result<Json<CandidateMatchRequest>, JsonRejection>,
) -> Result<Json<MatchBatchResponse<UserMatch>>, ApiError> {
    let Json(request) = payload?;
    let min_score = request
        .min_score
        .unwrap_or(state.engine.config().default_min_score);

    let batch = state
        .engine
        .find_matching_candidates(&request.required_skills, Some(min_score))
        .await?;

    info!(
        run_id = %batch.run_id,
        matches = batch.matches.len(),
        skipped = batch.skipped.len(),
        "matched candidates"
    );

    Ok(Json(MatchBatchResponse::from_batch(batch, min_score)))
}
