use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::{error, warn};
use uuid::Uuid;

use jobdeck_db::Database;
use jobdeck_db::models::MatchRow;
use jobdeck_types::api::{Claims, MatchResponse};
use jobdeck_types::models::Role;

use crate::actor::{Actor, resolve_actor};
use crate::auth::AppState;
use crate::error::ApiError;
use crate::responses::match_response;

/// Active matches visible to the actor: a job seeker sees matches on their
/// own candidate profile, a recruiter sees matches across all of their jobs.
/// A missing role profile degrades to nothing visible.
pub fn visible_matches(db: &Database, actor: &Actor) -> Result<Vec<MatchRow>, ApiError> {
    match actor.role {
        Role::JobSeeker => match actor.job_seeker_id.as_deref() {
            Some(id) => Ok(db.list_matches_for_job_seeker(id)?),
            None => Ok(Vec::new()),
        },
        Role::Recruiter => match actor.recruiter_id.as_deref() {
            Some(id) => Ok(db.list_matches_for_recruiter(id)?),
            None => Ok(Vec::new()),
        },
    }
}

pub(crate) fn is_participant(
    db: &Database,
    actor: &Actor,
    m: &MatchRow,
) -> Result<bool, ApiError> {
    match actor.role {
        Role::JobSeeker => Ok(actor.job_seeker_id.as_deref() == Some(m.job_seeker_id.as_str())),
        Role::Recruiter => {
            let Some(recruiter_id) = actor.recruiter_id.as_deref() else {
                return Ok(false);
            };
            let Some(job) = db.get_job(&m.job_id)? else {
                return Ok(false);
            };
            Ok(job.recruiter_id == recruiter_id)
        }
    }
}

pub fn mark_match_viewed(db: &Database, actor: &Actor, match_id: Uuid) -> Result<(), ApiError> {
    let m = db
        .get_match(&match_id.to_string())?
        .ok_or(ApiError::NotFound("match not found"))?;

    if !is_participant(db, actor, &m)? {
        return Err(ApiError::Forbidden("not a participant in this match"));
    }

    db.set_match_viewed(&m.id, actor.role)?;
    Ok(())
}

pub async fn list_matches(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let responses = tokio::task::spawn_blocking(move || {
        // A caller with no resolvable profile sees an empty list, not an
        // error.
        let actor = match resolve_actor(&state.db, &claims) {
            Ok(actor) => actor,
            Err(ApiError::NotFound(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let rows = visible_matches(&state.db, &actor)?;
        let mut out: Vec<MatchResponse> = Vec::with_capacity(rows.len());
        for row in &rows {
            let Some(job) = state.db.get_job(&row.job_id)? else {
                warn!("Match '{}' references missing job '{}'", row.id, row.job_id);
                continue;
            };
            let Some(candidate) = state.db.get_candidate(&row.job_seeker_id)? else {
                warn!(
                    "Match '{}' references missing candidate '{}'",
                    row.id, row.job_seeker_id
                );
                continue;
            };
            out.push(match_response(row, &job, &candidate));
        }
        Ok(out)
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal(anyhow::anyhow!("blocking task failed"))
    })??;

    Ok(Json(responses))
}

pub async fn mark_viewed(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    tokio::task::spawn_blocking(move || {
        let actor = resolve_actor(&state.db, &claims)?;
        mark_match_viewed(&state.db, &actor, match_id)
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal(anyhow::anyhow!("blocking task failed"))
    })??;

    Ok(Json(serde_json::json!({ "viewed": true })))
}
