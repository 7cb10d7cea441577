use axum::{Extension, Json, extract::State, response::IntoResponse};
use tracing::error;
use uuid::Uuid;

use jobdeck_db::Database;
use jobdeck_types::api::{Claims, SwipeRequest, SwipeResponse};
use jobdeck_types::models::{Role, SwipeDirection, SwipeTarget};

use crate::actor::{Actor, resolve_actor};
use crate::auth::AppState;
use crate::error::ApiError;

#[derive(Debug)]
pub struct SwipeOutcome {
    pub matched: bool,
    pub message: &'static str,
}

/// Records exactly one swipe row, then, on a right swipe, checks whether the
/// opposite party has already right-swiped the complementary target and
/// creates the match if so. The two role branches are symmetric: whichever
/// side's right swipe arrives second produces the match.
pub fn record_swipe(
    db: &Database,
    actor: &Actor,
    req: &SwipeRequest,
) -> Result<SwipeOutcome, ApiError> {
    let direction = SwipeDirection::from_db(&req.direction)
        .ok_or(ApiError::InvalidRequest("invalid direction"))?;

    match actor.role {
        Role::JobSeeker => swipe_on_job(db, actor, direction, req),
        Role::Recruiter => swipe_on_candidate(db, actor, direction, req),
    }
}

fn swipe_on_job(
    db: &Database,
    actor: &Actor,
    direction: SwipeDirection,
    req: &SwipeRequest,
) -> Result<SwipeOutcome, ApiError> {
    let job_id = req
        .job_id
        .ok_or(ApiError::InvalidRequest("job_id required"))?;

    // All lookups happen before the insert so an error leaves no swipe row.
    let job = db
        .get_job(&job_id.to_string())?
        .ok_or(ApiError::NotFound("job not found"))?;
    let seeker_id = actor
        .job_seeker_id
        .as_deref()
        .ok_or(ApiError::NotFound("job seeker profile not found"))?;

    db.insert_swipe(
        &Uuid::new_v4().to_string(),
        &actor.profile_id,
        direction,
        &SwipeTarget::Job(job_id),
    )?;

    if direction == SwipeDirection::Right {
        // The opposite party is the job's owning recruiter; their earlier
        // right swipe on this candidate completes the pair.
        let owner = db.get_recruiter_profile(&job.recruiter_id)?.ok_or_else(|| {
            anyhow::anyhow!("job {} references missing recruiter {}", job.id, job.recruiter_id)
        })?;
        let seeker_uuid: Uuid = seeker_id
            .parse()
            .map_err(|_| anyhow::anyhow!("corrupt job seeker id '{}'", seeker_id))?;

        if db.has_right_swipe(&owner.profile_id, &SwipeTarget::Candidate(seeker_uuid))? {
            db.insert_match_or_existing(&Uuid::new_v4().to_string(), &job.id, seeker_id)?;
            return Ok(SwipeOutcome {
                matched: true,
                message: "Match created!",
            });
        }
    }

    Ok(SwipeOutcome {
        matched: false,
        message: "Swipe recorded",
    })
}

fn swipe_on_candidate(
    db: &Database,
    actor: &Actor,
    direction: SwipeDirection,
    req: &SwipeRequest,
) -> Result<SwipeOutcome, ApiError> {
    let job_id = req
        .job_id
        .ok_or(ApiError::InvalidRequest("job_id required"))?;
    let job_seeker_id = req
        .job_seeker_id
        .ok_or(ApiError::InvalidRequest("job_seeker_id required"))?;

    let job = db
        .get_job(&job_id.to_string())?
        .ok_or(ApiError::NotFound("job not found"))?;
    let candidate = db
        .get_job_seeker_profile(&job_seeker_id.to_string())?
        .ok_or(ApiError::NotFound("job seeker not found"))?;

    db.insert_swipe(
        &Uuid::new_v4().to_string(),
        &actor.profile_id,
        direction,
        &SwipeTarget::Candidate(job_seeker_id),
    )?;

    if direction == SwipeDirection::Right {
        // The candidate's earlier right swipe on this job completes the pair.
        if db.has_right_swipe(&candidate.profile_id, &SwipeTarget::Job(job_id))? {
            db.insert_match_or_existing(&Uuid::new_v4().to_string(), &job.id, &candidate.id)?;
            return Ok(SwipeOutcome {
                matched: true,
                message: "Match created!",
            });
        }
    }

    Ok(SwipeOutcome {
        matched: false,
        message: "Swipe recorded",
    })
}

pub async fn swipe(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SwipeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Run blocking DB work off the async runtime
    let outcome = tokio::task::spawn_blocking(move || {
        let actor = resolve_actor(&state.db, &claims)?;
        record_swipe(&state.db, &actor, &req)
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal(anyhow::anyhow!("blocking task failed"))
    })??;

    Ok(Json(SwipeResponse {
        matched: outcome.matched,
        message: outcome.message.to_string(),
    }))
}
