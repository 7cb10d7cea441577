use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::error;
use uuid::Uuid;

use jobdeck_types::api::{Claims, CreateJobRequest, JobResponse};
use jobdeck_types::models::Role;

use crate::actor::resolve_actor;
use crate::auth::AppState;
use crate::error::ApiError;
use crate::responses::job_response;

/// Recruiters see their own postings, active or not; job seekers see every
/// active posting.
pub async fn list_jobs(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = tokio::task::spawn_blocking(move || {
        let actor = match resolve_actor(&state.db, &claims) {
            Ok(actor) => actor,
            Err(ApiError::NotFound(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        match actor.role {
            Role::Recruiter => match actor.recruiter_id.as_deref() {
                Some(id) => Ok(state.db.list_jobs_for_recruiter(id)?),
                None => Ok(Vec::new()),
            },
            Role::JobSeeker => Ok(state.db.list_active_jobs()?),
        }
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal(anyhow::anyhow!("blocking task failed"))
    })??;

    let jobs: Vec<JobResponse> = rows.iter().map(job_response).collect();
    Ok(Json(jobs))
}

pub async fn create_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateJobRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let row = tokio::task::spawn_blocking(move || {
        let actor = resolve_actor(&state.db, &claims)?;
        if actor.role != Role::Recruiter {
            return Err(ApiError::Forbidden("only recruiters can create jobs"));
        }
        let recruiter_id = actor
            .recruiter_id
            .as_deref()
            .ok_or(ApiError::Forbidden("recruiter profile not found"))?;

        let id = Uuid::new_v4().to_string();
        state.db.insert_job(
            &id,
            recruiter_id,
            &req.title,
            &req.description,
            &req.requirements,
            &req.location,
            req.job_type.as_str(),
            req.experience_level.as_str(),
            req.salary_min,
            req.salary_max,
            req.is_remote,
            &req.skills_required,
        )?;

        state
            .db
            .get_job(&id)?
            .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("job row missing after insert")))
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal(anyhow::anyhow!("blocking task failed"))
    })??;

    Ok((StatusCode::CREATED, Json(job_response(&row))))
}

pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Extension(_claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let row = tokio::task::spawn_blocking(move || {
        state
            .db
            .get_job(&job_id.to_string())?
            .ok_or(ApiError::NotFound("job not found"))
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal(anyhow::anyhow!("blocking task failed"))
    })??;

    Ok(Json(job_response(&row)))
}
