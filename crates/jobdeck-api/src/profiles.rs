use axum::{Extension, Json, extract::State, response::IntoResponse};
use tracing::error;

use jobdeck_types::api::{
    Claims, JobSeekerProfileResponse, ProfileResponse, RecruiterProfileResponse,
};
use jobdeck_types::models::Role;

use crate::auth::AppState;
use crate::error::ApiError;
use crate::responses::{parse_timestamp, parse_uuid};

/// The caller's own profile with the role-specific extension embedded.
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let response = tokio::task::spawn_blocking(move || -> Result<ProfileResponse, ApiError> {
        let profile = state
            .db
            .get_profile_by_user(&claims.sub.to_string())?
            .ok_or(ApiError::NotFound("profile not found"))?;

        let role = Role::from_db(&profile.role).ok_or_else(|| {
            anyhow::anyhow!("corrupt role '{}' on profile {}", profile.role, profile.id)
        })?;

        let mut recruiter = None;
        let mut job_seeker = None;
        match role {
            Role::Recruiter => {
                recruiter = state
                    .db
                    .get_recruiter_profile_by_profile(&profile.id)?
                    .map(|r| RecruiterProfileResponse {
                        id: parse_uuid(&r.id, "recruiter id"),
                        company_name: r.company_name,
                        position: r.position,
                        company_description: r.company_description,
                        company_website: r.company_website,
                        industry: r.industry,
                    });
            }
            Role::JobSeeker => {
                job_seeker = state
                    .db
                    .get_job_seeker_profile_by_profile(&profile.id)?
                    .map(|s| JobSeekerProfileResponse {
                        id: parse_uuid(&s.id, "job seeker id"),
                        skills: s.skills,
                        experience_years: s.experience_years,
                        education: s.education,
                        desired_position: s.desired_position,
                        desired_salary: s.desired_salary,
                    });
            }
        }

        Ok(ProfileResponse {
            id: parse_uuid(&profile.id, "profile id"),
            user_id: claims.sub,
            username: claims.username,
            role,
            bio: profile.bio,
            location: profile.location,
            created_at: parse_timestamp(&profile.created_at),
            recruiter,
            job_seeker,
        })
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal(anyhow::anyhow!("blocking task failed"))
    })??;

    Ok(Json(response))
}
