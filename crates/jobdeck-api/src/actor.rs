use jobdeck_db::Database;
use jobdeck_types::api::Claims;
use jobdeck_types::models::Role;

use crate::error::ApiError;

/// Caller identity resolved once at the request boundary: profile row id,
/// role, and the role-specific profile id. Engine functions take this instead
/// of re-fetching the caller mid-operation.
#[derive(Debug, Clone)]
pub struct Actor {
    pub profile_id: String,
    pub role: Role,
    /// recruiter_profiles.id, set when role is Recruiter and the row exists.
    pub recruiter_id: Option<String>,
    /// job_seeker_profiles.id, set when role is JobSeeker and the row exists.
    pub job_seeker_id: Option<String>,
}

pub fn resolve_actor(db: &Database, claims: &Claims) -> Result<Actor, ApiError> {
    let profile = db
        .get_profile_by_user(&claims.sub.to_string())?
        .ok_or(ApiError::NotFound("profile not found"))?;

    let role = Role::from_db(&profile.role)
        .ok_or_else(|| anyhow::anyhow!("corrupt role '{}' on profile {}", profile.role, profile.id))?;

    let mut recruiter_id = None;
    let mut job_seeker_id = None;
    match role {
        Role::Recruiter => {
            recruiter_id = db
                .get_recruiter_profile_by_profile(&profile.id)?
                .map(|r| r.id);
        }
        Role::JobSeeker => {
            job_seeker_id = db
                .get_job_seeker_profile_by_profile(&profile.id)?
                .map(|s| s.id);
        }
    }

    Ok(Actor {
        profile_id: profile.id,
        role,
        recruiter_id,
        job_seeker_id,
    })
}
