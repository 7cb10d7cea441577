use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ExperienceLevel, JobType, Role};

// -- JWT Claims --

/// JWT claims shared between token issuance (jobdeck-api auth handlers) and
/// the bearer middleware. Canonical definition lives here in jobdeck-types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub experience_years: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Returned by both register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
    pub token: String,
}

// -- Profiles --

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
    pub bio: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recruiter: Option<RecruiterProfileResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_seeker: Option<JobSeekerProfileResponse>,
}

#[derive(Debug, Serialize)]
pub struct RecruiterProfileResponse {
    pub id: Uuid,
    pub company_name: String,
    pub position: String,
    pub company_description: String,
    pub company_website: String,
    pub industry: String,
}

#[derive(Debug, Serialize)]
pub struct JobSeekerProfileResponse {
    pub id: Uuid,
    pub skills: String,
    pub experience_years: i64,
    pub education: String,
    pub desired_position: String,
    pub desired_salary: Option<i64>,
}

// -- Jobs --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub location: String,
    #[serde(default)]
    pub job_type: JobType,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub salary_min: Option<i64>,
    #[serde(default)]
    pub salary_max: Option<i64>,
    #[serde(default)]
    pub is_remote: bool,
    #[serde(default)]
    pub skills_required: String,
}

#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub id: Uuid,
    pub recruiter_id: Uuid,
    pub company_name: String,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub location: String,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub is_remote: bool,
    pub skills_required: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// -- Swipes --

/// `direction` arrives as a raw string so an unknown value is rejected as a
/// bad request by the handler rather than by body deserialization.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SwipeRequest {
    pub direction: String,
    #[serde(default)]
    pub job_id: Option<Uuid>,
    #[serde(default)]
    pub job_seeker_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct SwipeResponse {
    pub matched: bool,
    pub message: String,
}

// -- Matches --

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub id: Uuid,
    pub job: JobResponse,
    pub job_seeker: CandidateResponse,
    pub recruiter_viewed: bool,
    pub job_seeker_viewed: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Candidate summary embedded in match listings.
#[derive(Debug, Serialize)]
pub struct CandidateResponse {
    pub id: Uuid,
    pub username: String,
    pub skills: String,
    pub experience_years: i64,
    pub education: String,
    pub desired_position: String,
}

// -- Messages --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SendMessageRequest {
    pub match_id: Uuid,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub match_id: Uuid,
    pub sender_id: Uuid,
    pub sender_username: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
