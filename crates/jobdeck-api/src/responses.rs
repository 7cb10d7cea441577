//! Row-to-response conversions shared by the job, match and message handlers.

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use jobdeck_db::models::{CandidateRow, JobRow, MatchRow, MessageRow};
use jobdeck_types::api::{CandidateResponse, JobResponse, MatchResponse, MessageResponse};
use jobdeck_types::models::{ExperienceLevel, JobType};

pub(crate) fn parse_uuid(raw: &str, what: &str) -> Uuid {
    raw.parse().unwrap_or_else(|e| {
        warn!("Corrupt {} '{}': {}", what, raw, e);
        Uuid::default()
    })
}

pub(crate) fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            // SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" without
            // timezone. Parse as naive UTC and convert.
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt timestamp '{}': {}", raw, e);
            DateTime::default()
        })
}

pub(crate) fn job_response(row: &JobRow) -> JobResponse {
    JobResponse {
        id: parse_uuid(&row.id, "job id"),
        recruiter_id: parse_uuid(&row.recruiter_id, "recruiter id"),
        company_name: row.company_name.clone(),
        title: row.title.clone(),
        description: row.description.clone(),
        requirements: row.requirements.clone(),
        location: row.location.clone(),
        job_type: JobType::from_db(&row.job_type).unwrap_or_else(|| {
            warn!("Corrupt job_type '{}' on job '{}'", row.job_type, row.id);
            JobType::default()
        }),
        experience_level: ExperienceLevel::from_db(&row.experience_level).unwrap_or_else(|| {
            warn!(
                "Corrupt experience_level '{}' on job '{}'",
                row.experience_level, row.id
            );
            ExperienceLevel::default()
        }),
        salary_min: row.salary_min,
        salary_max: row.salary_max,
        is_remote: row.is_remote,
        skills_required: row.skills_required.clone(),
        is_active: row.is_active,
        created_at: parse_timestamp(&row.created_at),
    }
}

pub(crate) fn candidate_response(row: &CandidateRow) -> CandidateResponse {
    CandidateResponse {
        id: parse_uuid(&row.id, "job seeker id"),
        username: row.username.clone(),
        skills: row.skills.clone(),
        experience_years: row.experience_years,
        education: row.education.clone(),
        desired_position: row.desired_position.clone(),
    }
}

pub(crate) fn match_response(row: &MatchRow, job: &JobRow, candidate: &CandidateRow) -> MatchResponse {
    MatchResponse {
        id: parse_uuid(&row.id, "match id"),
        job: job_response(job),
        job_seeker: candidate_response(candidate),
        recruiter_viewed: row.recruiter_viewed,
        job_seeker_viewed: row.job_seeker_viewed,
        is_active: row.is_active,
        created_at: parse_timestamp(&row.created_at),
    }
}

pub(crate) fn message_response(row: &MessageRow) -> MessageResponse {
    MessageResponse {
        id: parse_uuid(&row.id, "message id"),
        match_id: parse_uuid(&row.match_id, "match id"),
        sender_id: parse_uuid(&row.sender_id, "sender id"),
        sender_username: row.sender_username.clone(),
        content: row.content.clone(),
        is_read: row.is_read,
        created_at: parse_timestamp(&row.created_at),
    }
}
