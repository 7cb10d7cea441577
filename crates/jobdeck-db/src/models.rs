/// Database row types — these map directly to SQLite rows.
/// Distinct from the jobdeck-types API models to keep the DB layer
/// independent.

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub password: String,
    pub created_at: String,
}

pub struct ProfileRow {
    pub id: String,
    pub user_id: String,
    pub role: String,
    pub bio: String,
    pub location: String,
    pub created_at: String,
}

pub struct RecruiterProfileRow {
    pub id: String,
    pub profile_id: String,
    pub company_name: String,
    pub position: String,
    pub company_description: String,
    pub company_website: String,
    pub industry: String,
}

pub struct JobSeekerProfileRow {
    pub id: String,
    pub profile_id: String,
    pub skills: String,
    pub experience_years: i64,
    pub education: String,
    pub desired_position: String,
    pub desired_salary: Option<i64>,
}

/// `company_name` is joined in from the owning recruiter profile.
pub struct JobRow {
    pub id: String,
    pub recruiter_id: String,
    pub company_name: String,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub location: String,
    pub job_type: String,
    pub experience_level: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub is_remote: bool,
    pub skills_required: String,
    pub is_active: bool,
    pub created_at: String,
}

/// Candidate summary joined across job_seeker_profiles -> profiles -> users.
pub struct CandidateRow {
    pub id: String,
    pub profile_id: String,
    pub username: String,
    pub skills: String,
    pub experience_years: i64,
    pub education: String,
    pub desired_position: String,
}

pub struct MatchRow {
    pub id: String,
    pub job_id: String,
    pub job_seeker_id: String,
    pub recruiter_viewed: bool,
    pub job_seeker_viewed: bool,
    pub is_active: bool,
    pub created_at: String,
}

/// `sender_username` is joined in from the sender's user record.
#[derive(Debug)]
pub struct MessageRow {
    pub id: String,
    pub match_id: String,
    pub sender_id: String,
    pub sender_username: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: String,
}
