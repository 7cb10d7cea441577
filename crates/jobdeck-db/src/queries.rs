use crate::Database;
use crate::models::{
    CandidateRow, JobRow, JobSeekerProfileRow, MatchRow, MessageRow, ProfileRow,
    RecruiterProfileRow, UserRow,
};
use anyhow::{Result, anyhow};
use jobdeck_types::models::{Role, SwipeDirection, SwipeTarget};
use rusqlite::Connection;

impl Database {
    // -- Users --

    pub fn create_user(&self, id: &str, username: &str, password_hash: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, username, password) VALUES (?1, ?2, ?3)",
                (id, username, password_hash),
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT id, username, password, created_at FROM users WHERE username = ?1")?;
            let row = stmt
                .query_row([username], |row| {
                    Ok(UserRow {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        password: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                })
                .optional()?;
            Ok(row)
        })
    }

    // -- Profiles --

    pub fn create_profile(&self, id: &str, user_id: &str, role: Role) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO profiles (id, user_id, role) VALUES (?1, ?2, ?3)",
                (id, user_id, role.as_str()),
            )?;
            Ok(())
        })
    }

    pub fn get_profile_by_user(&self, user_id: &str) -> Result<Option<ProfileRow>> {
        self.with_conn(|conn| query_profile(conn, "user_id", user_id))
    }

    pub fn create_recruiter_profile(
        &self,
        id: &str,
        profile_id: &str,
        company_name: &str,
        position: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO recruiter_profiles (id, profile_id, company_name, position)
                 VALUES (?1, ?2, ?3, ?4)",
                (id, profile_id, company_name, position),
            )?;
            Ok(())
        })
    }

    pub fn create_job_seeker_profile(
        &self,
        id: &str,
        profile_id: &str,
        skills: &str,
        experience_years: i64,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO job_seeker_profiles (id, profile_id, skills, experience_years)
                 VALUES (?1, ?2, ?3, ?4)",
                (id, profile_id, skills, experience_years),
            )?;
            Ok(())
        })
    }

    pub fn get_recruiter_profile(&self, id: &str) -> Result<Option<RecruiterProfileRow>> {
        self.with_conn(|conn| query_recruiter_profile(conn, "id", id))
    }

    pub fn get_recruiter_profile_by_profile(
        &self,
        profile_id: &str,
    ) -> Result<Option<RecruiterProfileRow>> {
        self.with_conn(|conn| query_recruiter_profile(conn, "profile_id", profile_id))
    }

    pub fn get_job_seeker_profile(&self, id: &str) -> Result<Option<JobSeekerProfileRow>> {
        self.with_conn(|conn| query_job_seeker_profile(conn, "id", id))
    }

    pub fn get_job_seeker_profile_by_profile(
        &self,
        profile_id: &str,
    ) -> Result<Option<JobSeekerProfileRow>> {
        self.with_conn(|conn| query_job_seeker_profile(conn, "profile_id", profile_id))
    }

    pub fn get_candidate(&self, id: &str) -> Result<Option<CandidateRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT jsp.id, jsp.profile_id, u.username, jsp.skills, jsp.experience_years,
                        jsp.education, jsp.desired_position
                 FROM job_seeker_profiles jsp
                 LEFT JOIN profiles p ON jsp.profile_id = p.id
                 LEFT JOIN users u ON p.user_id = u.id
                 WHERE jsp.id = ?1",
            )?;
            let row = stmt
                .query_row([id], |row| {
                    Ok(CandidateRow {
                        id: row.get(0)?,
                        profile_id: row.get(1)?,
                        username: row
                            .get::<_, Option<String>>(2)?
                            .unwrap_or_else(|| "unknown".to_string()),
                        skills: row.get(3)?,
                        experience_years: row.get(4)?,
                        education: row.get(5)?,
                        desired_position: row.get(6)?,
                    })
                })
                .optional()?;
            Ok(row)
        })
    }

    // -- Jobs --

    #[allow(clippy::too_many_arguments)]
    pub fn insert_job(
        &self,
        id: &str,
        recruiter_id: &str,
        title: &str,
        description: &str,
        requirements: &str,
        location: &str,
        job_type: &str,
        experience_level: &str,
        salary_min: Option<i64>,
        salary_max: Option<i64>,
        is_remote: bool,
        skills_required: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO jobs (id, recruiter_id, title, description, requirements, location,
                                   job_type, experience_level, salary_min, salary_max, is_remote,
                                   skills_required)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                rusqlite::params![
                    id,
                    recruiter_id,
                    title,
                    description,
                    requirements,
                    location,
                    job_type,
                    experience_level,
                    salary_min,
                    salary_max,
                    is_remote,
                    skills_required
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_job(&self, id: &str) -> Result<Option<JobRow>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("{JOB_SELECT} WHERE j.id = ?1"))?;
            let row = stmt.query_row([id], job_from_row).optional()?;
            Ok(row)
        })
    }

    pub fn list_jobs_for_recruiter(&self, recruiter_id: &str) -> Result<Vec<JobRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{JOB_SELECT} WHERE j.recruiter_id = ?1 ORDER BY j.created_at DESC, j.rowid DESC"
            ))?;
            let rows = stmt
                .query_map([recruiter_id], job_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn list_active_jobs(&self) -> Result<Vec<JobRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{JOB_SELECT} WHERE j.is_active = 1 ORDER BY j.created_at DESC, j.rowid DESC"
            ))?;
            let rows = stmt
                .query_map([], job_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Swipes --

    /// Append one swipe row. Never deduplicates: a repeat swipe on the same
    /// target is a new row.
    pub fn insert_swipe(
        &self,
        id: &str,
        profile_id: &str,
        direction: SwipeDirection,
        target: &SwipeTarget,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO swipe_actions (id, profile_id, direction, target_kind, target_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                (
                    id,
                    profile_id,
                    direction.as_str(),
                    target.kind(),
                    target.id().to_string(),
                ),
            )?;
            Ok(())
        })
    }

    /// Whether `profile_id` has ever right-swiped the given target.
    pub fn has_right_swipe(&self, profile_id: &str, target: &SwipeTarget) -> Result<bool> {
        self.with_conn(|conn| {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(
                     SELECT 1 FROM swipe_actions
                     WHERE profile_id = ?1 AND direction = 'right'
                       AND target_kind = ?2 AND target_id = ?3)",
                (profile_id, target.kind(), target.id().to_string()),
                |row| row.get(0),
            )?;
            Ok(exists)
        })
    }

    // -- Matches --

    /// Insert-or-fetch on the (job_id, job_seeker_id) unique key. When two
    /// sides race to create the same match, the second insert is a no-op and
    /// both callers get the surviving row back.
    pub fn insert_match_or_existing(
        &self,
        id: &str,
        job_id: &str,
        job_seeker_id: &str,
    ) -> Result<MatchRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO matches (id, job_id, job_seeker_id) VALUES (?1, ?2, ?3)
                 ON CONFLICT(job_id, job_seeker_id) DO NOTHING",
                (id, job_id, job_seeker_id),
            )?;

            let mut stmt = conn.prepare(&format!(
                "{MATCH_SELECT} WHERE job_id = ?1 AND job_seeker_id = ?2"
            ))?;
            stmt.query_row((job_id, job_seeker_id), match_from_row)
                .optional()?
                .ok_or_else(|| anyhow!("match row missing after insert for job {}", job_id))
        })
    }

    pub fn get_match(&self, id: &str) -> Result<Option<MatchRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{MATCH_SELECT} WHERE id = ?1"))?;
            let row = stmt.query_row([id], match_from_row).optional()?;
            Ok(row)
        })
    }

    pub fn list_matches_for_job_seeker(&self, job_seeker_id: &str) -> Result<Vec<MatchRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{MATCH_SELECT} WHERE job_seeker_id = ?1 AND is_active = 1
                 ORDER BY created_at DESC, rowid DESC"
            ))?;
            let rows = stmt
                .query_map([job_seeker_id], match_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// All active matches across every job the recruiter owns.
    pub fn list_matches_for_recruiter(&self, recruiter_id: &str) -> Result<Vec<MatchRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT m.id, m.job_id, m.job_seeker_id, m.recruiter_viewed, m.job_seeker_viewed,
                        m.is_active, m.created_at
                 FROM matches m
                 JOIN jobs j ON m.job_id = j.id
                 WHERE j.recruiter_id = ?1 AND m.is_active = 1
                 ORDER BY m.created_at DESC, m.rowid DESC",
            )?;
            let rows = stmt
                .query_map([recruiter_id], match_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Each side may only set its own viewed flag.
    pub fn set_match_viewed(&self, match_id: &str, side: Role) -> Result<()> {
        let sql = match side {
            Role::Recruiter => "UPDATE matches SET recruiter_viewed = 1 WHERE id = ?1",
            Role::JobSeeker => "UPDATE matches SET job_seeker_viewed = 1 WHERE id = ?1",
        };
        self.with_conn(|conn| {
            conn.execute(sql, [match_id])?;
            Ok(())
        })
    }

    // -- Messages --

    pub fn insert_message(
        &self,
        id: &str,
        match_id: &str,
        sender_id: &str,
        content: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (id, match_id, sender_id, content)
                 VALUES (?1, ?2, ?3, ?4)",
                (id, match_id, sender_id, content),
            )?;
            Ok(())
        })
    }

    pub fn get_message(&self, id: &str) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{MESSAGE_SELECT} WHERE m.id = ?1"))?;
            let row = stmt.query_row([id], message_from_row).optional()?;
            Ok(row)
        })
    }

    /// Thread replay order: creation time ascending, insertion order as the
    /// tiebreak for same-second rows.
    pub fn get_messages_for_match(&self, match_id: &str) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{MESSAGE_SELECT} WHERE m.match_id = ?1 ORDER BY m.created_at ASC, m.rowid ASC"
            ))?;
            let rows = stmt
                .query_map([match_id], message_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

const JOB_SELECT: &str = "SELECT j.id, j.recruiter_id, r.company_name, j.title, j.description,
        j.requirements, j.location, j.job_type, j.experience_level, j.salary_min, j.salary_max,
        j.is_remote, j.skills_required, j.is_active, j.created_at
 FROM jobs j
 LEFT JOIN recruiter_profiles r ON j.recruiter_id = r.id";

const MATCH_SELECT: &str = "SELECT id, job_id, job_seeker_id, recruiter_viewed, job_seeker_viewed,
        is_active, created_at
 FROM matches";

// JOIN users to fetch sender_username in a single query (eliminates N+1)
const MESSAGE_SELECT: &str = "SELECT m.id, m.match_id, m.sender_id, u.username, m.content,
        m.is_read, m.created_at
 FROM messages m
 LEFT JOIN profiles p ON m.sender_id = p.id
 LEFT JOIN users u ON p.user_id = u.id";

fn job_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<JobRow> {
    Ok(JobRow {
        id: row.get(0)?,
        recruiter_id: row.get(1)?,
        company_name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        title: row.get(3)?,
        description: row.get(4)?,
        requirements: row.get(5)?,
        location: row.get(6)?,
        job_type: row.get(7)?,
        experience_level: row.get(8)?,
        salary_min: row.get(9)?,
        salary_max: row.get(10)?,
        is_remote: row.get(11)?,
        skills_required: row.get(12)?,
        is_active: row.get(13)?,
        created_at: row.get(14)?,
    })
}

fn match_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MatchRow> {
    Ok(MatchRow {
        id: row.get(0)?,
        job_id: row.get(1)?,
        job_seeker_id: row.get(2)?,
        recruiter_viewed: row.get(3)?,
        job_seeker_viewed: row.get(4)?,
        is_active: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn message_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        match_id: row.get(1)?,
        sender_id: row.get(2)?,
        sender_username: row
            .get::<_, Option<String>>(3)?
            .unwrap_or_else(|| "unknown".to_string()),
        content: row.get(4)?,
        is_read: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn query_profile(conn: &Connection, column: &str, value: &str) -> Result<Option<ProfileRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, user_id, role, bio, location, created_at FROM profiles WHERE {column} = ?1"
    ))?;

    let row = stmt
        .query_row([value], |row| {
            Ok(ProfileRow {
                id: row.get(0)?,
                user_id: row.get(1)?,
                role: row.get(2)?,
                bio: row.get(3)?,
                location: row.get(4)?,
                created_at: row.get(5)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_recruiter_profile(
    conn: &Connection,
    column: &str,
    value: &str,
) -> Result<Option<RecruiterProfileRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, profile_id, company_name, position, company_description, company_website,
                industry
         FROM recruiter_profiles WHERE {column} = ?1"
    ))?;

    let row = stmt
        .query_row([value], |row| {
            Ok(RecruiterProfileRow {
                id: row.get(0)?,
                profile_id: row.get(1)?,
                company_name: row.get(2)?,
                position: row.get(3)?,
                company_description: row.get(4)?,
                company_website: row.get(5)?,
                industry: row.get(6)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_job_seeker_profile(
    conn: &Connection,
    column: &str,
    value: &str,
) -> Result<Option<JobSeekerProfileRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, profile_id, skills, experience_years, education, desired_position,
                desired_salary
         FROM job_seeker_profiles WHERE {column} = ?1"
    ))?;

    let row = stmt
        .query_row([value], |row| {
            Ok(JobSeekerProfileRow {
                id: row.get(0)?,
                profile_id: row.get(1)?,
                skills: row.get(2)?,
                experience_years: row.get(3)?,
                education: row.get(4)?,
                desired_position: row.get(5)?,
                desired_salary: row.get(6)?,
            })
        })
        .optional()?;

    Ok(row)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
