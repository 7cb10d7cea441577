use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY,
            username    TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS profiles (
            id          TEXT PRIMARY KEY,
            user_id     TEXT NOT NULL UNIQUE REFERENCES users(id),
            role        TEXT NOT NULL CHECK (role IN ('recruiter', 'job_seeker')),
            bio         TEXT NOT NULL DEFAULT '',
            location    TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS recruiter_profiles (
            id                  TEXT PRIMARY KEY,
            profile_id          TEXT NOT NULL UNIQUE REFERENCES profiles(id),
            company_name        TEXT NOT NULL DEFAULT '',
            position            TEXT NOT NULL DEFAULT '',
            company_description TEXT NOT NULL DEFAULT '',
            company_website     TEXT NOT NULL DEFAULT '',
            industry            TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS job_seeker_profiles (
            id                TEXT PRIMARY KEY,
            profile_id        TEXT NOT NULL UNIQUE REFERENCES profiles(id),
            skills            TEXT NOT NULL DEFAULT '',
            experience_years  INTEGER NOT NULL DEFAULT 0,
            education         TEXT NOT NULL DEFAULT '',
            desired_position  TEXT NOT NULL DEFAULT '',
            desired_salary    INTEGER
        );

        CREATE TABLE IF NOT EXISTS jobs (
            id                TEXT PRIMARY KEY,
            recruiter_id      TEXT NOT NULL REFERENCES recruiter_profiles(id),
            title             TEXT NOT NULL,
            description       TEXT NOT NULL,
            requirements      TEXT NOT NULL,
            location          TEXT NOT NULL,
            job_type          TEXT NOT NULL DEFAULT 'full_time'
                              CHECK (job_type IN ('full_time', 'part_time', 'contract', 'internship')),
            experience_level  TEXT NOT NULL DEFAULT 'entry'
                              CHECK (experience_level IN ('entry', 'mid', 'senior', 'executive')),
            salary_min        INTEGER,
            salary_max        INTEGER,
            is_remote         INTEGER NOT NULL DEFAULT 0,
            skills_required   TEXT NOT NULL DEFAULT '',
            is_active         INTEGER NOT NULL DEFAULT 1,
            created_at        TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at        TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_jobs_recruiter
            ON jobs(recruiter_id);

        -- Append-only: a profile may swipe the same target any number of
        -- times, each call is a distinct row. target_kind + target_id encode
        -- the job-or-candidate target; there is no nullable pair to get into
        -- a half-set state.
        CREATE TABLE IF NOT EXISTS swipe_actions (
            id           TEXT PRIMARY KEY,
            profile_id   TEXT NOT NULL REFERENCES profiles(id),
            direction    TEXT NOT NULL CHECK (direction IN ('left', 'right')),
            target_kind  TEXT NOT NULL CHECK (target_kind IN ('job', 'candidate')),
            target_id    TEXT NOT NULL,
            created_at   TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_swipes_lookup
            ON swipe_actions(profile_id, direction, target_kind, target_id);

        -- At most one match per (job, candidate) pair. The unique index is
        -- what makes concurrent double-creation collapse to a single row.
        CREATE TABLE IF NOT EXISTS matches (
            id                TEXT PRIMARY KEY,
            job_id            TEXT NOT NULL REFERENCES jobs(id),
            job_seeker_id     TEXT NOT NULL REFERENCES job_seeker_profiles(id),
            recruiter_viewed  INTEGER NOT NULL DEFAULT 0,
            job_seeker_viewed INTEGER NOT NULL DEFAULT 0,
            is_active         INTEGER NOT NULL DEFAULT 1,
            created_at        TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(job_id, job_seeker_id)
        );

        CREATE INDEX IF NOT EXISTS idx_matches_job_seeker
            ON matches(job_seeker_id);

        CREATE TABLE IF NOT EXISTS messages (
            id          TEXT PRIMARY KEY,
            match_id    TEXT NOT NULL REFERENCES matches(id),
            sender_id   TEXT NOT NULL REFERENCES profiles(id),
            content     TEXT NOT NULL,
            is_read     INTEGER NOT NULL DEFAULT 0,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_messages_match
            ON messages(match_id, created_at);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
