//! Query-level tests against an in-memory database.

use jobdeck_types::models::{Role, SwipeDirection, SwipeTarget};
use uuid::Uuid;

use crate::Database;

fn db() -> Database {
    Database::open_in_memory().expect("in-memory database")
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Creates user + profile + recruiter profile, returns (profile_id, recruiter_id).
fn seed_recruiter(db: &Database, username: &str) -> (String, String) {
    let user_id = new_id();
    let profile_id = new_id();
    let recruiter_id = new_id();
    db.create_user(&user_id, username, "hash").unwrap();
    db.create_profile(&profile_id, &user_id, Role::Recruiter).unwrap();
    db.create_recruiter_profile(&recruiter_id, &profile_id, "Acme", "HR lead")
        .unwrap();
    (profile_id, recruiter_id)
}

/// Creates user + profile + job seeker profile, returns (profile_id, job_seeker_id).
fn seed_seeker(db: &Database, username: &str) -> (String, String) {
    let user_id = new_id();
    let profile_id = new_id();
    let seeker_id = new_id();
    db.create_user(&user_id, username, "hash").unwrap();
    db.create_profile(&profile_id, &user_id, Role::JobSeeker).unwrap();
    db.create_job_seeker_profile(&seeker_id, &profile_id, "rust, sql", 3)
        .unwrap();
    (profile_id, seeker_id)
}

fn seed_job(db: &Database, recruiter_id: &str, title: &str) -> String {
    let job_id = new_id();
    db.insert_job(
        &job_id,
        recruiter_id,
        title,
        "description",
        "requirements",
        "Lisbon",
        "full_time",
        "mid",
        Some(50_000),
        Some(70_000),
        false,
        "rust",
    )
    .unwrap();
    job_id
}

fn swipe_count(db: &Database) -> i64 {
    db.with_conn(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM swipe_actions", [], |row| row.get(0))?)
    })
    .unwrap()
}

fn match_count(db: &Database) -> i64 {
    db.with_conn(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM matches", [], |row| row.get(0))?)
    })
    .unwrap()
}

#[test]
fn swipes_are_append_only() {
    let db = db();
    let (r_profile, recruiter) = seed_recruiter(&db, "rec");
    let (s_profile, _) = seed_seeker(&db, "seeker");
    let job = seed_job(&db, &recruiter, "Backend Engineer");
    let target = SwipeTarget::Job(job.parse().unwrap());

    db.insert_swipe(&new_id(), &s_profile, SwipeDirection::Left, &target).unwrap();
    db.insert_swipe(&new_id(), &s_profile, SwipeDirection::Right, &target).unwrap();
    db.insert_swipe(&new_id(), &s_profile, SwipeDirection::Right, &target).unwrap();
    db.insert_swipe(&new_id(), &r_profile, SwipeDirection::Right, &target).unwrap();

    assert_eq!(swipe_count(&db), 4);
}

#[test]
fn has_right_swipe_matches_direction_kind_and_target() {
    let db = db();
    let (_, recruiter) = seed_recruiter(&db, "rec");
    let (s_profile, seeker) = seed_seeker(&db, "seeker");
    let job = seed_job(&db, &recruiter, "Backend Engineer");
    let job_uuid: Uuid = job.parse().unwrap();
    let seeker_uuid: Uuid = seeker.parse().unwrap();

    db.insert_swipe(&new_id(), &s_profile, SwipeDirection::Left, &SwipeTarget::Job(job_uuid))
        .unwrap();
    assert!(!db.has_right_swipe(&s_profile, &SwipeTarget::Job(job_uuid)).unwrap());

    db.insert_swipe(&new_id(), &s_profile, SwipeDirection::Right, &SwipeTarget::Job(job_uuid))
        .unwrap();
    assert!(db.has_right_swipe(&s_profile, &SwipeTarget::Job(job_uuid)).unwrap());

    // Same id under a different target kind does not count.
    assert!(!db.has_right_swipe(&s_profile, &SwipeTarget::Candidate(job_uuid)).unwrap());
    // Other profiles' swipes do not count.
    assert!(!db.has_right_swipe(&seeker, &SwipeTarget::Job(job_uuid)).unwrap());
    assert!(!db.has_right_swipe(&s_profile, &SwipeTarget::Candidate(seeker_uuid)).unwrap());
}

#[test]
fn match_insert_is_idempotent_per_pair() {
    let db = db();
    let (_, recruiter) = seed_recruiter(&db, "rec");
    let (_, seeker) = seed_seeker(&db, "seeker");
    let job = seed_job(&db, &recruiter, "Backend Engineer");

    let first = db.insert_match_or_existing(&new_id(), &job, &seeker).unwrap();
    // Second attempt with a fresh id must land on the same row.
    let second = db.insert_match_or_existing(&new_id(), &job, &seeker).unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(match_count(&db), 1);
}

#[test]
fn distinct_pairs_create_distinct_matches() {
    let db = db();
    let (_, recruiter) = seed_recruiter(&db, "rec");
    let (_, seeker_a) = seed_seeker(&db, "alice");
    let (_, seeker_b) = seed_seeker(&db, "bob");
    let job = seed_job(&db, &recruiter, "Backend Engineer");

    let a = db.insert_match_or_existing(&new_id(), &job, &seeker_a).unwrap();
    let b = db.insert_match_or_existing(&new_id(), &job, &seeker_b).unwrap();

    assert_ne!(a.id, b.id);
    assert_eq!(match_count(&db), 2);
}

#[test]
fn recruiter_sees_matches_across_all_their_jobs_only() {
    let db = db();
    let (_, recruiter_1) = seed_recruiter(&db, "rec1");
    let (_, recruiter_2) = seed_recruiter(&db, "rec2");
    let (_, seeker_a) = seed_seeker(&db, "alice");
    let (_, seeker_b) = seed_seeker(&db, "bob");
    let job_1 = seed_job(&db, &recruiter_1, "Backend Engineer");
    let job_2 = seed_job(&db, &recruiter_1, "Data Engineer");
    let job_3 = seed_job(&db, &recruiter_2, "Frontend Engineer");

    db.insert_match_or_existing(&new_id(), &job_1, &seeker_a).unwrap();
    db.insert_match_or_existing(&new_id(), &job_2, &seeker_b).unwrap();
    db.insert_match_or_existing(&new_id(), &job_3, &seeker_a).unwrap();

    let for_r1 = db.list_matches_for_recruiter(&recruiter_1).unwrap();
    assert_eq!(for_r1.len(), 2);
    assert!(for_r1.iter().all(|m| m.job_id == job_1 || m.job_id == job_2));

    let for_r2 = db.list_matches_for_recruiter(&recruiter_2).unwrap();
    assert_eq!(for_r2.len(), 1);
    assert_eq!(for_r2[0].job_id, job_3);
}

#[test]
fn job_seeker_sees_only_their_own_matches() {
    let db = db();
    let (_, recruiter) = seed_recruiter(&db, "rec");
    let (_, seeker_a) = seed_seeker(&db, "alice");
    let (_, seeker_b) = seed_seeker(&db, "bob");
    let job_1 = seed_job(&db, &recruiter, "Backend Engineer");
    let job_2 = seed_job(&db, &recruiter, "Data Engineer");

    db.insert_match_or_existing(&new_id(), &job_1, &seeker_a).unwrap();
    db.insert_match_or_existing(&new_id(), &job_2, &seeker_a).unwrap();
    db.insert_match_or_existing(&new_id(), &job_1, &seeker_b).unwrap();

    assert_eq!(db.list_matches_for_job_seeker(&seeker_a).unwrap().len(), 2);
    assert_eq!(db.list_matches_for_job_seeker(&seeker_b).unwrap().len(), 1);
}

#[test]
fn inactive_matches_are_hidden_from_listings() {
    let db = db();
    let (_, recruiter) = seed_recruiter(&db, "rec");
    let (_, seeker) = seed_seeker(&db, "alice");
    let job = seed_job(&db, &recruiter, "Backend Engineer");

    let m = db.insert_match_or_existing(&new_id(), &job, &seeker).unwrap();
    db.with_conn(|conn| {
        conn.execute("UPDATE matches SET is_active = 0 WHERE id = ?1", [&m.id])?;
        Ok(())
    })
    .unwrap();

    assert!(db.list_matches_for_job_seeker(&seeker).unwrap().is_empty());
    assert!(db.list_matches_for_recruiter(&recruiter).unwrap().is_empty());
}

#[test]
fn set_match_viewed_touches_only_the_callers_side() {
    let db = db();
    let (_, recruiter) = seed_recruiter(&db, "rec");
    let (_, seeker) = seed_seeker(&db, "alice");
    let job = seed_job(&db, &recruiter, "Backend Engineer");
    let m = db.insert_match_or_existing(&new_id(), &job, &seeker).unwrap();

    db.set_match_viewed(&m.id, Role::Recruiter).unwrap();
    let after = db.get_match(&m.id).unwrap().unwrap();
    assert!(after.recruiter_viewed);
    assert!(!after.job_seeker_viewed);

    db.set_match_viewed(&m.id, Role::JobSeeker).unwrap();
    let after = db.get_match(&m.id).unwrap().unwrap();
    assert!(after.recruiter_viewed);
    assert!(after.job_seeker_viewed);
}

#[test]
fn messages_replay_in_insertion_order() {
    let db = db();
    let (r_profile, recruiter) = seed_recruiter(&db, "rec");
    let (s_profile, seeker) = seed_seeker(&db, "alice");
    let job = seed_job(&db, &recruiter, "Backend Engineer");
    let m = db.insert_match_or_existing(&new_id(), &job, &seeker).unwrap();

    // All inserts land within the same datetime('now') second; rowid breaks
    // the tie in insertion order.
    db.insert_message(&new_id(), &m.id, &s_profile, "hi!").unwrap();
    db.insert_message(&new_id(), &m.id, &r_profile, "hello").unwrap();
    db.insert_message(&new_id(), &m.id, &s_profile, "when can we talk?").unwrap();

    let thread = db.get_messages_for_match(&m.id).unwrap();
    let contents: Vec<&str> = thread.iter().map(|msg| msg.content.as_str()).collect();
    assert_eq!(contents, vec!["hi!", "hello", "when can we talk?"]);
    assert_eq!(thread[0].sender_username, "alice");
    assert_eq!(thread[1].sender_username, "rec");
    assert!(thread.iter().all(|msg| !msg.is_read));
}

#[test]
fn get_message_round_trips_joined_fields() {
    let db = db();
    let (s_profile, seeker) = seed_seeker(&db, "alice");
    let (_, recruiter) = seed_recruiter(&db, "rec");
    let job = seed_job(&db, &recruiter, "Backend Engineer");
    let m = db.insert_match_or_existing(&new_id(), &job, &seeker).unwrap();

    let id = new_id();
    db.insert_message(&id, &m.id, &s_profile, "hi!").unwrap();

    let msg = db.get_message(&id).unwrap().unwrap();
    assert_eq!(msg.match_id, m.id);
    assert_eq!(msg.sender_id, s_profile);
    assert_eq!(msg.sender_username, "alice");
    assert_eq!(msg.content, "hi!");
}
