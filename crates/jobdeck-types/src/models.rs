use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Recruiter,
    JobSeeker,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Recruiter => "recruiter",
            Role::JobSeeker => "job_seeker",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "recruiter" => Some(Role::Recruiter),
            "job_seeker" => Some(Role::JobSeeker),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwipeDirection::Left => "left",
            SwipeDirection::Right => "right",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "left" => Some(SwipeDirection::Left),
            "right" => Some(SwipeDirection::Right),
            _ => None,
        }
    }
}

/// What a swipe lands on: a job posting (job seekers browse jobs) or a
/// candidate profile (recruiters browse candidates). A single swipe always
/// has exactly one of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeTarget {
    Job(Uuid),
    Candidate(Uuid),
}

impl SwipeTarget {
    pub fn kind(&self) -> &'static str {
        match self {
            SwipeTarget::Job(_) => "job",
            SwipeTarget::Candidate(_) => "candidate",
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            SwipeTarget::Job(id) | SwipeTarget::Candidate(id) => *id,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full_time",
            JobType::PartTime => "part_time",
            JobType::Contract => "contract",
            JobType::Internship => "internship",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "full_time" => Some(JobType::FullTime),
            "part_time" => Some(JobType::PartTime),
            "contract" => Some(JobType::Contract),
            "internship" => Some(JobType::Internship),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    #[default]
    Entry,
    Mid,
    Senior,
    Executive,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Executive => "executive",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "entry" => Some(ExperienceLevel::Entry),
            "mid" => Some(ExperienceLevel::Mid),
            "senior" => Some(ExperienceLevel::Senior),
            "executive" => Some(ExperienceLevel::Executive),
            _ => None,
        }
    }
}
