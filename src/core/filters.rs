use crate::core::heuristics::{is_remote, job_salary};
use crate::models::{ExperienceLevel, JobPosting, UserPreferences, WorkType};

/// Title words that mark a role as too senior for an entry-level search
const SENIOR_TITLE_WORDS: [&str; 4] = ["senior", "lead", "principal", "director"];
const SENIOR_SNIPPET_PHRASES: [&str; 2] = ["5+ years", "7+ years"];

/// Title words that mark a role as too junior for a senior or lead search
const JUNIOR_TITLE_WORDS: [&str; 2] = ["junior", "entry"];
const JUNIOR_SNIPPET_PHRASES: [&str; 2] = ["0-2 years", "no experience"];

/// Filter a job list down to the postings compatible with the preferences
///
/// With an incomplete profile the list is returned untouched. Otherwise the
/// postings failing any predicate are dropped; the rest keep their order.
pub fn filter_jobs(preferences: &UserPreferences, mut jobs: Vec<JobPosting>) -> Vec<JobPosting> {
    if !preferences.has_completed_profile() {
        return jobs;
    }

    let user_skills = preferences.skill_list();
    jobs.retain(|job| passes_all(preferences, &user_skills, job));
    jobs
}

/// Check a single posting against every filter predicate
///
/// Unlike [`filter_jobs`] this does not consult the profile gate.
pub fn matches_preferences(preferences: &UserPreferences, job: &JobPosting) -> bool {
    passes_all(preferences, &preferences.skill_list(), job)
}

#[inline]
fn passes_all(preferences: &UserPreferences, user_skills: &[String], job: &JobPosting) -> bool {
    matches_salary(preferences, job)
        && matches_work_type(preferences.work_type, job)
        && matches_skills(user_skills, job)
        && matches_experience(preferences.experience_level, job)
}

/// Salary bound check; postings without a recognizable salary pass
#[inline]
pub fn matches_salary(preferences: &UserPreferences, job: &JobPosting) -> bool {
    let Some(salary) = job_salary(job) else {
        return true;
    };

    if let Some(min) = preferences.min_salary() {
        if salary < min {
            return false;
        }
    }

    if let Some(max) = preferences.max_salary() {
        if salary > max {
            return false;
        }
    }

    true
}

/// Work-mode check; only `remote` and `onsite` constrain anything
#[inline]
pub fn matches_work_type(work_type: WorkType, job: &JobPosting) -> bool {
    match work_type {
        WorkType::Flexible | WorkType::Hybrid => true,
        WorkType::Remote => is_remote(job),
        WorkType::Onsite => !is_remote(job),
    }
}

/// Skill overlap check
///
/// Applies only when both sides list skills; a posting passes when any of
/// its skills and any user skill contain one another.
pub fn matches_skills(user_skills: &[String], job: &JobPosting) -> bool {
    let job_skills = normalized_job_skills(job);
    if user_skills.is_empty() || job_skills.is_empty() {
        return true;
    }

    job_skills
        .iter()
        .any(|job_skill| skill_matches_any(job_skill, user_skills))
}

/// Experience compatibility based on title and snippet wording
pub fn matches_experience(level: ExperienceLevel, job: &JobPosting) -> bool {
    let title = job.title.to_lowercase();
    let snippet = job.snippet.to_lowercase();

    match level {
        ExperienceLevel::Entry => {
            !contains_any(&title, &SENIOR_TITLE_WORDS)
                && !contains_any(&snippet, &SENIOR_SNIPPET_PHRASES)
        }
        ExperienceLevel::Senior | ExperienceLevel::Lead => {
            !contains_any(&title, &JUNIOR_TITLE_WORDS)
                && !contains_any(&snippet, &JUNIOR_SNIPPET_PHRASES)
        }
        ExperienceLevel::Mid => true,
    }
}

/// Job skills, trimmed and lowercased, blanks dropped
pub(crate) fn normalized_job_skills(job: &JobPosting) -> Vec<String> {
    job.skills
        .iter()
        .map(|skill| skill.trim().to_lowercase())
        .filter(|skill| !skill.is_empty())
        .collect()
}

/// Substring match in either direction against any user skill.
/// Both sides must already be lowercased.
#[inline]
pub(crate) fn skill_matches_any(job_skill: &str, user_skills: &[String]) -> bool {
    user_skills
        .iter()
        .any(|user_skill| job_skill.contains(user_skill.as_str()) || user_skill.contains(job_skill))
}

#[inline]
fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
