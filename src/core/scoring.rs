use crate::core::filters::{normalized_job_skills, skill_matches_any};
use crate::core::heuristics::{is_remote, job_salary};
use crate::models::{JobPosting, ScoringWeights, UserPreferences, WorkType};

/// Calculate a relevance score (0-100) for a posting with the default weights
pub fn score_job(preferences: &UserPreferences, job: &JobPosting) -> f64 {
    calculate_match_score(preferences, job, &ScoringWeights::default())
}

/// Calculate a relevance score (0-100) for a posting
///
/// Scoring formula (default weights):
/// score = (
///     skill_overlap * 30 +    # share of the job's skills the user has
///     title_overlap * 25 +    # share of the desired title words present
///     remote_bonus * 20 +     # remote wanted and offered
///     salary_fit * 15         # closeness to the middle of the salary band
/// )
///
/// Signals only reward; a missing signal contributes nothing.
pub fn calculate_match_score(
    preferences: &UserPreferences,
    job: &JobPosting,
    weights: &ScoringWeights,
) -> f64 {
    let skill_score = calculate_skill_score(&preferences.skill_list(), job);
    let title_score = calculate_title_score(&preferences.job_title, &job.title);

    let remote_score = if preferences.work_type == WorkType::Remote && is_remote(job) {
        1.0
    } else {
        0.0
    };

    let salary_score = match (job_salary(job), preferences.min_salary(), preferences.max_salary()) {
        (Some(salary), Some(min), Some(max)) => calculate_salary_score(salary, min, max),
        _ => 0.0,
    };

    let total_score = skill_score * weights.skills
        + title_score * weights.title
        + remote_score * weights.remote
        + salary_score * weights.salary;

    total_score.clamp(0.0, 100.0)
}

/// Fraction (0-1) of the job's skills matching at least one user skill
#[inline]
fn calculate_skill_score(user_skills: &[String], job: &JobPosting) -> f64 {
    let job_skills = normalized_job_skills(job);
    if user_skills.is_empty() || job_skills.is_empty() {
        return 0.0;
    }

    let matched = job_skills
        .iter()
        .filter(|job_skill| skill_matches_any(job_skill, user_skills))
        .count();

    matched as f64 / job_skills.len() as f64
}

/// Fraction (0-1) of desired title words found in the job title
#[inline]
fn calculate_title_score(desired_title: &str, job_title: &str) -> f64 {
    let desired: Vec<String> = desired_title
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();
    if desired.is_empty() {
        return 0.0;
    }

    let offered: Vec<String> = job_title
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();

    let matched = desired
        .iter()
        .filter(|word| {
            offered
                .iter()
                .any(|other| other.contains(word.as_str()) || word.contains(other.as_str()))
        })
        .count();

    matched as f64 / desired.len() as f64
}

/// Salary fit (0-1): 1 at the middle of the band, 0.5 at its edges, 0 outside
#[inline]
fn calculate_salary_score(salary: u64, min: u64, max: u64) -> f64 {
    if salary < min || salary > max {
        return 0.0;
    }

    // Degenerate band: the salary can only sit exactly on it
    if max == min {
        return 1.0;
    }

    let range = (max - min) as f64;
    let mid = min as f64 + range / 2.0;
    let deviation = (salary as f64 - mid).abs();

    (1.0 - deviation / range).max(0.0)
}
