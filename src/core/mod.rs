// Core algorithm exports
pub mod filters;
pub mod heuristics;
pub mod ranker;
pub mod scoring;

pub use filters::{filter_jobs, matches_experience, matches_preferences, matches_salary, matches_skills, matches_work_type};
pub use heuristics::{extract_salary, is_remote, job_salary, mentions_remote};
pub use ranker::{RankResult, Ranker};
pub use scoring::{calculate_match_score, score_job};
