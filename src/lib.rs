//! Job Relevance - preference-driven job filtering and ranking
//!
//! This library provides the relevance engine behind the job-search assistant:
//! a per-user preference store, a conjunctive filter over job postings and a
//! weighted scorer used to order what survives.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{filter_jobs, score_job, extract_salary, is_remote, Ranker, RankResult};
pub use crate::models::{JobPosting, UserPreferences, PreferencesUpdate, ScoringWeights, WorkType, ExperienceLevel};
pub use crate::services::{PreferenceStore, PreferenceRegistry, KeyValueStore, MemoryStore, FileStore};
