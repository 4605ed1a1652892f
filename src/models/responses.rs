use serde::{Deserialize, Serialize};
use crate::models::domain::{JobPosting, UserPreferences};

/// Response for the rank jobs endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankJobsResponse {
    pub jobs: Vec<JobPosting>,
    pub total_candidates: usize,
    pub filtered_out: usize,
    /// False when the profile was incomplete and nothing was filtered
    pub profile_applied: bool,
}

/// A stored preference record with its derived profile metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesResponse {
    pub user_id: String,
    pub preferences: UserPreferences,
    pub completeness: u8,
    pub has_completed_profile: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
