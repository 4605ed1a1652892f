use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{JobPosting, UserPreferences};

/// Request to filter and rank a job list for a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankJobsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub jobs: Vec<JobPosting>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<usize>,
    /// Overrides the stored profile for this request only
    #[serde(default)]
    pub preferences: Option<UserPreferences>,
}
