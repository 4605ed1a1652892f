// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{ExperienceLevel, JobPosting, PreferencesUpdate, ScoringWeights, UserPreferences, WorkType};
pub use requests::RankJobsRequest;
pub use responses::{ErrorResponse, HealthResponse, PreferencesResponse, RankJobsResponse};
