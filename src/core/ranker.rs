use crate::models::{JobPosting, ScoringWeights, UserPreferences};
use crate::core::{filters::filter_jobs, scoring::calculate_match_score};

/// Result of the ranking process
#[derive(Debug)]
pub struct RankResult {
    pub jobs: Vec<JobPosting>,
    pub total_candidates: usize,
    pub filtered_out: usize,
    pub profile_applied: bool,
}

/// Ranking orchestrator
///
/// # Pipeline Stages
/// 1. Preference filtering (skipped for incomplete profiles)
/// 2. Scoring, written into each posting's `match_score`
/// 3. Stable sort by score, descending
/// 4. Limit
#[derive(Debug, Clone)]
pub struct Ranker {
    weights: ScoringWeights,
}

impl Ranker {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Filter, score and order a job list for the given preferences
    ///
    /// Postings with equal scores keep their input order.
    pub fn rank(
        &self,
        preferences: &UserPreferences,
        jobs: Vec<JobPosting>,
        limit: usize,
    ) -> RankResult {
        let total_candidates = jobs.len();
        let profile_applied = preferences.has_completed_profile();

        let mut ranked = filter_jobs(preferences, jobs);
        let filtered_out = total_candidates - ranked.len();

        for job in &mut ranked {
            job.match_score = calculate_match_score(preferences, job, &self.weights);
        }

        // sort_by is stable, so ties keep listing order
        ranked.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        ranked.truncate(limit);

        tracing::debug!(
            total_candidates,
            filtered_out,
            returned = ranked.len(),
            profile_applied,
            "Ranked job list"
        );

        RankResult {
            jobs: ranked,
            total_candidates,
            filtered_out,
            profile_applied,
        }
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
