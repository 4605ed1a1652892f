use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::Ranker;
use crate::models::{
    ErrorResponse, HealthResponse, PreferencesResponse, PreferencesUpdate, RankJobsRequest,
    RankJobsResponse, UserPreferences,
};
use crate::services::PreferenceRegistry;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub preferences: Arc<PreferenceRegistry>,
    pub ranker: Ranker,
    pub default_limit: usize,
    pub max_limit: usize,
}

/// Configure all relevance routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/preferences/{user_id}", web::get().to(get_preferences))
        .route("/preferences/{user_id}", web::put().to(save_preferences))
        .route("/preferences/{user_id}", web::delete().to(clear_preferences))
        .route("/jobs/rank", web::post().to(rank_jobs));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Get stored preferences
///
/// GET /api/v1/preferences/{userId}
async fn get_preferences(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let user_id = path.into_inner();
    let store = state.preferences.store_for(&user_id);

    match web::block(move || store.get_preferences()).await {
        Ok(preferences) => HttpResponse::Ok().json(preferences_response(user_id, preferences)),
        Err(e) => blocking_failure("Failed to read preferences", e),
    }
}

/// Merge a partial update into stored preferences
///
/// PUT /api/v1/preferences/{userId}
///
/// Request body: any subset of the preference fields
/// ```json
/// {
///   "jobTitle": "string",
///   "skills": "Python,React",
///   "workType": "remote|hybrid|onsite|flexible"
/// }
/// ```
async fn save_preferences(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<PreferencesUpdate>,
) -> impl Responder {
    let user_id = path.into_inner();
    let store = state.preferences.store_for(&user_id);
    let update = req.into_inner();

    tracing::info!("Saving preferences for user: {}", user_id);

    match web::block(move || store.save_preferences(update)).await {
        Ok(preferences) => HttpResponse::Ok().json(preferences_response(user_id, preferences)),
        Err(e) => blocking_failure("Failed to save preferences", e),
    }
}

/// Reset preferences to the defaults
///
/// DELETE /api/v1/preferences/{userId}
async fn clear_preferences(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let user_id = path.into_inner();
    let store = state.preferences.store_for(&user_id);

    tracing::info!("Clearing preferences for user: {}", user_id);

    match web::block(move || store.clear_preferences()).await {
        Ok(preferences) => HttpResponse::Ok().json(preferences_response(user_id, preferences)),
        Err(e) => blocking_failure("Failed to clear preferences", e),
    }
}

/// Filter and rank a job list
///
/// POST /api/v1/jobs/rank
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "jobs": [{"id": "1", "title": "Backend Engineer", "skills": ["Rust"]}],
///   "limit": 20,
///   "preferences": null
/// }
/// ```
async fn rank_jobs(
    state: web::Data<AppState>,
    req: web::Json<RankJobsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for rank_jobs request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let RankJobsRequest { user_id, jobs, limit, preferences } = req.into_inner();
    let limit = limit.unwrap_or(state.default_limit).min(state.max_limit);

    let preferences = match preferences {
        Some(explicit) => explicit,
        None => {
            let store = state.preferences.store_for(&user_id);
            match web::block(move || store.get_preferences()).await {
                Ok(stored) => stored,
                Err(e) => return blocking_failure("Failed to read preferences", e),
            }
        }
    };

    tracing::info!("Ranking {} jobs for user: {}, limit: {}", jobs.len(), user_id, limit);

    let result = state.ranker.rank(&preferences, jobs, limit);

    let response = RankJobsResponse {
        jobs: result.jobs,
        total_candidates: result.total_candidates,
        filtered_out: result.filtered_out,
        profile_applied: result.profile_applied,
    };

    tracing::info!(
        "Returning {} jobs for user {} (from {} candidates, {} filtered)",
        response.jobs.len(),
        user_id,
        response.total_candidates,
        response.filtered_out
    );

    HttpResponse::Ok().json(response)
}

fn preferences_response(user_id: String, preferences: UserPreferences) -> PreferencesResponse {
    PreferencesResponse {
        user_id,
        completeness: preferences.completeness(),
        has_completed_profile: preferences.has_completed_profile(),
        preferences,
    }
}

fn blocking_failure(error: &str, e: actix_web::error::BlockingError) -> HttpResponse {
    tracing::error!("{}: {}", error, e);
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: error.to_string(),
        message: e.to_string(),
        status_code: 500,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JobPosting, WorkType};
    use crate::services::MemoryStore;
    use actix_web::{test, App};

    fn test_state() -> AppState {
        AppState {
            preferences: Arc::new(PreferenceRegistry::new(Arc::new(MemoryStore::new()), 100, 60)),
            ranker: Ranker::with_default_weights(),
            default_limit: 50,
            max_limit: 100,
        }
    }

    fn job(id: &str, title: &str, location: &str) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            title: title.to_string(),
            location: location.to_string(),
            skills: vec!["Python".to_string()],
            salary_text: Some("$100K".to_string()),
            ..Default::default()
        }
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().configure(configure)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let resp: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.status, "healthy");
    }

    #[actix_web::test]
    async fn test_save_then_get_preferences() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/preferences/u1")
            .set_json(serde_json::json!({
                "jobTitle": "Software Engineer",
                "skills": "Python,React",
                "salaryMax": "120000"
            }))
            .to_request();
        let saved: PreferencesResponse = test::call_and_read_body_json(&app, req).await;
        assert!(saved.has_completed_profile);
        assert_eq!(saved.completeness, 60);

        let req = test::TestRequest::get().uri("/preferences/u1").to_request();
        let fetched: PreferencesResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched.preferences.job_title, "Software Engineer");

        let req = test::TestRequest::delete().uri("/preferences/u1").to_request();
        let cleared: PreferencesResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(cleared.preferences, UserPreferences::default());
    }

    #[actix_web::test]
    async fn test_rank_with_explicit_preferences() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(configure),
        )
        .await;

        let preferences = UserPreferences {
            job_title: "Software Engineer".to_string(),
            skills: "Python".to_string(),
            salary_min: "80000".to_string(),
            work_type: WorkType::Remote,
            ..Default::default()
        };
        let request = RankJobsRequest {
            user_id: "u1".to_string(),
            jobs: vec![job("1", "Software Engineer", "Austin, TX"), job("2", "Software Engineer", "Remote")],
            limit: None,
            preferences: Some(preferences),
        };

        let req = test::TestRequest::post().uri("/jobs/rank").set_json(&request).to_request();
        let resp: RankJobsResponse = test::call_and_read_body_json(&app, req).await;

        assert!(resp.profile_applied);
        assert_eq!(resp.total_candidates, 2);
        assert_eq!(resp.filtered_out, 1);
        assert_eq!(resp.jobs[0].id, "2");
    }

    #[actix_web::test]
    async fn test_rank_rejects_empty_user_id() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/jobs/rank")
            .set_json(serde_json::json!({ "userId": "", "jobs": [] }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
