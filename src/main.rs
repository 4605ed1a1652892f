use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use job_relevance::config::{Settings, StorageBackend};
use job_relevance::core::Ranker;
use job_relevance::models::ScoringWeights;
use job_relevance::routes::{self, relevance::AppState};
use job_relevance::services::{FileStore, KeyValueStore, MemoryStore, PreferenceRegistry};
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle path parameter errors
pub fn handle_path_error(err: error::PathError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_path".to_string(),
        message: format!("Invalid path: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // Initialize logging; LOG_LEVEL / LOG_FORMAT override the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting job relevance service...");

    // Initialize preference storage
    let storage: Arc<dyn KeyValueStore> = match settings.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory preference storage");
            Arc::new(MemoryStore::new())
        }
        StorageBackend::File => match FileStore::new(&settings.storage.directory) {
            Ok(store) => {
                info!("Using file preference storage at {}", settings.storage.directory.display());
                Arc::new(store)
            }
            Err(e) => {
                error!("Failed to open preference directory ({}), falling back to memory", e);
                Arc::new(MemoryStore::new())
            }
        },
    };

    let session_ttl = settings.cache.ttl_secs.unwrap_or(1800);
    let session_size = settings.cache.l1_cache_size.unwrap_or(10_000);
    let preferences = Arc::new(PreferenceRegistry::new(storage, session_size, session_ttl));

    info!("Preference sessions initialized (capacity: {}, idle TTL: {}s)", session_size, session_ttl);

    // Initialize ranker with configured weights
    let weights = ScoringWeights {
        skills: settings.scoring.weights.skills,
        title: settings.scoring.weights.title,
        remote: settings.scoring.weights.remote,
        salary: settings.scoring.weights.salary,
    };

    let ranker = Ranker::new(weights);

    info!("Ranker initialized with weights: {:?}", weights);

    let max_limit = settings.ranking.max_limit.unwrap_or(200);
    let app_state = AppState {
        preferences,
        ranker,
        default_limit: settings.ranking.default_limit.unwrap_or(50).min(max_limit),
        max_limit,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
