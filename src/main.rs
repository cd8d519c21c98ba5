use actix_web::http::StatusCode;
use actix_web::{error, middleware, web, App, HttpResponse, HttpServer};
use face_auth::config::Settings;
use face_auth::core::RequestDispatcher;
use face_auth::routes::{self, faces::AppState};
use face_auth::services::{FaceStoreClient, RekognitionClient};
use std::sync::Arc;
use tracing::info;

/// JSON error response for malformed request payloads
#[derive(Debug, serde::Serialize)]
pub struct PayloadRejection {
    pub error: String,
}

impl std::fmt::Display for PayloadRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for PayloadRejection {}

impl error::ResponseError for PayloadRejection {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::BAD_REQUEST).json(self)
    }
}

/// Handle query payload errors
pub fn handle_query_payload_error(
    err: error::QueryPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("Query payload error on {}: {}", req.path(), err);
    PayloadRejection {
        error: "Malformed query string".to_string(),
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting face-auth service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize the face store client
    let table_name = settings.store.table_name.clone();
    let store = Arc::new(FaceStoreClient::new(
        settings.store.endpoint,
        settings.store.table_name,
        settings.store.auth_token,
        settings.store.timeout_secs.unwrap_or(30),
    ));

    info!("Face store client initialized (table: {})", table_name);

    // Initialize the face-comparison client
    let rekognition = Arc::new(RekognitionClient::new(
        settings.rekognition.endpoint,
        settings.rekognition.auth_token,
        settings.rekognition.similarity_threshold,
        settings.rekognition.timeout_secs.unwrap_or(30),
    ));

    info!(
        "Face-comparison client initialized (threshold: {})",
        settings.rekognition.similarity_threshold
    );

    // Build application state
    let dispatcher = RequestDispatcher::new(store.clone(), rekognition);

    let app_state = AppState { dispatcher, store };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(routes::default_headers())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
