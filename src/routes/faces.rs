use crate::core::{DispatchOutcome, RequestDispatcher};
use crate::models::{HealthResponse, InboundRequest, RequestMethod};
use crate::services::FaceStoreClient;
use actix_web::http::{Method, StatusCode};
use actix_web::{web, HttpResponse, Responder};
use std::collections::HashMap;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: RequestDispatcher,
    pub store: Arc<FaceStoreClient>,
}

/// Configure the face-auth routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check)).service(
        web::resource("/faces")
            .route(web::route().method(Method::OPTIONS).to(preflight))
            .route(web::post().to(store_face))
            .route(web::get().to(compare_face))
            .default_service(web::route().to(invalid_method)),
    );
}

/// Convert a dispatch outcome into an HTTP response
///
/// The fixed header set is attached by the DefaultHeaders middleware so
/// that error-handler responses carry it too.
fn respond(outcome: DispatchOutcome) -> HttpResponse {
    HttpResponse::build(
        StatusCode::from_u16(outcome.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    )
    .json(outcome.body)
}

/// CORS preflight: fixed 200 acknowledgement, no validation, no side effects
///
/// OPTIONS /faces
async fn preflight(state: web::Data<AppState>) -> impl Responder {
    let request = InboundRequest {
        method: Some(RequestMethod::Options),
        ..Default::default()
    };

    respond(state.dispatcher.dispatch(&request).await)
}

/// Store a reference face image
///
/// POST /faces
///
/// Request body:
/// ```json
/// {
///   "userEmail": "string",
///   "image": "<base64>"
/// }
/// ```
async fn store_face(state: web::Data<AppState>, body: web::Bytes) -> impl Responder {
    let request = InboundRequest {
        method: Some(RequestMethod::Post),
        body: Some(String::from_utf8_lossy(&body).into_owned()),
        ..Default::default()
    };

    respond(state.dispatcher.dispatch(&request).await)
}

/// Compare a probe image against the stored reference
///
/// GET /faces?userEmail=...&image=<base64>
async fn compare_face(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let request = InboundRequest {
        method: Some(RequestMethod::Get),
        query: query.into_inner(),
        ..Default::default()
    };

    respond(state.dispatcher.dispatch(&request).await)
}

/// Unrecognized method or unrouted path
pub async fn invalid_method(state: web::Data<AppState>) -> impl Responder {
    respond(state.dispatcher.dispatch(&InboundRequest::default()).await)
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_respond_maps_status() {
        let response = respond(DispatchOutcome {
            status: 404,
            body: json!({ "error": "No image found for the given email" }),
        });

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_respond_rejects_bogus_status() {
        let response = respond(DispatchOutcome {
            status: 1,
            body: json!({}),
        });

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
