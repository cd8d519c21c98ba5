// Route exports
pub mod faces;

use actix_web::{middleware, web};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(faces::configure);
    cfg.default_service(web::route().to(faces::invalid_method));
}

/// Fixed header set carried by every response
pub fn default_headers() -> middleware::DefaultHeaders {
    middleware::DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "GET, POST, OPTIONS"))
        .add(("Access-Control-Allow-Headers", "Content-Type, Authorization"))
}
