// Route exports
pub mod restaurants;

use actix_web::{web, HttpResponse};

use crate::models::ErrorResponse;

pub use restaurants::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(restaurants::index))
        .route("/health", web::get().to(restaurants::health_check))
        .service(web::scope("/api").configure(restaurants::configure));
}

/// Fallback for unknown paths
pub async fn not_found(req: actix_web::HttpRequest) -> HttpResponse {
    tracing::debug!("No route for {} {}", req.method(), req.path());
    HttpResponse::NotFound().json(ErrorResponse {
        error: "not_found".to_string(),
        message: format!("No route for {}", req.path()),
        status_code: 404,
    })
}
