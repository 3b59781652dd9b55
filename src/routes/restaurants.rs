use actix_web::{http::header::ContentType, web, HttpResponse, Responder};

use crate::core::Catalog;
use crate::models::HealthResponse;

/// The wheel page, served as-is
const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
}

/// Configure the data routes under `/api`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/restaurants", web::get().to(list_restaurants));
}

/// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// GET /
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML)
}

/// Restaurant list endpoint
///
/// GET /api/restaurants
///
/// Returns every restaurant, unfiltered, in seed order:
/// ```json
/// [
///   {"id": "w1", "name": "Uptown Pho", "cuisine": "Vietnamese", "price": "$",
///    "rating": 4.5, "diet": ["gluten_free"], "lat": 43.466, "lng": -80.519,
///    "access": ["wheelchair_ramp"]}
/// ]
/// ```
pub async fn list_restaurants(state: web::Data<AppState>) -> impl Responder {
    tracing::debug!("Serving {} restaurants", state.catalog.len());
    HttpResponse::Ok().json(state.catalog.all())
}
