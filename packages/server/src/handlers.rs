//! HTTP handler functions for the street LVI API.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, web};
use street_lvi_server_models::ApiHealth;

use crate::{AppState, PreparedCollection};

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        streets: state.streets.summary.clone(),
        boundaries: state.boundaries.summary.clone(),
    })
}

/// `GET /api/streets`
///
/// Returns the street segments kept by the street filter.
pub async fn streets(state: web::Data<AppState>) -> HttpResponse {
    geojson_response(&state.streets)
}

/// `GET /api/boundaries`
///
/// Returns every municipal boundary.
pub async fn boundaries(state: web::Data<AppState>) -> HttpResponse {
    geojson_response(&state.boundaries)
}

fn geojson_response(prepared: &PreparedCollection) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(prepared.body.clone())
}
