mod handlers;
mod pages;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::state::AppState;

pub fn create_router(state: AppState, config: &Config) -> Router {
    let api = Router::new()
        // Project
        .route("/project", get(handlers::get_project))
        .route("/project", post(handlers::submit_project))
        .route("/projections", get(handlers::get_projections))
        // Report outline
        .route("/report", get(handlers::get_report))
        .route("/report/generate", post(handlers::generate_report))
        .route("/report/expand", post(handlers::expand_report))
        .route("/report/reset", post(handlers::reset_report))
        .route("/report/export/{format}", get(handlers::export_report))
        // Health
        .route("/health", get(handlers::health));

    let browser = Router::new()
        .route("/", get(pages::index))
        .route("/project", post(pages::submit_project))
        .route("/report/generate", post(pages::generate_report))
        .route("/report/expand", post(pages::expand_report))
        .route("/report/reset", post(pages::reset_report))
        .route("/chart.svg", get(pages::chart));

    Router::new()
        .nest("/api/v1", api)
        .merge(browser)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config.cors_origins.as_deref()))
        .with_state(state)
}

/// Permissive CORS unless specific origins are configured.
fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let Some(origins) = origins else {
        return CorsLayer::permissive();
    };

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
