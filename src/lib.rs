pub mod config;
pub mod db;
pub mod email;
pub mod error;
pub mod observability;
pub mod routes;
pub mod store;

pub use routes::AppState;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the application router
///
/// Shared by the server binary and the integration tests so both exercise the
/// same routing, layers and state wiring.
pub fn create_app(state: AppState) -> anyhow::Result<Router> {
    use routes::contact::{
        create_contact, delete_contact, get_contact, list_contacts, update_contact_status,
    };
    use routes::health::health;

    let cors = match &state.config.cors.allowed_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE]),
        None => CorsLayer::new(),
    };

    let app = Router::new()
        .route("/api/contact", get(list_contacts).post(create_contact))
        .route("/api/contact/{id}", get(get_contact).delete(delete_contact))
        .route("/api/contact/{id}/status", put(update_contact_status))
        .route("/api/health", get(health))
        .fallback(routes::fallback)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}
