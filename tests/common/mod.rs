use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use portfolio_api::config::{
    Config, CorsConfig, DatabaseConfig, EmailConfig, ObservabilityConfig, ServerConfig,
};
use portfolio_api::email::EmailService;
use portfolio_api::routes::AppState;
use portfolio_api::store::ContactStore;
use portfolio_api::{create_app, db};

pub fn test_config() -> Config {
    Config {
        environment: "test".to_string(),
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        email: EmailConfig::default(),
        cors: CorsConfig::default(),
        observability: ObservabilityConfig::default(),
    }
}

/// In-memory store with migrations applied
pub async fn setup_store() -> ContactStore {
    let pool = db::create_pool("sqlite::memory:", 1)
        .await
        .expect("Failed to create test pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    ContactStore::connected(pool)
}

pub fn test_app(store: ContactStore) -> Router {
    let config = test_config();
    let email = EmailService::new(&config.email).expect("Failed to build email service");
    let state = AppState {
        config,
        store,
        email,
    };
    create_app(state).expect("Failed to build router")
}

/// Drive one request through the router and decode the JSON response
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}
