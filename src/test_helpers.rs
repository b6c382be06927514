use std::sync::Arc;

use axum::{Router, middleware};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};

use crate::{
    auth::{
        bootstrap::build_verifiers,
        jwt::{JwtKeys, encode_token, make_claims},
        providers::VerifierId,
    },
    config::{AppConfig, AuthConfig},
    middleware::{catch_panic_layer, json_error_middleware},
    routes::router,
    state::AppState,
};

pub const TEST_JWT_SECRET: &str = "test-secret";

/// Config that verifies tokens locally with [`TEST_JWT_SECRET`].
pub fn test_config() -> AppConfig {
    AppConfig {
        auth: AuthConfig {
            provider: VerifierId::Jwt,
            jwt_secret: Some(TEST_JWT_SECRET.to_string()),
            ..AuthConfig::default()
        },
        ..AppConfig::default()
    }
}

pub fn test_state(db: DatabaseConnection) -> Arc<AppState> {
    let cfg = test_config();
    let verifiers = build_verifiers(&cfg.auth).expect("create token verifiers");
    AppState::new(cfg, db, verifiers)
}

/// Full application router, layered the way the server binary layers it.
pub fn test_app(db: DatabaseConnection) -> Router {
    Router::new()
        .merge(router(test_state(db)))
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer())
}

pub fn test_router() -> Router {
    test_app(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
}

pub fn bearer_for(user_id: i64) -> String {
    let keys = JwtKeys::from_secret(TEST_JWT_SECRET.as_bytes());
    let token = encode_token(&keys, &make_claims(user_id, 3600)).expect("encode test token");
    format!("Bearer {token}")
}
