use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{auth::providers::TokenVerifiers, config::AppConfig};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DatabaseConnection,
    pub verifiers: TokenVerifiers,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseConnection, verifiers: TokenVerifiers) -> Arc<Self> {
        Arc::new(Self {
            config,
            db,
            verifiers,
        })
    }
}
