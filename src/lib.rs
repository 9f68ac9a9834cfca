pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod query;
pub mod routes;
pub mod schema;
pub mod serializers;
pub mod services;
pub mod validation;

use crate::config::Config;
use crate::db::DbPool;
use crate::middleware::auth::AuthService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub auth_service: AuthService,
}

impl AppState {
    pub fn new(db: DbPool, config: Config) -> Self {
        let auth_service = AuthService::new(config.auth());
        Self {
            db,
            config: Arc::new(config),
            auth_service,
        }
    }
}

pub fn init_tracing(config: &Config) {
    let logging = config.logging();
    let level = match logging.level.as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };

    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_max_level(level)
                .init();
        }
        _ => {
            tracing_subscriber::fmt().with_max_level(level).init();
        }
    }
}
