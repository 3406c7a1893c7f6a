use std::sync::Arc;

use chrono::Duration;

use crate::auth::TokenIssuer;
use crate::config::Config;
use crate::store::{DocumentStore, UserStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub documents: Arc<dyn DocumentStore>,
    pub tokens: TokenIssuer,
    pub config: Config,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        documents: Arc<dyn DocumentStore>,
        config: Config,
    ) -> Self {
        let tokens = TokenIssuer::new(
            &config.jwt_secret,
            Duration::minutes(config.token_ttl_minutes),
        );
        AppState {
            users,
            documents,
            tokens,
            config,
        }
    }
}

#[cfg(test)]
impl AppState {
    /// State over a fresh in-memory store, with the test config.
    pub fn for_tests() -> Self {
        let store = Arc::new(crate::store::memory::MemoryStore::new());
        AppState::new(store.clone(), store, Config::for_tests())
    }
}
