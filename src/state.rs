//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El acceso a datos y la estrategia de
//! autenticación entran por inyección explícita, nunca como singletons.

use std::sync::Arc;

use reqwest::Client;
use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::middleware::auth::AuthStrategy;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub auth: Arc<dyn AuthStrategy>,
    pub http_client: Client,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, auth: Arc<dyn AuthStrategy>) -> Self {
        Self {
            pool,
            config,
            auth,
            http_client: Client::new(),
        }
    }
}
