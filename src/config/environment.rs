//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;

/// Estrategia de autenticación desplegada
///
/// La selección se hace por configuración, nunca por lógica duplicada
/// en las rutas: `bearer` emite JWT stateless, `session` usa cookies
/// con estado server-side en Redis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStrategyKind {
    Bearer,
    Session,
}

impl AuthStrategyKind {
    /// Parsear desde AUTH_STRATEGY; valores desconocidos caen a bearer
    pub fn from_env_value(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "session" | "cookie" => AuthStrategyKind::Session,
            _ => AuthStrategyKind::Bearer,
        }
    }

}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub auth_strategy: AuthStrategyKind,
    pub google_client_id: Option<String>,
    pub redis_url: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "smart-mobility-secret-key".to_string()),
            jwt_expiration: env::var("JWT_EXPIRATION")
                .unwrap_or_else(|_| "604800".to_string()) // 7 días
                .parse()
                .expect("JWT_EXPIRATION must be a valid number"),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:8081,http://localhost:3000".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            auth_strategy: AuthStrategyKind::from_env_value(
                &env::var("AUTH_STRATEGY").unwrap_or_else(|_| "bearer".to_string()),
            ),
            google_client_id: env::var("GOOGLE_CLIENT_ID").ok(),
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        }
    }
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_strategy_from_env_value() {
        assert_eq!(AuthStrategyKind::from_env_value("session"), AuthStrategyKind::Session);
        assert_eq!(AuthStrategyKind::from_env_value("cookie"), AuthStrategyKind::Session);
        assert_eq!(AuthStrategyKind::from_env_value("bearer"), AuthStrategyKind::Bearer);
        // Valores desconocidos caen a bearer
        assert_eq!(AuthStrategyKind::from_env_value("jwt"), AuthStrategyKind::Bearer);
    }
}
