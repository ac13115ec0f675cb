//! Sesiones server-side en Redis
//!
//! Estado de la estrategia de autenticación por cookie: tokens opacos
//! con TTL, sin nada sensible en el cliente.

use anyhow::Result;
use rand::{distributions::Alphanumeric, Rng};
use redis::{aio::ConnectionManager, AsyncCommands};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::utils::errors::AppError;

/// TTL de sesión: 24 horas
pub const SESSION_TTL_SECONDS: u64 = 24 * 60 * 60;

/// Nombre de la cookie de sesión
pub const SESSION_COOKIE: &str = "mobility_sid";

const SESSION_TOKEN_LEN: usize = 48;

/// Identidad del caller guardada en la sesión
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
}

/// Store de sesiones con connection pooling async
#[derive(Clone)]
pub struct SessionStore {
    manager: ConnectionManager,
}

impl SessionStore {
    pub async fn new(redis_url: &str) -> Result<Self> {
        info!("🔗 Conectando a Redis: {}", redis_url);

        let client = redis::Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        // Test de conexión usando un comando simple
        let mut conn = manager.clone();
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;

        info!("✅ Redis conectado exitosamente");

        Ok(Self { manager })
    }

    fn make_key(token: &str) -> String {
        format!("smart_mobility:session:{}", token)
    }

    /// Crear una sesión nueva y devolver su token opaco
    pub async fn create(&self, data: &SessionData) -> Result<String, AppError> {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SESSION_TOKEN_LEN)
            .map(char::from)
            .collect();

        let serialized = serde_json::to_string(data)
            .map_err(|e| AppError::Internal(format!("Error serializando sesión: {}", e)))?;

        let mut conn = self.manager.clone();
        let _: () = redis::cmd("SETEX")
            .arg(Self::make_key(&token))
            .arg(SESSION_TTL_SECONDS)
            .arg(serialized)
            .query_async(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Error guardando sesión: {}", e)))?;

        Ok(token)
    }

    pub async fn get(&self, token: &str) -> Result<Option<SessionData>, AppError> {
        let mut conn = self.manager.clone();

        match conn.get::<_, Option<String>>(Self::make_key(token)).await {
            Ok(Some(value)) => {
                let data: SessionData = serde_json::from_str(&value)
                    .map_err(|e| AppError::Internal(format!("Sesión corrupta: {}", e)))?;
                Ok(Some(data))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                warn!("⚠️ Error leyendo sesión: {}", e);
                Ok(None)
            }
        }
    }

    /// Destruir una sesión; devuelve false si ya no existía
    pub async fn destroy(&self, token: &str) -> Result<bool, AppError> {
        let mut conn = self.manager.clone();

        let removed: i64 = conn
            .del(Self::make_key(token))
            .await
            .map_err(|e| AppError::Internal(format!("Error eliminando sesión: {}", e)))?;

        Ok(removed > 0)
    }
}
