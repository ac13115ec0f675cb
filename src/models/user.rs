//! Modelo de User
//!
//! Este módulo contiene el struct User y sus responses para la API.
//! Mapea exactamente a la tabla users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User - mapea exactamente a la tabla users
///
/// `password_hash` es None para usuarios que solo entraron con Google.
#[derive(Debug, Clone, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub google_id: Option<String>,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub profile_picture: Option<String>,
    pub provider: String,
    pub preferences: Option<serde_json::Value>,
    pub total_trips: i32,
    pub last_active: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Response de usuario para la API (sin credenciales)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_picture: Option<String>,
    pub provider: String,
    pub preferences: Option<serde_json::Value>,
    pub total_trips: i32,
    pub last_active: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Response mínima de usuario para las operaciones de auth
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            profile_picture: user.profile_picture,
            provider: user.provider,
            preferences: user.preferences,
            total_trips: user.total_trips,
            last_active: user.last_active,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}
