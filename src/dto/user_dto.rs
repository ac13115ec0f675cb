//! DTOs de perfil y estadísticas de usuario

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::frequent_route::{FrequentRoute, TopRoute};
use crate::models::user::UserResponse;

/// Usuario con sus rutas frecuentes activas
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithRoutes {
    #[serde(flatten)]
    pub user: UserResponse,
    pub frequent_routes: Vec<FrequentRoute>,
}

/// Response del perfil
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub success: bool,
    pub user: UserWithRoutes,
    pub route_count: i64,
}

/// Request para actualizar el perfil
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    pub preferences: Option<serde_json::Value>,
}

/// Response al actualizar el perfil
#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    pub success: bool,
    pub message: String,
    pub user: UserResponse,
}

/// Actividad del usuario para las estadísticas
#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserActivity {
    pub total_trips: i32,
    pub last_active: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Agregados de uso sobre las rutas activas del usuario
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteUsageStats {
    pub total_routes: i64,
    pub total_usage: i64,
    pub avg_usage_per_route: i64,
    pub top_routes: Vec<TopRoute>,
}

/// Estadísticas combinadas de usuario y rutas
#[derive(Debug, Serialize)]
pub struct UserStats {
    pub user: UserActivity,
    pub routes: RouteUsageStats,
}

/// Response de estadísticas
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: UserStats,
}
