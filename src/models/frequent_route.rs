//! Modelo de FrequentRoute
//!
//! Este módulo contiene el struct FrequentRoute y sus variantes para la API.
//! Mapea exactamente a la tabla frequent_routes.
//!
//! Ciclo de vida: inexistente → activa (creada) → activa (actualizada,
//! repetible) → inactiva (terminal, vía soft delete). Ninguna transición
//! sale de inactiva.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// FrequentRoute - mapea exactamente a la tabla frequent_routes
///
/// Las coordenadas son grados decimales. `route_info` es un payload
/// opaco del cliente (distancia, duración, polyline) que se reemplaza
/// en cada uso si llega un valor nuevo.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FrequentRoute {
    pub id: Uuid,
    pub user_id: Uuid,
    pub route_name: String,
    pub origin_name: String,
    pub origin_address: Option<String>,
    pub origin_latitude: f64,
    pub origin_longitude: f64,
    pub destination_name: String,
    pub destination_address: Option<String>,
    pub destination_latitude: f64,
    pub destination_longitude: f64,
    pub route_info: Option<serde_json::Value>,
    pub times_used: i32,
    pub last_used: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Proyección para el top de rutas más usadas en las estadísticas
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TopRoute {
    pub route_name: String,
    pub times_used: i32,
    pub origin_name: String,
    pub destination_name: String,
}
