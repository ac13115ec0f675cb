//! Smart Mobility Backend
//!
//! Backend para la app de movilidad: autenticación (Google OAuth y
//! email/contraseña), perfiles de usuario y rutas frecuentes con
//! estadísticas de uso.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;
use utils::errors::AppError;

/// Construir el router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    let cors = if state.config.is_production() && !state.config.cors_origins.is_empty() {
        cors_middleware_with_origins(&state.config.cors_origins)
    } else {
        cors_middleware()
    };

    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .nest("/api/auth", routes::auth_routes::create_auth_router(state.clone()))
        .nest("/api/users", routes::user_routes::create_user_router(state.clone()))
        .nest("/api/routes", routes::route_routes::create_route_router(state.clone()))
        .fallback(not_found)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
        .with_state(state)
}

/// Manejo de rutas inexistentes
async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": "Ruta no encontrada"
        })),
    )
}

/// Ruta de bienvenida
async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "🚀 Smart Mobility Backend API",
        "version": "1.0.0",
        "status": "OK",
        "endpoints": {
            "health": "/api/health",
            "auth": "/api/auth",
            "users": "/api/users",
            "routes": "/api/routes"
        }
    }))
}

/// Health check con ping a la base de datos
async fn health(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    config::database::ping(&state.pool).await?;

    Ok(Json(json!({
        "status": "OK",
        "message": "Smart Mobility Backend funcionando",
        "database": "PostgreSQL conectado",
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
