use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::route_controller::RouteController;
use crate::dto::route_dto::{
    DeleteRouteResponse, FrequentRoutesResponse, HistoryQuery, HistoryResponse,
    ListFrequentQuery, SaveRouteRequest, SaveRouteResponse, UseRouteRequest, UseRouteResponse,
};
use crate::middleware::auth::{require_auth, AuthUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/frequent", get(list_frequent).post(save_route))
        .route("/frequent/:route_id/use", post(use_route))
        .route("/frequent/:route_id", delete(delete_route))
        .route("/history", get(get_history))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

async fn list_frequent(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Query(query): Query<ListFrequentQuery>,
) -> Result<Json<FrequentRoutesResponse>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let routes = controller.list_frequent(caller.id, query).await?;

    let count = routes.len();

    Ok(Json(FrequentRoutesResponse {
        success: true,
        routes,
        count,
    }))
}

async fn save_route(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Json(request): Json<SaveRouteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let (route, is_new) = controller.save_route(caller.id, request).await?;

    let (status, message) = if is_new {
        (StatusCode::CREATED, "Ruta frecuente guardada exitosamente")
    } else {
        (StatusCode::OK, "Ruta actualizada exitosamente")
    };

    Ok((
        status,
        Json(SaveRouteResponse {
            success: true,
            message: message.to_string(),
            route,
            is_new,
        }),
    ))
}

async fn use_route(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(route_id): Path<Uuid>,
    body: Option<Json<UseRouteRequest>>,
) -> Result<Json<UseRouteResponse>, AppError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();

    let controller = RouteController::new(state.pool.clone());
    let route = controller.use_route(caller.id, route_id, request).await?;

    Ok(Json(UseRouteResponse {
        success: true,
        message: "Uso de ruta registrado exitosamente".to_string(),
        route,
    }))
}

async fn delete_route(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(route_id): Path<Uuid>,
) -> Result<Json<DeleteRouteResponse>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    controller.deactivate_route(caller.id, route_id).await?;

    Ok(Json(DeleteRouteResponse {
        success: true,
        message: "Ruta eliminada exitosamente".to_string(),
    }))
}

async fn get_history(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let (routes, pagination) = controller.history(caller.id, query).await?;

    Ok(Json(HistoryResponse {
        success: true,
        routes,
        pagination,
    }))
}
