use axum::{
    extract::State,
    middleware,
    routing::{get, put},
    Extension, Json, Router,
};

use crate::controllers::user_controller::UserController;
use crate::dto::user_dto::{
    ProfileResponse, StatsResponse, UpdateProfileRequest, UpdateProfileResponse, UserWithRoutes,
};
use crate::middleware::auth::{require_auth, AuthUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/profile", put(update_profile))
        .route("/stats", get(get_stats))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

async fn get_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let (user, routes, count) = controller.profile(caller.id).await?;

    Ok(Json(ProfileResponse {
        success: true,
        user: UserWithRoutes {
            user: user.into(),
            frequent_routes: routes,
        },
        route_count: count,
    }))
}

async fn update_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UpdateProfileResponse>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let user = controller.update_profile(caller.id, request).await?;

    Ok(Json(UpdateProfileResponse {
        success: true,
        message: "Perfil actualizado exitosamente".to_string(),
        user: user.into(),
    }))
}

async fn get_stats(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
) -> Result<Json<StatsResponse>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let stats = controller.stats(caller.id).await?;

    Ok(Json(StatsResponse {
        success: true,
        stats,
    }))
}
