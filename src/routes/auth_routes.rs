use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{
    AuthResponse, GoogleLoginRequest, LoginRequest, LogoutResponse, MeResponse, RegisterRequest,
    VerifyResponse,
};
use crate::dto::user_dto::UserWithRoutes;
use crate::middleware::auth::{require_auth, session_cookie, AuthUser, IssuedCredential};
use crate::models::user::PublicUser;
use crate::services::google_oauth_service::GoogleOAuthService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auth_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/verify", get(verify))
        .route("/me", get(me))
        .route("/logout", post(logout))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/google", post(google_login))
        .merge(protected)
}

/// Armar token y headers de respuesta según la credencial emitida:
/// bearer viaja en el body, sesión en Set-Cookie
fn credential_headers(
    credential: &IssuedCredential,
) -> Result<(Option<String>, HeaderMap), AppError> {
    let mut headers = HeaderMap::new();

    match credential {
        IssuedCredential::Bearer(token) => Ok((Some(token.clone()), headers)),
        IssuedCredential::Session(token) => {
            let value = HeaderValue::from_str(&session_cookie(token))
                .map_err(|e| AppError::Internal(format!("Cookie inválida: {}", e)))?;
            headers.insert(http::header::SET_COOKIE, value);
            Ok((None, headers))
        }
    }
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let controller = AuthController::new(state.pool.clone());
    let user = controller.register(request).await?;

    let credential = state.auth.issue(&user).await?;
    let (token, headers) = credential_headers(&credential)?;

    Ok((
        StatusCode::CREATED,
        headers,
        Json(AuthResponse {
            success: true,
            message: "Usuario registrado exitosamente".to_string(),
            token,
            user: PublicUser::from(&user),
        }),
    ))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let controller = AuthController::new(state.pool.clone());
    let user = controller.login(request).await?;

    let credential = state.auth.issue(&user).await?;
    let (token, headers) = credential_headers(&credential)?;

    Ok((
        StatusCode::OK,
        headers,
        Json(AuthResponse {
            success: true,
            message: "Login exitoso".to_string(),
            token,
            user: PublicUser::from(&user),
        }),
    ))
}

async fn google_login(
    State(state): State<AppState>,
    Json(request): Json<GoogleLoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let oauth = GoogleOAuthService::new(
        state.http_client.clone(),
        state.config.google_client_id.clone(),
    );
    let profile = oauth.verify_id_token(&request.id_token).await?;

    let controller = AuthController::new(state.pool.clone());
    let user = controller.google_login(profile).await?;

    let credential = state.auth.issue(&user).await?;
    let (token, headers) = credential_headers(&credential)?;

    Ok((
        StatusCode::OK,
        headers,
        Json(AuthResponse {
            success: true,
            message: "Login con Google exitoso".to_string(),
            token,
            user: PublicUser::from(&user),
        }),
    ))
}

async fn verify(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
) -> Result<Json<VerifyResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone());
    let user = controller.verify(caller.id).await?;

    Ok(Json(VerifyResponse {
        success: true,
        user: PublicUser::from(&user),
    }))
}

async fn me(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
) -> Result<Json<MeResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone());
    let (user, recent) = controller.me(caller.id).await?;

    Ok(Json(MeResponse {
        success: true,
        user: UserWithRoutes {
            user: user.into(),
            frequent_routes: recent,
        },
    }))
}

async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LogoutResponse>, AppError> {
    let revoked = state.auth.revoke(&headers).await?;

    let message = if revoked {
        "Sesión cerrada exitosamente"
    } else {
        "No había sesión server-side que cerrar"
    };

    Ok(Json(LogoutResponse {
        success: true,
        message: message.to_string(),
    }))
}
