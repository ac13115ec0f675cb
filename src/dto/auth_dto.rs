//! DTOs de autenticación

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::user_dto::UserWithRoutes;
use crate::models::user::PublicUser;

/// Request de registro local
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 100))]
    pub password: String,
}

/// Request de login local
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Request de login con Google (ID token ya obtenido por el cliente)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleLoginRequest {
    pub id_token: String,
}

/// Response de registro/login
///
/// `token` solo está presente con la estrategia bearer; con sesiones la
/// credencial viaja en el header Set-Cookie.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub user: PublicUser,
}

/// Response de verificación de credencial
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub user: PublicUser,
}

/// Response del perfil propio con las rutas recientes
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub success: bool,
    pub user: UserWithRoutes,
}

/// Response de logout
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}
