//! Autenticación del caller
//!
//! Dos estrategias intercambiables detrás de una sola capacidad
//! (`AuthStrategy`): bearer token stateless (JWT) o cookie de sesión con
//! estado en Redis. La selección es por configuración de despliegue; las
//! rutas no saben cuál está activa.

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::models::user::User;
use crate::services::session_service::{
    SessionData, SessionStore, SESSION_COOKIE, SESSION_TTL_SECONDS,
};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{self, JwtConfig};

/// Caller autenticado, inyectado como extensión del request
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

/// Credencial emitida al registrar o loguear un usuario
#[derive(Debug)]
pub enum IssuedCredential {
    Bearer(String),
    Session(String),
}

/// Capacidad de autenticación: emitir, resolver y revocar credenciales
#[async_trait]
pub trait AuthStrategy: Send + Sync {
    async fn issue(&self, user: &User) -> AppResult<IssuedCredential>;
    async fn resolve(&self, headers: &HeaderMap) -> AppResult<AuthUser>;
    async fn revoke(&self, headers: &HeaderMap) -> AppResult<bool>;
}

/// Estrategia stateless: JWT en el header Authorization
pub struct BearerAuth {
    config: JwtConfig,
}

impl BearerAuth {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl AuthStrategy for BearerAuth {
    async fn issue(&self, user: &User) -> AppResult<IssuedCredential> {
        let token = jwt::generate_token(user.id, &user.email, &user.name, &self.config)?;
        Ok(IssuedCredential::Bearer(token))
    }

    async fn resolve(&self, headers: &HeaderMap) -> AppResult<AuthUser> {
        let auth_header = headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("No autenticado".to_string()))?;

        let token = jwt::extract_token_from_header(auth_header)?;
        let claims = jwt::verify_token(token, &self.config)?;

        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Jwt("Token con subject inválido".to_string()))?;

        Ok(AuthUser {
            id,
            email: claims.email,
            name: claims.name,
        })
    }

    async fn revoke(&self, _headers: &HeaderMap) -> AppResult<bool> {
        // Un JWT no se revoca server-side; expira solo
        Ok(false)
    }
}

/// Estrategia con estado: cookie de sesión respaldada en Redis
pub struct SessionAuth {
    store: SessionStore,
}

impl SessionAuth {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }
}

/// Extraer el token de sesión del header Cookie
fn session_token_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(http::header::COOKIE)?.to_str().ok()?;

    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Construir el valor de Set-Cookie para una sesión recién emitida
pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, SESSION_TTL_SECONDS
    )
}

#[async_trait]
impl AuthStrategy for SessionAuth {
    async fn issue(&self, user: &User) -> AppResult<IssuedCredential> {
        let data = SessionData {
            user_id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        };

        let token = self.store.create(&data).await?;
        Ok(IssuedCredential::Session(token))
    }

    async fn resolve(&self, headers: &HeaderMap) -> AppResult<AuthUser> {
        let token = session_token_from_headers(headers)
            .ok_or_else(|| AppError::Unauthorized("No autenticado".to_string()))?;

        let data = self
            .store
            .get(&token)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Sesión inválida o expirada".to_string()))?;

        Ok(AuthUser {
            id: data.user_id,
            email: data.email,
            name: data.name,
        })
    }

    async fn revoke(&self, headers: &HeaderMap) -> AppResult<bool> {
        match session_token_from_headers(headers) {
            Some(token) => self.store.destroy(&token).await,
            None => Ok(false),
        }
    }
}

/// Middleware que exige un caller autenticado y lo inyecta en el request
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = state.auth.resolve(request.headers()).await?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::Utc;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            google_id: None,
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password_hash: None,
            profile_picture: None,
            provider: "local".to_string(),
            preferences: None,
            total_trips: 0,
            last_active: Utc::now(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_bearer_issue_and_resolve() {
        let strategy = BearerAuth::new(JwtConfig {
            secret: "test-secret".to_string(),
            expiration: 3600,
        });
        let user = sample_user();

        let token = match strategy.issue(&user).await.unwrap() {
            IssuedCredential::Bearer(token) => token,
            other => panic!("unexpected credential: {:?}", other),
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );

        let resolved = strategy.resolve(&headers).await.unwrap();
        assert_eq!(resolved.id, user.id);
        assert_eq!(resolved.email, user.email);
    }

    #[tokio::test]
    async fn test_bearer_resolve_without_header() {
        let strategy = BearerAuth::new(JwtConfig {
            secret: "test-secret".to_string(),
            expiration: 3600,
        });

        assert!(strategy.resolve(&HeaderMap::new()).await.is_err());
    }

    #[test]
    fn test_session_token_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::COOKIE,
            HeaderValue::from_static("other=1; mobility_sid=abc123; theme=dark"),
        );

        assert_eq!(session_token_from_headers(&headers).as_deref(), Some("abc123"));
        assert_eq!(session_token_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn test_session_cookie_format() {
        let cookie = session_cookie("tok");
        assert!(cookie.starts_with("mobility_sid=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=86400"));
    }
}
