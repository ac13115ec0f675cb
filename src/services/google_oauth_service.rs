//! Verificación de ID tokens de Google
//!
//! El handshake OAuth vive en el cliente móvil; el backend recibe el ID
//! token resultante y lo verifica contra el endpoint tokeninfo de Google.

use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::utils::errors::AppError;

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Perfil mínimo extraído de un ID token verificado
#[derive(Debug, Clone)]
pub struct GoogleProfile {
    pub google_id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

/// Campos relevantes de la respuesta de tokeninfo
#[derive(Debug, Deserialize)]
struct TokenInfo {
    sub: String,
    aud: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

pub struct GoogleOAuthService {
    client: Client,
    client_id: Option<String>,
}

impl GoogleOAuthService {
    pub fn new(client: Client, client_id: Option<String>) -> Self {
        Self { client, client_id }
    }

    pub async fn verify_id_token(&self, id_token: &str) -> Result<GoogleProfile, AppError> {
        let url = format!("{}?id_token={}", TOKENINFO_URL, urlencoding::encode(id_token));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Error consultando tokeninfo: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Unauthorized(
                "Token de Google inválido o expirado".to_string(),
            ));
        }

        let info: TokenInfo = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Respuesta inválida de tokeninfo: {}", e)))?;

        // El token debe haber sido emitido para esta aplicación
        if let Some(expected) = &self.client_id {
            if info.aud != *expected {
                return Err(AppError::Unauthorized(
                    "El token no pertenece a esta aplicación".to_string(),
                ));
            }
        }

        let email = info
            .email
            .map(|e| e.to_lowercase())
            .ok_or_else(|| {
                AppError::Unauthorized("El token de Google no incluye email".to_string())
            })?;

        let name = match info.name {
            Some(name) => name,
            None => email.split('@').next().unwrap_or_default().to_string(),
        };

        info!("🔐 Usuario autenticado con Google: {}", name);

        Ok(GoogleProfile {
            google_id: info.sub,
            email,
            name,
            picture: info.picture,
        })
    }
}
