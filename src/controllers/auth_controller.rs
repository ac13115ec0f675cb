use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, RegisterRequest};
use crate::dto::route_dto::RouteSortKey;
use crate::models::frequent_route::FrequentRoute;
use crate::models::user::User;
use crate::repositories::route_repository::RouteRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::google_oauth_service::GoogleProfile;
use crate::utils::errors::AppError;

pub struct AuthController {
    users: UserRepository,
    routes: RouteRepository,
}

impl AuthController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            routes: RouteRepository::new(pool),
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<User, AppError> {
        request.validate()?;

        let email = request.email.trim().to_lowercase();

        if self.users.email_exists(&email).await? {
            return Err(AppError::Conflict("Este correo ya está registrado".to_string()));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        let user = self
            .users
            .create_local(request.name.trim(), &email, &password_hash)
            .await?;

        info!("🆕 Usuario registrado: {}", user.email);
        Ok(user)
    }

    pub async fn login(&self, request: LoginRequest) -> Result<User, AppError> {
        request.validate()?;

        let email = request.email.trim().to_lowercase();

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        // Usuarios creados vía OAuth no tienen contraseña local
        let password_hash = user.password_hash.as_deref().ok_or_else(|| {
            AppError::Unauthorized("Este usuario no tiene contraseña configurada".to_string())
        })?;

        let valid = verify(&request.password, password_hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        self.users.touch_last_active(user.id).await?;

        info!("✅ Login exitoso: {}", user.email);
        Ok(user)
    }

    /// Login con Google: enlaza una cuenta existente (por google_id o por
    /// email) o crea una nueva
    pub async fn google_login(&self, profile: GoogleProfile) -> Result<User, AppError> {
        match self
            .users
            .find_by_google_id_or_email(&profile.google_id, &profile.email)
            .await?
        {
            Some(existing) => {
                self.users
                    .link_google_account(existing.id, &profile.google_id, profile.picture.as_deref())
                    .await
            }
            None => {
                let user = self
                    .users
                    .create_google(
                        &profile.google_id,
                        &profile.name,
                        &profile.email,
                        profile.picture.as_deref(),
                    )
                    .await?;

                info!("🆕 Nuevo usuario de Google: {}", user.name);
                Ok(user)
            }
        }
    }

    /// Revalidar la credencial: el usuario puede haber sido eliminado
    /// mientras el token seguía vigente
    pub async fn verify(&self, user_id: Uuid) -> Result<User, AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        self.users.touch_last_active(user.id).await?;

        Ok(user)
    }

    /// Perfil propio con las 5 rutas activas más recientes
    pub async fn me(&self, user_id: Uuid) -> Result<(User, Vec<FrequentRoute>), AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        let recent = self
            .routes
            .list_active(user_id, RouteSortKey::LastUsed, Some(5))
            .await?;

        Ok((user, recent))
    }
}
