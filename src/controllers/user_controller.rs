use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::route_dto::RouteSortKey;
use crate::dto::user_dto::{RouteUsageStats, UpdateProfileRequest, UserStats};
use crate::models::frequent_route::FrequentRoute;
use crate::models::user::User;
use crate::repositories::route_repository::RouteRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;

pub struct UserController {
    users: UserRepository,
    routes: RouteRepository,
}

/// Promedio de usos redondeado al entero más cercano; 0 sin rutas
fn round_average(avg: f64) -> i64 {
    avg.round() as i64
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            routes: RouteRepository::new(pool),
        }
    }

    /// Perfil del usuario con todas sus rutas activas
    pub async fn profile(&self, user_id: Uuid) -> Result<(User, Vec<FrequentRoute>, i64), AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        let routes = self
            .routes
            .list_active(user_id, RouteSortKey::LastUsed, None)
            .await?;

        let count = routes.len() as i64;

        Ok((user, routes, count))
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<User, AppError> {
        request.validate()?;

        let user = self
            .users
            .update_profile(
                user_id,
                request.name.as_deref().map(str::trim),
                request.preferences.as_ref(),
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        Ok(user)
    }

    /// Estadísticas combinadas: actividad del usuario + agregados de rutas
    pub async fn stats(&self, user_id: Uuid) -> Result<UserStats, AppError> {
        let activity = self
            .users
            .activity(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        let usage = self.routes.usage_stats(user_id).await?;
        let top_routes = self.routes.top_routes(user_id).await?;

        Ok(UserStats {
            user: activity,
            routes: RouteUsageStats {
                total_routes: usage.total_routes,
                total_usage: usage.total_usage,
                avg_usage_per_route: round_average(usage.avg_usage),
                top_routes,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_average() {
        // Rutas con timesUsed {2, 3, 5}: promedio 10/3 → 3
        assert_eq!(round_average(10.0 / 3.0), 3);
        assert_eq!(round_average(0.0), 0);
        assert_eq!(round_average(2.5), 3);
        assert_eq!(round_average(1.4), 1);
    }
}
