use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::route_dto::{
    HistoryQuery, ListFrequentQuery, Pagination, RouteSortKey, SaveRouteRequest, UseRouteRequest,
};
use crate::models::frequent_route::FrequentRoute;
use crate::repositories::route_repository::RouteRepository;
use crate::services::route_matching_service::{RouteMatchingService, COORDINATE_TOLERANCE};
use crate::utils::errors::AppError;

pub struct RouteController {
    repository: RouteRepository,
}

impl RouteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RouteRepository::new(pool),
        }
    }

    pub async fn list_frequent(
        &self,
        user_id: Uuid,
        query: ListFrequentQuery,
    ) -> Result<Vec<FrequentRoute>, AppError> {
        let limit = query.limit.unwrap_or(10).max(1);
        let sort = RouteSortKey::from_param(query.sort_by.as_deref());

        self.repository.list_active(user_id, sort, Some(limit)).await
    }

    /// Guardar una ruta nueva o registrar el uso de una equivalente
    pub async fn save_route(
        &self,
        user_id: Uuid,
        request: SaveRouteRequest,
    ) -> Result<(FrequentRoute, bool), AppError> {
        request.validate()?;
        RouteMatchingService::validate_pair(
            &request.origin.coordinates,
            &request.destination.coordinates,
        )?;

        info!(
            "🗺️ Guardando ruta: {} → {}",
            request.origin.name, request.destination.name
        );

        let (route, is_new) = self
            .repository
            .save_or_use(user_id, &request, COORDINATE_TOLERANCE)
            .await?;

        if is_new {
            info!("🆕 Nueva ruta frecuente creada: {}", route.route_name);
        } else {
            info!("📍 Ruta existente encontrada, uso actualizado: {}", route.route_name);
        }

        Ok((route, is_new))
    }

    pub async fn use_route(
        &self,
        user_id: Uuid,
        route_id: Uuid,
        request: UseRouteRequest,
    ) -> Result<FrequentRoute, AppError> {
        self.repository
            .record_use(route_id, user_id, request.route_info.as_ref())
            .await
    }

    /// Soft delete de una ruta del caller
    pub async fn deactivate_route(&self, user_id: Uuid, route_id: Uuid) -> Result<(), AppError> {
        let deleted = self.repository.deactivate(route_id, user_id).await?;

        if !deleted {
            return Err(AppError::NotFound("Ruta no encontrada".to_string()));
        }

        Ok(())
    }

    pub async fn history(
        &self,
        user_id: Uuid,
        query: HistoryQuery,
    ) -> Result<(Vec<FrequentRoute>, Pagination), AppError> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(20).max(1);

        let (routes, total) = self.repository.history(user_id, page, limit).await?;
        let pagination = Pagination::new(page, limit, total);

        Ok((routes, pagination))
    }
}
