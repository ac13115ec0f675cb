use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::route_dto::{Coordinates, RouteSortKey, SaveRouteRequest};
use crate::models::frequent_route::{FrequentRoute, TopRoute};
use crate::utils::errors::AppError;

/// Agregados de uso sobre las rutas activas
#[derive(Debug, sqlx::FromRow)]
pub struct RouteUsageRow {
    pub total_routes: i64,
    pub total_usage: i64,
    pub avg_usage: f64,
}

pub struct RouteRepository {
    pool: PgPool,
}

/// Query de matching geográfico: una ruta activa del usuario cuyas
/// cuatro coordenadas caen dentro de la tolerancia simultáneamente.
/// Empates se resuelven por la ruta usada más recientemente.
fn matching_sql(for_update: bool) -> String {
    let mut sql = String::from(
        "SELECT * FROM frequent_routes \
         WHERE user_id = $1 AND is_active = TRUE \
           AND origin_latitude BETWEEN $2 AND $3 \
           AND origin_longitude BETWEEN $4 AND $5 \
           AND destination_latitude BETWEEN $6 AND $7 \
           AND destination_longitude BETWEEN $8 AND $9 \
         ORDER BY last_used DESC LIMIT 1",
    );
    if for_update {
        sql.push_str(" FOR UPDATE");
    }
    sql
}

/// Contabilizar un viaje del usuario dentro de la transacción en curso
async fn record_trip(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let updated = sqlx::query_scalar::<_, Uuid>(
        "UPDATE users SET total_trips = total_trips + 1, last_active = $2 WHERE id = $1 RETURNING id",
    )
    .bind(user_id)
    .bind(now)
    .fetch_optional(&mut **tx)
    .await?;

    if updated.is_none() {
        return Err(AppError::NotFound("Usuario no encontrado".to_string()));
    }

    Ok(())
}

impl RouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Buscar una ruta existente que coincida dentro de la tolerancia.
    /// Lectura pura, sin efectos.
    pub async fn find_matching(
        &self,
        user_id: Uuid,
        origin: &Coordinates,
        destination: &Coordinates,
        tolerance: f64,
    ) -> Result<Option<FrequentRoute>, AppError> {
        let route = sqlx::query_as::<_, FrequentRoute>(&matching_sql(false))
            .bind(user_id)
            .bind(origin.latitude - tolerance)
            .bind(origin.latitude + tolerance)
            .bind(origin.longitude - tolerance)
            .bind(origin.longitude + tolerance)
            .bind(destination.latitude - tolerance)
            .bind(destination.latitude + tolerance)
            .bind(destination.longitude - tolerance)
            .bind(destination.longitude + tolerance)
            .fetch_optional(&self.pool)
            .await?;

        Ok(route)
    }

    /// Guardar una ruta o registrar el uso de una equivalente existente.
    ///
    /// Matching y escritura van en una sola transacción (el SELECT toma
    /// FOR UPDATE) para que dos requests concurrentes del mismo usuario
    /// no creen rutas duplicadas por lost-update.
    pub async fn save_or_use(
        &self,
        user_id: Uuid,
        request: &SaveRouteRequest,
        tolerance: f64,
    ) -> Result<(FrequentRoute, bool), AppError> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        let origin = &request.origin;
        let destination = &request.destination;

        let existing = sqlx::query_as::<_, FrequentRoute>(&matching_sql(true))
            .bind(user_id)
            .bind(origin.coordinates.latitude - tolerance)
            .bind(origin.coordinates.latitude + tolerance)
            .bind(origin.coordinates.longitude - tolerance)
            .bind(origin.coordinates.longitude + tolerance)
            .bind(destination.coordinates.latitude - tolerance)
            .bind(destination.coordinates.latitude + tolerance)
            .bind(destination.coordinates.longitude - tolerance)
            .bind(destination.coordinates.longitude + tolerance)
            .fetch_optional(&mut *tx)
            .await?;

        let (route, is_new) = match existing {
            Some(found) => {
                let updated = sqlx::query_as::<_, FrequentRoute>(
                    r#"
                    UPDATE frequent_routes
                    SET times_used = times_used + 1,
                        last_used = $2,
                        route_info = COALESCE($3, route_info)
                    WHERE id = $1
                    RETURNING *
                    "#,
                )
                .bind(found.id)
                .bind(now)
                .bind(request.route_info.as_ref())
                .fetch_one(&mut *tx)
                .await?;

                (updated, false)
            }
            None => {
                let route_name = request
                    .route_name
                    .clone()
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| format!("{} → {}", origin.name, destination.name));

                let created = sqlx::query_as::<_, FrequentRoute>(
                    r#"
                    INSERT INTO frequent_routes (
                        id, user_id, route_name,
                        origin_name, origin_address, origin_latitude, origin_longitude,
                        destination_name, destination_address, destination_latitude, destination_longitude,
                        route_info, times_used, last_used, is_active, created_at
                    )
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 1, $13, TRUE, $13)
                    RETURNING *
                    "#,
                )
                .bind(Uuid::new_v4())
                .bind(user_id)
                .bind(route_name)
                .bind(&origin.name)
                .bind(origin.address.as_deref())
                .bind(origin.coordinates.latitude)
                .bind(origin.coordinates.longitude)
                .bind(&destination.name)
                .bind(destination.address.as_deref())
                .bind(destination.coordinates.latitude)
                .bind(destination.coordinates.longitude)
                .bind(request.route_info.as_ref())
                .bind(now)
                .fetch_one(&mut *tx)
                .await?;

                (created, true)
            }
        };

        record_trip(&mut tx, user_id, now).await?;
        tx.commit().await?;

        Ok((route, is_new))
    }

    /// Registrar el uso explícito de una ruta activa del caller
    pub async fn record_use(
        &self,
        route_id: Uuid,
        user_id: Uuid,
        route_info: Option<&serde_json::Value>,
    ) -> Result<FrequentRoute, AppError> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        let updated = sqlx::query_as::<_, FrequentRoute>(
            r#"
            UPDATE frequent_routes
            SET times_used = times_used + 1,
                last_used = $3,
                route_info = COALESCE($4, route_info)
            WHERE id = $1 AND user_id = $2 AND is_active = TRUE
            RETURNING *
            "#,
        )
        .bind(route_id)
        .bind(user_id)
        .bind(now)
        .bind(route_info)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Ruta no encontrada".to_string()))?;

        record_trip(&mut tx, user_id, now).await?;
        tx.commit().await?;

        Ok(updated)
    }

    /// Soft delete: marca la ruta como inactiva. Devuelve false cuando no
    /// hay ruta activa con ese id para el caller (un segundo intento sobre
    /// la misma ruta cae aquí).
    pub async fn deactivate(&self, route_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE frequent_routes SET is_active = FALSE \
             WHERE id = $1 AND user_id = $2 AND is_active = TRUE",
        )
        .bind(route_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Rutas activas del usuario con orden seleccionable
    pub async fn list_active(
        &self,
        user_id: Uuid,
        sort: RouteSortKey,
        limit: Option<i64>,
    ) -> Result<Vec<FrequentRoute>, AppError> {
        let mut sql = format!(
            "SELECT * FROM frequent_routes WHERE user_id = $1 AND is_active = TRUE ORDER BY {}",
            sort.order_by()
        );

        let query = match limit {
            Some(limit) => {
                sql.push_str(" LIMIT $2");
                sqlx::query_as::<_, FrequentRoute>(&sql).bind(user_id).bind(limit)
            }
            None => sqlx::query_as::<_, FrequentRoute>(&sql).bind(user_id),
        };

        let routes = query.fetch_all(&self.pool).await?;

        Ok(routes)
    }

    pub async fn count_active(&self, user_id: Uuid) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM frequent_routes WHERE user_id = $1 AND is_active = TRUE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Historial completo (activas e inactivas) paginado
    pub async fn history(
        &self,
        user_id: Uuid,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<FrequentRoute>, i64), AppError> {
        let offset = (page - 1) * limit;

        let routes_query = sqlx::query_as::<_, FrequentRoute>(
            "SELECT * FROM frequent_routes WHERE user_id = $1 \
             ORDER BY last_used DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool);

        let total_query =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM frequent_routes WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool);

        let (routes, total) = tokio::try_join!(routes_query, total_query)?;

        Ok((routes, total))
    }

    /// Agregados de uso sobre las rutas activas
    pub async fn usage_stats(&self, user_id: Uuid) -> Result<RouteUsageRow, AppError> {
        let row = sqlx::query_as::<_, RouteUsageRow>(
            r#"
            SELECT COUNT(*) AS total_routes,
                   COALESCE(SUM(times_used), 0)::BIGINT AS total_usage,
                   COALESCE(AVG(times_used), 0)::FLOAT8 AS avg_usage
            FROM frequent_routes
            WHERE user_id = $1 AND is_active = TRUE
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Top 3 de rutas más usadas
    pub async fn top_routes(&self, user_id: Uuid) -> Result<Vec<TopRoute>, AppError> {
        let routes = sqlx::query_as::<_, TopRoute>(
            "SELECT route_name, times_used, origin_name, destination_name \
             FROM frequent_routes WHERE user_id = $1 AND is_active = TRUE \
             ORDER BY times_used DESC LIMIT 3",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(routes)
    }
}
