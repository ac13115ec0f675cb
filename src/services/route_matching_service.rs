//! Matching geográfico de rutas frecuentes
//!
//! Decide si un par origen/destino nuevo corresponde a una ruta activa
//! ya guardada del mismo usuario, dentro de una tolerancia fija por eje.

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::route_dto::Coordinates;
use crate::models::frequent_route::FrequentRoute;
use crate::repositories::route_repository::RouteRepository;
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::validate_coordinates;

/// Tolerancia por eje en grados decimales (~500 metros en latitudes medias)
pub const COORDINATE_TOLERANCE: f64 = 0.005;

pub struct RouteMatchingService {
    repository: RouteRepository,
}

impl RouteMatchingService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RouteRepository::new(pool),
        }
    }

    /// Validar ambos pares de coordenadas antes de tocar el storage
    pub fn validate_pair(origin: &Coordinates, destination: &Coordinates) -> AppResult<()> {
        validate_coordinates(origin.latitude, origin.longitude)
            .map_err(|_| validation_error("origin", "Coordenadas de origen inválidas"))?;
        validate_coordinates(destination.latitude, destination.longitude)
            .map_err(|_| validation_error("destination", "Coordenadas de destino inválidas"))?;
        Ok(())
    }

    /// Buscar una ruta activa equivalente del usuario. Lectura pura, sin
    /// efectos; los empates los resuelve el repositorio por `last_used`.
    pub async fn find_match(
        &self,
        user_id: Uuid,
        origin: &Coordinates,
        destination: &Coordinates,
    ) -> AppResult<Option<FrequentRoute>> {
        Self::validate_pair(origin, destination)?;

        self.repository
            .find_matching(user_id, origin, destination, COORDINATE_TOLERANCE)
            .await
    }
}

/// Predicado de matching: los cuatro ejes dentro de la tolerancia a la vez
pub fn within_tolerance(
    route: &FrequentRoute,
    origin: &Coordinates,
    destination: &Coordinates,
) -> bool {
    (route.origin_latitude - origin.latitude).abs() <= COORDINATE_TOLERANCE
        && (route.origin_longitude - origin.longitude).abs() <= COORDINATE_TOLERANCE
        && (route.destination_latitude - destination.latitude).abs() <= COORDINATE_TOLERANCE
        && (route.destination_longitude - destination.longitude).abs() <= COORDINATE_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn stored_route(o_lat: f64, o_lng: f64, d_lat: f64, d_lng: f64) -> FrequentRoute {
        FrequentRoute {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            route_name: "Casa → Trabajo".to_string(),
            origin_name: "Casa".to_string(),
            origin_address: None,
            origin_latitude: o_lat,
            origin_longitude: o_lng,
            destination_name: "Trabajo".to_string(),
            destination_address: None,
            destination_latitude: d_lat,
            destination_longitude: d_lng,
            route_info: None,
            times_used: 1,
            last_used: Utc::now(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn point(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates { latitude, longitude }
    }

    #[test]
    fn test_match_within_tolerance_all_axes() {
        let route = stored_route(10.0, 20.0, 30.0, 40.0);

        // Los cuatro deltas ≤ 0.005 → es la misma ruta
        assert!(within_tolerance(
            &route,
            &point(10.0030, 19.9980),
            &point(30.0010, 40.0040),
        ));
    }

    #[test]
    fn test_match_near_tolerance_boundary() {
        let route = stored_route(10.0, 20.0, 30.0, 40.0);

        // Justo adentro y justo afuera del umbral por eje
        assert!(within_tolerance(
            &route,
            &point(10.0049, 20.0),
            &point(30.0, 40.0),
        ));
        assert!(!within_tolerance(
            &route,
            &point(10.0051, 20.0),
            &point(30.0, 40.0),
        ));
    }

    #[test]
    fn test_no_match_when_one_axis_exceeds() {
        let route = stored_route(10.0, 20.0, 30.0, 40.0);

        // Tres ejes perfectos, uno fuera → no hay match
        assert!(!within_tolerance(
            &route,
            &point(10.0, 20.0),
            &point(30.0, 40.0051),
        ));
        assert!(!within_tolerance(
            &route,
            &point(10.006, 20.0),
            &point(30.0, 40.0),
        ));
    }

    #[test]
    fn test_validate_pair_rejects_out_of_range() {
        assert!(RouteMatchingService::validate_pair(&point(91.0, 0.0), &point(0.0, 0.0)).is_err());
        assert!(RouteMatchingService::validate_pair(&point(0.0, 0.0), &point(0.0, -181.0)).is_err());
        assert!(RouteMatchingService::validate_pair(&point(10.0, 20.0), &point(30.0, 40.0)).is_ok());
    }
}
