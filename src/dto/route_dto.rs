//! DTOs de rutas frecuentes

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::frequent_route::FrequentRoute;

/// Par de coordenadas en grados decimales
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Origen o destino de una ruta
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LocationInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(max = 500))]
    pub address: Option<String>,

    pub coordinates: Coordinates,
}

/// Request para guardar (o reutilizar) una ruta frecuente
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveRouteRequest {
    #[validate]
    pub origin: LocationInput,

    #[validate]
    pub destination: LocationInput,

    #[validate(length(min = 1, max = 200))]
    pub route_name: Option<String>,

    pub route_info: Option<serde_json::Value>,
}

/// Request para registrar el uso de una ruta existente
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseRouteRequest {
    pub route_info: Option<serde_json::Value>,
}

/// Clave de ordenamiento para el listado de rutas frecuentes
///
/// Tipo enumerado mapeado a un ORDER BY explícito en la frontera del
/// repositorio. Claves desconocidas caen al default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteSortKey {
    TimesUsed,
    #[default]
    LastUsed,
    Recent,
}

impl RouteSortKey {
    /// Parsear el query param `sortBy`
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("timesUsed") => RouteSortKey::TimesUsed,
            Some("recent") => RouteSortKey::Recent,
            _ => RouteSortKey::LastUsed,
        }
    }

    pub fn order_by(&self) -> &'static str {
        match self {
            RouteSortKey::TimesUsed => "times_used DESC",
            RouteSortKey::LastUsed => "last_used DESC",
            RouteSortKey::Recent => "created_at DESC",
        }
    }
}

/// Query params para el listado de rutas frecuentes
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFrequentQuery {
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
}

/// Query params para el historial paginado
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Metadatos de paginación del historial
#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };
        Self { page, limit, total, pages }
    }
}

/// Response del listado de rutas frecuentes
#[derive(Debug, Serialize)]
pub struct FrequentRoutesResponse {
    pub success: bool,
    pub routes: Vec<FrequentRoute>,
    pub count: usize,
}

/// Response al guardar o reutilizar una ruta
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRouteResponse {
    pub success: bool,
    pub message: String,
    pub route: FrequentRoute,
    pub is_new: bool,
}

/// Response al registrar el uso de una ruta
#[derive(Debug, Serialize)]
pub struct UseRouteResponse {
    pub success: bool,
    pub message: String,
    pub route: FrequentRoute,
}

/// Response al eliminar (soft delete) una ruta
#[derive(Debug, Serialize)]
pub struct DeleteRouteResponse {
    pub success: bool,
    pub message: String,
}

/// Response del historial de viajes
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub routes: Vec<FrequentRoute>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_from_param() {
        assert_eq!(RouteSortKey::from_param(Some("timesUsed")), RouteSortKey::TimesUsed);
        assert_eq!(RouteSortKey::from_param(Some("lastUsed")), RouteSortKey::LastUsed);
        assert_eq!(RouteSortKey::from_param(Some("recent")), RouteSortKey::Recent);
        // Claves desconocidas caen al default, como hace el cliente
        assert_eq!(RouteSortKey::from_param(Some("banana")), RouteSortKey::LastUsed);
        assert_eq!(RouteSortKey::from_param(None), RouteSortKey::LastUsed);
    }

    #[test]
    fn test_sort_key_order_by() {
        assert_eq!(RouteSortKey::TimesUsed.order_by(), "times_used DESC");
        assert_eq!(RouteSortKey::LastUsed.order_by(), "last_used DESC");
        assert_eq!(RouteSortKey::Recent.order_by(), "created_at DESC");
    }

    #[test]
    fn test_pagination_pages() {
        assert_eq!(Pagination::new(1, 20, 0).pages, 0);
        assert_eq!(Pagination::new(1, 20, 20).pages, 1);
        assert_eq!(Pagination::new(1, 20, 21).pages, 2);
        assert_eq!(Pagination::new(2, 10, 95).pages, 10);
    }
}
