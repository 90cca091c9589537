use crate::app::restaurant_service::RestaurantService;
use crate::domain::restaurant::Restaurant;
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub restaurants: Arc<RestaurantService>,
}

impl AppState {
    pub fn new(restaurants: Arc<RestaurantService>) -> Self {
        Self { restaurants }
    }
}

/// Wire representation of a restaurant.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDto {
    pub id: Uuid,
    /// ISO-8601 UTC timestamp with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
    pub created_at: String,
    pub name: String,
    pub map_url: String,
    pub notes: Option<String>,
}

impl From<&Restaurant> for RestaurantDto {
    fn from(r: &Restaurant) -> Self {
        Self {
            id: r.id,
            created_at: r.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            name: r.name.clone(),
            map_url: r.map_url.clone(),
            notes: r.notes.clone(),
        }
    }
}

/// Request body for create and update. Documentation only: handlers take the
/// raw JSON so that every field can be checked and reported together.
#[derive(Deserialize, Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRequest {
    pub name: String,
    /// Absolute `http` or `https` URL.
    pub map_url: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct RestaurantResponse {
    pub data: RestaurantDto,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct RestaurantListResponse {
    pub data: Vec<RestaurantDto>,
}

impl From<&Restaurant> for RestaurantResponse {
    fn from(r: &Restaurant) -> Self {
        Self { data: r.into() }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn restaurant(notes: Option<&str>) -> Restaurant {
        Restaurant {
            id: Uuid::parse_str("6f1c1f5e-3b55-4c0c-9a7e-1f0d2f6b9c11").unwrap(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            name: "Prisma Cafe".to_string(),
            map_url: "https://example.com/cafe".to_string(),
            notes: notes.map(str::to_string),
        }
    }

    #[test]
    fn dto_uses_camel_case_and_iso_timestamp() {
        let dto = RestaurantDto::from(&restaurant(None));
        assert_eq!(
            serde_json::to_value(&dto).unwrap(),
            json!({
                "id": "6f1c1f5e-3b55-4c0c-9a7e-1f0d2f6b9c11",
                "createdAt": "2024-05-01T12:00:00.000Z",
                "name": "Prisma Cafe",
                "mapUrl": "https://example.com/cafe",
                "notes": null
            })
        );
    }

    #[test]
    fn dto_keeps_notes() {
        let dto = RestaurantDto::from(&restaurant(Some("closed on mondays")));
        assert_eq!(dto.notes.as_deref(), Some("closed on mondays"));
    }

    #[test]
    fn response_wraps_dto_in_data() {
        let body = serde_json::to_value(RestaurantResponse::from(&restaurant(None))).unwrap();
        assert_eq!(body["data"]["name"], "Prisma Cafe");
    }
}
