//! Existence-check stages.
//!
//! These run before the write they protect but are not wrapped in a
//! transaction with it: two concurrent creates with the same name can both
//! pass `name_available`.

use crate::app::restaurant_service::RestaurantService;
use crate::domain::restaurant::Restaurant;
use crate::transport::http::error::ApiError;
use crate::transport::http::validation::FieldViolation;
use uuid::Uuid;

/// Fails with `Conflict` if any restaurant already uses `name`.
pub async fn name_available(service: &RestaurantService, name: &str) -> Result<(), ApiError> {
    if service.name_exists(name).await? {
        return Err(ApiError::Conflict);
    }
    Ok(())
}

/// Rejects an update whose `name` is held by another restaurant as a
/// validation failure; the restaurant `id` may keep its own name.
pub async fn name_available_for(
    service: &RestaurantService,
    id: Uuid,
    name: &str,
) -> Result<(), ApiError> {
    match service.find_by_name(name).await? {
        Some(holder) if holder.id != id => Err(ApiError::Validation(vec![FieldViolation::new(
            "name",
            "already used by another restaurant",
        )])),
        _ => Ok(()),
    }
}

/// Fails with `NotFound` unless `id` exists; continues with the stored row.
pub async fn existing(service: &RestaurantService, id: Uuid) -> Result<Restaurant, ApiError> {
    service.find(id).await?.ok_or(ApiError::NotFound)
}
