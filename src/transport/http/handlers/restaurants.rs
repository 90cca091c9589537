//! `/restaurants` handlers.
//!
//! Each handler is an ordered list of stages. A stage returns `Ok` with the
//! (possibly transformed) input for the next stage, or an `ApiError` that
//! ends the request.

use crate::transport::http::error::ApiError;
use crate::transport::http::guards;
use crate::transport::http::types::{
    AppState, RestaurantDto, RestaurantListResponse, RestaurantRequest, RestaurantResponse,
};
use crate::transport::http::validation;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value as JsonValue;

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "All restaurants (empty array if none)", body = RestaurantListResponse)
    )
)]
pub async fn list_restaurants_handler(
    State(state): State<AppState>,
) -> Result<Json<RestaurantListResponse>, ApiError> {
    let rows = state.restaurants.list().await?;
    Ok(Json(RestaurantListResponse {
        data: rows.iter().map(RestaurantDto::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/restaurants/random",
    responses(
        (status = 200, description = "One restaurant chosen uniformly at random", body = RestaurantResponse),
        (status = 404, description = "No restaurants stored")
    )
)]
pub async fn random_restaurant_handler(
    State(state): State<AppState>,
) -> Result<Json<RestaurantResponse>, ApiError> {
    let picked = state
        .restaurants
        .random()
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(RestaurantResponse::from(&picked)))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    params(("id" = String, Path, description = "Restaurant id (UUID)")),
    responses(
        (status = 200, description = "Restaurant found", body = RestaurantResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Restaurant not found")
    )
)]
pub async fn get_restaurant_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RestaurantResponse>, ApiError> {
    let id = validation::restaurant_id(&id)?;
    let restaurant = guards::existing(&state.restaurants, id).await?;
    Ok(Json(RestaurantResponse::from(&restaurant)))
}

#[utoipa::path(
    post,
    path = "/restaurants",
    request_body = RestaurantRequest,
    responses(
        (status = 201, description = "Restaurant created", body = RestaurantResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Name already in use")
    )
)]
pub async fn create_restaurant_handler(
    State(state): State<AppState>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantResponse>), ApiError> {
    let body = validation::json_body(body)?;
    let input = validation::restaurant_body(&body)?;
    guards::name_available(&state.restaurants, &input.name).await?;

    let created = state.restaurants.create(&input).await?;
    Ok((StatusCode::CREATED, Json(RestaurantResponse::from(&created))))
}

#[utoipa::path(
    put,
    path = "/restaurants/{id}",
    params(("id" = String, Path, description = "Restaurant id (UUID)")),
    request_body = RestaurantRequest,
    responses(
        (status = 200, description = "Restaurant replaced", body = RestaurantResponse),
        (status = 400, description = "Malformed id, validation failed, or name used by another restaurant"),
        (status = 404, description = "Restaurant not found")
    )
)]
pub async fn update_restaurant_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<Json<RestaurantResponse>, ApiError> {
    let id = validation::restaurant_id(&id)?;
    let body = validation::json_body(body)?;
    let input = validation::restaurant_body(&body)?;
    guards::existing(&state.restaurants, id).await?;
    guards::name_available_for(&state.restaurants, id, &input.name).await?;

    let updated = state
        .restaurants
        .update(id, &input)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(RestaurantResponse::from(&updated)))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    params(("id" = String, Path, description = "Restaurant id (UUID)")),
    responses(
        (status = 204, description = "Restaurant deleted"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Restaurant not found")
    )
)]
pub async fn delete_restaurant_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = validation::restaurant_id(&id)?;
    guards::existing(&state.restaurants, id).await?;

    // The row can vanish between the existence check and the delete.
    if !state.restaurants.delete(id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
