use crate::transport::http::handlers::{health, restaurants};
use crate::transport::http::types::{
    AppState, HealthResponse, RestaurantDto, RestaurantListResponse, RestaurantRequest,
    RestaurantResponse,
};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        restaurants::list_restaurants_handler,
        restaurants::random_restaurant_handler,
        restaurants::get_restaurant_handler,
        restaurants::create_restaurant_handler,
        restaurants::update_restaurant_handler,
        restaurants::delete_restaurant_handler
    ),
    components(schemas(
        RestaurantDto,
        RestaurantRequest,
        RestaurantResponse,
        RestaurantListResponse,
        HealthResponse
    ))
)]
pub struct ApiDoc;

/// API routes only.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/restaurants",
            get(restaurants::list_restaurants_handler).post(restaurants::create_restaurant_handler),
        )
        .route("/restaurants/random", get(restaurants::random_restaurant_handler))
        .route(
            "/restaurants/:id",
            get(restaurants::get_restaurant_handler)
                .put(restaurants::update_restaurant_handler)
                .delete(restaurants::delete_restaurant_handler),
        )
        .with_state(app_state)
}

/// API routes plus Swagger UI, permissive CORS and request tracing.
pub fn create_app(app_state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
