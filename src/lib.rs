pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::restaurant_service::RestaurantService;
pub use domain::restaurant::{NewRestaurant, Restaurant};
pub use infra::config::{Config, StorageKind};
pub use storage::restaurant::{InMemoryRestaurantRepository, PgRestaurantRepository, RestaurantRepository};
