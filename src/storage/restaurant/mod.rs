//! Restaurant storage: the repository contract plus its PostgreSQL and in-memory backends.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryRestaurantRepository;
pub use postgres::PgRestaurantRepository;

use crate::domain::restaurant::{NewRestaurant, Restaurant};
use async_trait::async_trait;
use uuid::Uuid;

/// Data access contract for the `restaurants` table.
///
/// Rows are ordered by `(created_at, id)` wherever an order is observable
/// (`find_many`, `find_at_offset`).
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    async fn find_many(&self) -> anyhow::Result<Vec<Restaurant>>;

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Restaurant>>;

    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<Restaurant>>;

    /// Inserts a row; the store assigns `id` and `created_at`.
    async fn create(&self, input: &NewRestaurant) -> anyhow::Result<Restaurant>;

    /// Full replace of the writable fields. Returns `None` if the row is gone.
    async fn update(&self, id: Uuid, input: &NewRestaurant) -> anyhow::Result<Option<Restaurant>>;

    /// Returns `false` if no row had this id.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;

    async fn count(&self) -> anyhow::Result<u64>;

    /// Row at position `offset` in the stable order, if any.
    async fn find_at_offset(&self, offset: u64) -> anyhow::Result<Option<Restaurant>>;

    /// Cheap liveness check used by `/health`.
    async fn ping(&self) -> anyhow::Result<()>;
}
