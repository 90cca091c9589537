//! Process-local restaurant repository.
//!
//! Same contract as the PostgreSQL backend, used by tests and by `STORAGE=memory`.

use crate::domain::restaurant::{NewRestaurant, Restaurant};
use crate::storage::restaurant::RestaurantRepository;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryRestaurantRepository {
    // Kept sorted by (created_at, id).
    rows: RwLock<Vec<Restaurant>>,
}

impl InMemoryRestaurantRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RestaurantRepository for InMemoryRestaurantRepository {
    async fn find_many(&self) -> Result<Vec<Restaurant>> {
        Ok(self.rows.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Restaurant>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Restaurant>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|r| r.name == name).cloned())
    }

    async fn create(&self, input: &NewRestaurant) -> Result<Restaurant> {
        let restaurant = Restaurant {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            name: input.name.clone(),
            map_url: input.map_url.clone(),
            notes: input.notes.clone(),
        };

        let mut rows = self.rows.write().await;
        rows.push(restaurant.clone());
        rows.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Ok(restaurant)
    }

    async fn update(&self, id: Uuid, input: &NewRestaurant) -> Result<Option<Restaurant>> {
        let mut rows = self.rows.write().await;
        Ok(rows.iter_mut().find(|r| r.id == id).map(|row| {
            row.replace_with(input);
            row.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() != before)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.rows.read().await.len() as u64)
    }

    async fn find_at_offset(&self, offset: u64) -> Result<Option<Restaurant>> {
        let rows = self.rows.read().await;
        let Ok(index) = usize::try_from(offset) else {
            return Ok(None);
        };
        Ok(rows.get(index).cloned())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
