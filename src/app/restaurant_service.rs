//! The restaurant service.
//!
//! Sits between the HTTP handlers and the repository. Constructed once at
//! startup and shared by every request; the repository inside handles its own
//! connection sharing, so no lock is taken here.

use crate::domain::restaurant::{NewRestaurant, Restaurant};
use crate::storage::restaurant::RestaurantRepository;
use rand::Rng;
use std::sync::Arc;
use uuid::Uuid;

pub struct RestaurantService {
    repo: Arc<dyn RestaurantRepository>,
}

impl RestaurantService {
    pub fn new(repo: Arc<dyn RestaurantRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> anyhow::Result<Vec<Restaurant>> {
        self.repo.find_many().await
    }

    pub async fn find(&self, id: Uuid) -> anyhow::Result<Option<Restaurant>> {
        self.repo.find_by_id(id).await
    }

    pub async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<Restaurant>> {
        self.repo.find_by_name(name).await
    }

    pub async fn name_exists(&self, name: &str) -> anyhow::Result<bool> {
        Ok(self.repo.find_by_name(name).await?.is_some())
    }

    /// Picks one row uniformly at random.
    ///
    /// Returns `None` when the store is empty, or when the picked row was
    /// deleted between the count and the fetch.
    pub async fn random(&self) -> anyhow::Result<Option<Restaurant>> {
        let count = self.repo.count().await?;
        if count == 0 {
            return Ok(None);
        }
        let offset = rand::thread_rng().gen_range(0..count);
        tracing::debug!(count, offset, "picking random restaurant");
        self.repo.find_at_offset(offset).await
    }

    pub async fn create(&self, input: &NewRestaurant) -> anyhow::Result<Restaurant> {
        let created = self.repo.create(input).await?;
        tracing::info!(id = %created.id, name = %created.name, "restaurant created");
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, input: &NewRestaurant) -> anyhow::Result<Option<Restaurant>> {
        let updated = self.repo.update(id, input).await?;
        if updated.is_some() {
            tracing::info!(%id, "restaurant updated");
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let deleted = self.repo.delete(id).await?;
        if deleted {
            tracing::info!(%id, "restaurant deleted");
        }
        Ok(deleted)
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        self.repo.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::restaurant::InMemoryRestaurantRepository;

    fn service() -> RestaurantService {
        RestaurantService::new(Arc::new(InMemoryRestaurantRepository::new()))
    }

    fn input(name: &str) -> NewRestaurant {
        NewRestaurant {
            name: name.to_string(),
            map_url: "https://example.com/map".to_string(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn random_on_empty_store_is_none() {
        assert!(service().random().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn random_with_single_row_returns_it() {
        let svc = service();
        let created = svc.create(&input("only")).await.unwrap();
        for _ in 0..10 {
            assert_eq!(svc.random().await.unwrap(), Some(created.clone()));
        }
    }

    #[tokio::test]
    async fn random_eventually_reaches_every_row() {
        let svc = service();
        let a = svc.create(&input("a")).await.unwrap();
        let b = svc.create(&input("b")).await.unwrap();

        let mut seen_a = false;
        let mut seen_b = false;
        for _ in 0..200 {
            let picked = svc.random().await.unwrap().unwrap();
            seen_a |= picked.id == a.id;
            seen_b |= picked.id == b.id;
        }
        assert!(seen_a && seen_b);
    }

    #[tokio::test]
    async fn existence_checks_follow_the_store() {
        let svc = service();
        let created = svc.create(&input("a")).await.unwrap();

        assert!(svc.name_exists("a").await.unwrap());
        assert!(!svc.name_exists("b").await.unwrap());
        assert_eq!(svc.find(created.id).await.unwrap(), Some(created.clone()));

        svc.delete(created.id).await.unwrap();
        assert!(svc.find(created.id).await.unwrap().is_none());
    }
}
