//! PostgreSQL restaurant repository.

use crate::domain::restaurant::{NewRestaurant, Restaurant};
use crate::storage::restaurant::RestaurantRepository;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use uuid::Uuid;

const SELECT_COLUMNS: &str = "id, created_at, name, map_url, notes";

/// A restaurant repository backed by a shared PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgRestaurantRepository {
    pool: PgPool,
}

impl PgRestaurantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `database_url` and makes sure the `restaurants` table exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("connecting to DATABASE_URL")?;

        let repo = Self::new(pool);
        repo.ensure_schema().await?;
        Ok(repo)
    }

    /// Creates the `restaurants` table if missing.
    ///
    /// `name` deliberately has no unique index; uniqueness is checked before writes.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS restaurants (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                name TEXT NOT NULL,
                map_url TEXT NOT NULL,
                notes TEXT
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS restaurants_name_idx ON restaurants (name)",
        )
        .execute(&self.pool)
        .await?;

        tracing::debug!("restaurants schema ensured");
        Ok(())
    }
}

fn row_to_restaurant(row: &PgRow) -> Result<Restaurant> {
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    Ok(Restaurant {
        id: row.try_get("id")?,
        created_at,
        name: row.try_get("name")?,
        map_url: row.try_get("map_url")?,
        notes: row.try_get("notes")?,
    })
}

fn offset_to_i64(offset: u64) -> Result<i64> {
    i64::try_from(offset).map_err(|_| anyhow::anyhow!("offset out of range: {}", offset))
}

#[async_trait]
impl RestaurantRepository for PgRestaurantRepository {
    async fn find_many(&self) -> Result<Vec<Restaurant>> {
        let sql = format!(
            "SELECT {} FROM restaurants ORDER BY created_at, id",
            SELECT_COLUMNS
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(row_to_restaurant).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Restaurant>> {
        let sql = format!("SELECT {} FROM restaurants WHERE id = $1", SELECT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_restaurant).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Restaurant>> {
        let sql = format!(
            "SELECT {} FROM restaurants WHERE name = $1 ORDER BY created_at, id LIMIT 1",
            SELECT_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_restaurant).transpose()
    }

    async fn create(&self, input: &NewRestaurant) -> Result<Restaurant> {
        let sql = format!(
            "INSERT INTO restaurants (name, map_url, notes) VALUES ($1, $2, $3) RETURNING {}",
            SELECT_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(&input.name)
            .bind(&input.map_url)
            .bind(input.notes.as_deref())
            .fetch_one(&self.pool)
            .await?;
        row_to_restaurant(&row)
    }

    async fn update(&self, id: Uuid, input: &NewRestaurant) -> Result<Option<Restaurant>> {
        let sql = format!(
            "UPDATE restaurants SET name = $2, map_url = $3, notes = $4 WHERE id = $1 RETURNING {}",
            SELECT_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(&input.map_url)
            .bind(input.notes.as_deref())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_restaurant).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM restaurants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM restaurants")
            .fetch_one(&self.pool)
            .await?;
        let total: i64 = row.try_get("total")?;
        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn find_at_offset(&self, offset: u64) -> Result<Option<Restaurant>> {
        let sql = format!(
            "SELECT {} FROM restaurants ORDER BY created_at, id OFFSET $1 LIMIT 1",
            SELECT_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(offset_to_i64(offset)?)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_restaurant).transpose()
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
