//! Domain model for restaurants.
//!
//! A `Restaurant` is what the store hands back (id and creation time assigned
//! by the store); a `NewRestaurant` is the validated payload used for both
//! create and full-replace update.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A persisted restaurant record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restaurant {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub map_url: String,
    pub notes: Option<String>,
}

/// Writable fields of a restaurant, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRestaurant {
    pub name: String,
    pub map_url: String,
    pub notes: Option<String>,
}

impl Restaurant {
    /// Applies a full replace of the writable fields, keeping `id` and `created_at`.
    pub fn replace_with(&mut self, input: &NewRestaurant) {
        self.name = input.name.clone();
        self.map_url = input.map_url.clone();
        self.notes = input.notes.clone();
    }
}
