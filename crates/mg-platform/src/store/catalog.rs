//! Catalog Store Interface
//!
//! Collection-style access to restaurants and their sub-resources. Named
//! finders rather than a generic predicate query; every operation is an
//! independent I/O suspension point with no cross-call state.

use async_trait::async_trait;

use crate::shared::error::Result;
use crate::store::entity::{MenuItem, Order, Restaurant};

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch one restaurant. `None` when absent, never an error.
    async fn find(&self, id: i64) -> Result<Option<Restaurant>>;

    /// All restaurants.
    async fn find_all(&self) -> Result<Vec<Restaurant>>;

    /// Persist a new restaurant.
    async fn insert(&self, restaurant: &Restaurant) -> Result<()>;

    /// Replace a persisted restaurant.
    async fn update(&self, restaurant: &Restaurant) -> Result<()>;

    /// Remove a restaurant. Returns whether a record was deleted.
    async fn remove(&self, id: i64) -> Result<bool>;

    /// Orders placed against the given restaurant.
    async fn orders_by_restaurant(&self, restaurant_id: i64) -> Result<Vec<Order>>;

    /// Menu items belonging to the given restaurant, categories embedded.
    async fn menu_items_by_restaurant(&self, restaurant_id: i64) -> Result<Vec<MenuItem>>;
}
