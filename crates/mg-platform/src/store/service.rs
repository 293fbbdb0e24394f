//! Store Service
//!
//! Read/update/delete operations over the restaurant catalog and its
//! sub-resources. Every operation is independently atomic against the
//! catalog store; only `delete` touches the identity store as well, as an
//! explicit cascade to the linked principal.

use std::sync::Arc;

use tracing::{debug, info};

use crate::principal::gateway::IdentityGateway;
use crate::shared::error::{PlatformError, Result};
use crate::shared::ids::IdGenerator;
use crate::store::catalog::CatalogStore;
use crate::store::entity::{Category, MenuItem, Order, Restaurant, RestaurantDraft};

pub struct StoreService {
    catalog: Arc<dyn CatalogStore>,
    identity: Arc<dyn IdentityGateway>,
}

impl StoreService {
    pub fn new(catalog: Arc<dyn CatalogStore>, identity: Arc<dyn IdentityGateway>) -> Self {
        Self { catalog, identity }
    }

    pub async fn get_all(&self) -> Result<Vec<Restaurant>> {
        self.catalog.find_all().await
    }

    /// Side-effect-free lookup; absence is `None`, not an error.
    pub async fn get_details(&self, id: i64) -> Result<Option<Restaurant>> {
        self.catalog.find(id).await
    }

    pub async fn get_orders(&self, restaurant_id: i64) -> Result<Vec<Order>> {
        self.catalog.orders_by_restaurant(restaurant_id).await
    }

    pub async fn get_menu_items(&self, restaurant_id: i64) -> Result<Vec<MenuItem>> {
        self.catalog.menu_items_by_restaurant(restaurant_id).await
    }

    /// Categories of a restaurant, projected from its menu items.
    ///
    /// One entry per menu item; a category shared by several items appears
    /// several times. Consumers that want distinct categories deduplicate on
    /// their side.
    pub async fn get_categories(&self, restaurant_id: i64) -> Result<Vec<Category>> {
        let items = self.catalog.menu_items_by_restaurant(restaurant_id).await?;
        Ok(items.into_iter().map(|item| item.category).collect())
    }

    /// Direct (non-onboarding) insert of a restaurant already linked to an
    /// existing principal.
    pub async fn insert(
        &self,
        draft: RestaurantDraft,
        security_id: impl Into<String>,
    ) -> Result<Restaurant> {
        let restaurant = draft.into_restaurant(IdGenerator::next_numeric(), security_id);
        self.catalog.insert(&restaurant).await?;
        debug!(restaurant_id = restaurant.id, "Restaurant inserted");
        Ok(restaurant)
    }

    /// Update a restaurant's attributes.
    ///
    /// The persisted `security_id` always wins over whatever the update
    /// payload carries, so an unrelated attribute edit can never unlink the
    /// operating principal.
    pub async fn update(&self, restaurant: Restaurant) -> Result<Restaurant> {
        let current = self
            .catalog
            .find(restaurant.id)
            .await?
            .ok_or_else(|| PlatformError::not_found("Restaurant", restaurant.id))?;

        let mut updated = restaurant;
        updated.security_id = current.security_id;
        updated.created_at = current.created_at;
        updated.updated_at = chrono::Utc::now();

        self.catalog.update(&updated).await?;
        debug!(restaurant_id = updated.id, "Restaurant updated");
        Ok(updated)
    }

    /// Delete a restaurant and its linked principal.
    ///
    /// The cascade is two sequential single-store deletes, not a compensated
    /// saga: a principal-delete failure after the restaurant is gone
    /// propagates to the caller rather than restoring the restaurant.
    pub async fn delete(&self, id: i64) -> Result<()> {
        if id == 0 {
            return Err(PlatformError::invalid_argument("ID is Invalid"));
        }

        let restaurant = self
            .catalog
            .find(id)
            .await?
            .ok_or_else(|| PlatformError::not_found("Restaurant", id))?;

        self.catalog.remove(id).await?;
        self.identity.delete(&restaurant.security_id).await?;

        info!(
            restaurant_id = id,
            principal_id = %restaurant.security_id,
            "Restaurant and linked principal deleted"
        );
        Ok(())
    }
}
