//! Store Repository
//!
//! MongoDB implementation of `CatalogStore` over the `restaurants`,
//! `orders`, and `menu_items` collections.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection, Database, IndexModel};
use tracing::info;

use crate::shared::error::Result;
use crate::store::catalog::CatalogStore;
use crate::store::entity::{MenuItem, Order, Restaurant};

pub struct StoreRepository {
    restaurants: Collection<Restaurant>,
    orders: Collection<Order>,
    menu_items: Collection<MenuItem>,
}

impl StoreRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            restaurants: db.collection("restaurants"),
            orders: db.collection("orders"),
            menu_items: db.collection("menu_items"),
        }
    }

    /// Create the owning-restaurant indexes backing the sub-resource finders.
    pub async fn ensure_indexes(&self) -> Result<()> {
        self.orders
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "restaurantId": 1 })
                    .build(),
            )
            .await?;

        self.menu_items
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "restaurantId": 1 })
                    .build(),
            )
            .await?;

        info!("Store indexes initialized");
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for StoreRepository {
    async fn find(&self, id: i64) -> Result<Option<Restaurant>> {
        Ok(self.restaurants.find_one(doc! { "_id": id }).await?)
    }

    async fn find_all(&self) -> Result<Vec<Restaurant>> {
        let cursor = self.restaurants.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, restaurant: &Restaurant) -> Result<()> {
        self.restaurants.insert_one(restaurant).await?;
        Ok(())
    }

    async fn update(&self, restaurant: &Restaurant) -> Result<()> {
        self.restaurants
            .replace_one(doc! { "_id": restaurant.id }, restaurant)
            .await?;
        Ok(())
    }

    async fn remove(&self, id: i64) -> Result<bool> {
        let result = self.restaurants.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn orders_by_restaurant(&self, restaurant_id: i64) -> Result<Vec<Order>> {
        let cursor = self
            .orders
            .find(doc! { "restaurantId": restaurant_id })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn menu_items_by_restaurant(&self, restaurant_id: i64) -> Result<Vec<MenuItem>> {
        let cursor = self
            .menu_items
            .find(doc! { "restaurantId": restaurant_id })
            .await?;
        Ok(cursor.try_collect().await?)
    }
}
