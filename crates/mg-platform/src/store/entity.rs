//! Store Entities
//!
//! The restaurant catalog record and its sub-resources. A persisted
//! `Restaurant` always carries a `security_id` referencing the principal that
//! operates it; the reference is for relation and lookup only, it does not
//! own the principal's lifecycle.

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Restaurant catalog record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    /// Numeric id; 0 is never assigned and always invalid
    #[serde(rename = "_id")]
    pub id: i64,

    /// Display name
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub address: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Storage path of the uploaded store image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,

    /// Weak reference to the operating principal. Must reference an existing
    /// principal for every persisted restaurant.
    pub security_id: String,

    /// Audit fields
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// A restaurant payload that has not been persisted yet: no id assigned, no
/// principal linked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
}

impl RestaurantDraft {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            ..Default::default()
        }
    }

    /// Materialize the draft with an assigned id and principal link.
    pub fn into_restaurant(self, id: i64, security_id: impl Into<String>) -> Restaurant {
        let now = Utc::now();
        Restaurant {
            id,
            name: self.name,
            description: self.description,
            address: self.address,
            phone: self.phone,
            image_path: self.image_path,
            security_id: security_id.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Delivering,
    Delivered,
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Customer order placed against a restaurant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: i64,

    /// Owning restaurant
    pub restaurant_id: i64,

    #[serde(default)]
    pub status: OrderStatus,

    /// Order total in the store's currency
    pub total: f64,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub placed_at: DateTime<Utc>,
}

/// Menu item category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Menu item offered by a restaurant. The category rides along embedded so a
/// menu query returns items with their categories in one read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(rename = "_id")]
    pub id: i64,

    /// Owning restaurant
    pub restaurant_id: i64,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub price: f64,

    pub category: Category,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_materialization() {
        let draft = RestaurantDraft::new("Pasta Palace", "1 Via Roma");
        let restaurant = draft.into_restaurant(42, "0HZXEQ5Y8JY5Z");
        assert_eq!(restaurant.id, 42);
        assert_eq!(restaurant.security_id, "0HZXEQ5Y8JY5Z");
        assert_eq!(restaurant.name, "Pasta Palace");
    }

    #[test]
    fn test_restaurant_bson_round_trip() {
        let restaurant =
            RestaurantDraft::new("Pasta Palace", "1 Via Roma").into_restaurant(42, "sec-1");
        let doc = bson::to_document(&restaurant).unwrap();
        assert_eq!(doc.get_i64("_id").unwrap(), 42);
        let back: Restaurant = bson::from_document(doc).unwrap();
        assert_eq!(back.security_id, "sec-1");
    }
}
