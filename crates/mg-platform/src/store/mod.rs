//! Store Aggregate
//!
//! Restaurant catalog records and their sub-resources (orders, menu items,
//! categories). The `CatalogStore` trait is the collection-style store
//! interface; `StoreRepository` is the MongoDB implementation and
//! `StoreService` exposes the business operations.

pub mod catalog;
pub mod entity;
pub mod repository;
pub mod service;

// Re-export main types
pub use catalog::CatalogStore;
pub use entity::{Category, MenuItem, Order, OrderStatus, Restaurant, RestaurantDraft};
pub use repository::StoreRepository;
pub use service::StoreService;
