//! Principal Repository

use mongodb::{bson::doc, options::IndexOptions, Collection, Database, IndexModel};
use tracing::info;

use crate::principal::entity::Principal;
use crate::shared::error::Result;

pub struct PrincipalRepository {
    collection: Collection<Principal>,
}

impl PrincipalRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("principals"),
        }
    }

    /// Create the unique indexes backing username/email uniqueness.
    ///
    /// The duplicate-key error from these indexes is the authoritative
    /// duplicate signal; the friendly pre-checks in the registration flow
    /// only cover the common case.
    pub async fn ensure_indexes(&self) -> Result<()> {
        self.collection
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "username": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
            )
            .await?;

        self.collection
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "email": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
            )
            .await?;

        info!("Principal indexes initialized");
        Ok(())
    }

    pub async fn insert(&self, principal: &Principal) -> Result<()> {
        self.collection.insert_one(principal).await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Principal>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Principal>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Principal>> {
        Ok(self
            .collection
            .find_one(doc! { "username": username })
            .await?)
    }

    pub async fn add_role(&self, id: &str, role: &str) -> Result<()> {
        self.collection
            .update_one(
                doc! { "_id": id },
                doc! {
                    "$addToSet": { "roles": role },
                    "$currentDate": { "updatedAt": true },
                },
            )
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
