//! Seller moderation and dashboard counts

use super::{into_items, touch};
use crate::domain::{AdminStats, ApprovalStatus, UserRole, UserStatus};
use crate::error::{AppError, Result};
use crate::store::{collections, fields, DocumentStore};
use serde_json::{json, Value};
use std::sync::Arc;

pub struct AdminService<D: DocumentStore> {
    store: Arc<D>,
}

impl<D: DocumentStore> AdminService<D> {
    pub fn new(store: Arc<D>) -> Self {
        Self { store }
    }

    pub async fn list_sellers(&self) -> Result<Vec<Value>> {
        Ok(into_items(
            self.store.scan_all(collections::SELLER_PROFILES).await?,
        ))
    }

    /// Approve the profile, then promote the account to an active seller.
    /// The two writes are independent.
    pub async fn approve_seller(&self, seller_id: &str) -> Result<()> {
        self.require_profile(seller_id).await?;

        self.store
            .put(
                collections::SELLER_PROFILES,
                seller_id,
                touch(fields([
                    ("approval_status", json!(ApprovalStatus::Approved)),
                    ("rejection_reason", Value::Null),
                    ("is_verified", json!(true)),
                ])),
                true,
            )
            .await?;

        self.store
            .put(
                collections::USERS,
                seller_id,
                touch(fields([
                    ("role", json!(UserRole::Seller)),
                    ("status", json!(UserStatus::Active)),
                ])),
                true,
            )
            .await?;

        tracing::info!(seller_id = %seller_id, "Seller approved");
        Ok(())
    }

    pub async fn reject_seller(&self, seller_id: &str, reason: Option<String>) -> Result<()> {
        self.require_profile(seller_id).await?;

        self.store
            .put(
                collections::SELLER_PROFILES,
                seller_id,
                touch(fields([
                    ("approval_status", json!(ApprovalStatus::Rejected)),
                    ("rejection_reason", json!(reason)),
                ])),
                true,
            )
            .await?;

        tracing::info!(seller_id = %seller_id, "Seller rejected");
        Ok(())
    }

    pub async fn set_seller_status(&self, seller_id: &str, status: UserStatus) -> Result<()> {
        self.store
            .put(
                collections::USERS,
                seller_id,
                touch(fields([("status", json!(status))])),
                true,
            )
            .await
    }

    pub async fn stats(&self) -> Result<AdminStats> {
        Ok(AdminStats {
            users: self.count(collections::USERS).await?,
            user_profiles: self.count(collections::USER_PROFILES).await?,
            sellers: self.count(collections::SELLER_PROFILES).await?,
            products: self.count(collections::PRODUCTS).await?,
            orders: self.count(collections::ORDERS).await?,
            blogs: self.count(collections::BLOGS).await?,
            reviews: self.count(collections::REVIEWS).await?,
        })
    }

    async fn count(&self, collection: &str) -> Result<usize> {
        Ok(self.store.scan_all(collection).await?.len())
    }

    async fn require_profile(&self, seller_id: &str) -> Result<()> {
        self.store
            .get(collections::SELLER_PROFILES, seller_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Seller profile not found".to_string()))
    }
}
