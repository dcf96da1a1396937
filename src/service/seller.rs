//! Seller profile, storefront and dashboard figures

use super::{into_items, touch};
use crate::domain::{
    now_iso, OrderStatus, SellerDashboardStats, SellerProfileUpdateInput, SellerStats,
};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthContext;
use crate::store::{collections, to_fields, Document, DocumentStore, Filter};
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

pub struct SellerService<D: DocumentStore> {
    store: Arc<D>,
}

impl<D: DocumentStore> SellerService<D> {
    pub fn new(store: Arc<D>) -> Self {
        Self { store }
    }

    pub async fn get_profile(&self, seller_id: &str) -> Result<Value> {
        self.store
            .get(collections::SELLER_PROFILES, seller_id)
            .await?
            .map(Document::into_value)
            .ok_or_else(|| AppError::NotFound("Seller profile not found".to_string()))
    }

    /// Merge profile fields; approval fields are kept only for admins
    pub async fn update_profile(
        &self,
        auth: &AuthContext,
        seller_id: &str,
        input: SellerProfileUpdateInput,
    ) -> Result<()> {
        input.validate()?;
        let input = if auth.is_admin() {
            input
        } else {
            input.without_admin_fields()
        };

        self.store
            .put(
                collections::SELLER_PROFILES,
                seller_id,
                touch(to_fields(&input)?),
                true,
            )
            .await
    }

    pub async fn products(&self, seller_id: &str) -> Result<Vec<Value>> {
        Ok(into_items(self.by_seller(collections::PRODUCTS, seller_id).await?))
    }

    pub async fn reviews(&self, seller_id: &str) -> Result<Vec<Value>> {
        Ok(into_items(self.by_seller(collections::REVIEWS, seller_id).await?))
    }

    pub async fn stats(&self, seller_id: &str) -> Result<SellerStats> {
        let products = self.by_seller(collections::PRODUCTS, seller_id).await?;
        let orders = self.by_seller(collections::ORDERS, seller_id).await?;
        let reviews = self.by_seller(collections::REVIEWS, seller_id).await?;

        let status_of = |d: &Document| d.str_field("status").and_then(|s| s.parse::<OrderStatus>().ok());

        let ratings: Vec<f64> = reviews.iter().filter_map(|r| r.f64_field("rating")).collect();
        let average_rating = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().sum::<f64>() / ratings.len() as f64
        };

        Ok(SellerStats {
            seller_id: seller_id.to_string(),
            total_products: products.len(),
            active_products: products
                .iter()
                .filter(|p| p.bool_field("is_active") == Some(true))
                .count(),
            total_orders: orders.len(),
            pending_orders: orders
                .iter()
                .filter(|o| status_of(o).is_some_and(|s| s.is_open()))
                .count(),
            completed_orders: orders
                .iter()
                .filter(|o| status_of(o) == Some(OrderStatus::Delivered))
                .count(),
            total_revenue: orders.iter().filter_map(|o| o.f64_field("total_amount")).sum(),
            average_rating,
            total_reviews: reviews.len(),
            last_updated: now_iso(),
        })
    }

    pub async fn dashboard_stats(&self, seller_id: &str) -> Result<SellerDashboardStats> {
        Ok(SellerDashboardStats {
            products: self.by_seller(collections::PRODUCTS, seller_id).await?.len(),
            orders: self.by_seller(collections::ORDERS, seller_id).await?.len(),
        })
    }

    async fn by_seller(&self, collection: &str, seller_id: &str) -> Result<Vec<Document>> {
        self.store
            .scan(collection, &[Filter::eq("seller_id", seller_id)])
            .await
    }
}
