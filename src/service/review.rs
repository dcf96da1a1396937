//! Reviews and product rating aggregation

use super::{into_items, touch};
use crate::domain::{gen_id, now_iso, running_average, CreateReviewInput, Review};
use crate::error::{AppError, Result};
use crate::store::{check_id, collections, fields, to_fields, DocumentStore, Filter};
use serde_json::{json, Value};
use std::sync::Arc;
use validator::Validate;

pub struct ReviewService<D: DocumentStore> {
    store: Arc<D>,
}

impl<D: DocumentStore> ReviewService<D> {
    pub fn new(store: Arc<D>) -> Self {
        Self { store }
    }

    pub async fn for_product(&self, product_id: &str) -> Result<Vec<Value>> {
        self.list_where("product_id", product_id).await
    }

    pub async fn for_seller(&self, seller_id: &str) -> Result<Vec<Value>> {
        self.list_where("seller_id", seller_id).await
    }

    /// Store the review and fold its rating into the product's running mean.
    /// The read-then-write on the product is not atomic.
    pub async fn create(&self, user_id: &str, input: CreateReviewInput) -> Result<String> {
        if input.order_id.is_empty() {
            return Err(AppError::BadRequest("order_id required".to_string()));
        }
        input.validate()?;
        if let Some(product_id) = &input.product_id {
            check_id(product_id)?;
        }

        let t = now_iso();
        let review = Review {
            id: gen_id(),
            user_id: user_id.to_string(),
            order_id: input.order_id,
            product_id: input.product_id,
            seller_id: input.seller_id,
            rating: input.rating,
            title: input.title,
            comment: input.comment,
            images: input.images,
            is_verified_purchase: input.is_verified_purchase,
            helpful_count: input.helpful_count,
            created_at: t.clone(),
            updated_at: t,
        };
        self.store
            .put(collections::REVIEWS, &review.id, to_fields(&review)?, false)
            .await?;

        if let Some(product_id) = &review.product_id {
            self.fold_rating(product_id, review.rating as f64).await?;
        }
        Ok(review.id)
    }

    async fn fold_rating(&self, product_id: &str, value: f64) -> Result<()> {
        let Some(product) = self.store.get(collections::PRODUCTS, product_id).await? else {
            return Ok(());
        };

        let old_rating = product.f64_field("rating").unwrap_or(0.0);
        let old_count = product
            .get("review_count")
            .and_then(Value::as_i64)
            .unwrap_or(0);

        self.store
            .put(
                collections::PRODUCTS,
                product_id,
                touch(fields([
                    ("rating", json!(running_average(old_rating, old_count, value))),
                    ("review_count", json!(old_count + 1)),
                ])),
                true,
            )
            .await
    }

    async fn list_where(&self, field: &str, value: &str) -> Result<Vec<Value>> {
        let docs = self
            .store
            .scan(collections::REVIEWS, &[Filter::eq(field, value)])
            .await?;
        Ok(into_items(docs))
    }
}
