//! Shopping cart business logic

use super::{into_items, touch};
use crate::domain::{gen_id, now_iso, AddCartItemInput, CartItem, UpdateCartItemInput};
use crate::error::{AppError, Result};
use crate::store::{collections, fields, to_fields, Document, DocumentStore, Filter};
use serde_json::{json, Value};
use std::sync::Arc;
use validator::Validate;

pub struct CartService<D: DocumentStore> {
    store: Arc<D>,
}

impl<D: DocumentStore> CartService<D> {
    pub fn new(store: Arc<D>) -> Self {
        Self { store }
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<Value>> {
        Ok(into_items(self.items_of(user_id).await?))
    }

    pub async fn add(&self, user_id: &str, input: AddCartItemInput) -> Result<String> {
        input.validate()?;
        if input.product_id.is_empty() {
            return Err(AppError::BadRequest("product_id required".to_string()));
        }

        let t = now_iso();
        let item = CartItem {
            id: gen_id(),
            user_id: user_id.to_string(),
            product_id: input.product_id,
            product_variant_id: input.product_variant_id,
            quantity: input.quantity,
            created_at: t.clone(),
            updated_at: t,
        };
        self.store
            .put(collections::CART_ITEMS, &item.id, to_fields(&item)?, false)
            .await?;
        Ok(item.id)
    }

    pub async fn update(
        &self,
        user_id: &str,
        item_id: &str,
        input: UpdateCartItemInput,
    ) -> Result<()> {
        input.validate()?;

        let item = self
            .store
            .get(collections::CART_ITEMS, item_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cart item not found".to_string()))?;
        ensure_owner(&item, user_id)?;

        let quantity = input
            .quantity
            .or_else(|| item.get("quantity").and_then(Value::as_i64))
            .unwrap_or(1);
        self.store
            .put(
                collections::CART_ITEMS,
                item_id,
                touch(fields([("quantity", json!(quantity))])),
                true,
            )
            .await
    }

    pub async fn remove(&self, user_id: &str, item_id: &str) -> Result<()> {
        if let Some(item) = self.store.get(collections::CART_ITEMS, item_id).await? {
            ensure_owner(&item, user_id)?;
        }
        self.store.delete(collections::CART_ITEMS, item_id).await
    }

    /// Delete every line of the user's cart
    pub async fn clear(&self, user_id: &str) -> Result<()> {
        for item in self.items_of(user_id).await? {
            self.store.delete(collections::CART_ITEMS, &item.id).await?;
        }
        Ok(())
    }

    async fn items_of(&self, user_id: &str) -> Result<Vec<Document>> {
        self.store
            .scan(collections::CART_ITEMS, &[Filter::eq("user_id", user_id)])
            .await
    }
}

fn ensure_owner(item: &Document, user_id: &str) -> Result<()> {
    if item.str_field("user_id") != Some(user_id) {
        return Err(AppError::Forbidden("Forbidden".to_string()));
    }
    Ok(())
}
