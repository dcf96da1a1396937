//! Saved payment methods

use super::{clear_default_flag, into_items};
use crate::domain::{gen_id, now_iso, AddPaymentMethodInput, SavedPaymentMethod};
use crate::error::{AppError, Result};
use crate::store::{collections, to_fields, DocumentStore, Filter};
use serde_json::Value;
use std::sync::Arc;

pub struct PaymentMethodService<D: DocumentStore> {
    store: Arc<D>,
}

impl<D: DocumentStore> PaymentMethodService<D> {
    pub fn new(store: Arc<D>) -> Self {
        Self { store }
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<Value>> {
        let docs = self
            .store
            .scan(collections::PAYMENT_METHODS, &[Filter::eq("user_id", user_id)])
            .await?;
        Ok(into_items(docs))
    }

    pub async fn add(&self, user_id: &str, input: AddPaymentMethodInput) -> Result<String> {
        let id = gen_id();
        if input.is_default {
            clear_default_flag(
                self.store.as_ref(),
                collections::PAYMENT_METHODS,
                user_id,
                None,
            )
            .await?;
        }

        let t = now_iso();
        let method = SavedPaymentMethod {
            id: id.clone(),
            user_id: user_id.to_string(),
            payment_type: input.payment_type,
            card_last_four: input.card_last_four,
            card_brand: input.card_brand,
            upi_id: input.upi_id,
            is_default: input.is_default,
            created_at: t.clone(),
            updated_at: t,
        };
        self.store
            .put(collections::PAYMENT_METHODS, &id, to_fields(&method)?, false)
            .await?;
        Ok(id)
    }

    pub async fn delete(&self, user_id: &str, method_id: &str) -> Result<()> {
        if let Some(existing) = self
            .store
            .get(collections::PAYMENT_METHODS, method_id)
            .await?
        {
            if existing.str_field("user_id") != Some(user_id) {
                return Err(AppError::Forbidden("Forbidden".to_string()));
            }
        }
        self.store
            .delete(collections::PAYMENT_METHODS, method_id)
            .await
    }
}
