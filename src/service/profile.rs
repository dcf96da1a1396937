//! Profile and delivery-address business logic

use super::{clear_default_flag, into_items, touch};
use crate::domain::{
    gen_id, now_iso, AddressUpsertInput, DeliveryAddress, ProfileUpdateInput, PROFILE_FIELDS,
    USER_FIELDS,
};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthContext;
use crate::store::{collections, to_fields, DocumentStore, Filter};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use validator::Validate;

pub struct ProfileService<D: DocumentStore> {
    store: Arc<D>,
}

impl<D: DocumentStore> ProfileService<D> {
    pub fn new(store: Arc<D>) -> Self {
        Self { store }
    }

    /// `{user, profile}`; the profile is null when it was never written
    pub async fn get(&self, user_id: &str) -> Result<Value> {
        let user = self
            .store
            .get(collections::USERS, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        let profile = self.store.get(collections::USER_PROFILES, user_id).await?;

        Ok(json!({
            "user": user.into_value(),
            "profile": profile.map(|p| p.into_value()),
        }))
    }

    /// Merge account fields into `users` and profile fields into `user_profiles`
    pub async fn update(
        &self,
        auth: &AuthContext,
        user_id: &str,
        input: ProfileUpdateInput,
    ) -> Result<()> {
        if input.status.is_some() && !auth.is_admin() {
            return Err(AppError::Forbidden(
                "Only admins can change account status".to_string(),
            ));
        }
        input.validate()?;

        let all = to_fields(&input)?;
        let pick = |names: &[&str]| -> Map<String, Value> {
            all.iter()
                .filter(|(k, _)| names.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        };

        let user_fields = pick(USER_FIELDS);
        if !user_fields.is_empty() {
            self.store
                .put(collections::USERS, user_id, touch(user_fields), true)
                .await?;
        }

        let profile_fields = pick(PROFILE_FIELDS);
        if !profile_fields.is_empty() {
            self.store
                .put(collections::USER_PROFILES, user_id, touch(profile_fields), true)
                .await?;
        }
        Ok(())
    }

    pub async fn list_addresses(&self, user_id: &str) -> Result<Vec<Value>> {
        let docs = self
            .store
            .scan(
                collections::DELIVERY_ADDRESSES,
                &[Filter::eq("user_id", user_id)],
            )
            .await?;
        Ok(into_items(docs))
    }

    /// Create or replace an address; returns its id
    pub async fn upsert_address(&self, user_id: &str, input: AddressUpsertInput) -> Result<String> {
        input.validate()?;

        let id = input
            .id
            .clone()
            .or_else(|| input.address_id.clone())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(gen_id);

        if let Some(existing) = self.store.get(collections::DELIVERY_ADDRESSES, &id).await? {
            if existing.str_field("user_id") != Some(user_id) {
                return Err(AppError::Forbidden("Forbidden".to_string()));
            }
        }

        if input.is_default {
            clear_default_flag(
                self.store.as_ref(),
                collections::DELIVERY_ADDRESSES,
                user_id,
                Some(&id),
            )
            .await?;
        }

        let t = now_iso();
        let address = DeliveryAddress {
            id: id.clone(),
            user_id: user_id.to_string(),
            address_type: input.address_type,
            full_name: input.full_name,
            phone: input.phone,
            address_line1: input.address_line1,
            address_line2: input.address_line2,
            city: input.city,
            state: input.state,
            pincode: input.pincode,
            landmark: input.landmark,
            is_default: input.is_default,
            created_at: input.created_at.unwrap_or_else(|| t.clone()),
            updated_at: t,
        };
        self.store
            .put(
                collections::DELIVERY_ADDRESSES,
                &id,
                to_fields(&address)?,
                true,
            )
            .await?;
        Ok(id)
    }

    pub async fn delete_address(&self, user_id: &str, address_id: &str) -> Result<()> {
        if let Some(existing) = self
            .store
            .get(collections::DELIVERY_ADDRESSES, address_id)
            .await?
        {
            if existing.str_field("user_id") != Some(user_id) {
                return Err(AppError::Forbidden("Forbidden".to_string()));
            }
        }
        self.store
            .delete(collections::DELIVERY_ADDRESSES, address_id)
            .await
    }
}
