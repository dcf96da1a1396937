//! Catalog business logic: products and variants

use super::{ensure_unique, into_items, touch};
use crate::domain::{
    gen_id, now_iso, CreateProductInput, CreateVariantInput, Product, ProductQuery,
    ProductVariant, UpdateProductInput, UpdateVariantInput,
};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthContext;
use crate::policy::require_seller_owns;
use crate::store::{collections, fields, to_fields, Document, DocumentStore, Filter};
use serde_json::{json, Value};
use std::sync::Arc;
use validator::Validate;

pub struct ProductService<D: DocumentStore> {
    store: Arc<D>,
}

impl<D: DocumentStore> ProductService<D> {
    pub fn new(store: Arc<D>) -> Self {
        Self { store }
    }

    /// Store-side equality/range filters, then an in-memory text search
    pub async fn list(&self, query: &ProductQuery) -> Result<Vec<Value>> {
        let mut filters = vec![Filter::eq("is_active", query.is_active)];
        if let Some(category) = &query.category {
            filters.push(Filter::eq("category", category.as_str()));
        }
        if let Some(subcategory) = &query.subcategory {
            filters.push(Filter::eq("subcategory", subcategory.as_str()));
        }
        if let Some(min) = query.min_price {
            filters.push(Filter::gte("price", min));
        }
        if let Some(max) = query.max_price {
            filters.push(Filter::lte("price", max));
        }

        let mut docs = self.store.scan(collections::PRODUCTS, &filters).await?;

        let needle = query
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        if let Some(needle) = needle {
            docs.retain(|d| {
                let haystack = format!(
                    "{} {}",
                    d.str_field("name").unwrap_or_default(),
                    d.str_field("description").unwrap_or_default()
                );
                haystack.to_lowercase().contains(&needle)
            });
        }

        Ok(into_items(docs))
    }

    pub async fn get(&self, id: &str) -> Result<Value> {
        Ok(self.find(id).await?.into_value())
    }

    pub async fn create(&self, auth: &AuthContext, input: CreateProductInput) -> Result<String> {
        input.validate()?;

        ensure_unique(self.store.as_ref(), collections::PRODUCTS, "slug", &input.slug, None).await?;
        ensure_unique(self.store.as_ref(), collections::PRODUCTS, "sku", &input.sku, None).await?;

        let seller_id = match (&input.seller_id, auth.is_admin()) {
            (Some(s), true) if !s.is_empty() => s.clone(),
            _ => auth.uid.clone(),
        };

        let id = gen_id();
        let product = Product::from_input(id.clone(), seller_id, input);
        self.store
            .put(collections::PRODUCTS, &id, to_fields(&product)?, false)
            .await?;

        tracing::info!(product_id = %id, seller_id = %product.seller_id, "Product created");
        Ok(id)
    }

    pub async fn update(&self, auth: &AuthContext, id: &str, input: UpdateProductInput) -> Result<()> {
        input.validate()?;
        self.find_owned(auth, id).await?;

        if let Some(slug) = &input.slug {
            ensure_unique(self.store.as_ref(), collections::PRODUCTS, "slug", slug, Some(id)).await?;
        }
        if let Some(sku) = &input.sku {
            ensure_unique(self.store.as_ref(), collections::PRODUCTS, "sku", sku, Some(id)).await?;
        }

        self.store
            .put(collections::PRODUCTS, id, touch(to_fields(&input)?), true)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(collections::PRODUCTS, id).await
    }

    pub async fn set_active(&self, auth: &AuthContext, id: &str, is_active: bool) -> Result<()> {
        self.find_owned(auth, id).await?;
        self.store
            .put(
                collections::PRODUCTS,
                id,
                touch(fields([("is_active", json!(is_active))])),
                true,
            )
            .await
    }

    pub async fn list_variants(&self, product_id: &str) -> Result<Vec<Value>> {
        let docs = self
            .store
            .scan(
                collections::PRODUCT_VARIANTS,
                &[Filter::eq("product_id", product_id)],
            )
            .await?;
        Ok(into_items(docs))
    }

    pub async fn create_variant(
        &self,
        auth: &AuthContext,
        product_id: &str,
        input: CreateVariantInput,
    ) -> Result<String> {
        input.validate()?;
        self.find_owned(auth, product_id).await?;

        let t = now_iso();
        let variant = ProductVariant {
            id: gen_id(),
            product_id: product_id.to_string(),
            variant_name: input.variant_name,
            price: input.price,
            stock_quantity: input.stock_quantity,
            sku: input.sku,
            is_active: input.is_active,
            created_at: t.clone(),
            updated_at: t,
        };
        self.store
            .put(
                collections::PRODUCT_VARIANTS,
                &variant.id,
                to_fields(&variant)?,
                false,
            )
            .await?;
        Ok(variant.id)
    }

    pub async fn update_variant(
        &self,
        auth: &AuthContext,
        product_id: &str,
        variant_id: &str,
        input: UpdateVariantInput,
    ) -> Result<()> {
        input.validate()?;
        self.find_owned(auth, product_id).await?;
        self.find_variant(product_id, variant_id).await?;

        self.store
            .put(
                collections::PRODUCT_VARIANTS,
                variant_id,
                touch(to_fields(&input)?),
                true,
            )
            .await
    }

    pub async fn delete_variant(
        &self,
        auth: &AuthContext,
        product_id: &str,
        variant_id: &str,
    ) -> Result<()> {
        self.find_owned(auth, product_id).await?;
        self.find_variant(product_id, variant_id).await?;
        self.store
            .delete(collections::PRODUCT_VARIANTS, variant_id)
            .await
    }

    async fn find(&self, id: &str) -> Result<Document> {
        self.store
            .get(collections::PRODUCTS, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
    }

    /// The product, provided a seller caller owns it
    async fn find_owned(&self, auth: &AuthContext, id: &str) -> Result<Document> {
        let product = self.find(id).await?;
        require_seller_owns(auth, product.str_field("seller_id"))?;
        Ok(product)
    }

    async fn find_variant(&self, product_id: &str, variant_id: &str) -> Result<Document> {
        self.store
            .get(collections::PRODUCT_VARIANTS, variant_id)
            .await?
            .filter(|v| v.str_field("product_id") == Some(product_id))
            .ok_or_else(|| AppError::NotFound("Variant not found".to_string()))
    }
}
