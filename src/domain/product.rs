//! Catalog: products and their variants

use super::common::{default_one, default_true, now_iso};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// `products/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub seller_id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub price: f64,
    pub original_price: Option<f64>,
    pub discount_percentage: Option<i64>,
    pub unit: Option<String>,
    pub stock_quantity: i64,
    pub min_order_quantity: i64,
    pub max_order_quantity: Option<i64>,
    pub sku: String,
    pub images: Vec<String>,
    pub nutritional_info: Map<String, Value>,
    pub storage_instructions: Option<String>,
    pub shelf_life: Option<String>,
    pub origin: Option<String>,
    pub is_organic: bool,
    pub is_featured: bool,
    pub is_active: bool,
    pub total_sold: i64,
    pub rating: f64,
    pub review_count: i64,
    pub tags: Vec<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Product {
    pub fn from_input(id: String, seller_id: String, input: CreateProductInput) -> Self {
        let t = now_iso();
        Self {
            id,
            seller_id,
            name: input.name,
            slug: input.slug,
            description: input.description,
            short_description: input.short_description,
            category: input.category,
            subcategory: input.subcategory,
            price: input.price,
            original_price: input.original_price,
            discount_percentage: input.discount_percentage,
            unit: input.unit,
            stock_quantity: input.stock_quantity,
            min_order_quantity: input.min_order_quantity,
            max_order_quantity: input.max_order_quantity,
            sku: input.sku,
            images: input.images,
            nutritional_info: input.nutritional_info,
            storage_instructions: input.storage_instructions,
            shelf_life: input.shelf_life,
            origin: input.origin,
            is_organic: input.is_organic,
            is_featured: input.is_featured,
            is_active: input.is_active,
            total_sold: 0,
            rating: 0.0,
            review_count: 0,
            tags: input.tags,
            seo_title: input.seo_title,
            seo_description: input.seo_description,
            seo_keywords: input.seo_keywords,
            created_at: t.clone(),
            updated_at: t,
        }
    }
}

/// Input for creating a product
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateProductInput {
    /// Only honoured for admins; sellers always list under their own id
    pub seller_id: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub slug: String,
    #[validate(length(min = 1, max = 100))]
    pub sku: String,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0.0))]
    pub original_price: Option<f64>,
    #[validate(range(min = 0, max = 100))]
    pub discount_percentage: Option<i64>,
    pub unit: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock_quantity: i64,
    #[serde(default = "default_one")]
    #[validate(range(min = 1))]
    pub min_order_quantity: i64,
    #[validate(range(min = 1))]
    pub max_order_quantity: Option<i64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub nutritional_info: Map<String, Value>,
    pub storage_instructions: Option<String>,
    pub shelf_life: Option<String>,
    pub origin: Option<String>,
    #[serde(default)]
    pub is_organic: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
}

/// Input for updating a product (merge)
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateProductInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255))]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub original_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, max = 100))]
    pub discount_percentage: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub stock_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub min_order_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub max_order_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutritional_info: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelf_life: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_organic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_keywords: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductStatusInput {
    pub is_active: bool,
}

/// Catalog listing filters (`?category=&minPrice=&isActive=...`)
#[derive(Debug, Clone, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub search: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<f64>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<f64>,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            category: None,
            subcategory: None,
            search: None,
            min_price: None,
            max_price: None,
            is_active: true,
        }
    }
}

/// `product_variants/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: String,
    pub product_id: String,
    pub variant_name: String,
    pub price: f64,
    pub stock_quantity: i64,
    pub sku: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateVariantInput {
    #[validate(length(min = 1, max = 255))]
    pub variant_name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock_quantity: i64,
    #[validate(length(min = 1, max = 100))]
    pub sku: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateVariantInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255))]
    pub variant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub stock_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
