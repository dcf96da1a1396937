//! Shopping cart lines

use super::common::default_one;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// `cart_items/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub product_variant_id: Option<String>,
    pub quantity: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AddCartItemInput {
    #[serde(default)]
    pub product_id: String,
    pub product_variant_id: Option<String>,
    #[serde(default = "default_one")]
    #[validate(range(min = 1))]
    pub quantity: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateCartItemInput {
    #[validate(range(min = 1))]
    pub quantity: Option<i64>,
}
