//! Product and seller reviews

use serde::{Deserialize, Serialize};
use validator::Validate;

/// `reviews/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub order_id: String,
    pub product_id: Option<String>,
    pub seller_id: Option<String>,
    pub rating: i64,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub images: Vec<String>,
    pub is_verified_purchase: bool,
    pub helpful_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateReviewInput {
    #[serde(default)]
    pub order_id: String,
    pub product_id: Option<String>,
    pub seller_id: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub rating: i64,
    pub title: Option<String>,
    pub comment: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_verified_purchase: bool,
    #[serde(default)]
    pub helpful_count: i64,
}

/// Running mean after adding one more rating
pub fn running_average(old_rating: f64, old_count: i64, value: f64) -> f64 {
    let old_count = old_count.max(0) as f64;
    (old_rating * old_count + value) / (old_count + 1.0)
}
