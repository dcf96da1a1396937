//! Site content sections, BSF education entries and admin counts

use super::common::default_true;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `site_content/{section}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteContent {
    pub id: String,
    pub section: String,
    pub content: Value,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteContentInput {
    pub content: Value,
    pub id: Option<String>,
    pub created_at: Option<String>,
}

/// `bsf_education/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BsfEducationEntry {
    pub id: String,
    pub section: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub images: Vec<String>,
    pub video_url: Option<String>,
    pub display_order: i64,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BsfEducationInput {
    pub id: Option<String>,
    pub section: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub video_url: Option<String>,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: Option<String>,
}

/// Document counts for the admin dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AdminStats {
    pub users: usize,
    pub user_profiles: usize,
    pub sellers: usize,
    pub products: usize,
    pub orders: usize,
    pub blogs: usize,
    pub reviews: usize,
}
