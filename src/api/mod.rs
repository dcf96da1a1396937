//! REST API handlers and shared response envelopes

pub mod admin;
pub mod auth;
pub mod blog;
pub mod cart;
pub mod education;
pub mod health;
pub mod metrics;
pub mod order;
pub mod payment_method;
pub mod product;
pub mod profile;
pub mod review;
pub mod seller;
pub mod site_content;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// JSON body whose rejection surfaces as a 400 `AppError`
pub(crate) type JsonBody<T> = std::result::Result<Json<T>, JsonRejection>;

/// Unwrap a JSON body, mapping a rejection to `AppError::BadRequest`
pub(crate) fn body<T>(payload: JsonBody<T>) -> Result<T> {
    let Json(value) = payload?;
    Ok(value)
}

/// `{message, id?, ...extra}` response for single-resource writes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            id: None,
            extra: Map::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attach an extra top-level key
    pub fn with(mut self, key: &str, value: impl Serialize) -> Self {
        self.extra.insert(
            key.to_string(),
            serde_json::to_value(value).unwrap_or(Value::Null),
        );
        self
    }
}

/// `{items: [...]}` collection envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsResponse<T> {
    pub items: Vec<T>,
}

impl<T: Serialize> ItemsResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}
