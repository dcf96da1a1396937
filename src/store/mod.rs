//! Document store access layer
//!
//! Every resource lives in a named collection of schemaless JSON documents.
//! `DocumentStore` is the only seam services talk to; `FirestoreStore` speaks
//! the Firestore REST API and `MemoryStore` keeps everything in-process.

pub mod firestore;
pub mod memory;
pub mod value;

use crate::error::{AppError, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

/// Collection names
pub mod collections {
    pub const USERS: &str = "users";
    pub const USER_PROFILES: &str = "user_profiles";
    pub const SELLER_PROFILES: &str = "seller_profiles";
    pub const ADMIN_USERS: &str = "admin_users";
    pub const DELIVERY_ADDRESSES: &str = "delivery_addresses";
    pub const PRODUCTS: &str = "products";
    pub const PRODUCT_VARIANTS: &str = "product_variants";
    pub const CART_ITEMS: &str = "cart_items";
    pub const ORDERS: &str = "orders";
    pub const ORDER_ITEMS: &str = "order_items";
    pub const ORDER_TRACKING: &str = "order_tracking";
    pub const TRANSACTIONS: &str = "transactions";
    pub const PAYMENT_METHODS: &str = "payment_methods";
    pub const REVIEWS: &str = "reviews";
    pub const BLOGS: &str = "blogs";
    pub const SITE_CONTENT: &str = "site_content";
    pub const BSF_EDUCATION: &str = "bsf_education";
}

/// A stored document: its id plus the raw field map
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(|v| v.as_str())
    }

    pub fn f64_field(&self, field: &str) -> Option<f64> {
        self.fields.get(field).and_then(|v| v.as_f64())
    }

    pub fn bool_field(&self, field: &str) -> Option<bool> {
        self.fields.get(field).and_then(|v| v.as_bool())
    }

    /// The document body as returned to API callers
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Comparison operator of a scan predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gte,
    Lte,
}

/// A single `field <op> value` predicate; scans AND all predicates together
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Eq,
            value: value.into(),
        }
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Gte,
            value: value.into(),
        }
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Lte,
            value: value.into(),
        }
    }
}

/// Uniform access to named document collections.
///
/// Each call is independent: there are no multi-document transactions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Fetch a document by id
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Write a document. With `merge` only the given top-level fields are
    /// replaced; without it the whole document is overwritten.
    async fn put(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
        merge: bool,
    ) -> Result<()>;

    /// Delete a document; deleting a missing document is not an error
    async fn delete(&self, collection: &str, id: &str) -> Result<()>;

    /// All documents matching every filter
    async fn scan(&self, collection: &str, filters: &[Filter]) -> Result<Vec<Document>>;

    /// All documents of a collection
    async fn scan_all(&self, collection: &str) -> Result<Vec<Document>> {
        self.scan(collection, &[]).await
    }
}

/// Reject ids that are not a single path segment: empty, `.`, `..`,
/// containing `/`, or the reserved `__name__` form
pub fn check_id(id: &str) -> Result<()> {
    let reserved = id.len() > 4 && id.starts_with("__") && id.ends_with("__");
    if id.is_empty() || id == "." || id == ".." || id.contains('/') || reserved {
        return Err(AppError::BadRequest(format!("Invalid document id: {:?}", id)));
    }
    Ok(())
}

/// Serialize a typed document into a field map
pub fn to_fields<T: Serialize>(value: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(value)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize document: {}", e)))?
    {
        Value::Object(map) => Ok(map),
        other => Err(AppError::Internal(anyhow::anyhow!(
            "Document must serialize to an object, got {}",
            other
        ))),
    }
}

/// Build a field map from `(key, value)` pairs
pub fn fields<I, K>(pairs: I) -> Map<String, Value>
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}
