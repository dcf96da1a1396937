//! Business logic layer
//!
//! One service per resource family. Services own the store sequences and
//! ownership rules; handlers run the role predicates before calling in.

pub mod admin;
pub mod auth;
pub mod blog;
pub mod cart;
pub mod content;
pub mod order;
pub mod payment_method;
pub mod product;
pub mod profile;
pub mod review;
pub mod seller;

pub use admin::AdminService;
pub use auth::AuthService;
pub use blog::BlogService;
pub use cart::CartService;
pub use content::ContentService;
pub use order::OrderService;
pub use payment_method::PaymentMethodService;
pub use product::ProductService;
pub use profile::ProfileService;
pub use review::ReviewService;
pub use seller::SellerService;

use crate::domain::now_iso;
use crate::error::{AppError, Result};
use crate::store::{fields, Document, DocumentStore, Filter};
use serde_json::{json, Map, Value};

/// Documents as returned to API callers
pub(crate) fn into_items(docs: Vec<Document>) -> Vec<Value> {
    docs.into_iter().map(Document::into_value).collect()
}

/// Fail with Conflict when another document already holds `value` in `field`
pub(crate) async fn ensure_unique<D: DocumentStore + ?Sized>(
    store: &D,
    collection: &str,
    field: &str,
    value: &str,
    exclude_id: Option<&str>,
) -> Result<()> {
    let holders = store.scan(collection, &[Filter::eq(field, value)]).await?;
    if holders.iter().any(|d| Some(d.id.as_str()) != exclude_id) {
        return Err(AppError::Conflict(format!("{} must be unique", field)));
    }
    Ok(())
}

/// Clear `is_default` on every document the user owns, except `keep_id`
pub(crate) async fn clear_default_flag<D: DocumentStore + ?Sized>(
    store: &D,
    collection: &str,
    user_id: &str,
    keep_id: Option<&str>,
) -> Result<()> {
    let defaults = store
        .scan(
            collection,
            &[Filter::eq("user_id", user_id), Filter::eq("is_default", true)],
        )
        .await?;

    for doc in defaults {
        if Some(doc.id.as_str()) == keep_id {
            continue;
        }
        store
            .put(
                collection,
                &doc.id,
                fields([("is_default", json!(false)), ("updated_at", json!(now_iso()))]),
                true,
            )
            .await?;
    }
    Ok(())
}

/// Add `updated_at` to a merge payload
pub(crate) fn touch(mut map: Map<String, Value>) -> Map<String, Value> {
    map.insert("updated_at".to_string(), json!(now_iso()));
    map
}
