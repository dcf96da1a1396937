//! Firestore REST document store

use super::value::{decode_fields, encode, encode_fields};
use super::{check_id, Document, DocumentStore, Filter, FilterOp};
use crate::config::FirebaseConfig;
use crate::credentials::TokenSource;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::{Client, StatusCode};
use serde_json::{json, Map, Value};
use tracing::debug;

lazy_static! {
    static ref SIMPLE_FIELD_PATH: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// `DocumentStore` over the Firestore v1 REST API
#[derive(Clone)]
pub struct FirestoreStore {
    http_client: Client,
    /// `<base>/v1/projects/<p>/databases/(default)/documents`
    documents_url: String,
    tokens: TokenSource,
}

impl FirestoreStore {
    pub fn new(config: &FirebaseConfig, tokens: TokenSource) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            documents_url: format!(
                "{}/v1/projects/{}/databases/(default)/documents",
                config.firestore_url, config.project_id
            ),
            tokens,
        }
    }

    fn document_url(&self, collection: &str, id: &str) -> Result<String> {
        check_id(id)?;
        Ok(format!("{}/{}/{}", self.documents_url, collection, id))
    }

    async fn fail(op: &str, target: &str, response: reqwest::Response) -> AppError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        AppError::Store(format!(
            "Firestore {} {} failed: {} - {}",
            op, target, status, body
        ))
    }
}

/// Quote a field name for `updateMask.fieldPaths` when it is not a bare identifier
fn field_path(name: &str) -> String {
    if SIMPLE_FIELD_PATH.is_match(name) {
        name.to_string()
    } else {
        format!("`{}`", name.replace('\\', "\\\\").replace('`', "\\`"))
    }
}

fn operator(op: FilterOp) -> &'static str {
    match op {
        FilterOp::Eq => "EQUAL",
        FilterOp::Gte => "GREATER_THAN_OR_EQUAL",
        FilterOp::Lte => "LESS_THAN_OR_EQUAL",
    }
}

/// Build the `structuredQuery` body for a collection scan
fn structured_query(collection: &str, filters: &[Filter]) -> Value {
    let field_filters: Vec<Value> = filters
        .iter()
        .map(|f| {
            json!({
                "fieldFilter": {
                    "field": { "fieldPath": field_path(&f.field) },
                    "op": operator(f.op),
                    "value": encode(&f.value),
                }
            })
        })
        .collect();

    let mut query = json!({ "from": [{ "collectionId": collection }] });
    match field_filters.len() {
        0 => {}
        1 => query["where"] = field_filters[0].clone(),
        _ => {
            query["where"] = json!({
                "compositeFilter": { "op": "AND", "filters": field_filters }
            })
        }
    }
    json!({ "structuredQuery": query })
}

/// Parse a REST document resource (`{name, fields, ...}`)
fn parse_document(raw: &Value) -> Result<Document> {
    let name = raw
        .get("name")
        .and_then(|n| n.as_str())
        .ok_or_else(|| AppError::Store("Firestore document without name".to_string()))?;
    let id = name.rsplit('/').next().unwrap_or(name).to_string();
    let fields = match raw.get("fields") {
        Some(Value::Object(f)) => decode_fields(f)?,
        _ => Map::new(),
    };
    Ok(Document::new(id, fields))
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let url = self.document_url(collection, id)?;
        let token = self.tokens.access_token().await?;
        debug!(collection, id, "firestore get");

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::Store(format!("Firestore request failed: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::fail("get", &url, response).await);
        }

        let raw: Value = response
            .json()
            .await
            .map_err(|e| AppError::Store(format!("Failed to parse document: {}", e)))?;
        parse_document(&raw).map(Some)
    }

    async fn put(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
        merge: bool,
    ) -> Result<()> {
        // An empty mask would turn a merge into a full overwrite
        if merge && fields.is_empty() {
            return Ok(());
        }

        let url = self.document_url(collection, id)?;
        let token = self.tokens.access_token().await?;
        debug!(collection, id, merge, "firestore put");

        let mut request = self
            .http_client
            .patch(&url)
            .bearer_auth(token)
            .json(&json!({ "fields": encode_fields(&fields) }));
        if merge {
            let mask: Vec<(&str, String)> = fields
                .keys()
                .map(|k| ("updateMask.fieldPaths", field_path(k)))
                .collect();
            request = request.query(&mask);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Store(format!("Firestore request failed: {}", e)))?;
        if !response.status().is_success() {
            return Err(Self::fail("put", &url, response).await);
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let url = self.document_url(collection, id)?;
        let token = self.tokens.access_token().await?;
        debug!(collection, id, "firestore delete");

        let response = self
            .http_client
            .delete(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::Store(format!("Firestore request failed: {}", e)))?;

        if response.status().is_success() || response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Err(Self::fail("delete", &url, response).await)
    }

    async fn scan(&self, collection: &str, filters: &[Filter]) -> Result<Vec<Document>> {
        let token = self.tokens.access_token().await?;
        let url = format!("{}:runQuery", self.documents_url);
        debug!(collection, filters = filters.len(), "firestore scan");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(token)
            .json(&structured_query(collection, filters))
            .send()
            .await
            .map_err(|e| AppError::Store(format!("Firestore request failed: {}", e)))?;
        if !response.status().is_success() {
            return Err(Self::fail("scan", collection, response).await);
        }

        // One element per result; elements without `document` only carry a readTime
        let rows: Vec<Value> = response
            .json()
            .await
            .map_err(|e| AppError::Store(format!("Failed to parse query results: {}", e)))?;
        rows.iter()
            .filter_map(|row| row.get("document"))
            .map(parse_document)
            .collect()
    }
}
