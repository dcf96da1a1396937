//! Site content sections and BSF education entries

use super::into_items;
use crate::domain::{gen_id, now_iso, BsfEducationEntry, BsfEducationInput, SiteContentInput};
use crate::error::Result;
use crate::store::{collections, fields, to_fields, DocumentStore, Filter};
use serde_json::{json, Value};
use std::sync::Arc;

pub struct ContentService<D: DocumentStore> {
    store: Arc<D>,
}

impl<D: DocumentStore> ContentService<D> {
    pub fn new(store: Arc<D>) -> Self {
        Self { store }
    }

    pub async fn list_sections(&self) -> Result<Vec<Value>> {
        Ok(into_items(
            self.store.scan_all(collections::SITE_CONTENT).await?,
        ))
    }

    /// A missing section reads as an empty placeholder
    pub async fn section(&self, section: &str) -> Result<Value> {
        Ok(match self.store.get(collections::SITE_CONTENT, section).await? {
            Some(doc) => doc.into_value(),
            None => json!({"id": null, "section": section, "content": {}}),
        })
    }

    pub async fn put_section(&self, section: &str, input: SiteContentInput) -> Result<()> {
        let t = now_iso();
        let mut doc = fields([
            ("id", json!(input.id.unwrap_or_else(|| section.to_string()))),
            ("section", json!(section)),
            ("content", input.content),
            ("updated_at", json!(t)),
        ]);
        if let Some(created_at) = input.created_at {
            doc.insert("created_at".to_string(), json!(created_at));
        }

        self.store
            .put(collections::SITE_CONTENT, section, doc, true)
            .await
    }

    /// Active entries in display order
    pub async fn bsf_entries(&self) -> Result<Vec<Value>> {
        let mut docs = self
            .store
            .scan(collections::BSF_EDUCATION, &[Filter::eq("is_active", true)])
            .await?;
        docs.sort_by_key(|d| d.get("display_order").and_then(Value::as_i64).unwrap_or(0));
        Ok(into_items(docs))
    }

    /// Create or replace an entry; returns its id
    pub async fn put_bsf_entry(&self, input: BsfEducationInput) -> Result<String> {
        let id = input
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(gen_id);

        let t = now_iso();
        let entry = BsfEducationEntry {
            id: id.clone(),
            section: input.section,
            title: input.title,
            content: input.content,
            images: input.images,
            video_url: input.video_url,
            display_order: input.display_order,
            is_active: input.is_active,
            created_at: input.created_at.unwrap_or_else(|| t.clone()),
            updated_at: t,
        };
        self.store
            .put(collections::BSF_EDUCATION, &id, to_fields(&entry)?, true)
            .await?;
        Ok(id)
    }
}
