//! Blog posts

use super::{ensure_unique, into_items, touch};
use crate::domain::{gen_id, now_iso, Blog, BlogStatus, CreateBlogInput, UpdateBlogInput};
use crate::error::{AppError, Result};
use crate::store::{collections, fields, to_fields, Document, DocumentStore, Filter};
use serde_json::{json, Value};
use std::sync::Arc;
use validator::Validate;

pub struct BlogService<D: DocumentStore> {
    store: Arc<D>,
}

impl<D: DocumentStore> BlogService<D> {
    pub fn new(store: Arc<D>) -> Self {
        Self { store }
    }

    /// Published posts only
    pub async fn list_published(&self) -> Result<Vec<Value>> {
        let docs = self
            .store
            .scan(
                collections::BLOGS,
                &[Filter::eq("status", BlogStatus::Published.as_str())],
            )
            .await?;
        Ok(into_items(docs))
    }

    pub async fn get(&self, id: &str) -> Result<Value> {
        Ok(self.find(id).await?.into_value())
    }

    pub async fn create(&self, author_id: &str, input: CreateBlogInput) -> Result<String> {
        input.validate()?;
        ensure_unique(self.store.as_ref(), collections::BLOGS, "slug", &input.slug, None).await?;

        let t = now_iso();
        let blog = Blog {
            id: gen_id(),
            author_id: author_id.to_string(),
            title: input.title,
            slug: input.slug,
            excerpt: input.excerpt,
            content: input.content,
            featured_image: input.featured_image,
            category: input.category,
            tags: input.tags,
            status: input.status,
            view_count: 0,
            seo_title: input.seo_title,
            seo_description: input.seo_description,
            seo_keywords: input.seo_keywords,
            published_at: input.published_at,
            created_at: t.clone(),
            updated_at: t,
        };
        self.store
            .put(collections::BLOGS, &blog.id, to_fields(&blog)?, false)
            .await?;
        Ok(blog.id)
    }

    pub async fn update(&self, id: &str, input: UpdateBlogInput) -> Result<()> {
        input.validate()?;
        self.find(id).await?;
        if let Some(slug) = &input.slug {
            ensure_unique(self.store.as_ref(), collections::BLOGS, "slug", slug, Some(id)).await?;
        }

        self.store
            .put(collections::BLOGS, id, touch(to_fields(&input)?), true)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(collections::BLOGS, id).await
    }

    pub async fn set_status(&self, id: &str, status: BlogStatus) -> Result<()> {
        self.find(id).await?;
        self.store
            .put(
                collections::BLOGS,
                id,
                touch(fields([("status", json!(status))])),
                true,
            )
            .await
    }

    async fn find(&self, id: &str) -> Result<Document> {
        self.store
            .get(collections::BLOGS, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))
    }
}
