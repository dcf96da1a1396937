//! Blog API handlers

use crate::api::{body, ItemsResponse, JsonBody, MessageResponse};
use crate::domain::{BlogStatusInput, CreateBlogInput, UpdateBlogInput, UserRole};
use crate::error::Result;
use crate::middleware::auth::AuthContext;
use crate::policy::require_roles;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn list<S: HasServices>(State(state): State<S>) -> Result<impl IntoResponse> {
    let items = state.blog_service().list_published().await?;
    Ok(Json(ItemsResponse::new(items)))
}

pub async fn get<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.blog_service().get(&id).await?))
}

pub async fn create<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    payload: JsonBody<CreateBlogInput>,
) -> Result<impl IntoResponse> {
    require_roles(&auth, &[UserRole::Admin])?;
    let id = state.blog_service().create(&auth.uid, body(payload)?).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Blog created").with_id(id)),
    ))
}

pub async fn update<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(id): Path<String>,
    payload: JsonBody<UpdateBlogInput>,
) -> Result<impl IntoResponse> {
    require_roles(&auth, &[UserRole::Admin])?;
    state.blog_service().update(&id, body(payload)?).await?;
    Ok(Json(MessageResponse::new("Blog updated")))
}

pub async fn delete<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    require_roles(&auth, &[UserRole::Admin])?;
    state.blog_service().delete(&id).await?;
    Ok(Json(MessageResponse::new("Blog deleted")))
}

pub async fn set_status<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(id): Path<String>,
    payload: JsonBody<BlogStatusInput>,
) -> Result<impl IntoResponse> {
    require_roles(&auth, &[UserRole::Admin])?;
    let status = body(payload)?.status;
    state.blog_service().set_status(&id, status).await?;
    Ok(Json(
        MessageResponse::new("Blog status updated").with("status", status),
    ))
}
