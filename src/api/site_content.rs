//! Site content API handlers

use crate::api::{body, ItemsResponse, JsonBody, MessageResponse};
use crate::domain::{SiteContentInput, UserRole};
use crate::error::Result;
use crate::middleware::auth::AuthContext;
use crate::policy::require_roles;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

pub async fn list<S: HasServices>(State(state): State<S>) -> Result<impl IntoResponse> {
    let items = state.content_service().list_sections().await?;
    Ok(Json(ItemsResponse::new(items)))
}

pub async fn get<S: HasServices>(
    State(state): State<S>,
    Path(section): Path<String>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.content_service().section(&section).await?))
}

pub async fn put<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(section): Path<String>,
    payload: JsonBody<SiteContentInput>,
) -> Result<impl IntoResponse> {
    require_roles(&auth, &[UserRole::Admin])?;
    state
        .content_service()
        .put_section(&section, body(payload)?)
        .await?;
    Ok(Json(
        MessageResponse::new("Site content updated").with("section", section),
    ))
}
