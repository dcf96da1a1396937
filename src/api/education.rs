//! BSF education API handlers

use crate::api::{body, ItemsResponse, JsonBody, MessageResponse};
use crate::domain::{BsfEducationInput, UserRole};
use crate::error::Result;
use crate::middleware::auth::AuthContext;
use crate::policy::require_roles;
use crate::state::HasServices;
use axum::{extract::State, response::IntoResponse, Json};

pub async fn list_bsf<S: HasServices>(State(state): State<S>) -> Result<impl IntoResponse> {
    let items = state.content_service().bsf_entries().await?;
    Ok(Json(ItemsResponse::new(items)))
}

pub async fn put_bsf<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    payload: JsonBody<BsfEducationInput>,
) -> Result<impl IntoResponse> {
    require_roles(&auth, &[UserRole::Admin])?;
    let id = state
        .content_service()
        .put_bsf_entry(body(payload)?)
        .await?;
    Ok(Json(MessageResponse::new("BSF education updated").with_id(id)))
}
