//! Admin API handlers

use crate::api::{body, ItemsResponse, JsonBody, MessageResponse};
use crate::domain::{RejectSellerInput, SellerStatusInput, UserRole};
use crate::error::Result;
use crate::middleware::auth::AuthContext;
use crate::policy::require_roles;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

pub async fn list_sellers<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
) -> Result<impl IntoResponse> {
    require_roles(&auth, &[UserRole::Admin])?;
    let items = state.admin_service().list_sellers().await?;
    Ok(Json(ItemsResponse::new(items)))
}

pub async fn approve_seller<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(seller_id): Path<String>,
) -> Result<impl IntoResponse> {
    require_roles(&auth, &[UserRole::Admin])?;
    state.admin_service().approve_seller(&seller_id).await?;
    Ok(Json(MessageResponse::new("Seller approved")))
}

pub async fn reject_seller<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(seller_id): Path<String>,
    payload: JsonBody<RejectSellerInput>,
) -> Result<impl IntoResponse> {
    require_roles(&auth, &[UserRole::Admin])?;
    let reason = body(payload)?.reason();
    state
        .admin_service()
        .reject_seller(&seller_id, reason)
        .await?;
    Ok(Json(MessageResponse::new("Seller rejected")))
}

pub async fn set_seller_status<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(seller_id): Path<String>,
    payload: JsonBody<SellerStatusInput>,
) -> Result<impl IntoResponse> {
    require_roles(&auth, &[UserRole::Admin])?;
    let status = body(payload)?.status;
    state
        .admin_service()
        .set_seller_status(&seller_id, status)
        .await?;
    Ok(Json(
        MessageResponse::new("Seller user status updated").with("status", status),
    ))
}

pub async fn stats<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
) -> Result<impl IntoResponse> {
    require_roles(&auth, &[UserRole::Admin])?;
    Ok(Json(state.admin_service().stats().await?))
}
