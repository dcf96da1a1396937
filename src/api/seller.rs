//! Seller storefront and dashboard API handlers

use crate::api::{body, ItemsResponse, JsonBody, MessageResponse};
use crate::domain::{SellerProfileUpdateInput, UserRole};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthContext;
use crate::policy::{require_roles, require_seller_approved};
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// Sellers act on their own id only; admins on any
fn ensure_self_or_admin(auth: &AuthContext, seller_id: &str) -> Result<()> {
    if auth.is_admin() || auth.uid == seller_id {
        Ok(())
    } else {
        Err(AppError::Forbidden("Forbidden".to_string()))
    }
}

pub async fn get_profile<S: HasServices>(
    State(state): State<S>,
    Path(seller_id): Path<String>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.seller_service().get_profile(&seller_id).await?))
}

pub async fn update_profile<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(seller_id): Path<String>,
    payload: JsonBody<SellerProfileUpdateInput>,
) -> Result<impl IntoResponse> {
    require_roles(&auth, &[UserRole::Seller, UserRole::Admin])?;
    ensure_self_or_admin(&auth, &seller_id)?;
    state
        .seller_service()
        .update_profile(&auth, &seller_id, body(payload)?)
        .await?;
    Ok(Json(MessageResponse::new("Seller profile updated")))
}

pub async fn stats<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(seller_id): Path<String>,
) -> Result<impl IntoResponse> {
    require_roles(&auth, &[UserRole::Seller, UserRole::Admin])?;
    ensure_self_or_admin(&auth, &seller_id)?;
    Ok(Json(state.seller_service().stats(&seller_id).await?))
}

pub async fn products<S: HasServices>(
    State(state): State<S>,
    Path(seller_id): Path<String>,
) -> Result<impl IntoResponse> {
    let items = state.seller_service().products(&seller_id).await?;
    Ok(Json(ItemsResponse::new(items)))
}

pub async fn reviews<S: HasServices>(
    State(state): State<S>,
    Path(seller_id): Path<String>,
) -> Result<impl IntoResponse> {
    let items = state.seller_service().reviews(&seller_id).await?;
    Ok(Json(ItemsResponse::new(items)))
}

pub async fn dashboard_stats<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(seller_id): Path<String>,
) -> Result<impl IntoResponse> {
    require_seller_approved(state.store(), &auth).await?;
    ensure_self_or_admin(&auth, &seller_id)?;
    Ok(Json(
        state.seller_service().dashboard_stats(&seller_id).await?,
    ))
}
