//! Cart API handlers

use crate::api::{body, ItemsResponse, JsonBody, MessageResponse};
use crate::domain::{AddCartItemInput, UpdateCartItemInput};
use crate::error::Result;
use crate::middleware::auth::AuthContext;
use crate::policy::require_owner_or_admin;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn list<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse> {
    require_owner_or_admin(&auth, &user_id)?;
    let items = state.cart_service().list(&user_id).await?;
    Ok(Json(ItemsResponse::new(items)))
}

pub async fn add_item<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(user_id): Path<String>,
    payload: JsonBody<AddCartItemInput>,
) -> Result<impl IntoResponse> {
    require_owner_or_admin(&auth, &user_id)?;
    let id = state.cart_service().add(&user_id, body(payload)?).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Added to cart").with_id(id)),
    ))
}

pub async fn update_item<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path((user_id, item_id)): Path<(String, String)>,
    payload: JsonBody<UpdateCartItemInput>,
) -> Result<impl IntoResponse> {
    require_owner_or_admin(&auth, &user_id)?;
    state
        .cart_service()
        .update(&user_id, &item_id, body(payload)?)
        .await?;
    Ok(Json(MessageResponse::new("Cart item updated")))
}

pub async fn remove_item<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path((user_id, item_id)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    require_owner_or_admin(&auth, &user_id)?;
    state.cart_service().remove(&user_id, &item_id).await?;
    Ok(Json(MessageResponse::new("Removed from cart")))
}

pub async fn clear<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse> {
    require_owner_or_admin(&auth, &user_id)?;
    state.cart_service().clear(&user_id).await?;
    Ok(Json(MessageResponse::new("Cart cleared")))
}
