//! Product catalog API handlers

use crate::api::{body, ItemsResponse, JsonBody, MessageResponse};
use crate::domain::{
    CreateProductInput, CreateVariantInput, ProductQuery, ProductStatusInput, UpdateProductInput,
    UpdateVariantInput, UserRole,
};
use crate::error::Result;
use crate::middleware::auth::AuthContext;
use crate::policy::{require_roles, require_seller_approved};
use crate::state::HasServices;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// List products with catalog filters
pub async fn list<S: HasServices>(
    State(state): State<S>,
    Query(query): Query<ProductQuery>,
) -> Result<impl IntoResponse> {
    let items = state.product_service().list(&query).await?;
    Ok(Json(ItemsResponse::new(items)))
}

pub async fn get<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.product_service().get(&id).await?))
}

pub async fn create<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    payload: JsonBody<CreateProductInput>,
) -> Result<impl IntoResponse> {
    require_seller_approved(state.store(), &auth).await?;
    let id = state
        .product_service()
        .create(&auth, body(payload)?)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Product created").with_id(id)),
    ))
}

pub async fn update<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(id): Path<String>,
    payload: JsonBody<UpdateProductInput>,
) -> Result<impl IntoResponse> {
    require_seller_approved(state.store(), &auth).await?;
    state
        .product_service()
        .update(&auth, &id, body(payload)?)
        .await?;
    Ok(Json(MessageResponse::new("Product updated")))
}

pub async fn delete<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    require_roles(&auth, &[UserRole::Admin])?;
    state.product_service().delete(&id).await?;
    Ok(Json(MessageResponse::new("Product deleted")))
}

pub async fn set_status<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(id): Path<String>,
    payload: JsonBody<ProductStatusInput>,
) -> Result<impl IntoResponse> {
    require_seller_approved(state.store(), &auth).await?;
    let input = body(payload)?;
    state
        .product_service()
        .set_active(&auth, &id, input.is_active)
        .await?;
    Ok(Json(
        MessageResponse::new("Product status updated").with("is_active", input.is_active),
    ))
}

pub async fn list_variants<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let items = state.product_service().list_variants(&id).await?;
    Ok(Json(ItemsResponse::new(items)))
}

pub async fn create_variant<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(id): Path<String>,
    payload: JsonBody<CreateVariantInput>,
) -> Result<impl IntoResponse> {
    require_seller_approved(state.store(), &auth).await?;
    let variant_id = state
        .product_service()
        .create_variant(&auth, &id, body(payload)?)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Variant created").with_id(variant_id)),
    ))
}

pub async fn update_variant<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path((id, variant_id)): Path<(String, String)>,
    payload: JsonBody<UpdateVariantInput>,
) -> Result<impl IntoResponse> {
    require_seller_approved(state.store(), &auth).await?;
    state
        .product_service()
        .update_variant(&auth, &id, &variant_id, body(payload)?)
        .await?;
    Ok(Json(MessageResponse::new("Variant updated")))
}

pub async fn delete_variant<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path((id, variant_id)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    require_seller_approved(state.store(), &auth).await?;
    state
        .product_service()
        .delete_variant(&auth, &id, &variant_id)
        .await?;
    Ok(Json(MessageResponse::new("Variant deleted")))
}
