//! Review API handlers

use crate::api::{body, ItemsResponse, JsonBody, MessageResponse};
use crate::domain::CreateReviewInput;
use crate::error::Result;
use crate::middleware::auth::AuthContext;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn for_product<S: HasServices>(
    State(state): State<S>,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse> {
    let items = state.review_service().for_product(&product_id).await?;
    Ok(Json(ItemsResponse::new(items)))
}

pub async fn for_seller<S: HasServices>(
    State(state): State<S>,
    Path(seller_id): Path<String>,
) -> Result<impl IntoResponse> {
    let items = state.review_service().for_seller(&seller_id).await?;
    Ok(Json(ItemsResponse::new(items)))
}

pub async fn create<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    payload: JsonBody<CreateReviewInput>,
) -> Result<impl IntoResponse> {
    let id = state
        .review_service()
        .create(&auth.uid, body(payload)?)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Review created").with_id(id)),
    ))
}
