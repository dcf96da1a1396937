//! Saved payment method API handlers

use crate::api::{body, ItemsResponse, JsonBody, MessageResponse};
use crate::domain::AddPaymentMethodInput;
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
    let items = state.payment_method_service().list(&user_id).await?;
    Ok(Json(ItemsResponse::new(items)))
}

pub async fn add<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(user_id): Path<String>,
    payload: JsonBody<AddPaymentMethodInput>,
) -> Result<impl IntoResponse> {
    require_owner_or_admin(&auth, &user_id)?;
    let id = state
        .payment_method_service()
        .add(&user_id, body(payload)?)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Payment method added").with_id(id)),
    ))
}

pub async fn delete<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path((user_id, method_id)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    require_owner_or_admin(&auth, &user_id)?;
    state
        .payment_method_service()
        .delete(&user_id, &method_id)
        .await?;
    Ok(Json(MessageResponse::new("Payment method deleted")))
}
