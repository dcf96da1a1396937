//! Order API handlers

use crate::api::{body, ItemsResponse, JsonBody, MessageResponse};
use crate::domain::{CreateOrderInput, OrderStatusInput, PaymentUpdateInput, TrackQuery, UserRole};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthContext;
use crate::policy::{require_owner_or_admin, require_roles, require_seller_approved};
use crate::state::HasServices;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn create<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    payload: JsonBody<CreateOrderInput>,
) -> Result<impl IntoResponse> {
    let placed = state.order_service().create(&auth, body(payload)?).await?;
    Ok((
        StatusCode::CREATED,
        Json(
            MessageResponse::new("Order created")
                .with_id(placed.id)
                .with("order_number", placed.order_number),
        ),
    ))
}

pub async fn list_for_user<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse> {
    require_owner_or_admin(&auth, &user_id)?;
    let items = state.order_service().list_for_user(&user_id).await?;
    Ok(Json(ItemsResponse::new(items)))
}

pub async fn list_for_seller<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(seller_id): Path<String>,
) -> Result<impl IntoResponse> {
    require_seller_approved(state.store(), &auth).await?;
    if !auth.is_admin() && auth.uid != seller_id {
        return Err(AppError::Forbidden("Forbidden".to_string()));
    }
    let items = state.order_service().list_for_seller(&seller_id).await?;
    Ok(Json(ItemsResponse::new(items)))
}

pub async fn list_all<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
) -> Result<impl IntoResponse> {
    require_roles(&auth, &[UserRole::Admin])?;
    let items = state.order_service().list_all().await?;
    Ok(Json(ItemsResponse::new(items)))
}

/// Public tracking by order id and phone number
pub async fn track<S: HasServices>(
    State(state): State<S>,
    Query(query): Query<TrackQuery>,
) -> Result<impl IntoResponse> {
    let tracked = state
        .order_service()
        .track(&query.order_id, &query.phone)
        .await?;
    Ok(Json(tracked))
}

pub async fn details<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.order_service().details(&auth, &id).await?))
}

pub async fn update_status<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(id): Path<String>,
    payload: JsonBody<OrderStatusInput>,
) -> Result<impl IntoResponse> {
    require_seller_approved(state.store(), &auth).await?;
    let input = body(payload)?;
    let status = input.status;
    state
        .order_service()
        .update_status(&auth, &id, input)
        .await?;
    Ok(Json(
        MessageResponse::new("Order status updated").with("status", status),
    ))
}

pub async fn update_payment<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(id): Path<String>,
    payload: JsonBody<PaymentUpdateInput>,
) -> Result<impl IntoResponse> {
    require_seller_approved(state.store(), &auth).await?;
    let input = body(payload)?;
    let payment_status = input.payment_status;
    state
        .order_service()
        .update_payment(&auth, &id, input)
        .await?;
    Ok(Json(
        MessageResponse::new("Payment status updated").with("payment_status", payment_status),
    ))
}
