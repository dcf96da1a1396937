//! Profile and delivery address API handlers

use crate::api::{body, ItemsResponse, JsonBody, MessageResponse};
use crate::domain::{AddressUpsertInput, ProfileUpdateInput};
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

pub async fn get<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse> {
    require_owner_or_admin(&auth, &user_id)?;
    Ok(Json(state.profile_service().get(&user_id).await?))
}

pub async fn update<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(user_id): Path<String>,
    payload: JsonBody<ProfileUpdateInput>,
) -> Result<impl IntoResponse> {
    require_owner_or_admin(&auth, &user_id)?;
    state
        .profile_service()
        .update(&auth, &user_id, body(payload)?)
        .await?;
    Ok(Json(MessageResponse::new("Profile updated")))
}

pub async fn list_addresses<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse> {
    require_owner_or_admin(&auth, &user_id)?;
    let items = state.profile_service().list_addresses(&user_id).await?;
    Ok(Json(ItemsResponse::new(items)))
}

pub async fn upsert_address<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path(user_id): Path<String>,
    payload: JsonBody<AddressUpsertInput>,
) -> Result<impl IntoResponse> {
    require_owner_or_admin(&auth, &user_id)?;
    let id = state
        .profile_service()
        .upsert_address(&user_id, body(payload)?)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Address saved").with_id(id)),
    ))
}

pub async fn delete_address<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
    Path((user_id, address_id)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    require_owner_or_admin(&auth, &user_id)?;
    state
        .profile_service()
        .delete_address(&user_id, &address_id)
        .await?;
    Ok(Json(MessageResponse::new("Address deleted")))
}
