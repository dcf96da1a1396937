//! Authentication API handlers

use crate::api::{body, JsonBody, MessageResponse};
use crate::domain::{GoogleAuthInput, LoginInput, RegisterInput, SellerRegisterInput};
use crate::error::Result;
use crate::middleware::auth::AuthContext;
use crate::state::HasServices;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

pub async fn register<S: HasServices>(
    State(state): State<S>,
    payload: JsonBody<RegisterInput>,
) -> Result<impl IntoResponse> {
    let id = state.auth_service().register(body(payload)?).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered").with_id(id)),
    ))
}

pub async fn login<S: HasServices>(
    State(state): State<S>,
    payload: JsonBody<LoginInput>,
) -> Result<impl IntoResponse> {
    let session = state.auth_service().login(body(payload)?).await?;
    Ok(Json(session))
}

pub async fn admin_login<S: HasServices>(
    State(state): State<S>,
    payload: JsonBody<LoginInput>,
) -> Result<impl IntoResponse> {
    let session = state.auth_service().admin_login(body(payload)?).await?;
    Ok(Json(session))
}

pub async fn seller_register<S: HasServices>(
    State(state): State<S>,
    payload: JsonBody<SellerRegisterInput>,
) -> Result<impl IntoResponse> {
    let id = state.auth_service().seller_register(body(payload)?).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Seller registered (pending approval)").with_id(id)),
    ))
}

pub async fn seller_login<S: HasServices>(
    State(state): State<S>,
    payload: JsonBody<LoginInput>,
) -> Result<impl IntoResponse> {
    let session = state.auth_service().seller_login(body(payload)?).await?;
    Ok(Json(session))
}

/// Google sign-in with a client-obtained ID token
pub async fn google<S: HasServices>(
    State(state): State<S>,
    payload: JsonBody<GoogleAuthInput>,
) -> Result<impl IntoResponse> {
    let id = state.auth_service().google(body(payload)?).await?;
    Ok(Json(MessageResponse::new("Google OAuth success").with_id(id)))
}

/// Revoke every session of the caller
pub async fn logout<S: HasServices>(
    State(state): State<S>,
    auth: AuthContext,
) -> Result<impl IntoResponse> {
    state.auth_service().logout(&auth.uid).await?;
    Ok(Json(MessageResponse::new("Logged out (tokens revoked)")))
}

/// The resolved caller
pub async fn me(auth: AuthContext) -> Json<AuthContext> {
    Json(auth)
}
