//! Bearer-token authentication extractor
//!
//! `AuthContext` verifies the ID token through the identity provider and
//! resolves role and status from the caller's `users` document.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use serde::{Deserialize, Serialize};

use crate::domain::{UserRole, UserStatus};
use crate::error::AppError;
use crate::identity::IdentityProvider;
use crate::jwt::IdTokenClaims;
use crate::state::HasServices;
use crate::store::{collections, Document, DocumentStore};

/// The resolved caller of a request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthContext {
    pub uid: String,
    pub email: Option<String>,
    /// Raw role string from the users document
    pub role: String,
    /// Raw status string from the users document
    pub status: String,
}

impl AuthContext {
    /// Combine verified claims with the stored account, if any.
    ///
    /// Role and status fall back to `user`/`active` when the account
    /// document has not been written yet.
    pub fn resolve(claims: &IdTokenClaims, user_doc: Option<&Document>) -> Self {
        let role = user_doc
            .and_then(|d| d.str_field("role"))
            .unwrap_or(UserRole::User.as_str())
            .to_string();
        let status = user_doc
            .and_then(|d| d.str_field("status"))
            .unwrap_or(UserStatus::Active.as_str())
            .to_string();

        Self {
            uid: claims.uid().to_string(),
            email: claims.email.clone(),
            role,
            status,
        }
    }

    pub fn has_role(&self, role: UserRole) -> bool {
        self.role == role.as_str()
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(UserRole::Admin)
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active.as_str()
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Missing Bearer token".to_string()))
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: HasServices + Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;

        let claims = state.identity().verify_token(token).await.map_err(|e| {
            tracing::debug!(error = %e, "ID token rejected");
            AppError::Unauthorized("Invalid/expired token".to_string())
        })?;

        let user_doc = state.store().get(collections::USERS, claims.uid()).await?;
        Ok(AuthContext::resolve(&claims, user_doc.as_ref()))
    }
}
