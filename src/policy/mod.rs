//! Authorization predicates for HTTP handlers.
//!
//! Handlers name the predicate they need explicitly; predicates compose
//! (`require_seller_approved` runs `require_roles` first).

use crate::domain::{ApprovalStatus, UserRole};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::store::{collections, DocumentStore};

pub type PolicyResult<T> = std::result::Result<T, AppError>;

fn forbidden() -> AppError {
    AppError::Forbidden("Forbidden".to_string())
}

/// Active account holding one of `allowed`
pub fn require_roles(auth: &AuthContext, allowed: &[UserRole]) -> PolicyResult<()> {
    if !auth.is_active() {
        return Err(AppError::Forbidden(format!(
            "Account status: {}",
            auth.status
        )));
    }
    if !allowed.iter().any(|r| auth.has_role(*r)) {
        return Err(forbidden());
    }
    Ok(())
}

/// Active admin, or active seller whose profile has been approved
pub async fn require_seller_approved<D>(store: &D, auth: &AuthContext) -> PolicyResult<()>
where
    D: DocumentStore + ?Sized,
{
    require_roles(auth, &[UserRole::Seller, UserRole::Admin])?;
    if auth.is_admin() {
        return Ok(());
    }

    let profile = store
        .get(collections::SELLER_PROFILES, &auth.uid)
        .await?
        .ok_or_else(|| AppError::Forbidden("Seller profile missing".to_string()))?;

    match profile.str_field("approval_status") {
        Some(s) if s == ApprovalStatus::Approved.as_str() => Ok(()),
        other => Err(AppError::Forbidden(format!(
            "Seller not approved: {}",
            other.unwrap_or("none")
        ))),
    }
}

/// Caller is `owner_uid` or an admin. Account status is not consulted.
pub fn require_owner_or_admin(auth: &AuthContext, owner_uid: &str) -> PolicyResult<()> {
    if auth.is_admin() || auth.uid == owner_uid {
        Ok(())
    } else {
        Err(forbidden())
    }
}

/// Sellers may only act on resources they own; admins on any
pub fn require_seller_owns(auth: &AuthContext, seller_id: Option<&str>) -> PolicyResult<()> {
    if auth.has_role(UserRole::Seller) && seller_id != Some(auth.uid.as_str()) {
        return Err(forbidden());
    }
    Ok(())
}
