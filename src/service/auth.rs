//! Registration, sign-in and session business logic

use crate::domain::{
    now_iso, ApprovalStatus, GoogleAuthInput, LoginInput, RegisterInput, SellerProfile,
    SellerRegisterInput, User, UserProfile, UserRole,
};
use crate::error::{AppError, Result};
use crate::identity::{IdentityProvider, SignInResponse};
use crate::store::{collections, fields, to_fields, DocumentStore};
use crate::telemetry::metrics::record_login;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub struct AuthService<D: DocumentStore, I: IdentityProvider> {
    store: Arc<D>,
    identity: Arc<I>,
}

impl<D: DocumentStore, I: IdentityProvider> AuthService<D, I> {
    pub fn new(store: Arc<D>, identity: Arc<I>) -> Self {
        Self { store, identity }
    }

    /// Create a buyer account; returns the new uid
    pub async fn register(&self, input: RegisterInput) -> Result<String> {
        input.validate()?;

        let uid = self
            .identity
            .create_account(&input.email, &input.password, &input.full_name)
            .await?;

        let mut user = User::new(&uid, Some(input.email), input.full_name, UserRole::User);
        user.phone = input.phone;
        self.store
            .put(collections::USERS, &uid, to_fields(&user)?, false)
            .await?;
        self.store
            .put(
                collections::USER_PROFILES,
                &uid,
                to_fields(&UserProfile::new(&uid, None))?,
                false,
            )
            .await?;

        info!(uid = %uid, "User registered");
        Ok(uid)
    }

    /// Password sign-in; the provider's session payload is passed through
    pub async fn login(&self, input: LoginInput) -> Result<SignInResponse> {
        self.password_login("password", input).await
    }

    /// Password sign-in restricted to admin accounts
    pub async fn admin_login(&self, input: LoginInput) -> Result<SignInResponse> {
        let session = self.password_login("admin", input).await?;
        let uid = session.local_id.as_str();

        let role = self.stored_role(uid).await?;
        if role.as_deref() != Some(UserRole::Admin.as_str()) {
            return Err(AppError::Forbidden("Not an admin".to_string()));
        }

        let t = now_iso();
        let admin_fields = match self.store.get(collections::ADMIN_USERS, uid).await? {
            None => fields([
                ("id", json!(uid)),
                ("user_id", json!(uid)),
                ("permissions", json!([])),
                ("last_login", json!(t)),
                ("created_at", json!(t)),
                ("updated_at", json!(t)),
            ]),
            Some(_) => fields([("last_login", json!(t)), ("updated_at", json!(t))]),
        };
        self.store
            .put(collections::ADMIN_USERS, uid, admin_fields, true)
            .await?;

        Ok(session)
    }

    /// Create a seller account awaiting approval; returns the new uid
    pub async fn seller_register(&self, input: SellerRegisterInput) -> Result<String> {
        input.validate()?;

        let uid = self
            .identity
            .create_account(&input.email, &input.password, &input.full_name)
            .await?;

        let mut user = User::new(
            &uid,
            Some(input.email.clone()),
            input.full_name.clone(),
            UserRole::Seller,
        );
        user.phone = input.phone.clone();
        self.store
            .put(collections::USERS, &uid, to_fields(&user)?, false)
            .await?;
        self.store
            .put(
                collections::SELLER_PROFILES,
                &uid,
                to_fields(&SellerProfile::pending(&uid, &input))?,
                false,
            )
            .await?;

        info!(uid = %uid, farm = %input.farm_name, "Seller registered, pending approval");
        Ok(uid)
    }

    /// Password sign-in restricted to approved sellers
    pub async fn seller_login(&self, input: LoginInput) -> Result<SignInResponse> {
        let session = self.password_login("seller", input).await?;
        let uid = session.local_id.as_str();

        let role = self.stored_role(uid).await?;
        if role.as_deref() != Some(UserRole::Seller.as_str()) {
            return Err(AppError::Forbidden("Not a seller".to_string()));
        }

        let profile = self
            .store
            .get(collections::SELLER_PROFILES, uid)
            .await?
            .ok_or_else(|| AppError::Forbidden("Seller profile missing".to_string()))?;
        match profile.str_field("approval_status") {
            Some(s) if s == ApprovalStatus::Approved.as_str() => Ok(session),
            other => Err(AppError::Forbidden(format!(
                "Seller not approved: {}",
                other.unwrap_or("none")
            ))),
        }
    }

    /// Sign in with a client-obtained Google ID token, creating the account on first use
    pub async fn google(&self, input: GoogleAuthInput) -> Result<String> {
        if input.id_token.trim().is_empty() {
            return Err(AppError::BadRequest("idToken required".to_string()));
        }

        let claims = match self.identity.verify_token(&input.id_token).await {
            Ok(claims) => {
                record_login("google", true);
                claims
            }
            Err(_) => {
                record_login("google", false);
                return Err(AppError::Unauthorized("Invalid/expired token".to_string()));
            }
        };
        let uid = claims.uid().to_string();

        if self.store.get(collections::USERS, &uid).await?.is_some() {
            self.store
                .put(
                    collections::USERS,
                    &uid,
                    fields([("updated_at", json!(now_iso()))]),
                    true,
                )
                .await?;
            return Ok(uid);
        }

        let full_name = claims.name.clone().unwrap_or_else(|| {
            claims
                .email
                .as_deref()
                .unwrap_or_default()
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string()
        });
        let mut user = User::new(&uid, claims.email.clone(), full_name, UserRole::User);
        user.google_id = Some(claims.sub.clone());
        user.email_verified = claims.email_verified.unwrap_or(true);

        self.store
            .put(collections::USERS, &uid, to_fields(&user)?, false)
            .await?;
        self.store
            .put(
                collections::USER_PROFILES,
                &uid,
                to_fields(&UserProfile::new(&uid, claims.picture.clone()))?,
                false,
            )
            .await?;

        info!(uid = %uid, "User created from Google sign-in");
        Ok(uid)
    }

    /// Revoke every session of the caller
    pub async fn logout(&self, uid: &str) -> Result<()> {
        self.identity.revoke_sessions(uid).await
    }

    async fn password_login(&self, kind: &'static str, input: LoginInput) -> Result<SignInResponse> {
        if input.email.is_empty() || input.password.is_empty() {
            return Err(AppError::BadRequest(
                "email and password required".to_string(),
            ));
        }

        let result = self
            .identity
            .password_login(&input.email, &input.password)
            .await;
        record_login(kind, result.is_ok());
        result
    }

    async fn stored_role(&self, uid: &str) -> Result<Option<String>> {
        Ok(self
            .store
            .get(collections::USERS, uid)
            .await?
            .and_then(|d| d.get("role").and_then(Value::as_str).map(str::to_string)))
    }
}
