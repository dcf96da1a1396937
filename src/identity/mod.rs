//! Identity provider gateway
//!
//! Token verification, password sign-in, account creation and session
//! revocation against Firebase Authentication.

pub mod client;
pub mod types;

use crate::error::Result;
use crate::jwt::IdTokenClaims;
use async_trait::async_trait;

pub use client::FirebaseIdentityClient;
pub use types::SignInResponse;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    /// Verify a bearer ID token; every call re-verifies
    async fn verify_token(&self, token: &str) -> Result<IdTokenClaims>;

    /// Create an email/password account and return its uid
    async fn create_account(&self, email: &str, password: &str, display_name: &str)
        -> Result<String>;

    /// Issue a session for email/password credentials
    async fn password_login(&self, email: &str, password: &str) -> Result<SignInResponse>;

    /// Invalidate every refresh token issued to the account
    async fn revoke_sessions(&self, uid: &str) -> Result<()>;
}
