//! Firebase Authentication REST client

use super::types::*;
use super::IdentityProvider;
use crate::config::FirebaseConfig;
use crate::credentials::TokenSource;
use crate::error::{AppError, Result};
use crate::jwt::{IdTokenClaims, IdTokenVerifier};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

/// Identity Toolkit client
#[derive(Clone)]
pub struct FirebaseIdentityClient {
    config: FirebaseConfig,
    http_client: Client,
    tokens: TokenSource,
    verifier: IdTokenVerifier,
}

impl FirebaseIdentityClient {
    /// Create a new identity client
    pub fn new(config: FirebaseConfig, tokens: TokenSource) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");
        let verifier = IdTokenVerifier::new(&config);

        Self {
            config,
            http_client,
            tokens,
            verifier,
        }
    }

    fn project_url(&self, suffix: &str) -> String {
        format!(
            "{}/v1/projects/{}/{}",
            self.config.identity_toolkit_url, self.config.project_id, suffix
        )
    }

    async fn error_code(response: reqwest::Response) -> (reqwest::StatusCode, String) {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let code = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|e| e.error.code().to_string())
            .unwrap_or(body);
        (status, code)
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityClient {
    async fn verify_token(&self, token: &str) -> Result<IdTokenClaims> {
        self.verifier.verify(token).await
    }

    async fn create_account(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<String> {
        let token = self.tokens.access_token().await?;
        let response = self
            .http_client
            .post(self.project_url("accounts"))
            .bearer_auth(token)
            .json(&CreateAccountRequest {
                email,
                password,
                display_name,
            })
            .send()
            .await
            .map_err(|e| AppError::IdentityProvider(format!("Failed to create account: {}", e)))?;

        if !response.status().is_success() {
            let (status, code) = Self::error_code(response).await;
            return Err(match code.as_str() {
                "EMAIL_EXISTS" | "DUPLICATE_EMAIL" => {
                    AppError::Conflict("Email already registered".to_string())
                }
                c if c.starts_with("INVALID_") || c == "WEAK_PASSWORD" || c == "MISSING_PASSWORD" => {
                    AppError::BadRequest(c.to_string())
                }
                _ => AppError::IdentityProvider(format!(
                    "Failed to create account: {} - {}",
                    status, code
                )),
            });
        }

        let created: CreateAccountResponse = response.json().await.map_err(|e| {
            AppError::IdentityProvider(format!("Failed to parse account response: {}", e))
        })?;
        debug!(uid = %created.local_id, "Created identity account");
        Ok(created.local_id)
    }

    async fn password_login(&self, email: &str, password: &str) -> Result<SignInResponse> {
        let url = format!(
            "{}/v1/accounts:signInWithPassword",
            self.config.identity_toolkit_url
        );
        let response = self
            .http_client
            .post(url)
            .query(&[("key", self.config.web_api_key.as_str())])
            .json(&PasswordSignInRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|e| {
                warn!("Password sign-in request failed: {}", e);
                AppError::Unauthorized("Invalid credentials".to_string())
            })?;

        if !response.status().is_success() {
            let (status, code) = Self::error_code(response).await;
            debug!(%status, code = %code, "Password sign-in rejected");
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        response.json().await.map_err(|e| {
            warn!("Malformed sign-in response: {}", e);
            AppError::Unauthorized("Invalid credentials".to_string())
        })
    }

    async fn revoke_sessions(&self, uid: &str) -> Result<()> {
        let token = self.tokens.access_token().await?;
        let response = self
            .http_client
            .post(self.project_url("accounts:update"))
            .bearer_auth(token)
            .json(&RevokeRequest {
                local_id: uid,
                valid_since: chrono::Utc::now().timestamp().to_string(),
            })
            .send()
            .await
            .map_err(|e| AppError::IdentityProvider(format!("Failed to revoke sessions: {}", e)))?;

        if !response.status().is_success() {
            let (status, code) = Self::error_code(response).await;
            if code == "USER_NOT_FOUND" {
                return Err(AppError::NotFound(format!("Account {} not found", uid)));
            }
            return Err(AppError::IdentityProvider(format!(
                "Failed to revoke sessions: {} - {}",
                status, code
            )));
        }
        Ok(())
    }
}
