//! Google service-account credentials
//!
//! Outbound calls to Identity Toolkit and Firestore carry an OAuth2 access
//! token obtained with the JWT-bearer grant. Against the local emulators the
//! static `owner` token is used instead.

use crate::error::{AppError, Result};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const EMULATOR_TOKEN: &str = "owner";

/// OAuth scopes needed for account administration and document access
pub const SCOPES: &str = "https://www.googleapis.com/auth/cloud-platform \
https://www.googleapis.com/auth/datastore \
https://www.googleapis.com/auth/identitytoolkit";

/// Contents of a service-account JSON key file
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(default)]
    pub project_id: Option<String>,
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

impl ServiceAccountKey {
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read service account {}: {}", path, e))?;
        Self::from_json(&raw)
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: chrono::DateTime<chrono::Utc>,
}

/// Source of bearer tokens for Google APIs (cheap to clone, shares its cache)
#[derive(Clone)]
pub struct TokenSource {
    inner: Arc<TokenSourceKind>,
}

enum TokenSourceKind {
    Fixed(String),
    ServiceAccount {
        key: ServiceAccountKey,
        encoding_key: EncodingKey,
        http_client: Client,
        token: RwLock<Option<CachedToken>>,
    },
}

impl TokenSource {
    /// Token source for the local emulators
    pub fn emulator() -> Self {
        Self::fixed(EMULATOR_TOKEN)
    }

    pub fn fixed(token: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(TokenSourceKind::Fixed(token.into())),
        }
    }

    pub fn service_account(key: ServiceAccountKey) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            inner: Arc::new(TokenSourceKind::ServiceAccount {
                key,
                encoding_key,
                http_client,
                token: RwLock::new(None),
            }),
        })
    }

    /// Get an access token (with caching)
    pub async fn access_token(&self) -> Result<String> {
        let (key, encoding_key, http_client, cache) = match self.inner.as_ref() {
            TokenSourceKind::Fixed(token) => return Ok(token.clone()),
            TokenSourceKind::ServiceAccount {
                key,
                encoding_key,
                http_client,
                token,
            } => (key, encoding_key, http_client, token),
        };

        {
            let token = cache.read().await;
            if let Some(ref t) = *token {
                if t.expires_at > chrono::Utc::now() + chrono::Duration::seconds(60) {
                    return Ok(t.access_token.clone());
                }
            }
        }

        let now = chrono::Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &key.client_email,
            scope: SCOPES,
            aud: &key.token_uri,
            iat: now,
            exp: now + 3600,
        };
        let mut header = Header::new(Algorithm::RS256);
        header.kid = key.private_key_id.clone();
        let assertion = encode(&header, &claims, encoding_key)?;

        let response = http_client
            .post(&key.token_uri)
            .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| {
                AppError::IdentityProvider(format!("Failed to get service account token: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::IdentityProvider(format!(
                "Failed to get service account token: {} - {}",
                status, body
            )));
        }

        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
            expires_in: i64,
        }

        let token_response: TokenResponse = response.json().await.map_err(|e| {
            AppError::IdentityProvider(format!("Failed to parse token response: {}", e))
        })?;

        let cached = CachedToken {
            access_token: token_response.access_token.clone(),
            expires_at: chrono::Utc::now() + chrono::Duration::seconds(token_response.expires_in),
        };
        *cache.write().await = Some(cached);

        Ok(token_response.access_token)
    }
}
