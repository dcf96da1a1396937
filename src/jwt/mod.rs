//! Firebase ID token verification

use crate::config::FirebaseConfig;
use crate::error::{AppError, Result};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// ID token claims
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IdTokenClaims {
    /// Subject (the account uid)
    pub sub: String,
    /// Issuer (`https://securetoken.google.com/<project>`)
    pub iss: String,
    /// Audience (the project id)
    pub aud: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl IdTokenClaims {
    pub fn uid(&self) -> &str {
        &self.sub
    }
}

#[derive(Clone)]
struct CachedKeys {
    keys: JwkSet,
    fetched_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Clone)]
enum KeySource {
    Jwks {
        url: String,
        ttl_secs: i64,
        http_client: Client,
        cache: Arc<RwLock<Option<CachedKeys>>>,
    },
    /// Auth emulator tokens are unsigned
    Unsigned,
}

/// Verifies ID tokens against the provider's published signing keys
#[derive(Clone)]
pub struct IdTokenVerifier {
    project_id: String,
    issuer: String,
    keys: KeySource,
}

impl IdTokenVerifier {
    pub fn new(config: &FirebaseConfig) -> Self {
        let keys = if config.auth_emulator {
            KeySource::Unsigned
        } else {
            KeySource::Jwks {
                url: config.jwks_url.clone(),
                ttl_secs: config.jwks_ttl_secs as i64,
                http_client: Client::builder()
                    .timeout(std::time::Duration::from_secs(30))
                    .build()
                    .expect("Failed to create HTTP client"),
                cache: Arc::new(RwLock::new(None)),
            }
        };

        Self {
            project_id: config.project_id.clone(),
            issuer: config.token_issuer(),
            keys,
        }
    }

    /// Verify signature, expiry, issuer and audience of an ID token
    pub async fn verify(&self, token: &str) -> Result<IdTokenClaims> {
        let claims = match &self.keys {
            KeySource::Unsigned => self.decode_unsigned(token)?,
            KeySource::Jwks { .. } => {
                let header = decode_header(token)?;
                if header.alg != Algorithm::RS256 {
                    return Err(AppError::Unauthorized(format!(
                        "Unexpected token algorithm {:?}",
                        header.alg
                    )));
                }
                let kid = header
                    .kid
                    .ok_or_else(|| AppError::Unauthorized("Token has no key id".to_string()))?;
                let key = self.key_for(&kid).await?;
                decode::<IdTokenClaims>(token, &key, &self.validation())?.claims
            }
        };

        if claims.sub.is_empty() {
            return Err(AppError::Unauthorized("Token has no subject".to_string()));
        }
        Ok(claims)
    }

    fn validation(&self) -> Validation {
        let mut v = Validation::new(Algorithm::RS256);
        v.leeway = 5;
        v.set_issuer(&[&self.issuer]);
        v.set_audience(&[&self.project_id]);
        v
    }

    fn decode_unsigned(&self, token: &str) -> Result<IdTokenClaims> {
        let payload = token
            .split('.')
            .nth(1)
            .ok_or_else(|| AppError::Unauthorized("Malformed token".to_string()))?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|_| AppError::Unauthorized("Malformed token".to_string()))?;
        let claims: IdTokenClaims = serde_json::from_slice(&bytes)
            .map_err(|_| AppError::Unauthorized("Malformed token claims".to_string()))?;

        if claims.iss != self.issuer || claims.aud != self.project_id {
            return Err(AppError::Unauthorized(
                "Token issued for another project".to_string(),
            ));
        }
        if claims.exp < chrono::Utc::now().timestamp() {
            return Err(AppError::Unauthorized("Token has expired".to_string()));
        }
        Ok(claims)
    }

    async fn key_for(&self, kid: &str) -> Result<DecodingKey> {
        let KeySource::Jwks {
            url,
            ttl_secs,
            http_client,
            cache,
        } = &self.keys
        else {
            return Err(AppError::Unauthorized("Signed tokens are not accepted".to_string()));
        };

        {
            let cached = cache.read().await;
            if let Some(ref c) = *cached {
                let fresh =
                    c.fetched_at + chrono::Duration::seconds(*ttl_secs) > chrono::Utc::now();
                if let (true, Some(jwk)) = (fresh, c.keys.find(kid)) {
                    return Ok(DecodingKey::from_jwk(jwk)?);
                }
            }
        }

        // Unknown kid or stale set: the provider rotates keys regularly
        let response = http_client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::IdentityProvider(format!("Failed to fetch signing keys: {}", e)))?;
        if !response.status().is_success() {
            return Err(AppError::IdentityProvider(format!(
                "Failed to fetch signing keys: {}",
                response.status()
            )));
        }
        let keys: JwkSet = response.json().await.map_err(|e| {
            AppError::IdentityProvider(format!("Failed to parse signing keys: {}", e))
        })?;

        let key = keys
            .find(kid)
            .map(DecodingKey::from_jwk)
            .transpose()?
            .ok_or_else(|| AppError::Unauthorized("Unknown signing key".to_string()));

        *cache.write().await = Some(CachedKeys {
            keys,
            fetched_at: chrono::Utc::now(),
        });

        key
    }
}
