//! Configuration management for FarmCart Core

use anyhow::{anyhow, Context, Result};
use std::env;
use std::str::FromStr;

const DEFAULT_IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com";
const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com";
const DEFAULT_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Firebase (identity provider + Firestore) configuration
    pub firebase: FirebaseConfig,
    /// Document store backend selection
    pub store: StoreConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Logging and metrics configuration
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    pub project_id: String,
    /// Web API key used for password sign-in
    pub web_api_key: String,
    /// Path to the service-account JSON credential
    pub service_account_path: Option<String>,
    /// Base URL of the Identity Toolkit REST API (emulator-aware)
    pub identity_toolkit_url: String,
    /// Base URL of the Firestore REST API (emulator-aware)
    pub firestore_url: String,
    /// Public signing keys for ID tokens
    pub jwks_url: String,
    pub jwks_ttl_secs: u64,
    /// Auth emulator in use: static owner credential, unsigned ID tokens
    pub auth_emulator: bool,
    /// Firestore emulator in use: static owner credential
    pub firestore_emulator: bool,
}

impl FirebaseConfig {
    /// Expected `iss` claim of ID tokens issued for this project
    pub fn token_issuer(&self) -> String {
        format!("https://securetoken.google.com/{}", self.project_id)
    }
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

/// Which `DocumentStore` implementation backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Firestore,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(StoreBackend::Firestore),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow!("Unknown STORE_BACKEND: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub metrics_enabled: bool,
    /// "text" or "json"
    pub log_format: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let store_backend: StoreBackend = env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "firestore".to_string())
            .parse()?;

        Ok(Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("Invalid HTTP_PORT")?,
            firebase: firebase_from_env()?,
            store: StoreConfig {
                backend: store_backend,
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(
                    &env::var("ALLOWED_ORIGINS")
                        .unwrap_or_else(|_| "http://localhost:5173".to_string()),
                ),
            },
            telemetry: TelemetryConfig {
                metrics_enabled: env::var("METRICS_ENABLED")
                    .map(|v| v.to_lowercase() != "false")
                    .unwrap_or(true),
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
            },
        })
    }

    /// Get HTTP server address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

fn firebase_from_env() -> Result<FirebaseConfig> {
    let service_account_path = env::var("FIREBASE_SERVICE_ACCOUNT")
        .ok()
        .filter(|p| !p.is_empty());

    let project_id = match env::var("FIREBASE_PROJECT_ID") {
        Ok(id) if !id.is_empty() => id,
        _ => {
            let path = service_account_path.as_deref().context(
                "FIREBASE_PROJECT_ID or FIREBASE_SERVICE_ACCOUNT is required",
            )?;
            project_id_from_service_account(path)?
        }
    };

    let auth_emulator_host = env::var("FIREBASE_AUTH_EMULATOR_HOST").ok();
    let firestore_emulator_host = env::var("FIRESTORE_EMULATOR_HOST").ok();

    Ok(FirebaseConfig {
        project_id,
        web_api_key: env::var("FIREBASE_WEB_API_KEY")
            .context("FIREBASE_WEB_API_KEY is required")?,
        service_account_path,
        identity_toolkit_url: match &auth_emulator_host {
            Some(host) => format!("http://{}/identitytoolkit.googleapis.com", host),
            None => DEFAULT_IDENTITY_TOOLKIT_URL.to_string(),
        },
        firestore_url: match &firestore_emulator_host {
            Some(host) => format!("http://{}", host),
            None => DEFAULT_FIRESTORE_URL.to_string(),
        },
        jwks_url: env::var("FIREBASE_JWKS_URL").unwrap_or_else(|_| DEFAULT_JWKS_URL.to_string()),
        jwks_ttl_secs: env::var("FIREBASE_JWKS_TTL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .unwrap_or(3600),
        auth_emulator: auth_emulator_host.is_some(),
        firestore_emulator: firestore_emulator_host.is_some(),
    })
}

fn project_id_from_service_account(path: &str) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read service account file {}", path))?;
    let json: serde_json::Value =
        serde_json::from_str(&raw).context("Service account file is not valid JSON")?;
    json.get("project_id")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .context("Service account file has no project_id")
}

/// Split a comma-separated origin list, dropping blanks
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .map(|o| o.to_string())
        .collect()
}
