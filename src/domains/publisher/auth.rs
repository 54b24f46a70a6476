//! Service-account authentication for the Android Publisher API.
//!
//! A service-account key file is exchanged for a short-lived OAuth2 access
//! token using the JWT-bearer grant:
//!
//! ```text
//! key file --(RS256 assertion)--> token_uri --> access token (1h)
//! ```
//!
//! Tokens are cached and reused until shortly before they expire.

use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// OAuth2 scope granting access to the Android Publisher API.
pub const ANDROID_PUBLISHER_SCOPE: &str = "https://www.googleapis.com/auth/androidpublisher";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Cached tokens are refreshed this long before their stated expiry.
const REFRESH_MARGIN_SECS: i64 = 60;

/// Errors raised while loading keys or obtaining access tokens.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The key file could not be read.
    #[error("Cannot read service account key {path}: {source}")]
    ReadKey {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The key file is not a usable service-account key.
    #[error("Invalid service account key: {0}")]
    InvalidKey(String),

    /// Signing the assertion failed.
    #[error("Failed to sign token assertion: {0}")]
    Jwt(String),

    /// The token endpoint rejected the exchange or was unreachable.
    #[error("Token exchange failed{}: {message}", status_suffix(.status))]
    Exchange { status: Option<u16>, message: String },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default()
}

/// A parsed service-account key.
pub struct ServiceAccountKey {
    client_email: String,
    token_uri: String,
    encoding_key: EncodingKey,
}

#[derive(Deserialize)]
struct RawServiceAccountKey {
    #[serde(rename = "type")]
    key_type: Option<String>,
    client_email: String,
    private_key: String,
    token_uri: Option<String>,
}

impl ServiceAccountKey {
    /// Load and parse a key file.
    pub fn from_file(path: &Path) -> Result<Self, AuthError> {
        let json = std::fs::read_to_string(path).map_err(|source| AuthError::ReadKey {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse a key from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, AuthError> {
        let raw: RawServiceAccountKey =
            serde_json::from_str(json).map_err(|e| AuthError::InvalidKey(e.to_string()))?;

        match raw.key_type.as_deref() {
            None | Some("service_account") => {}
            Some(other) => {
                return Err(AuthError::InvalidKey(format!(
                    "expected a service_account key, found '{}'",
                    other
                )));
            }
        }

        let private_key = SecretString::from(raw.private_key);
        let encoding_key = EncodingKey::from_rsa_pem(private_key.expose_secret().as_bytes())
            .map_err(|e| AuthError::InvalidKey(format!("private_key: {}", e)))?;

        Ok(Self {
            client_email: raw.client_email,
            token_uri: raw
                .token_uri
                .unwrap_or_else(|| DEFAULT_TOKEN_URI.to_string()),
            encoding_key,
        })
    }

    /// Service account identity.
    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    /// Endpoint the assertion is exchanged at.
    pub fn token_uri(&self) -> &str {
        &self.token_uri
    }

    fn assertion(&self, now: DateTime<Utc>) -> Result<String, AuthError> {
        #[derive(Serialize)]
        struct Claims<'a> {
            iss: &'a str,
            scope: &'a str,
            aud: &'a str,
            iat: i64,
            exp: i64,
        }

        let iat = now.timestamp();
        let claims = Claims {
            iss: &self.client_email,
            scope: ANDROID_PUBLISHER_SCOPE,
            aud: &self.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Jwt(e.to_string()))
    }
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// A bearer access token and its expiry.
#[derive(Clone)]
pub struct Credential {
    token: SecretString,
    expires_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: SecretString::from(token.into()),
            expires_at,
        }
    }

    /// The raw token, for the `Authorization` header only.
    pub fn bearer_token(&self) -> &str {
        self.token.expose_secret()
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the token is still usable at `now`, keeping a refresh margin.
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) < self.expires_at
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Source of bearer credentials for API calls.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Return a credential valid for at least the next API call.
    async fn credential(&self) -> Result<Credential, AuthError>;
}

/// Credential provider backed by a service-account key.
pub struct ServiceAccountAuth {
    key: ServiceAccountKey,
    http: reqwest::Client,
    cached: Mutex<Option<Credential>>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

impl ServiceAccountAuth {
    pub fn new(key: ServiceAccountKey, http: reqwest::Client) -> Self {
        Self {
            key,
            http,
            cached: Mutex::new(None),
        }
    }

    async fn exchange(&self) -> Result<Credential, AuthError> {
        let now = Utc::now();
        let assertion = self.key.assertion(now)?;

        debug!("Exchanging assertion for {} at {}", self.key.client_email, self.key.token_uri);

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| AuthError::Exchange {
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read token response body".to_string());
            return Err(AuthError::Exchange {
                status: Some(status.as_u16()),
                message,
            });
        }

        let payload: TokenResponse = response.json().await.map_err(|e| AuthError::Exchange {
            status: None,
            message: e.to_string(),
        })?;

        info!("Obtained access token for {}", self.key.client_email);
        Ok(Credential::new(
            payload.access_token,
            now + Duration::seconds(payload.expires_in),
        ))
    }
}

#[async_trait]
impl CredentialProvider for ServiceAccountAuth {
    async fn credential(&self) -> Result<Credential, AuthError> {
        let mut cached = self.cached.lock().await;

        if let Some(credential) = cached.as_ref().filter(|c| c.is_fresh_at(Utc::now())) {
            return Ok(credential.clone());
        }

        let credential = self.exchange().await?;
        *cached = Some(credential.clone());
        Ok(credential)
    }
}
