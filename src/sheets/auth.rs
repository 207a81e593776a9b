//! # Service-Account Authentication
//!
//! Exchanges a signed JWT assertion for a short-lived OAuth bearer token
//! (the two-legged service-account flow) and caches it until shortly before
//! it expires.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::observability::Logger;

use super::errors::{SheetError, SheetResult};

/// OAuth scope granting read/write access to spreadsheets
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for each assertion (the service caps it at one hour)
const ASSERTION_TTL_SECS: i64 = 3600;

/// Tokens are refreshed this long before their stated expiry
const REFRESH_MARGIN_SECS: i64 = 60;

/// The fields of a service-account key file this crate uses
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Load a key file downloaded from the cloud console
    pub fn load(path: &Path) -> SheetResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| SheetError::Credentials {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&path.display().to_string(), &content)
    }

    /// Parse key file contents; `origin` only labels errors
    pub fn from_json(origin: &str, content: &str) -> SheetResult<Self> {
        let key: ServiceAccountKey =
            serde_json::from_str(content).map_err(|e| SheetError::Credentials {
                path: origin.to_string(),
                reason: format!("invalid key JSON: {}", e),
            })?;
        if key.client_email.is_empty() || key.private_key.is_empty() {
            return Err(SheetError::Credentials {
                path: origin.to_string(),
                reason: "client_email and private_key are required".to_string(),
            });
        }
        Ok(key)
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

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_TTL_SECS
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    refresh_at: DateTime<Utc>,
}

impl CachedToken {
    fn new(value: String, issued_at: DateTime<Utc>, expires_in: i64) -> Self {
        let lifetime = (expires_in - REFRESH_MARGIN_SECS).max(0);
        Self {
            value,
            refresh_at: issued_at + Duration::seconds(lifetime),
        }
    }

    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.refresh_at
    }
}

/// Hands out bearer tokens for the Sheets API
pub struct TokenProvider {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    agent: ureq::Agent,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    /// Fails if the key's private key is not a valid RSA PEM
    pub fn new(key: ServiceAccountKey, agent: ureq::Agent) -> SheetResult<Self> {
        let encoding_key =
            EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
                SheetError::Credentials {
                    path: key.client_email.clone(),
                    reason: format!("invalid private key: {}", e),
                }
            })?;
        Ok(Self {
            key,
            encoding_key,
            agent,
            cached: Mutex::new(None),
        })
    }

    /// A valid bearer token, exchanging a new assertion when the cached one is stale
    ///
    /// The cache lock is held across the exchange so concurrent callers wait
    /// for one refresh instead of each starting their own.
    pub fn access_token(&self) -> SheetResult<String> {
        let mut cached = self
            .cached
            .lock()
            .map_err(|_| SheetError::TokenExchange("token cache lock poisoned".to_string()))?;

        let now = Utc::now();
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(token.value.clone());
        }

        let assertion = self.sign_assertion(now)?;
        let response = self.exchange(&assertion)?;
        let token = CachedToken::new(response.access_token, now, response.expires_in);
        let value = token.value.clone();
        *cached = Some(token);

        Logger::info(
            "TOKEN_REFRESHED",
            &[
                ("client_email", self.key.client_email.as_str()),
                ("expires_in", response.expires_in.to_string().as_str()),
            ],
        );
        Ok(value)
    }

    fn sign_assertion(&self, now: DateTime<Utc>) -> SheetResult<String> {
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.key.token_uri,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_TTL_SECS,
        };
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| SheetError::TokenExchange(format!("signing assertion: {}", e)))
    }

    fn exchange(&self, assertion: &str) -> SheetResult<TokenResponse> {
        let response = self
            .agent
            .post(&self.key.token_uri)
            .send_form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion)])
            .map_err(|e| match e {
                ureq::Error::Status(status, _) => {
                    SheetError::TokenExchange(format!("token endpoint returned HTTP {}", status))
                }
                ureq::Error::Transport(t) => SheetError::TokenExchange(t.to_string()),
            })?;

        response
            .into_json::<TokenResponse>()
            .map_err(|e| SheetError::TokenExchange(format!("unreadable token response: {}", e)))
    }
}
