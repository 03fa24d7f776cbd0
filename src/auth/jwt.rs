//! Signed bearer tokens for admin sessions.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{WardenError, WardenResult};

/// Claims embedded in an issued token.
///
/// Verification returns these exactly as they were embedded at issuance;
/// nothing is recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated identity (the configured admin email).
    pub sub: String,
    /// Role, always `admin` in issued tokens.
    pub role: Role,
    /// Issued at time (Unix timestamp).
    pub iat: i64,
    /// Expiration time (Unix timestamp), `iat` plus the configured lifetime.
    pub exp: i64,
}

/// Roles recognized by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The single administrative role this system issues.
    Admin,
    /// Any role value this build does not recognize. Never issued, only
    /// decoded from foreign tokens; always fails authorization.
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Check if this role has admin privileges.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Unknown => write!(f, "unknown"),
        }
    }
}

/// Token issuance and verification.
///
/// Stateless apart from the read-only signing key; safe to call
/// concurrently from independent requests.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
    configured: bool,
}

impl TokenService {
    /// Create a new token service with the given signing key and lifetime.
    ///
    /// An empty key is tolerated here; issuance and verification report a
    /// configuration error instead.
    pub fn new(secret: &str, lifetime: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime,
            configured: !secret.is_empty(),
        }
    }

    /// Whether a signing key is present.
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Configured token lifetime in seconds.
    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime.num_seconds()
    }

    /// Sign a token for `identity` as of the current time.
    pub fn issue(&self, identity: &str, role: Role) -> WardenResult<String> {
        self.issue_at(identity, role, Utc::now())
    }

    /// Sign a token as of `now`. `exp` is exactly `iat` plus the lifetime.
    pub fn issue_at(
        &self,
        identity: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> WardenResult<String> {
        if !self.configured {
            return Err(WardenError::Configuration(
                "token signing key is not set".to_string(),
            ));
        }

        let iat = now.timestamp();
        let claims = Claims {
            sub: identity.to_string(),
            role,
            iat,
            exp: iat + self.lifetime.num_seconds(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| WardenError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Decode and check a token as of the current time.
    pub fn verify(&self, token: &str) -> WardenResult<Claims> {
        self.verify_at(token, Utc::now())
    }

    /// Decode and check a token as of `now`.
    ///
    /// Expiry is checked here rather than by the JWT library so the
    /// boundary is deterministic and leeway-free: a token is still valid at
    /// `now == exp` and expired strictly after.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> WardenResult<Claims> {
        if !self.configured {
            return Err(WardenError::Configuration(
                "token signing key is not set".to_string(),
            ));
        }

        let mut validation = Validation::default();
        validation.validate_exp = false;

        let data: TokenData<Claims> =
            decode(token, &self.decoding_key, &validation).map_err(|e| {
                tracing::debug!(error = %e, "Token failed structure or signature check");
                WardenError::MalformedToken
            })?;

        if now.timestamp() > data.claims.exp {
            return Err(WardenError::ExpiredToken);
        }

        Ok(data.claims)
    }
}
