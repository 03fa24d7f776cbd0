//! The authentication gate.
//!
//! Orchestrates the rate limiter, credential check, and token service for
//! login, and the token service alone for request authentication. Every
//! failure is a structured [`WardenError`] outcome; nothing here panics on
//! bad input.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::auth::{AdmitDecision, Claims, LoginRateLimiter, Role, StoredSecret, TokenService};
use crate::config::AuthConfig;
use crate::error::{WardenError, WardenResult};

/// The statically-configured admin credential pair.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: StoredSecret,
}

impl AdminCredentials {
    /// Build from configuration, deciding the secret encoding once.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            email: config.admin_email.clone(),
            password: StoredSecret::parse(&config.admin_password),
        }
    }

    /// Both halves of the pair are present.
    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub token: String,
    pub expires_in: i64,
    pub identity: String,
    pub role: Role,
}

/// Orchestrates login and request authentication for the admin backend.
#[derive(Clone)]
pub struct AuthGate {
    credentials: AdminCredentials,
    tokens: TokenService,
    limiter: Arc<LoginRateLimiter>,
}

impl AuthGate {
    /// Create a new gate over the configured credential pair.
    pub fn new(
        credentials: AdminCredentials,
        tokens: TokenService,
        limiter: Arc<LoginRateLimiter>,
    ) -> Self {
        Self {
            credentials,
            tokens,
            limiter,
        }
    }

    /// Authenticate a login attempt and mint a session token.
    ///
    /// `client_key` identifies the caller for rate limiting (the peer IP).
    pub fn login(&self, client_key: &str, email: &str, password: &str) -> WardenResult<LoginSession> {
        self.login_at(client_key, email, password, Utc::now())
    }

    fn login_at(
        &self,
        client_key: &str,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> WardenResult<LoginSession> {
        // The limiter runs before the credential check so a brute-force
        // caller cannot probe past the threshold.
        if let AdmitDecision::Denied {
            retry_after_secs,
            attempts,
        } = self.limiter.admit(client_key, now)
        {
            tracing::warn!(
                client = %client_key,
                attempts,
                retry_after_secs,
                "Login attempt rate limited"
            );
            return Err(WardenError::RateLimited { retry_after_secs });
        }

        if !self.credentials.is_complete() || !self.tokens.is_configured() {
            return Err(WardenError::Configuration(
                "admin credentials or signing key are not configured".to_string(),
            ));
        }

        // A wrong identity and a wrong password must be indistinguishable
        // to the caller.
        let valid = self.credentials.email == email && self.credentials.password.matches(password);
        if !valid {
            tracing::warn!(identity = %email, client = %client_key, "Rejected login attempt");
            return Err(WardenError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue_at(&self.credentials.email, Role::Admin, now)?;

        tracing::info!(identity = %self.credentials.email, "Admin logged in");

        Ok(LoginSession {
            token,
            expires_in: self.tokens.lifetime_secs(),
            identity: self.credentials.email.clone(),
            role: Role::Admin,
        })
    }

    /// Authenticate a presented `Authorization` header value.
    ///
    /// An absent header or a missing `Bearer ` prefix is `Unauthenticated`;
    /// everything else is delegated to token verification.
    pub fn authenticate(&self, authorization: Option<&str>) -> WardenResult<Claims> {
        let token = authorization
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(WardenError::Unauthenticated)?;

        self.tokens.verify(token)
    }

    /// Like [`Self::authenticate`], but any failure collapses to `None` so
    /// a route can serve anonymous callers without rejecting the request.
    pub fn authenticate_optional(&self, authorization: Option<&str>) -> Option<Claims> {
        self.authenticate(authorization).ok()
    }

    /// Require the single recognized administrative role.
    pub fn authorize_admin(claims: &Claims) -> WardenResult<()> {
        if claims.role.is_admin() {
            Ok(())
        } else {
            Err(WardenError::Forbidden)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::RateLimitConfig;
    use chrono::Duration;
    use sha2::{Digest, Sha256};

    fn gate_with(password: &str, max_attempts: u32, window_secs: i64) -> AuthGate {
        let credentials = AdminCredentials {
            email: "admin@site.com".to_string(),
            password: StoredSecret::parse(password),
        };
        let tokens = TokenService::new("test-signing-key", Duration::hours(24));
        let limiter = Arc::new(LoginRateLimiter::new(RateLimitConfig {
            max_attempts,
            window_secs,
        }));
        AuthGate::new(credentials, tokens, limiter)
    }

    fn gate() -> AuthGate {
        gate_with("admin123", 5, 900)
    }

    #[test]
    fn test_successful_login() {
        let gate = gate();
        let session = gate.login("10.0.0.1", "admin@site.com", "admin123").unwrap();

        assert_eq!(session.identity, "admin@site.com");
        assert_eq!(session.role, Role::Admin);
        assert_eq!(session.expires_in, 24 * 3600);

        let claims = gate
            .authenticate(Some(&format!("Bearer {}", session.token)))
            .unwrap();
        assert_eq!(claims.sub, "admin@site.com");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_wrong_identity_and_wrong_password_are_indistinguishable() {
        let gate = gate();

        let wrong_identity = gate
            .login("10.0.0.1", "other@site.com", "admin123")
            .unwrap_err();
        let wrong_password = gate
            .login("10.0.0.2", "admin@site.com", "admin124")
            .unwrap_err();

        assert!(matches!(wrong_identity, WardenError::InvalidCredentials));
        assert!(matches!(wrong_password, WardenError::InvalidCredentials));
        assert_eq!(wrong_identity.to_string(), wrong_password.to_string());
    }

    #[test]
    fn test_login_against_hashed_password() {
        let mut hasher = Sha256::new();
        hasher.update(b"admin123");
        let stored = format!("sha256:{}", hex::encode(hasher.finalize()));

        let gate = gate_with(&stored, 5, 900);
        assert!(gate.login("10.0.0.1", "admin@site.com", "admin123").is_ok());
        assert!(matches!(
            gate.login("10.0.0.1", "admin@site.com", "admin124"),
            Err(WardenError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_brute_force_scenario() {
        let gate = gate();
        let now = Utc::now();

        // Five wrong-password attempts all classify as invalid credentials
        for _ in 0..5 {
            assert!(matches!(
                gate.login_at("10.0.0.9", "admin@site.com", "wrong", now),
                Err(WardenError::InvalidCredentials)
            ));
        }

        // The sixth within the window is rate limited, even with the
        // correct password
        match gate.login_at("10.0.0.9", "admin@site.com", "admin123", now) {
            Err(WardenError::RateLimited { retry_after_secs }) => {
                assert!(retry_after_secs > 0);
            }
            other => panic!("expected rate limit, got {:?}", other.map(|s| s.identity)),
        }

        // After the window has elapsed the correct password goes through
        let later = now + Duration::seconds(901);
        assert!(gate
            .login_at("10.0.0.9", "admin@site.com", "admin123", later)
            .is_ok());
    }

    #[test]
    fn test_missing_configuration_refuses_login() {
        let credentials = AdminCredentials {
            email: String::new(),
            password: StoredSecret::parse(""),
        };
        let tokens = TokenService::new("key", Duration::hours(1));
        let limiter = Arc::new(LoginRateLimiter::new(RateLimitConfig::default()));
        let gate = AuthGate::new(credentials, tokens, limiter);

        assert!(matches!(
            gate.login("10.0.0.1", "admin@site.com", "admin123"),
            Err(WardenError::Configuration(_))
        ));
    }

    #[test]
    fn test_missing_signing_key_refuses_login() {
        let credentials = AdminCredentials {
            email: "admin@site.com".to_string(),
            password: StoredSecret::parse("admin123"),
        };
        let tokens = TokenService::new("", Duration::hours(1));
        let limiter = Arc::new(LoginRateLimiter::new(RateLimitConfig::default()));
        let gate = AuthGate::new(credentials, tokens, limiter);

        assert!(matches!(
            gate.login("10.0.0.1", "admin@site.com", "admin123"),
            Err(WardenError::Configuration(_))
        ));
    }

    #[test]
    fn test_authenticate_requires_bearer_prefix() {
        let gate = gate();
        let session = gate.login("10.0.0.1", "admin@site.com", "admin123").unwrap();

        assert!(matches!(
            gate.authenticate(None),
            Err(WardenError::Unauthenticated)
        ));
        assert!(matches!(
            gate.authenticate(Some(&session.token)),
            Err(WardenError::Unauthenticated)
        ));
        assert!(matches!(
            gate.authenticate(Some("Basic dXNlcjpwYXNz")),
            Err(WardenError::Unauthenticated)
        ));
        assert!(gate
            .authenticate(Some(&format!("Bearer {}", session.token)))
            .is_ok());
    }

    #[test]
    fn test_authenticate_classifies_garbage_as_malformed() {
        let gate = gate();
        assert!(matches!(
            gate.authenticate(Some("Bearer not-a-token")),
            Err(WardenError::MalformedToken)
        ));
    }

    #[test]
    fn test_optional_authentication_never_fails() {
        let gate = gate();

        assert!(gate.authenticate_optional(None).is_none());
        assert!(gate.authenticate_optional(Some("Bearer junk")).is_none());

        // An expired token collapses to anonymous, not an error
        let expired_issuer = AuthGate::new(
            AdminCredentials {
                email: "admin@site.com".to_string(),
                password: StoredSecret::parse("admin123"),
            },
            TokenService::new("test-signing-key", Duration::seconds(-10)),
            Arc::new(LoginRateLimiter::new(RateLimitConfig::default())),
        );
        let session = expired_issuer
            .login("10.0.0.1", "admin@site.com", "admin123")
            .unwrap();
        assert!(gate
            .authenticate_optional(Some(&format!("Bearer {}", session.token)))
            .is_none());

        let session = gate.login("10.0.0.2", "admin@site.com", "admin123").unwrap();
        assert!(gate
            .authenticate_optional(Some(&format!("Bearer {}", session.token)))
            .is_some());
    }

    #[test]
    fn test_authorize_admin() {
        let gate = gate();
        let session = gate.login("10.0.0.1", "admin@site.com", "admin123").unwrap();
        let claims = gate
            .authenticate(Some(&format!("Bearer {}", session.token)))
            .unwrap();
        assert!(AuthGate::authorize_admin(&claims).is_ok());

        let foreign = Claims {
            sub: "admin@site.com".to_string(),
            role: Role::Unknown,
            iat: 0,
            exp: i64::MAX,
        };
        assert!(matches!(
            AuthGate::authorize_admin(&foreign),
            Err(WardenError::Forbidden)
        ));
    }
}
