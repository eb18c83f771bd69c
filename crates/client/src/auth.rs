//! Admin authentication.
//!
//! Exchanges email/password for a bearer token at `/auth/user/emailpass`.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::{HarnessError, Result};

/// Token endpoint path, relative to the base URL.
pub const AUTH_PATH: &str = "/auth/user/emailpass";

/// Tokens this close to expiry are treated as expired.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Bearer token obtained from the token endpoint.
#[derive(Debug, Clone)]
pub struct AdminToken {
    /// The raw bearer credential.
    pub value: SecretString,
    /// When the token stops being valid, if known.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Request body for the token endpoint.
#[derive(Serialize)]
struct AuthRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Response from the token endpoint.
#[derive(Deserialize)]
struct AuthResponse {
    #[serde(default)]
    token: Option<serde_json::Value>,
}

/// The part of a JWT payload we care about.
#[derive(Deserialize)]
struct JwtClaims {
    #[serde(default)]
    exp: Option<i64>,
}

/// Authenticate against the backend with email and password.
///
/// # Errors
///
/// Returns `HarnessError::Authentication` with the backend's status if the
/// credentials are rejected, `HarnessError::Protocol` if a success response
/// carries no token, and `HarnessError::Http` on transport failures.
#[instrument(skip(client, base_url, password), fields(email = %email))]
pub async fn authenticate(
    client: &reqwest::Client,
    base_url: &Url,
    email: &str,
    password: &SecretString,
) -> Result<AdminToken> {
    let url = crate::client::endpoint(base_url, AUTH_PATH)?;

    let response = client
        .post(url)
        .json(&AuthRequest {
            email,
            password: password.expose_secret(),
        })
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        warn!(status = status.as_u16(), "Admin authentication rejected");
        return Err(HarnessError::Authentication { status });
    }

    let body = response.text().await?;
    let auth: AuthResponse = serde_json::from_str(&body).map_err(|e| {
        HarnessError::Protocol(format!("No token received from authentication: {e}"))
    })?;

    let token = match auth.token {
        Some(serde_json::Value::String(token)) if !token.is_empty() => token,
        _ => {
            return Err(HarnessError::Protocol(
                "No token received from authentication".to_string(),
            ));
        }
    };

    let expires_at = jwt_expiry(&token);
    debug!(?expires_at, "Admin token issued");

    Ok(AdminToken {
        value: SecretString::from(token),
        expires_at,
    })
}

/// Read the `exp` claim from a JWT without verifying it.
///
/// Returns `None` for opaque tokens or payloads without `exp`.
#[must_use]
pub fn jwt_expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: JwtClaims = serde_json::from_slice(&bytes).ok()?;
    DateTime::from_timestamp(claims.exp?, 0)
}

impl AdminToken {
    /// Give a token without an `exp` claim an explicit lifetime.
    ///
    /// Lifetimes past the last representable instant saturate to it.
    #[must_use]
    pub fn with_fallback_ttl(mut self, ttl: std::time::Duration) -> Self {
        if self.expires_at.is_none() {
            let expires_at = Duration::from_std(ttl)
                .ok()
                .and_then(|ttl| Utc::now().checked_add_signed(ttl))
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
            self.expires_at = Some(expires_at);
        }
        self
    }

    /// Check if the token has expired or is about to.
    ///
    /// Tokens with unknown expiry never expire.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_within(EXPIRY_MARGIN_SECS)
    }

    /// Check if the token will expire within the given number of seconds.
    #[must_use]
    pub fn expires_within(&self, seconds: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| {
            Duration::try_seconds(seconds)
                .and_then(|horizon| Utc::now().checked_add_signed(horizon))
                .is_none_or(|deadline| deadline >= expires_at)
        })
    }

    /// The raw token for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.value.expose_secret()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn jwt_with_payload(payload: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    fn token_expiring_at(expires_at: Option<DateTime<Utc>>) -> AdminToken {
        AdminToken {
            value: SecretString::from("test"),
            expires_at,
        }
    }

    #[test]
    fn test_jwt_expiry_reads_exp_claim() {
        let token = jwt_with_payload(r#"{"actor_id":"user_1","exp":1900000000}"#);
        let expiry = jwt_expiry(&token).unwrap();
        assert_eq!(expiry.timestamp(), 1_900_000_000);
    }

    #[test]
    fn test_jwt_expiry_ignores_opaque_tokens() {
        assert!(jwt_expiry("opaque-token").is_none());
        assert!(jwt_expiry("a.!!!.c").is_none());
        assert!(jwt_expiry(&jwt_with_payload(r#"{"actor_id":"user_1"}"#)).is_none());
    }

    #[test]
    fn test_token_is_expired() {
        let now = Utc::now();
        assert!(token_expiring_at(Some(now - Duration::hours(1))).is_expired());
        assert!(!token_expiring_at(Some(now + Duration::hours(1))).is_expired());
        // Inside the 60 second margin
        assert!(token_expiring_at(Some(now + Duration::seconds(30))).is_expired());
        assert!(!token_expiring_at(None).is_expired());
    }

    #[test]
    fn test_fallback_ttl_only_applies_without_exp() {
        let known = Utc::now() + Duration::hours(5);
        let token = token_expiring_at(Some(known))
            .with_fallback_ttl(std::time::Duration::from_secs(10));
        assert_eq!(token.expires_at, Some(known));

        let token = token_expiring_at(None).with_fallback_ttl(std::time::Duration::from_secs(10));
        assert!(token.is_expired());

        let token =
            token_expiring_at(None).with_fallback_ttl(std::time::Duration::from_secs(3600));
        assert!(!token.is_expired());
    }

    #[test]
    fn test_fallback_ttl_saturates_instead_of_overflowing() {
        let token = token_expiring_at(None)
            .with_fallback_ttl(std::time::Duration::from_secs(1_000_000_000_000_000));
        assert_eq!(token.expires_at, Some(DateTime::<Utc>::MAX_UTC));
        assert!(!token.is_expired());

        let token = token_expiring_at(None).with_fallback_ttl(std::time::Duration::MAX);
        assert_eq!(token.expires_at, Some(DateTime::<Utc>::MAX_UTC));
    }
}
