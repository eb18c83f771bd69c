//! Harness configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults target a local development
//! backend seeded with the standard admin account.
//!
//! - `MEDUSA_BASE_URL` - Backend base URL (default: `http://localhost:9000`)
//! - `MEDUSA_ADMIN_EMAIL` - Admin login email (default: `admin@test.com`)
//! - `MEDUSA_ADMIN_PASSWORD` - Admin login password (default: `supersecret`)
//! - `MEDUSA_HTTP_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `MEDUSA_TOKEN_CACHE` - `true`/`1` to reuse tokens until they expire (default: false)
//! - `MEDUSA_TOKEN_TTL_SECS` - Cached token lifetime when the token carries no
//!   `exp` claim (default: 900, at most one year)
//! - `MEDUSA_PUBLISHABLE_KEY` - Sent as `x-publishable-api-key` on store calls (default: unset)

use std::time::Duration;

use secrecy::SecretString;
use storeprobe_core::{Email, EmailError};
use thiserror::Error;
use url::Url;

/// Default backend URL for local runs.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9000";
/// Seeded admin account email.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@test.com";
/// Seeded admin account password.
pub const DEFAULT_ADMIN_PASSWORD: &str = "supersecret";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_TOKEN_TTL_SECS: u64 = 900;
const MAX_TOKEN_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid admin email: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// How the client obtains bearer tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenPolicy {
    /// Authenticate before every admin request. Nothing is shared between calls.
    #[default]
    PerRequest,
    /// Keep the last token and refresh it lazily shortly before it expires.
    Cached {
        /// Lifetime assumed for tokens without an `exp` claim.
        fallback_ttl: Duration,
    },
}

/// Admin login credentials.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminCredentials {
    /// Admin account email.
    pub email: Email,
    /// Admin account password.
    pub password: SecretString,
}

impl AdminCredentials {
    /// Build credentials from an email and a plain password.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEmail` if the email is malformed.
    pub fn new(email: &str, password: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            email: Email::parse(email)?,
            password: SecretString::from(password.to_owned()),
        })
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Harness configuration.
///
/// Passed explicitly to [`crate::MedusaClient::new`] so that one process can
/// talk to several environments.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Backend base URL, without a trailing slash.
    pub base_url: Url,
    /// Admin credentials used for every authenticated call.
    pub credentials: AdminCredentials,
    /// Per-request timeout applied by the HTTP client.
    pub timeout: Duration,
    /// Token acquisition strategy.
    pub token_policy: TokenPolicy,
    /// Publishable API key for the store surface, if the backend requires one.
    pub publishable_key: Option<String>,
}

impl HarnessConfig {
    /// Configuration pointing at `base_url` with the seeded admin account and
    /// default settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL is not an http(s) URL
    /// and `ConfigError::InvalidEmail` if the default email fails to parse.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            credentials: AdminCredentials::new(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token_policy: TokenPolicy::PerRequest,
            publishable_key: None,
        })
    }

    /// Replace the admin credentials.
    #[must_use]
    pub fn with_credentials(mut self, credentials: AdminCredentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Replace the token policy.
    #[must_use]
    pub const fn with_token_policy(mut self, token_policy: TokenPolicy) -> Self {
        self.token_policy = token_policy;
        self
    }

    /// Set the publishable API key sent on store calls.
    #[must_use]
    pub fn with_publishable_key(mut self, key: impl Into<String>) -> Self {
        self.publishable_key = Some(key.into());
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_base_url(&get_env_or_default("MEDUSA_BASE_URL", DEFAULT_BASE_URL))?;
        let email = Email::parse(&get_env_or_default("MEDUSA_ADMIN_EMAIL", DEFAULT_ADMIN_EMAIL))
            .map_err(|e| ConfigError::InvalidEnvVar("MEDUSA_ADMIN_EMAIL".to_string(), e.to_string()))?;
        let credentials = AdminCredentials {
            email,
            password: SecretString::from(get_env_or_default(
                "MEDUSA_ADMIN_PASSWORD",
                DEFAULT_ADMIN_PASSWORD,
            )),
        };
        let timeout = Duration::from_secs(get_u64_or_default(
            "MEDUSA_HTTP_TIMEOUT_SECS",
            DEFAULT_TIMEOUT_SECS,
        )?);
        let token_policy = token_policy_from(
            get_optional_env("MEDUSA_TOKEN_CACHE").as_deref(),
            get_u64_or_default("MEDUSA_TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)?,
        )?;

        let publishable_key = get_optional_env("MEDUSA_PUBLISHABLE_KEY").filter(|k| !k.is_empty());

        Ok(Self {
            base_url,
            credentials,
            timeout,
            token_policy,
            publishable_key,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse and normalize the backend base URL.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |msg: String| ConfigError::InvalidEnvVar("MEDUSA_BASE_URL".to_string(), msg);

    let url = Url::parse(raw.trim_end_matches('/')).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme: {}", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be a base".to_string()));
    }
    Ok(url)
}

fn token_policy_from(flag: Option<&str>, ttl_secs: u64) -> Result<TokenPolicy, ConfigError> {
    if ttl_secs > MAX_TOKEN_TTL_SECS {
        return Err(ConfigError::InvalidEnvVar(
            "MEDUSA_TOKEN_TTL_SECS".to_string(),
            format!("must be at most {MAX_TOKEN_TTL_SECS}, got {ttl_secs}"),
        ));
    }

    match flag.map(str::to_ascii_lowercase).as_deref() {
        None | Some("" | "0" | "false" | "no") => Ok(TokenPolicy::PerRequest),
        Some("1" | "true" | "yes") => Ok(TokenPolicy::Cached {
            fallback_ttl: Duration::from_secs(ttl_secs),
        }),
        Some(other) => Err(ConfigError::InvalidEnvVar(
            "MEDUSA_TOKEN_CACHE".to_string(),
            format!("expected true or false, got {other}"),
        )),
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_u64_or_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    get_optional_env(key).map_or(Ok(default), |value| {
        value
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
