//! HTTP client for the commerce backend.
//!
//! Wraps one `reqwest::Client` and the harness configuration. Admin calls go
//! through [`MedusaClient::authenticated_request`], store calls through
//! [`MedusaClient::public_request`].

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::auth::{self, AdminToken};
use crate::config::{HarnessConfig, TokenPolicy};
use crate::error::{HarnessError, Result};

/// Header carrying the store surface's publishable API key.
pub const PUBLISHABLE_KEY_HEADER: &str = "x-publishable-api-key";

/// Client for the backend's admin, store and auth surfaces.
///
/// Cheap to clone; clones share the HTTP connection pool and, under
/// [`TokenPolicy::Cached`], the cached token.
#[derive(Clone)]
pub struct MedusaClient {
    inner: Arc<MedusaClientInner>,
}

struct MedusaClientInner {
    client: reqwest::Client,
    config: HarnessConfig,
    /// Only populated under `TokenPolicy::Cached`.
    token: RwLock<Option<AdminToken>>,
}

impl std::fmt::Debug for MedusaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MedusaClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl MedusaClient {
    /// Create a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::Http` if the HTTP client fails to build.
    pub fn new(config: HarnessConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            inner: Arc::new(MedusaClientInner {
                client,
                config,
                token: RwLock::new(None),
            }),
        })
    }

    /// Create a client from `MEDUSA_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::Config` for invalid variables and
    /// `HarnessError::Http` if the HTTP client fails to build.
    pub fn from_env() -> Result<Self> {
        Self::new(HarnessConfig::from_env()?)
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &HarnessConfig {
        &self.inner.config
    }

    /// Absolute URL for a backend path such as `/admin/products`.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::Protocol` if the result is not a valid URL.
    pub fn url(&self, path: &str) -> Result<Url> {
        endpoint(&self.inner.config.base_url, path)
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Exchange the given credentials for a token.
    ///
    /// Always hits the token endpoint and never touches the cache.
    ///
    /// # Errors
    ///
    /// See [`auth::authenticate`].
    pub async fn authenticate(
        &self,
        email: &str,
        password: &secrecy::SecretString,
    ) -> Result<AdminToken> {
        auth::authenticate(
            &self.inner.client,
            &self.inner.config.base_url,
            email,
            password,
        )
        .await
    }

    /// Obtain a token for the configured admin account, honoring the token
    /// policy.
    ///
    /// # Errors
    ///
    /// See [`auth::authenticate`].
    #[instrument(skip(self))]
    pub async fn admin_token(&self) -> Result<AdminToken> {
        let credentials = &self.inner.config.credentials;

        let TokenPolicy::Cached { fallback_ttl } = self.inner.config.token_policy else {
            return self
                .authenticate(credentials.email.as_str(), &credentials.password)
                .await;
        };

        if let Some(token) = self.inner.token.read().await.as_ref()
            && !token.is_expired()
        {
            return Ok(token.clone());
        }

        let mut slot = self.inner.token.write().await;
        // Another task may have refreshed while we waited for the lock
        if let Some(token) = slot.as_ref()
            && !token.is_expired()
        {
            return Ok(token.clone());
        }

        debug!("Refreshing cached admin token");
        let token = self
            .authenticate(credentials.email.as_str(), &credentials.password)
            .await?
            .with_fallback_ttl(fallback_ttl);
        *slot = Some(token.clone());
        Ok(token)
    }

    /// Drop the cached token, forcing the next admin call to authenticate.
    pub async fn invalidate_token(&self) {
        *self.inner.token.write().await = None;
    }

    // =========================================================================
    // Request Dispatch
    // =========================================================================

    /// Send an admin request with a bearer token and a JSON content type.
    ///
    /// The response is returned as-is so callers can inspect the status.
    ///
    /// # Errors
    ///
    /// Returns authentication errors from [`Self::admin_token`] and
    /// `HarnessError::Http` on transport failures.
    #[instrument(skip(self, body), fields(method = %method, path = %path))]
    pub async fn authenticated_request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Response> {
        let token = self.admin_token().await?;
        let url = self.url(path)?;

        let bearer = HeaderValue::from_str(&format!("Bearer {}", token.expose()))
            .map_err(|e| HarnessError::Protocol(format!("Token is not a valid header value: {e}")))?;

        let mut request = self
            .inner
            .client
            .request(method, url)
            .header(AUTHORIZATION, bearer)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        debug!(status = response.status().as_u16(), "Admin request completed");
        Ok(response)
    }

    /// Send an unauthenticated request (store surface).
    ///
    /// Carries the publishable API key when one is configured.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::Http` on transport failures.
    #[instrument(skip(self), fields(method = %method, path = %path))]
    pub async fn public_request(&self, method: Method, path: &str) -> Result<Response> {
        let url = self.url(path)?;
        let mut request = self.inner.client.request(method, url);
        if let Some(key) = &self.inner.config.publishable_key {
            request = request.header(PUBLISHABLE_KEY_HEADER, key);
        }
        let response = request.send().await?;
        debug!(status = response.status().as_u16(), "Store request completed");
        Ok(response)
    }

    /// Authenticated request whose 2xx body is parsed into `T`.
    pub(crate) async fn admin_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T> {
        let response = self.authenticated_request(method, path, body).await?;
        handle_response(response).await
    }

    /// Unauthenticated GET whose 2xx body is parsed into `T`.
    pub(crate) async fn store_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.public_request(Method::GET, path).await?;
        handle_response(response).await
    }
}

/// Join a backend path onto the base URL, keeping any base path prefix.
pub(crate) fn endpoint(base_url: &Url, path: &str) -> Result<Url> {
    let base = base_url.as_str().trim_end_matches('/');
    let path = path.trim_start_matches('/');
    Url::parse(&format!("{base}/{path}"))
        .map_err(|e| HarnessError::Protocol(format!("Invalid request URL for {path}: {e}")))
}

/// Check the status and parse a JSON body.
///
/// Non-2xx responses become `HarnessError::Request` carrying the raw body.
pub(crate) async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(request_error(status, body));
    }

    Ok(serde_json::from_str(&body)?)
}

fn request_error(status: StatusCode, body: String) -> HarnessError {
    warn!(status = status.as_u16(), body = %body, "Backend returned an error");
    HarnessError::Request { status, body }
}
