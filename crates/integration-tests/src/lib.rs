//! End-to-end tests for a live commerce backend.
//!
//! # Running Tests
//!
//! The tests talk to a real backend and are ignored by default. Start the
//! backend with its seed data (an admin account and at least one region),
//! then:
//!
//! ```bash
//! MEDUSA_BASE_URL=http://localhost:9000 \
//!     cargo test -p storeprobe-integration-tests -- --ignored
//! ```
//!
//! Credentials default to `admin@test.com` / `supersecret`; see
//! `storeprobe_client::config` for every variable.
//!
//! # Test Categories
//!
//! - `auth_login` - token acquisition and use
//! - `cart_creation` - draft-order creation and line-item mutations
//! - `admin_product_crud` - product creation through the admin surface
//! - `admin_product_read` - admin product reads and pagination
//! - `store_products` - public product reads

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Once;

use storeprobe_client::{HarnessConfig, HarnessError, MedusaClient};
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Shared state for one test.
#[derive(Debug, Clone)]
pub struct TestContext {
    /// Client configured from the environment.
    pub client: MedusaClient,
}

impl TestContext {
    /// Build a context from `MEDUSA_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::Config` if a variable is invalid.
    pub fn from_env() -> Result<Self, HarnessError> {
        init_tracing();
        let client = MedusaClient::new(HarnessConfig::from_env()?)?;
        Ok(Self { client })
    }

    /// Configuration the client was built with.
    #[must_use]
    pub fn config(&self) -> &HarnessConfig {
        self.client.config()
    }
}

/// Install a test-writer subscriber honoring `RUST_LOG`, once per process.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Milliseconds since the epoch, for readable unique test values.
#[must_use]
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
