//! Shared helpers for the mock-backend tests.

#![allow(dead_code)]

use std::sync::Once;
use std::time::Duration;

use serde_json::json;
use storeprobe_client::{HarnessConfig, MedusaClient, TokenPolicy};
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT: Once = Once::new();

/// Token handed out by [`mount_auth`].
pub const TOKEN: &str = "test-admin-token";

/// Install a test-writer subscriber once per test binary.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Start a mock backend.
pub async fn backend() -> MockServer {
    init_tracing();
    MockServer::start().await
}

/// Client re-authenticating on every admin call.
pub fn client_for(server: &MockServer) -> MedusaClient {
    let config = HarnessConfig::new(&server.uri()).expect("Failed to build config");
    MedusaClient::new(config).expect("Failed to build client")
}

/// Client caching its token.
pub fn cached_client_for(server: &MockServer) -> MedusaClient {
    let config = HarnessConfig::new(&server.uri())
        .expect("Failed to build config")
        .with_token_policy(TokenPolicy::Cached {
            fallback_ttl: Duration::from_secs(3600),
        });
    MedusaClient::new(config).expect("Failed to build client")
}

/// Accept any login and hand out [`TOKEN`], expecting `calls` logins.
pub async fn mount_auth(server: &MockServer, calls: u64) {
    mount_auth_token(server, TOKEN, calls).await;
}

/// Accept any login and hand out `token`, expecting `calls` logins.
pub async fn mount_auth_token(server: &MockServer, token: &str, calls: u64) {
    Mock::given(method("POST"))
        .and(path("/auth/user/emailpass"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token })))
        .expect(calls)
        .named("admin login")
        .mount(server)
        .await;
}

/// A draft order as the backend returns it.
pub fn draft_order(id: &str, items: &serde_json::Value) -> serde_json::Value {
    json!({
        "draft_order": {
            "id": id,
            "status": "draft",
            "email": "test-1@example.com",
            "region_id": "reg_1",
            "items": items,
        }
    })
}

/// A product as the backend returns it.
pub fn product(id: &str, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "handle": "test-product",
        "status": "draft",
        "options": [{"id": "opt_1", "title": "Size", "values": [{"id": "optval_1", "value": "M"}]}],
        "variants": [{
            "id": "variant_1",
            "title": "Medium",
            "prices": [{"amount": 1000, "currency_code": "usd"}],
            "options": [{"id": "optval_1", "value": "M"}]
        }]
    })
}
