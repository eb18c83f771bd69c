//! Public store product reads against a live backend.
//!
//! Requires a running backend seeded with the admin account.
//! Run with: cargo test -p storeprobe-integration-tests -- --ignored

use storeprobe_client::StoreProductQuery;
use storeprobe_core::ProductId;
use storeprobe_integration_tests::TestContext;

fn context() -> TestContext {
    TestContext::from_env().expect("Failed to load test configuration")
}

#[tokio::test]
#[ignore = "Requires running backend with seeded admin account"]
async fn test_list_store_products_respects_limit() {
    let ctx = context();

    let page = ctx
        .client
        .list_products(&StoreProductQuery {
            limit: Some(5),
            ..StoreProductQuery::default()
        })
        .await
        .expect("Failed to list store products");

    assert!(page.len() <= 5);
    assert!(page.count.is_some());
}

#[tokio::test]
#[ignore = "Requires running backend with seeded admin account"]
async fn test_store_search_returns_finite_page() {
    let ctx = context();

    let page = ctx
        .client
        .list_products(&StoreProductQuery {
            q: Some("Test Product".to_string()),
            limit: Some(3),
            offset: None,
        })
        .await
        .expect("Failed to search store products");

    assert!(page.into_iter().count() <= 3);
}

#[tokio::test]
#[ignore = "Requires running backend with seeded admin account"]
async fn test_store_product_unknown_id_is_404() {
    let ctx = context();

    let err = ctx
        .client
        .get_product(&ProductId::new("prod_nonexistent12345"))
        .await
        .expect_err("Unknown product must not be found");

    assert!(err.is_not_found());
}

#[tokio::test]
#[ignore = "Requires running backend with published products"]
async fn test_store_product_round_trip() {
    let ctx = context();
    let page = ctx
        .client
        .list_products(&StoreProductQuery {
            limit: Some(1),
            ..StoreProductQuery::default()
        })
        .await
        .expect("Failed to list store products");
    let Some(listed) = page.into_iter().next() else {
        return;
    };

    let fetched = ctx
        .client
        .get_product(&listed.id)
        .await
        .expect("Failed to get store product");

    assert_eq!(fetched.id, listed.id);
    assert_eq!(fetched.title, listed.title);
}
