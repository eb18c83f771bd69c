//! Product catalog operations.
//!
//! Creation and admin reads are authenticated; the store surface is public.

use reqwest::Method;
use storeprobe_core::ProductId;
use tracing::{debug, instrument};
use url::form_urlencoded;

use crate::client::MedusaClient;
use crate::error::Result;
use crate::fixtures::{ProductOverrides, generate_product};
use crate::types::{Product, ProductEnvelope, ProductPage};

/// Query for `GET /store/products`.
///
/// `None` fields are not sent. `Some` values are sent as given, including
/// an explicit `limit` or `offset` of zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreProductQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// Free-text search.
    pub q: Option<String>,
}

/// Query for `GET /admin/products`.
///
/// `None` fields are not sent; `Some(0)` is sent as `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminProductQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl StoreProductQuery {
    fn to_path(&self) -> String {
        with_query(
            "/store/products",
            &[
                ("limit", self.limit.map(|v| v.to_string())),
                ("offset", self.offset.map(|v| v.to_string())),
                ("q", self.q.clone()),
            ],
        )
    }
}

impl AdminProductQuery {
    fn to_path(self) -> String {
        with_query(
            "/admin/products",
            &[
                ("limit", self.limit.map(|v| v.to_string())),
                ("offset", self.offset.map(|v| v.to_string())),
            ],
        )
    }
}

/// Append the set parameters as a query string.
fn with_query(path: &str, params: &[(&str, Option<String>)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in params {
        if let Some(value) = value {
            serializer.append_pair(key, value);
            any = true;
        }
    }

    if any {
        format!("{path}?{}", serializer.finish())
    } else {
        path.to_string()
    }
}

impl MedusaClient {
    /// Create a product from the generated fixture with `overrides` applied.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::Request` if the backend rejects the product.
    #[instrument(skip(self, overrides))]
    pub async fn create_product(&self, overrides: ProductOverrides) -> Result<Product> {
        let payload = generate_product(overrides);
        let body = serde_json::to_value(&payload)?;

        let envelope: ProductEnvelope = self
            .admin_json(Method::POST, "/admin/products", Some(&body))
            .await?;

        debug!(product_id = %envelope.product.id, title = %envelope.product.title, "Product created");
        Ok(envelope.product)
    }

    /// Fetch a product through the public store surface.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::Request` (404 for unknown IDs).
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product> {
        let envelope: ProductEnvelope = self.store_json(&format!("/store/products/{id}")).await?;
        Ok(envelope.product)
    }

    /// Fetch a product through the admin surface.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::Request` (404 for unknown IDs).
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_admin_product(&self, id: &ProductId) -> Result<Product> {
        let envelope: ProductEnvelope = self
            .admin_json(Method::GET, &format!("/admin/products/{id}"), None)
            .await?;
        Ok(envelope.product)
    }

    /// List products through the public store surface.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::Request` on a non-success status.
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: &StoreProductQuery) -> Result<ProductPage> {
        self.store_json(&query.to_path()).await
    }

    /// List products through the admin surface.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::Request` on a non-success status.
    #[instrument(skip(self))]
    pub async fn list_admin_products(&self, query: AdminProductQuery) -> Result<ProductPage> {
        self.admin_json(Method::GET, &query.to_path(), None).await
    }
}
