//! Draft-order (cart) operations.
//!
//! Every call authenticates through [`MedusaClient::authenticated_request`]
//! and returns the draft order as the backend reports it after the change.

use std::num::NonZeroU32;

use reqwest::Method;
use serde_json::json;
use storeprobe_core::{CartId, LineItemId, VariantId};
use tracing::{debug, instrument};

use crate::client::MedusaClient;
use crate::error::{HarnessError, Result};
use crate::fixtures::unique_email;
use crate::types::{DraftOrder, DraftOrderEnvelope, Region, RegionsEnvelope};

/// A cart created with one line item.
#[derive(Debug, Clone)]
pub struct CartWithItem {
    pub cart_id: CartId,
    pub cart: DraftOrder,
    /// First line item of the cart, for follow-up mutations.
    pub line_item_id: LineItemId,
}

impl MedusaClient {
    /// List the seeded regions.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::Request` on a non-success status.
    #[instrument(skip(self))]
    pub async fn list_regions(&self) -> Result<Vec<Region>> {
        let envelope: RegionsEnvelope = self
            .admin_json(Method::GET, "/admin/regions", None)
            .await?;
        Ok(envelope.regions)
    }

    /// Create an empty draft order in the first available region.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::Precondition` if no region is seeded and
    /// `HarnessError::Request` if the backend rejects the creation.
    #[instrument(skip(self))]
    pub async fn create_cart(&self) -> Result<DraftOrder> {
        let region = self.list_regions().await?.into_iter().next().ok_or_else(|| {
            HarnessError::Precondition("No regions available. Run seed data.".to_string())
        })?;

        let body = json!({
            "region_id": region.id,
            "email": unique_email(),
            "items": [],
        });

        let envelope: DraftOrderEnvelope = self
            .admin_json(Method::POST, "/admin/draft-orders", Some(&body))
            .await?;

        debug!(cart_id = %envelope.draft_order.id, region_id = %region.id, "Draft order created");
        Ok(envelope.draft_order)
    }

    /// Fetch a draft order.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::Request` (404 for unknown IDs).
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn get_cart(&self, cart_id: &CartId) -> Result<DraftOrder> {
        let envelope: DraftOrderEnvelope = self
            .admin_json(Method::GET, &cart_path(cart_id), None)
            .await?;
        Ok(envelope.draft_order)
    }

    /// Append a line item for `variant_id`.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::Request` on a non-success status.
    #[instrument(skip(self), fields(cart_id = %cart_id, variant_id = %variant_id))]
    pub async fn add_item(
        &self,
        cart_id: &CartId,
        variant_id: &VariantId,
        quantity: NonZeroU32,
    ) -> Result<DraftOrder> {
        let body = json!({
            "variant_id": variant_id,
            "quantity": quantity.get(),
        });

        let envelope: DraftOrderEnvelope = self
            .admin_json(
                Method::POST,
                &format!("{}/line-items", cart_path(cart_id)),
                Some(&body),
            )
            .await?;
        Ok(envelope.draft_order)
    }

    /// Replace the quantity of an existing line item.
    ///
    /// A quantity of zero is sent as-is; what the backend does with it is
    /// up to the backend.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::Request` on a non-success status.
    #[instrument(skip(self), fields(cart_id = %cart_id, line_item_id = %line_item_id))]
    pub async fn update_item_quantity(
        &self,
        cart_id: &CartId,
        line_item_id: &LineItemId,
        quantity: u32,
    ) -> Result<DraftOrder> {
        let body = json!({ "quantity": quantity });

        let envelope: DraftOrderEnvelope = self
            .admin_json(
                Method::POST,
                &line_item_path(cart_id, line_item_id),
                Some(&body),
            )
            .await?;
        Ok(envelope.draft_order)
    }

    /// Delete a line item.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::Request` on a non-success status, including
    /// whatever the backend answers for an already removed item.
    #[instrument(skip(self), fields(cart_id = %cart_id, line_item_id = %line_item_id))]
    pub async fn remove_item(
        &self,
        cart_id: &CartId,
        line_item_id: &LineItemId,
    ) -> Result<DraftOrder> {
        let envelope: DraftOrderEnvelope = self
            .admin_json(Method::DELETE, &line_item_path(cart_id, line_item_id), None)
            .await?;
        Ok(envelope.draft_order)
    }

    /// Create a cart and add one line item to it.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::create_cart`] and [`Self::add_item`];
    /// returns `HarnessError::Protocol` if the updated cart has no line item.
    #[instrument(skip(self), fields(variant_id = %variant_id))]
    pub async fn create_cart_with_item(
        &self,
        variant_id: &VariantId,
        quantity: NonZeroU32,
    ) -> Result<CartWithItem> {
        let created = self.create_cart().await?;
        let cart = self.add_item(&created.id, variant_id, quantity).await?;

        let line_item_id = cart
            .line_items()
            .first()
            .map(|item| item.id.clone())
            .ok_or_else(|| {
                HarnessError::Protocol(format!("Draft order {} has no line items", cart.id))
            })?;

        Ok(CartWithItem {
            cart_id: created.id,
            cart,
            line_item_id,
        })
    }
}

fn cart_path(cart_id: &CartId) -> String {
    format!("/admin/draft-orders/{cart_id}")
}

fn line_item_path(cart_id: &CartId, line_item_id: &LineItemId) -> String {
    format!("{}/line-items/{line_item_id}", cart_path(cart_id))
}
