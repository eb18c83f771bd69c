//! Entities returned by the backend.
//!
//! Only the fields the harness asserts on are modeled; unknown fields are
//! ignored. Collections default to empty so that sparse responses (the store
//! surface omits admin-only fields) still parse.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use storeprobe_core::{
    CartId, DraftOrderStatus, Handle, LineItemId, Price, ProductId, RegionId, VariantId,
};

/// A region (pricing/currency context). Seeded, read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub currency_code: Option<String>,
}

/// A draft order, the admin-side stand-in for a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftOrder {
    pub id: CartId,
    pub status: DraftOrderStatus,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub region_id: Option<RegionId>,
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Older backends keep the items on a nested cart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart: Option<NestedCart>,
}

/// Cart embedded in a draft order by older backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedCart {
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl DraftOrder {
    /// Line items in order, wherever the backend put them.
    #[must_use]
    pub fn line_items(&self) -> &[LineItem] {
        match &self.cart {
            Some(cart) if self.items.is_empty() => &cart.items,
            _ => &self.items,
        }
    }

    /// The first line item for `variant_id`, if any.
    #[must_use]
    pub fn item_for_variant(&self, variant_id: &VariantId) -> Option<&LineItem> {
        self.line_items()
            .iter()
            .find(|item| item.variant_id.as_ref() == Some(variant_id))
    }
}

/// One line of a draft order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    #[serde(default)]
    pub variant_id: Option<VariantId>,
    pub quantity: u32,
    #[serde(default)]
    pub title: Option<String>,
}

/// A product as returned by the admin or store surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub handle: Option<Handle>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub options: Vec<ProductOption>,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
}

/// A product option definition, e.g. `Size` with values `S`, `M`, `L`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub values: Vec<ProductOptionValue>,
}

impl ProductOption {
    /// The allowed values in order.
    pub fn value_names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(ProductOptionValue::as_str)
    }
}

/// Option values come back as objects from the backend but are sent as
/// plain strings on creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductOptionValue {
    Plain(String),
    Object {
        #[serde(default)]
        id: Option<String>,
        value: String,
    },
}

impl ProductOptionValue {
    /// The option value itself.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(value) | Self::Object { value, .. } => value,
        }
    }
}

/// A purchasable variant of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: VariantId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub prices: Vec<Price>,
    /// Selected option values, as returned by the backend.
    #[serde(default)]
    pub options: Vec<serde_json::Value>,
}

/// One page of products, materialized from a single response.
///
/// Consume it with `into_iter()`; nothing is fetched lazily.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
}

impl ProductPage {
    /// Number of products on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether this page holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl IntoIterator for ProductPage {
    type Item = Product;
    type IntoIter = std::vec::IntoIter<Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.into_iter()
    }
}

/// Response envelopes.
#[derive(Debug, Deserialize)]
pub(crate) struct RegionsEnvelope {
    #[serde(default)]
    pub regions: Vec<Region>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DraftOrderEnvelope {
    pub draft_order: DraftOrder,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductEnvelope {
    pub product: Product,
}

/// Option name → selected value, used by variant payloads.
pub type OptionSelection = BTreeMap<String, String>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_draft_order_items() {
        let order: DraftOrder = serde_json::from_value(json!({
            "id": "order_1",
            "status": "draft",
            "email": "test@example.com",
            "items": [{"id": "item_1", "variant_id": "variant_1", "quantity": 2}]
        }))
        .unwrap();

        assert_eq!(order.status, DraftOrderStatus::Draft);
        assert_eq!(order.line_items().len(), 1);
        let item = order.item_for_variant(&VariantId::new("variant_1")).unwrap();
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_draft_order_nested_cart_items() {
        let order: DraftOrder = serde_json::from_value(json!({
            "id": "dorder_1",
            "status": "open",
            "cart": {"items": [{"id": "item_9", "variant_id": "variant_9", "quantity": 1}]}
        }))
        .unwrap();

        assert_eq!(order.status, DraftOrderStatus::Other("open".to_string()));
        assert_eq!(order.line_items()[0].id, LineItemId::new("item_9"));
    }

    #[test]
    fn test_draft_order_requires_status() {
        let result = serde_json::from_value::<DraftOrder>(json!({"id": "order_1"}));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("status"), "unexpected error: {err}");
    }

    #[test]
    fn test_product_option_values_accept_both_shapes() {
        let product: Product = serde_json::from_value(json!({
            "id": "prod_1",
            "title": "Shirt",
            "handle": "shirt",
            "options": [
                {"id": "opt_1", "title": "Size", "values": [{"id": "optval_1", "value": "M"}]},
                {"title": "Color", "values": ["Red", "Blue"]}
            ],
            "variants": [{"id": "variant_1", "title": "Medium", "options": []}]
        }))
        .unwrap();

        let sizes: Vec<_> = product.options[0].value_names().collect();
        assert_eq!(sizes, ["M"]);
        let colors: Vec<_> = product.options[1].value_names().collect();
        assert_eq!(colors, ["Red", "Blue"]);
        assert!(product.handle.unwrap().is_url_safe());
    }

    #[test]
    fn test_product_page_iterates_in_order() {
        let page: ProductPage = serde_json::from_value(json!({
            "products": [
                {"id": "prod_1", "title": "A"},
                {"id": "prod_2", "title": "B"}
            ],
            "count": 12,
            "offset": 0,
            "limit": 2
        }))
        .unwrap();

        assert_eq!(page.count, Some(12));
        let titles: Vec<_> = page.into_iter().map(|p| p.title).collect();
        assert_eq!(titles, ["A", "B"]);
    }

    #[test]
    fn test_product_page_with_unlisted_currency() {
        let page: ProductPage = serde_json::from_value(json!({
            "products": [{
                "id": "prod_1",
                "title": "Tea",
                "variants": [{
                    "id": "variant_1",
                    "prices": [
                        {"amount": 500, "currency_code": "jpy"},
                        {"amount": 5, "currency_code": "usd"}
                    ]
                }]
            }],
            "count": 1
        }))
        .unwrap();

        let prices = &page.products[0].variants[0].prices;
        assert_eq!(prices[0].currency_code.as_str(), "jpy");
        assert_eq!(prices[1].currency_code, storeprobe_core::CurrencyCode::Usd);
    }
}
