//! Randomized test data.
//!
//! Every generated title and email embeds the current time in milliseconds
//! plus a random 32-bit hex suffix, so fixtures created by tests running in
//! parallel do not collide.

use serde::Serialize;
use storeprobe_core::{CurrencyCode, Price};

use crate::types::OptionSelection;

/// Option name used by the canonical fixture.
pub const FIXTURE_OPTION: &str = "Size";
/// Option value used by the canonical fixture.
pub const FIXTURE_OPTION_VALUE: &str = "M";
/// Variant title used by the canonical fixture.
pub const FIXTURE_VARIANT_TITLE: &str = "Medium";
/// Variant price used by the canonical fixture, in the currency's standard unit.
pub const FIXTURE_PRICE_AMOUNT: i64 = 1000;

/// Body for `POST /admin/products`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
    pub title: String,
    pub options: Vec<OptionPayload>,
    pub variants: Vec<VariantPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
}

/// Option definition in a creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionPayload {
    pub title: String,
    pub values: Vec<String>,
}

impl OptionPayload {
    /// Build an option from a name and its allowed values.
    #[must_use]
    pub fn new(title: impl Into<String>, values: &[&str]) -> Self {
        Self {
            title: title.into(),
            values: values.iter().map(|v| (*v).to_string()).collect(),
        }
    }
}

/// Variant definition in a creation payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantPayload {
    pub title: String,
    pub prices: Vec<Price>,
    pub options: OptionSelection,
}

/// Top-level fields to replace on the generated fixture.
///
/// Each `Some` replaces the whole field; nested values are not merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductOverrides {
    pub title: Option<String>,
    pub options: Option<Vec<OptionPayload>>,
    pub variants: Option<Vec<VariantPayload>>,
    pub handle: Option<String>,
}

impl ProductOverrides {
    /// Overrides that only replace the title.
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

/// Build a minimal valid product with a unique title.
///
/// The base shape is one `Size` option with value `M` and one `Medium`
/// variant priced 1000 USD.
#[must_use]
pub fn generate_product(overrides: ProductOverrides) -> ProductPayload {
    let base = ProductPayload {
        title: format!("Test Product {}", unique_suffix()),
        options: vec![OptionPayload::new(FIXTURE_OPTION, &[FIXTURE_OPTION_VALUE])],
        variants: vec![VariantPayload {
            title: FIXTURE_VARIANT_TITLE.to_string(),
            prices: vec![Price::whole(FIXTURE_PRICE_AMOUNT, CurrencyCode::Usd)],
            options: OptionSelection::from([(
                FIXTURE_OPTION.to_string(),
                FIXTURE_OPTION_VALUE.to_string(),
            )]),
        }],
        handle: None,
    };

    ProductPayload {
        title: overrides.title.unwrap_or(base.title),
        options: overrides.options.unwrap_or(base.options),
        variants: overrides.variants.unwrap_or(base.variants),
        handle: overrides.handle.or(base.handle),
    }
}

/// A fresh address for draft orders, e.g. `test-1700000000000-1a2b3c4d@example.com`.
#[must_use]
pub fn unique_email() -> String {
    format!("test-{}@example.com", unique_suffix())
}

/// `<millis>-<8 hex chars>`.
fn unique_suffix() -> String {
    format!(
        "{}-{:08x}",
        chrono::Utc::now().timestamp_millis(),
        rand::random::<u32>()
    )
}
