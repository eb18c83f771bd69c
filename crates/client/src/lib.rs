//! Storeprobe Client - authenticated helpers for the commerce backend API.
//!
//! A thin convenience layer over HTTP used by the end-to-end tests:
//!
//! - [`auth`] - email/password to bearer token exchange
//! - [`client`] - [`MedusaClient`], authenticated and public request dispatch
//! - [`cart`] - draft-order (cart) lifecycle
//! - [`products`] - product creation, lookup and listing
//! - [`fixtures`] - randomized, collision-resistant test data
//!
//! # Example
//!
//! ```rust,no_run
//! use std::num::NonZeroU32;
//!
//! use storeprobe_client::{HarnessConfig, MedusaClient, ProductOverrides};
//!
//! # async fn run() -> Result<(), storeprobe_client::HarnessError> {
//! let client = MedusaClient::new(HarnessConfig::from_env()?)?;
//!
//! let product = client.create_product(ProductOverrides::default()).await?;
//! let variant = &product.variants[0].id;
//! let cart = client.create_cart_with_item(variant, NonZeroU32::MIN).await?;
//! assert_eq!(cart.cart.line_items().len(), 1);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod cart;
pub mod client;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod products;
pub mod types;

pub use auth::AdminToken;
pub use cart::CartWithItem;
pub use client::MedusaClient;
pub use config::{AdminCredentials, ConfigError, HarnessConfig, TokenPolicy};
pub use error::{HarnessError, Result};
pub use fixtures::{OptionPayload, ProductOverrides, ProductPayload, VariantPayload, generate_product};
pub use products::{AdminProductQuery, StoreProductQuery};
pub use types::{DraftOrder, LineItem, Product, ProductPage, Region};
