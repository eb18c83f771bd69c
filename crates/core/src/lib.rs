//! Storeprobe Core - Shared types library.
//!
//! This crate provides the domain types shared by the Storeprobe crates:
//! - `client` - Authenticated HTTP helpers for the commerce backend
//! - `integration-tests` - End-to-end scenarios against a live backend
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O and no HTTP clients. This
//! keeps it lightweight and usable from any test or helper.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, handles and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
