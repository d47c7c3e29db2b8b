//! Gemini Store Core - Shared types library.
//!
//! This crate provides the domain types used across all Gemini Store components:
//! - `storefront` - The demo shop service (catalog, cart, admin editing)
//! - `cli` - Command-line tools for previewing generated catalogs
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no state.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, prices, roles, products, and cart items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
