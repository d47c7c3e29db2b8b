//! Core types for Gemini Store.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;
pub mod role;

pub use cart::CartItem;
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use product::Product;
pub use role::{UserRole, UserRoleError};
