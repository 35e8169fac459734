//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod entity;
pub mod id;
pub mod price;
pub mod status;

pub use entity::Entity;
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use status::*;
