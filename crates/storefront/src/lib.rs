//! Shopfront client library.
//!
//! Talks to the shop's REST backend for a signed-in customer and keeps the
//! results in observable [`store::EntityStore`]s that the [`views`] read.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod notify;
pub mod store;
pub mod views;

pub use api::ApiClient;
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use notify::{Notice, NoticeLevel, Notifier};
pub use store::{AddressStore, EntityStore, OrderStore, SelectionFile, StoreState};
