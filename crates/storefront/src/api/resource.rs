//! REST resources an entity store can be generic over.
//!
//! Endpoints follow one naming scheme per resource:
//! `{singular}/get-{plural}`, `{singular}/get-{singular}/:id`,
//! `{singular}/create-{singular}`, `{singular}/update-{singular}/:id` and
//! `{singular}/delete-{singular}/:id`.

use serde::{Serialize, de::DeserializeOwned};
use shopfront_core::Entity;

use super::types::{Address, AddressInput, AddressPatch, Order, OrderInput, OrderPatch};

/// Identifier type of a resource's records.
pub type IdOf<R> = <<R as Resource>::Record as Entity>::Id;

/// A remote collection with CRUD endpoints.
pub trait Resource: Send + Sync + 'static {
    /// Record type held by the store.
    type Record: Entity + DeserializeOwned;
    /// Payload for `create`.
    type Create: Serialize + Send + Sync;
    /// Payload for `update`.
    type Update: Serialize + Send + Sync;

    /// Path segment and noun, e.g. `address`.
    const SINGULAR: &'static str;
    /// Plural noun, e.g. `addresses`.
    const PLURAL: &'static str;
    /// Capitalized noun used in notices, e.g. `Address`.
    const LABEL: &'static str;

    fn list_path() -> String {
        format!("{}/get-{}", Self::SINGULAR, Self::PLURAL)
    }

    fn get_path(id: &IdOf<Self>) -> String {
        action_path(Self::SINGULAR, "get", id.as_ref())
    }

    fn create_path() -> String {
        format!("{0}/create-{0}", Self::SINGULAR)
    }

    fn update_path(id: &IdOf<Self>) -> String {
        action_path(Self::SINGULAR, "update", id.as_ref())
    }

    fn delete_path(id: &IdOf<Self>) -> String {
        action_path(Self::SINGULAR, "delete", id.as_ref())
    }
}

/// `{singular}/{action}-{singular}/{id}` with the id percent-encoded.
pub(crate) fn action_path(singular: &str, action: &str, id: &str) -> String {
    format!("{singular}/{action}-{singular}/{}", urlencoding::encode(id))
}

/// The customer's address book.
#[derive(Debug, Clone, Copy)]
pub struct Addresses;

impl Resource for Addresses {
    type Record = Address;
    type Create = AddressInput;
    type Update = AddressPatch;

    const SINGULAR: &'static str = "address";
    const PLURAL: &'static str = "addresses";
    const LABEL: &'static str = "Address";
}

/// The customer's orders.
#[derive(Debug, Clone, Copy)]
pub struct Orders;

impl Resource for Orders {
    type Record = Order;
    type Create = OrderInput;
    type Update = OrderPatch;

    const SINGULAR: &'static str = "order";
    const PLURAL: &'static str = "orders";
    const LABEL: &'static str = "Order";
}

impl Orders {
    /// `PUT` endpoint that cancels an order.
    #[must_use]
    pub fn cancel_path(id: &IdOf<Self>) -> String {
        action_path(Self::SINGULAR, "cancel", id.as_ref())
    }

    /// `POST` endpoint that opens a return.
    #[must_use]
    pub fn return_path(id: &IdOf<Self>) -> String {
        action_path(Self::SINGULAR, "return", id.as_ref())
    }
}
