//! View models.
//!
//! Views read a [`StoreState`] snapshot and decide which variant to render.
//! They hold no server data of their own and never call the API directly;
//! user actions go through the store (destructive ones behind a [`Confirm`]
//! gate).

pub mod addresses;
pub mod checkout;
pub mod confirm;
pub mod orders;

pub use addresses::{AddressBookView, AddressCard};
pub use checkout::{CheckoutStep, StepIndicator, StepState};
pub use confirm::{ActionOutcome, Confirm, cancel_order, delete_address};
pub use orders::{OrderRow, OrdersPage};

use shopfront_core::Entity;

use crate::store::{Operation, StoreState};

/// What a list view should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView<T> {
    /// First fetch still running and nothing to show yet.
    Loading,
    /// The last fetch failed; show this instead of content.
    Error(String),
    /// Nothing to list.
    Empty,
    /// Rows to render, in order.
    Populated(Vec<T>),
}

impl<T> ListView<T> {
    /// Pick a variant for `state`, keeping only items that pass `keep` and
    /// mapping them into rows.
    pub fn build<E, F, M>(state: &StoreState<E>, keep: F, map: M) -> Self
    where
        E: Entity,
        F: Fn(&E) -> bool,
        M: Fn(&E) -> T,
    {
        if let Some(message) = state.error() {
            return Self::Error(message.to_string());
        }

        let rows: Vec<T> = state.items().iter().filter(|e| keep(e)).map(map).collect();
        if !rows.is_empty() {
            return Self::Populated(rows);
        }

        if state.is_busy(Operation::FetchAll) && state.items().is_empty() {
            Self::Loading
        } else {
            Self::Empty
        }
    }

    /// Rows if populated, else an empty slice.
    #[must_use]
    pub fn rows(&self) -> &[T] {
        match self {
            Self::Populated(rows) => rows,
            _ => &[],
        }
    }
}

impl<E: Entity> ListView<E> {
    /// Every item of `state`, unchanged.
    #[must_use]
    pub fn from_state(state: &StoreState<E>) -> Self {
        Self::build(state, |_| true, Clone::clone)
    }
}
