//! Confirmation gates for destructive actions.

use shopfront_core::{AddressId, OrderId};
use tracing::debug;

use crate::store::{AddressStore, OrderStore};

/// Asks the user to confirm an action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Result of a gated action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The user said no; nothing was sent.
    Declined,
    Succeeded,
    /// The store already announced the failure.
    Failed,
}

impl ActionOutcome {
    const fn from_success(ok: bool) -> Self {
        if ok { Self::Succeeded } else { Self::Failed }
    }
}

/// Cancel an order after the user confirms.
pub async fn cancel_order(
    store: &OrderStore,
    confirm: &impl Confirm,
    id: &OrderId,
) -> ActionOutcome {
    if !confirm.confirm("Are you sure you want to cancel this order?") {
        debug!(%id, "order cancel declined");
        return ActionOutcome::Declined;
    }
    ActionOutcome::from_success(store.cancel(id).await)
}

/// Delete an address after the user confirms.
pub async fn delete_address(
    store: &AddressStore,
    confirm: &impl Confirm,
    id: &AddressId,
) -> ActionOutcome {
    if !confirm.confirm("Are you sure you want to delete this address?") {
        debug!(%id, "address delete declined");
        return ActionOutcome::Declined;
    }
    ActionOutcome::from_success(store.remove(id).await)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_closure_confirm() {
        let asked = Cell::new(0);
        let gate = |prompt: &str| {
            asked.set(asked.get() + 1);
            prompt.contains("delete")
        };
        assert!(gate.confirm("Are you sure you want to delete this address?"));
        assert!(!gate.confirm("Are you sure you want to cancel this order?"));
        assert_eq!(asked.get(), 2);
    }

    #[test]
    fn test_outcome_from_success() {
        assert_eq!(ActionOutcome::from_success(true), ActionOutcome::Succeeded);
        assert_eq!(ActionOutcome::from_success(false), ActionOutcome::Failed);
    }
}
