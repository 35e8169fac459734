//! In-memory state held by an entity store.
//!
//! All reconciliation rules live here as plain synchronous methods so they
//! can be tested without a network.

use shopfront_core::Entity;

/// Store operations that can be in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchAll,
    FetchOne,
    Create,
    Update,
    Remove,
    Cancel,
    Return,
}

/// Snapshot of one entity store.
#[derive(Debug, Clone)]
pub struct StoreState<E: Entity> {
    items: Vec<E>,
    current: Option<E>,
    selected: Option<E::Id>,
    error: Option<String>,
    current_error: Option<String>,
    // Multiset: the same operation may be running more than once.
    in_flight: Vec<Operation>,
}

impl<E: Entity> Default for StoreState<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current: None,
            selected: None,
            error: None,
            current_error: None,
            in_flight: Vec::new(),
        }
    }
}

impl<E: Entity> StoreState<E> {
    /// The collection, in server order adjusted by local mutations.
    #[must_use]
    pub fn items(&self) -> &[E] {
        &self.items
    }

    /// Look up an element of the collection.
    #[must_use]
    pub fn get(&self, id: &E::Id) -> Option<&E> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// The record loaded by the last `fetch_one`.
    #[must_use]
    pub const fn current(&self) -> Option<&E> {
        self.current.as_ref()
    }

    /// The selected identifier, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<&E::Id> {
        self.selected.as_ref()
    }

    /// Why the last collection fetch failed, if it did.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Why the last single-record fetch failed, if it did.
    ///
    /// Kept apart from [`error`](Self::error) so a missing detail record
    /// never hides the list, and loading one never hides a list failure.
    #[must_use]
    pub fn current_error(&self) -> Option<&str> {
        self.current_error.as_deref()
    }

    /// Whether at least one `op` is in flight.
    #[must_use]
    pub fn is_busy(&self, op: Operation) -> bool {
        self.in_flight.contains(&op)
    }

    /// Whether any operation is in flight.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }

    pub(crate) fn begin(&mut self, op: Operation) {
        self.in_flight.push(op);
    }

    pub(crate) fn finish(&mut self, op: Operation) {
        if let Some(pos) = self.in_flight.iter().position(|o| *o == op) {
            self.in_flight.swap_remove(pos);
        }
    }

    /// Replace the collection wholesale.
    ///
    /// Drops the selection if the new collection no longer contains it and
    /// returns `true` in that case.
    pub(crate) fn replace_items(&mut self, items: Vec<E>) -> bool {
        self.items = items;
        let stale = self
            .selected
            .as_ref()
            .is_some_and(|id| !self.items.iter().any(|item| item.id() == id));
        if stale {
            self.selected = None;
        }
        stale
    }

    /// Empty the collection without touching the selection.
    pub(crate) fn clear_items(&mut self) {
        self.items.clear();
    }

    pub(crate) fn prepend(&mut self, item: E) {
        self.items.insert(0, item);
    }

    /// Replace the element with `id` and the current slot if it matches.
    ///
    /// Returns `true` if the collection held a matching element.
    pub(crate) fn replace(&mut self, id: &E::Id, item: E) -> bool {
        if self.current.as_ref().is_some_and(|c| c.id() == id) {
            self.current = Some(item.clone());
        }
        match self.items.iter_mut().find(|existing| existing.id() == id) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Remove exactly one element with `id`; clear current/selected if they match.
    ///
    /// Returns `true` if the selection was cleared.
    pub(crate) fn remove(&mut self, id: &E::Id) -> bool {
        if let Some(pos) = self.items.iter().position(|item| item.id() == id) {
            self.items.remove(pos);
        }
        if self.current.as_ref().is_some_and(|c| c.id() == id) {
            self.current = None;
        }
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
            return true;
        }
        false
    }

    pub(crate) fn set_current(&mut self, current: Option<E>) {
        self.current = current;
    }

    pub(crate) fn set_selected(&mut self, selected: Option<E::Id>) {
        self.selected = selected;
    }

    pub(crate) fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    pub(crate) fn clear_error(&mut self) {
        self.error = None;
    }

    pub(crate) fn set_current_error(&mut self, message: String) {
        self.current_error = Some(message);
    }

    pub(crate) fn clear_current_error(&mut self) {
        self.current_error = None;
    }
}

#[cfg(test)]
mod tests {
    use shopfront_core::define_id;

    use super::*;

    define_id!(ThingId);

    #[derive(Debug, Clone, PartialEq)]
    struct Thing {
        id: ThingId,
        label: &'static str,
    }

    impl Entity for Thing {
        type Id = ThingId;

        fn id(&self) -> &ThingId {
            &self.id
        }
    }

    fn thing(id: &str, label: &'static str) -> Thing {
        Thing {
            id: ThingId::new(id),
            label,
        }
    }

    fn ids(state: &StoreState<Thing>) -> Vec<&str> {
        state.items().iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_replace_items_keeps_server_order() {
        let mut state = StoreState::default();
        state.replace_items(vec![thing("b", "B"), thing("a", "A"), thing("c", "C")]);
        assert_eq!(ids(&state), vec!["b", "a", "c"]);

        state.replace_items(vec![thing("z", "Z")]);
        assert_eq!(ids(&state), vec!["z"]);
    }

    #[test]
    fn test_replace_items_drops_stale_selection() {
        let mut state = StoreState::default();
        state.set_selected(Some(ThingId::new("gone")));

        assert!(state.replace_items(vec![thing("a", "A")]));
        assert!(state.selected().is_none());
    }

    #[test]
    fn test_replace_items_keeps_valid_selection() {
        let mut state = StoreState::default();
        state.set_selected(Some(ThingId::new("a")));

        assert!(!state.replace_items(vec![thing("a", "A"), thing("b", "B")]));
        assert_eq!(state.selected(), Some(&ThingId::new("a")));
    }

    #[test]
    fn test_prepend_inserts_at_head() {
        let mut state = StoreState::default();
        state.replace_items(vec![thing("a", "A"), thing("b", "B")]);
        state.prepend(thing("new", "N"));

        assert_eq!(ids(&state), vec!["new", "a", "b"]);
    }

    #[test]
    fn test_replace_updates_item_and_current() {
        let mut state = StoreState::default();
        state.replace_items(vec![thing("a", "A"), thing("b", "B")]);
        state.set_current(Some(thing("b", "B")));

        assert!(state.replace(&ThingId::new("b"), thing("b", "B2")));
        assert_eq!(state.get(&ThingId::new("b")).map(|t| t.label), Some("B2"));
        assert_eq!(state.current().map(|t| t.label), Some("B2"));
        assert_eq!(ids(&state), vec!["a", "b"]);
    }

    #[test]
    fn test_replace_unknown_id_changes_nothing() {
        let mut state = StoreState::default();
        state.replace_items(vec![thing("a", "A")]);

        assert!(!state.replace(&ThingId::new("x"), thing("x", "X")));
        assert_eq!(ids(&state), vec!["a"]);
    }

    #[test]
    fn test_remove_exactly_one() {
        let mut state = StoreState::default();
        state.replace_items(vec![thing("a", "A"), thing("b", "B"), thing("c", "C")]);

        state.remove(&ThingId::new("b"));
        assert_eq!(ids(&state), vec!["a", "c"]);

        state.remove(&ThingId::new("missing"));
        assert_eq!(ids(&state), vec!["a", "c"]);
    }

    #[test]
    fn test_remove_clears_current_and_selected() {
        let mut state = StoreState::default();
        state.replace_items(vec![thing("a", "A"), thing("b", "B")]);
        state.set_current(Some(thing("a", "A")));
        state.set_selected(Some(ThingId::new("a")));

        assert!(state.remove(&ThingId::new("a")));
        assert!(state.current().is_none());
        assert!(state.selected().is_none());
    }

    #[test]
    fn test_remove_other_keeps_selection() {
        let mut state = StoreState::default();
        state.replace_items(vec![thing("a", "A"), thing("b", "B")]);
        state.set_selected(Some(ThingId::new("a")));

        assert!(!state.remove(&ThingId::new("b")));
        assert_eq!(state.selected(), Some(&ThingId::new("a")));
    }

    #[test]
    fn test_in_flight_is_a_multiset() {
        let mut state: StoreState<Thing> = StoreState::default();
        state.begin(Operation::Update);
        state.begin(Operation::Update);
        state.begin(Operation::FetchAll);

        state.finish(Operation::Update);
        assert!(state.is_busy(Operation::Update));
        state.finish(Operation::Update);
        assert!(!state.is_busy(Operation::Update));
        assert!(state.is_busy(Operation::FetchAll));

        state.finish(Operation::FetchAll);
        state.finish(Operation::FetchAll);
        assert!(state.is_idle());
    }

    #[test]
    fn test_clear_items_keeps_selection() {
        let mut state = StoreState::default();
        state.replace_items(vec![thing("a", "A")]);
        state.set_selected(Some(ThingId::new("a")));

        state.clear_items();
        assert!(state.items().is_empty());
        assert!(state.selected().is_some());
    }

    #[test]
    fn test_error_slots_are_independent() {
        let mut state: StoreState<Thing> = StoreState::default();
        state.set_error("List failed".to_string());
        state.set_current_error("Not found".to_string());

        state.clear_current_error();
        assert_eq!(state.error(), Some("List failed"));
        assert!(state.current_error().is_none());

        state.set_current_error("Not found".to_string());
        state.clear_error();
        assert_eq!(state.current_error(), Some("Not found"));
    }
}
