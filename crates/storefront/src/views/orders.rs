//! Orders page: current/past tabs over the order store.

use shopfront_core::{OrderId, OrderStatus, OrderTab};

use super::ListView;
use crate::api::Order;
use crate::store::StoreState;

/// One row of the orders table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    pub id: OrderId,
    pub number: String,
    pub status: OrderStatus,
    pub placed_on: String,
    pub items: u32,
    pub total: String,
    /// Whether the row offers a cancel button.
    pub can_cancel: bool,
    /// Whether the row offers a return button.
    pub can_return: bool,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            number: order.order_number.clone(),
            status: order.status,
            placed_on: order.created_at.format("%b %-d, %Y").to_string(),
            items: order.item_count(),
            total: order.total.display(),
            can_cancel: matches!(order.status, OrderStatus::Pending | OrderStatus::Processing),
            can_return: order.status == OrderStatus::Delivered && order.return_reason.is_none(),
        }
    }
}

impl OrderRow {
    /// Single-line rendering for terminals and logs.
    #[must_use]
    pub fn line(&self) -> String {
        format!(
            "{:<10} {:<11} {:<13} {:>3} item(s) {:>10}  [{}]",
            self.number,
            self.status.as_str(),
            self.placed_on,
            self.items,
            self.total,
            self.id
        )
    }
}

/// The orders page with one tab active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdersPage {
    pub tab: OrderTab,
    pub current_count: usize,
    pub past_count: usize,
    pub view: ListView<OrderRow>,
}

impl OrdersPage {
    #[must_use]
    pub fn build(state: &StoreState<Order>, tab: OrderTab) -> Self {
        let (current_count, past_count) =
            state
                .items()
                .iter()
                .fold((0, 0), |(current, past), order| {
                    if order.status.is_current() {
                        (current + 1, past)
                    } else {
                        (current, past + 1)
                    }
                });

        Self {
            tab,
            current_count,
            past_count,
            view: ListView::build(
                state,
                |order| tab.includes(order.status),
                |order| OrderRow::from(order),
            ),
        }
    }

    /// Text shown when the active tab has nothing in it.
    #[must_use]
    pub const fn empty_message(&self) -> &'static str {
        match self.tab {
            OrderTab::Current => "You have no orders in progress.",
            OrderTab::Past => "You have no past orders.",
            OrderTab::All => "You haven't placed any orders yet.",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use shopfront_core::{CurrencyCode, Price};

    use super::*;
    use crate::store::Operation;

    fn order(id: &str, status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(id),
            order_number: format!("#{id}"),
            status,
            items: Vec::new(),
            total: Price::from_minor(2_500, CurrencyCode::USD),
            created_at: Utc.with_ymd_and_hms(2026, 3, 7, 10, 0, 0).unwrap(),
            shipping_address: None,
            return_reason: None,
        }
    }

    fn ids(view: &ListView<OrderRow>) -> Vec<&str> {
        view.rows().iter().map(|row| row.id.as_str()).collect()
    }

    #[test]
    fn test_tabs_split_pending_and_delivered() {
        let mut state = StoreState::default();
        state.replace_items(vec![
            order("1", OrderStatus::Pending),
            order("2", OrderStatus::Delivered),
        ]);

        let current = OrdersPage::build(&state, OrderTab::Current);
        assert_eq!(current.tab.title(), "Current Orders");
        assert_eq!(ids(&current.view), vec!["1"]);

        let past = OrdersPage::build(&state, OrderTab::Past);
        assert_eq!(past.tab.title(), "Past Orders");
        assert_eq!(ids(&past.view), vec!["2"]);

        assert_eq!((current.current_count, current.past_count), (1, 1));
    }

    #[test]
    fn test_tab_preserves_server_order() {
        let mut state = StoreState::default();
        state.replace_items(vec![
            order("c", OrderStatus::Shipped),
            order("x", OrderStatus::Cancelled),
            order("a", OrderStatus::Pending),
            order("b", OrderStatus::Processing),
        ]);

        let page = OrdersPage::build(&state, OrderTab::Current);
        assert_eq!(ids(&page.view), vec!["c", "a", "b"]);

        let page = OrdersPage::build(&state, OrderTab::All);
        assert_eq!(ids(&page.view), vec!["c", "x", "a", "b"]);
    }

    #[test]
    fn test_empty_tab_is_empty_not_loading() {
        let mut state = StoreState::default();
        state.replace_items(vec![order("1", OrderStatus::Delivered)]);

        let page = OrdersPage::build(&state, OrderTab::Current);
        assert_eq!(page.view, ListView::Empty);
        assert_eq!(page.empty_message(), "You have no orders in progress.");
    }

    #[test]
    fn test_loading_and_error_variants() {
        let mut state: StoreState<Order> = StoreState::default();
        state.begin(Operation::FetchAll);
        assert_eq!(OrdersPage::build(&state, OrderTab::All).view, ListView::Loading);

        state.finish(Operation::FetchAll);
        state.set_error("Server unavailable".to_string());
        assert_eq!(
            OrdersPage::build(&state, OrderTab::All).view,
            ListView::Error("Server unavailable".to_string())
        );
    }

    #[test]
    fn test_row_actions_follow_status() {
        let row = OrderRow::from(&order("1", OrderStatus::Pending));
        assert!(row.can_cancel);
        assert!(!row.can_return);
        assert_eq!(row.total, "$25.00");
        assert_eq!(row.placed_on, "Mar 7, 2026");

        let row = OrderRow::from(&order("2", OrderStatus::Shipped));
        assert!(!row.can_cancel);

        let row = OrderRow::from(&order("3", OrderStatus::Delivered));
        assert!(row.can_return);

        let mut returned = order("4", OrderStatus::Delivered);
        returned.return_reason = Some("Too small".to_string());
        assert!(!OrderRow::from(&returned).can_return);
    }
}
