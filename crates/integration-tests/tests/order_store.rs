//! Order store against the fake backend.

use axum::http::Method;
use shopfront_client::api::{OrderInput, OrderItemInput, OrderPatch};
use shopfront_client::notify::Notice;
use shopfront_client::views::{ActionOutcome, ListView, OrdersPage, cancel_order};
use shopfront_client::OrderStore;
use shopfront_core::{AddressId, OrderId, OrderStatus, OrderTab, ProductId};
use shopfront_integration_tests::{FakeBackend, Mode, order_json};

async fn backend_with(orders: &[(&str, &str)]) -> FakeBackend {
    let backend = FakeBackend::spawn().await.expect("Failed to start backend");
    for (id, status) in orders {
        backend.seed_order(order_json(id, status));
    }
    backend
}

fn page_ids(page: &OrdersPage) -> Vec<&str> {
    page.view.rows().iter().map(|row| row.id.as_str()).collect()
}

#[tokio::test]
async fn test_current_and_past_tabs() {
    let backend = backend_with(&[("1", "pending"), ("2", "delivered")]).await;
    let store = OrderStore::new(backend.client().expect("client"), FakeBackend::notifier());

    store.fetch_all().await;
    let state = store.snapshot();

    let current = OrdersPage::build(&state, OrderTab::Current);
    assert_eq!(current.tab.title(), "Current Orders");
    assert_eq!(page_ids(&current), vec!["1"]);

    let past = OrdersPage::build(&state, OrderTab::Past);
    assert_eq!(past.tab.title(), "Past Orders");
    assert_eq!(page_ids(&past), vec!["2"]);

    assert_eq!(store.orders_in(OrderTab::All).len(), 2);
}

#[tokio::test]
async fn test_orders_decode_wire_shape() {
    let backend = backend_with(&[("9", "shipped")]).await;
    let store = OrderStore::new(backend.client().expect("client"), FakeBackend::notifier());

    let orders = store.fetch_all().await;
    let order = &orders[0];
    assert_eq!(order.order_number, "#9");
    assert_eq!(order.status, OrderStatus::Shipped);
    assert_eq!(order.item_count(), 2);
    assert_eq!(order.total.display(), "£15.00");
}

#[tokio::test]
async fn test_unauthorized_orders_page_is_empty() {
    let backend = backend_with(&[("1", "pending")]).await;
    backend.set_mode(Mode::Reject(403, None));
    let notifier = FakeBackend::notifier();
    let store = OrderStore::new(backend.client().expect("client"), notifier.clone());

    store.fetch_all().await;

    let page = OrdersPage::build(&store.snapshot(), OrderTab::Current);
    assert_eq!(page.view, ListView::Empty);
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn test_cancel_leaves_local_status_until_refetch() {
    let backend = backend_with(&[("1", "pending")]).await;
    let notifier = FakeBackend::notifier();
    let store = OrderStore::new(backend.client().expect("client"), notifier.clone());
    store.fetch_all().await;

    assert!(store.cancel(&OrderId::new("1")).await);

    let last = backend.seen().pop().expect("request");
    assert_eq!(last.method, Method::PUT);
    assert_eq!(last.path, "/order/cancel-order/1");
    assert_eq!(notifier.notices(), vec![Notice::success("Order cancelled")]);

    // The store does not guess the new status.
    assert_eq!(store.items()[0].status, OrderStatus::Pending);
    assert_eq!(
        backend.order("1").expect("order")["status"],
        "cancelled"
    );

    store.fetch_all().await;
    assert_eq!(store.items()[0].status, OrderStatus::Cancelled);
    assert_eq!(store.orders_in(OrderTab::Past).len(), 1);
}

#[tokio::test]
async fn test_cancel_rejected_by_backend() {
    let backend = backend_with(&[("1", "shipped")]).await;
    let notifier = FakeBackend::notifier();
    let store = OrderStore::new(backend.client().expect("client"), notifier.clone());

    assert!(!store.cancel(&OrderId::new("1")).await);
    assert_eq!(
        notifier.notices(),
        vec![Notice::error("Order can no longer be cancelled")]
    );
    // Mutation failures do not set the fetch error slot.
    assert!(store.snapshot().error().is_none());
}

#[tokio::test]
async fn test_request_return_posts_reason() {
    let backend = backend_with(&[("1", "delivered")]).await;
    let notifier = FakeBackend::notifier();
    let store = OrderStore::new(backend.client().expect("client"), notifier.clone());
    store.fetch_all().await;

    assert!(store.request_return(&OrderId::new("1"), "Wrong size").await);

    let last = backend.seen().pop().expect("request");
    assert_eq!(last.method, Method::POST);
    assert_eq!(last.path, "/order/return-order/1");
    assert_eq!(
        backend.order("1").expect("order")["returnReason"],
        "Wrong size"
    );
    // No server message, so the default wording is used.
    assert_eq!(
        notifier.notices(),
        vec![Notice::success("Order return requested")]
    );
    assert_eq!(store.items()[0].return_reason, None);
}

#[tokio::test]
async fn test_declined_cancel_sends_nothing() {
    let backend = backend_with(&[("1", "pending")]).await;
    let notifier = FakeBackend::notifier();
    let store = OrderStore::new(backend.client().expect("client"), notifier.clone());

    let outcome = cancel_order(&store, &|_: &str| false, &OrderId::new("1")).await;

    assert_eq!(outcome, ActionOutcome::Declined);
    assert!(backend.seen().is_empty());
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn test_confirmed_cancel_reports_failure() {
    let backend = backend_with(&[("1", "delivered")]).await;
    let store = OrderStore::new(backend.client().expect("client"), FakeBackend::notifier());

    let outcome = cancel_order(&store, &|_: &str| true, &OrderId::new("1")).await;
    assert_eq!(outcome, ActionOutcome::Failed);
}

#[tokio::test]
async fn test_create_update_and_delete_order() {
    let backend = backend_with(&[("1", "delivered")]).await;
    let notifier = FakeBackend::notifier();
    let store = OrderStore::new(backend.client().expect("client"), notifier.clone());
    store.fetch_all().await;

    let input = OrderInput {
        items: vec![OrderItemInput {
            product_id: ProductId::new("p1"),
            quantity: 1,
        }],
        shipping_address_id: AddressId::new("a1"),
    };
    let created = store.create(&input).await.expect("created");
    assert_eq!(store.items()[0], created);
    assert_eq!(created.status, OrderStatus::Pending);
    assert_eq!(notifier.take(), vec![Notice::success("Order placed")]);

    let patch = OrderPatch {
        note: Some("Leave at the door".to_string()),
        ..OrderPatch::default()
    };
    store.update(&created.id, &patch).await.expect("updated");
    assert_eq!(store.items().len(), 2);
    assert_eq!(notifier.take(), vec![Notice::success("Order updated")]);

    assert!(store.remove(&created.id).await);
    assert_eq!(store.items().len(), 1);
    assert_eq!(notifier.take(), vec![Notice::success("Order deleted")]);

    // Unknown id: unchanged.
    assert!(!store.remove(&OrderId::new("missing")).await);
    assert_eq!(store.items().len(), 1);
}
