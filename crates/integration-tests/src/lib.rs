//! Integration tests for the Shopfront client.
//!
//! The tests run the real [`shopfront_client`] stores against
//! [`FakeBackend`], an in-process axum server that speaks the storefront
//! REST dialect (`{data, message}` envelopes, `_id` identifiers) and keeps
//! its collections in memory.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let backend = FakeBackend::spawn().await?;
//! backend.seed_address(address_json("a1", "Ada Lovelace"));
//!
//! let store = AddressStore::new(backend.client()?, FakeBackend::notifier());
//! assert_eq!(store.fetch_all().await.len(), 1);
//! ```

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, Method, StatusCode, header::AUTHORIZATION};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{Map, Value, json};
use shopfront_client::api::ApiClient;
use shopfront_client::notify::RecordingNotifier;
use shopfront_client::ClientConfig;
use tokio::net::TcpListener;
use uuid::Uuid;

/// Token the fake backend hands out to tests.
pub const TEST_TOKEN: &str = "test-session-7f3a";

/// How the backend answers every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    /// Serve normally.
    #[default]
    Normal,
    /// Reject every request with this status (401 or 403 for auth failures).
    Reject(u16, Option<String>),
}

/// One request the backend saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
}

#[derive(Debug, Default)]
struct Backend {
    addresses: Vec<Value>,
    orders: Vec<Value>,
    mode: Mode,
    seen: Vec<SeenRequest>,
}

type Shared = Arc<Mutex<Backend>>;

fn lock(shared: &Shared) -> MutexGuard<'_, Backend> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-process storefront backend bound to an ephemeral local port.
#[derive(Debug, Clone)]
pub struct FakeBackend {
    addr: SocketAddr,
    state: Shared,
}

impl FakeBackend {
    /// Start the server on `127.0.0.1:0`.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    #[allow(clippy::print_stderr)]
    pub async fn spawn() -> std::io::Result<Self> {
        let state = Shared::default();
        let app = Router::new().nest("/api", routes(state.clone()));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("fake backend stopped: {e}");
            }
        });

        Ok(Self { addr, state })
    }

    /// Base URL of the API, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Client configuration carrying [`TEST_TOKEN`].
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be parsed.
    pub fn config(&self) -> Result<ClientConfig, shopfront_client::ConfigError> {
        Ok(ClientConfig::new(&self.base_url())?.with_token(TEST_TOKEN))
    }

    /// An authenticated client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or the client cannot be built.
    pub fn client(&self) -> Result<ApiClient, Box<dyn std::error::Error + Send + Sync>> {
        Ok(ApiClient::new(&self.config()?)?)
    }

    /// A fresh notifier for a store under test.
    #[must_use]
    pub fn notifier() -> Arc<RecordingNotifier> {
        Arc::new(RecordingNotifier::new())
    }

    pub fn set_mode(&self, mode: Mode) {
        lock(&self.state).mode = mode;
    }

    pub fn seed_address(&self, address: Value) {
        lock(&self.state).addresses.push(address);
    }

    pub fn seed_order(&self, order: Value) {
        lock(&self.state).orders.push(order);
    }

    /// The backend's copy of an order.
    #[must_use]
    pub fn order(&self, id: &str) -> Option<Value> {
        find(&lock(&self.state).orders, id).cloned()
    }

    /// The backend's address collection.
    #[must_use]
    pub fn addresses(&self) -> Vec<Value> {
        lock(&self.state).addresses.clone()
    }

    /// Every request served so far, oldest first.
    #[must_use]
    pub fn seen(&self) -> Vec<SeenRequest> {
        lock(&self.state).seen.clone()
    }
}

/// A stored address as the backend serializes it.
#[must_use]
pub fn address_json(id: &str, full_name: &str) -> Value {
    json!({
        "_id": id,
        "fullName": full_name,
        "phone": "555-0100",
        "addressLine1": "10 Downing Street",
        "city": "London",
        "postalCode": "SW1A 2AA",
        "country": "GB",
        "isDefault": false,
    })
}

/// A stored order as the backend serializes it.
#[must_use]
pub fn order_json(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "orderNumber": format!("#{id}"),
        "status": status,
        "items": [
            { "productId": "p1", "name": "Tea Towel", "quantity": 2, "unitPrice": "7.50" }
        ],
        "total": { "amount": "15.00", "currencyCode": "GBP" },
        "createdAt": "2026-03-07T10:00:00Z",
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Routes
// ─────────────────────────────────────────────────────────────────────────────

fn routes(state: Shared) -> Router {
    Router::new()
        .route("/address/get-addresses", get(list_addresses))
        .route("/address/get-address/{id}", get(get_address))
        .route("/address/create-address", post(create_address))
        .route("/address/update-address/{id}", put(update_address))
        .route("/address/delete-address/{id}", delete(delete_address))
        .route("/order/get-orders", get(list_orders))
        .route("/order/get-order/{id}", get(get_order))
        .route("/order/create-order", post(create_order))
        .route("/order/update-order/{id}", put(update_order))
        .route("/order/delete-order/{id}", delete(delete_order))
        .route("/order/cancel-order/{id}", put(cancel_order))
        .route("/order/return-order/{id}", post(return_order))
        .layer(middleware::from_fn_with_state(state.clone(), gate))
        .with_state(state)
}

/// Record the request, then apply the configured [`Mode`].
async fn gate(State(state): State<Shared>, headers: HeaderMap, request: Request, next: Next) -> Response {
    let mode = {
        let mut backend = lock(&state);
        backend.seen.push(SeenRequest {
            method: request.method().clone(),
            path: request.uri().path().to_owned(),
            authorization: headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned),
        });
        backend.mode.clone()
    };

    match mode {
        Mode::Normal => next.run(request).await,
        Mode::Reject(code, message) => {
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(json!({ "message": message }))).into_response()
        }
    }
}

fn envelope(data: Value, message: Option<&str>) -> Response {
    Json(json!({ "data": data, "message": message })).into_response()
}

fn not_found(label: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("{label} not found") })),
    )
        .into_response()
}

fn find<'a>(items: &'a [Value], id: &str) -> Option<&'a Value> {
    items.iter().find(|item| item["_id"] == id)
}

fn find_mut<'a>(items: &'a mut [Value], id: &str) -> Option<&'a mut Value> {
    items.iter_mut().find(|item| item["_id"] == id)
}

/// Shallow-merge `patch` into `target`.
fn merge(target: &mut Value, patch: Value) {
    if let (Some(target), Value::Object(patch)) = (target.as_object_mut(), patch) {
        target.extend(patch);
    }
}

fn with_new_id(body: Value) -> Value {
    let mut record = match body {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    record.insert("_id".to_owned(), Value::String(Uuid::new_v4().simple().to_string()));
    Value::Object(record)
}

async fn list_addresses(State(state): State<Shared>) -> Response {
    envelope(Value::Array(lock(&state).addresses.clone()), None)
}

async fn get_address(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    match find(&lock(&state).addresses, &id) {
        Some(address) => envelope(address.clone(), None),
        None => not_found("Address"),
    }
}

async fn create_address(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let address = with_new_id(body);
    lock(&state).addresses.push(address.clone());
    envelope(address, Some("Address added successfully"))
}

async fn update_address(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Response {
    let mut backend = lock(&state);
    match find_mut(&mut backend.addresses, &id) {
        Some(address) => {
            merge(address, patch);
            envelope(address.clone(), None)
        }
        None => not_found("Address"),
    }
}

async fn delete_address(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let mut backend = lock(&state);
    let before = backend.addresses.len();
    backend.addresses.retain(|address| address["_id"] != id.as_str());
    if backend.addresses.len() == before {
        return not_found("Address");
    }
    envelope(Value::Null, Some("Address removed"))
}

async fn list_orders(State(state): State<Shared>) -> Response {
    envelope(Value::Array(lock(&state).orders.clone()), None)
}

async fn get_order(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    match find(&lock(&state).orders, &id) {
        Some(order) => envelope(order.clone(), None),
        None => not_found("Order"),
    }
}

async fn create_order(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut backend = lock(&state);
    let number = backend.orders.len() + 1001;
    let mut order = with_new_id(json!({
        "orderNumber": format!("#{number}"),
        "status": "pending",
        "items": [],
        "total": { "amount": "0.00", "currencyCode": "USD" },
        "createdAt": "2026-10-01T09:30:00Z",
    }));
    merge(&mut order, json!({ "shippingAddressId": body["shippingAddressId"].clone() }));
    backend.orders.insert(0, order.clone());
    envelope(order, Some("Order placed"))
}

async fn update_order(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Response {
    let mut backend = lock(&state);
    match find_mut(&mut backend.orders, &id) {
        Some(order) => {
            merge(order, patch);
            envelope(order.clone(), None)
        }
        None => not_found("Order"),
    }
}

async fn delete_order(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let mut backend = lock(&state);
    let before = backend.orders.len();
    backend.orders.retain(|order| order["_id"] != id.as_str());
    if backend.orders.len() == before {
        return not_found("Order");
    }
    envelope(Value::Null, None)
}

async fn cancel_order(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let mut backend = lock(&state);
    match find_mut(&mut backend.orders, &id) {
        Some(order) if matches!(order["status"].as_str(), Some("pending" | "processing")) => {
            order["status"] = json!("cancelled");
            envelope(order.clone(), Some("Order cancelled"))
        }
        Some(_) => (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Order can no longer be cancelled" })),
        )
            .into_response(),
        None => not_found("Order"),
    }
}

async fn return_order(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = lock(&state);
    match find_mut(&mut backend.orders, &id) {
        Some(order) => {
            order["returnReason"] = body["reason"].clone();
            envelope(order.clone(), None)
        }
        None => not_found("Order"),
    }
}
