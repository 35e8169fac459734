//! Order-only store actions.

use reqwest::Method;
use shopfront_core::{OrderId, OrderTab};
use tracing::instrument;

use super::{EntityStore, Operation};
use crate::api::{Order, Orders, ReturnRequest};

impl EntityStore<Orders> {
    /// Ask the backend to cancel an order.
    ///
    /// The local copy keeps its old status; re-fetch to see the new one.
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn cancel(&self, id: &OrderId) -> bool {
        let _busy = self.track(Operation::Cancel);

        match self
            .client
            .request::<(), serde_json::Value>(Method::PUT, &Orders::cancel_path(id), None)
            .await
        {
            Ok(response) => {
                self.report_success(response.message, "cancelled");
                true
            }
            Err(err) => {
                self.report_failure("cancel", &err);
                false
            }
        }
    }

    /// Open a return for an order.
    ///
    /// Like [`cancel`](Self::cancel), this does not touch the local copy.
    #[instrument(skip(self, id, reason), fields(id = %id))]
    pub async fn request_return(&self, id: &OrderId, reason: &str) -> bool {
        let _busy = self.track(Operation::Return);

        let body = ReturnRequest {
            reason: reason.to_owned(),
        };
        match self
            .client
            .post::<_, serde_json::Value>(&Orders::return_path(id), &body)
            .await
        {
            Ok(response) => {
                self.report_success(response.message, "return requested");
                true
            }
            Err(err) => {
                self.report_failure("request a return for", &err);
                false
            }
        }
    }

    /// Orders on `tab`, in collection order.
    #[must_use]
    pub fn orders_in(&self, tab: OrderTab) -> Vec<Order> {
        self.state
            .borrow()
            .items()
            .iter()
            .filter(|order| tab.includes(order.status))
            .cloned()
            .collect()
    }
}
