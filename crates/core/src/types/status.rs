//! Order status and the tab partition used by the orders page.

use serde::{Deserialize, Serialize};

/// Order status as reported by the backend.
///
/// The client never moves an order between statuses; it only reflects the
/// value from the most recent fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Whether the order is still in progress (pending, processing, shipped).
    #[must_use]
    pub const fn is_current(self) -> bool {
        matches!(self, Self::Pending | Self::Processing | Self::Shipped)
    }

    /// Whether the order has reached a final state (delivered, cancelled).
    #[must_use]
    pub const fn is_past(self) -> bool {
        !self.is_current()
    }

    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("invalid order status: {s}"))
    }
}

/// Tabs on the orders page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderTab {
    /// Pending, processing and shipped orders.
    #[default]
    Current,
    /// Delivered and cancelled orders.
    Past,
    /// Every order regardless of status.
    All,
}

impl OrderTab {
    /// Whether an order with `status` belongs on this tab.
    #[must_use]
    pub const fn includes(self, status: OrderStatus) -> bool {
        match self {
            Self::Current => status.is_current(),
            Self::Past => status.is_past(),
            Self::All => true,
        }
    }

    /// Heading shown above the tab's list.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Current => "Current Orders",
            Self::Past => "Past Orders",
            Self::All => "All Orders",
        }
    }
}

impl std::fmt::Display for OrderTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Current => write!(f, "current"),
            Self::Past => write!(f, "past"),
            Self::All => write!(f, "all"),
        }
    }
}

impl std::str::FromStr for OrderTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "current" => Ok(Self::Current),
            "past" => Ok(Self::Past),
            "all" => Ok(Self::All),
            _ => Err(format!("invalid order tab: {s}")),
        }
    }
}
