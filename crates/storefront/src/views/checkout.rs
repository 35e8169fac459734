//! Checkout step indicator.

use serde::{Deserialize, Serialize};

/// Steps of the checkout flow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    Cart,
    Shipping,
    Payment,
    Review,
}

impl CheckoutStep {
    pub const ALL: [Self; 4] = [Self::Cart, Self::Shipping, Self::Payment, Self::Review];

    /// Zero-based position in the flow.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cart => "Cart",
            Self::Shipping => "Shipping",
            Self::Payment => "Payment",
            Self::Review => "Review",
        }
    }

    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Cart => Some(Self::Shipping),
            Self::Shipping => Some(Self::Payment),
            Self::Payment => Some(Self::Review),
            Self::Review => None,
        }
    }

    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Cart => None,
            Self::Shipping => Some(Self::Cart),
            Self::Payment => Some(Self::Shipping),
            Self::Review => Some(Self::Payment),
        }
    }
}

impl std::str::FromStr for CheckoutStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|step| step.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("invalid checkout step: {s}"))
    }
}

/// How one step is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Complete,
    Active,
    Upcoming,
}

/// The indicator strip shown above every checkout page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepIndicator {
    pub active: CheckoutStep,
    pub steps: Vec<(CheckoutStep, StepState)>,
}

impl StepIndicator {
    #[must_use]
    pub fn new(active: CheckoutStep) -> Self {
        let steps = CheckoutStep::ALL
            .into_iter()
            .map(|step| {
                let state = match step.cmp(&active) {
                    std::cmp::Ordering::Less => StepState::Complete,
                    std::cmp::Ordering::Equal => StepState::Active,
                    std::cmp::Ordering::Greater => StepState::Upcoming,
                };
                (step, state)
            })
            .collect();
        Self { active, steps }
    }

    /// Completed share of the flow in whole percent (the active step counts as done).
    #[must_use]
    pub fn percent_complete(&self) -> u8 {
        let done = self.active.index() + 1;
        let total = CheckoutStep::ALL.len();
        u8::try_from(done * 100 / total).unwrap_or(100)
    }

    /// `[x] Cart > [*] Shipping > [ ] Payment > [ ] Review`
    #[must_use]
    pub fn render(&self) -> String {
        self.steps
            .iter()
            .map(|(step, state)| {
                let mark = match state {
                    StepState::Complete => "[x]",
                    StepState::Active => "[*]",
                    StepState::Upcoming => "[ ]",
                };
                format!("{mark} {}", step.label())
            })
            .collect::<Vec<_>>()
            .join(" > ")
    }
}
