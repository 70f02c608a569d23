use super::cart::Cart;
use crate::error::{PosError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Yape,
    Efectivo,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Yape => "yape",
            PaymentMethod::Efectivo => "efectivo",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = PosError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "yape" => Ok(PaymentMethod::Yape),
            "efectivo" => Ok(PaymentMethod::Efectivo),
            other => Err(PosError::ValidationError(format!(
                "Unknown payment method: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutState {
    #[default]
    Idle,
    PaymentSelection,
}

/// What was charged when a payment method was picked. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentOutcome {
    pub method: PaymentMethod,
    pub total: String,
    pub items: u32,
}

/// The payment dialog: `Idle` → `PaymentSelection` → `Idle`.
#[derive(Debug, Default)]
pub struct CheckoutFlow {
    state: CheckoutState,
}

impl CheckoutFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Opens the payment dialog. There is nothing to charge for an empty cart.
    pub fn open(&mut self, cart: &Cart) -> Result<()> {
        if cart.is_empty() {
            return Err(PosError::EmptyCart);
        }
        self.state = CheckoutState::PaymentSelection;
        Ok(())
    }

    /// Closes the dialog without paying.
    pub fn cancel(&mut self) {
        self.state = CheckoutState::Idle;
    }

    /// Settles the sale with `method`, emptying `cart` and closing the dialog.
    pub fn pay(&mut self, method: PaymentMethod, cart: &mut Cart) -> Result<PaymentOutcome> {
        if self.state != CheckoutState::PaymentSelection {
            return Err(PosError::InvalidState("payment dialog is not open"));
        }

        let settled = std::mem::take(cart);
        self.state = CheckoutState::Idle;

        Ok(PaymentOutcome {
            method,
            total: settled.total_price(),
            items: settled.item_count(),
        })
    }
}
