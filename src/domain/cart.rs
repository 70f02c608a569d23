use super::product::{Product, ProductId};
use crate::error::{PosError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// Number of units on a cart line. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Self = Self(1);

    pub fn new(value: u32) -> Result<Self> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(PosError::ValidationError(
                "Quantity must be positive".to_string(),
            ))
        }
    }

    /// Builds a quantity, raising anything below one to one.
    pub fn clamped(value: u32) -> Self {
        Self(value.max(1))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for Quantity {
    type Error = PosError;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One product and the number of units requested in the current sale.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: Quantity,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        self.product.precio.value() * Decimal::from(self.quantity.get())
    }
}

/// The lines of the sale in progress.
///
/// Holds at most one line per product id, kept in the order products were
/// first added. Updates consume the cart and return the next one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn quantity_of(&self, id: ProductId) -> Option<Quantity> {
        self.lines
            .iter()
            .find(|line| line.product.id == id)
            .map(|line| line.quantity)
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity.get()))
    }

    /// Merges `quantity` units of `product` into the cart.
    pub fn add(mut self, product: &Product, quantity: Quantity) -> Self {
        match self.lines.iter_mut().find(|line| line.product.id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine {
                product: product.clone(),
                quantity,
            }),
        }
        self
    }

    /// Drops the line for `id`. Unknown ids leave the cart as it was.
    pub fn remove(mut self, id: ProductId) -> Self {
        self.lines.retain(|line| line.product.id != id);
        self
    }

    /// Exact sum of every line subtotal.
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// The total as shown to the cashier: two decimal places, always.
    pub fn total_price(&self) -> String {
        format_amount(self.total())
    }
}

/// Renders a monetary amount with exactly two fractional digits.
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}
