use crate::domain::cart::Quantity;
use crate::domain::product::ProductId;
use crate::error::{PosError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OrderAction {
    Add,
    Remove,
}

/// One row of an order script: `action, id, quantity`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct OrderLine {
    pub action: OrderAction,
    pub id: ProductId,
    pub quantity: Option<u32>,
}

impl OrderLine {
    /// Rows without a quantity mean one unit.
    pub fn quantity(&self) -> Result<Quantity> {
        self.quantity.map_or(Ok(Quantity::ONE), Quantity::new)
    }
}

/// Reads an order script from a CSV source.
///
/// Whitespace around fields is trimmed and the quantity column may be left out.
pub struct OrderReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OrderReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn lines(self) -> impl Iterator<Item = Result<OrderLine>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PosError::from))
    }
}
