use crate::error::{PosError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Identifier assigned by the catalog service. Stable for the lifetime of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unit price of a product.
///
/// Wraps `rust_decimal::Decimal` and rejects negative values. On the wire
/// the catalog sends and expects a plain JSON number.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Price(Decimal);

impl Price {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self> {
        if value >= Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PosError::ValidationError(
                "Price must not be negative".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PosError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = rust_decimal::serde::float::deserialize(deserializer)?;
        Price::new(value).map_err(serde::de::Error::custom)
    }
}

/// How a product enters the cart when it is selected on the product grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPolicy {
    /// Added right away with a quantity of one.
    Direct,
    /// A quantity has to be picked before the line is added.
    QuantitySelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    #[default]
    Paletas,
    Crema,
    PorMayor,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Paletas, Category::Crema, Category::PorMayor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Paletas => "paletas",
            Category::Crema => "crema",
            Category::PorMayor => "porMayor",
        }
    }

    /// Scoopable items are sold in variable portions.
    pub fn entry_policy(&self) -> EntryPolicy {
        match self {
            Category::Crema => EntryPolicy::QuantitySelection,
            Category::Paletas | Category::PorMayor => EntryPolicy::Direct,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PosError;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| PosError::ValidationError(format!("Unknown category: {}", s)))
    }
}

/// A purchasable item as published by the catalog service.
///
/// Products are never mutated locally; a refresh replaces them wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub nombre: String,
    pub precio: Price,
    pub categoria: Category,
    pub imagen: String,
}
