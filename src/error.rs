use crate::domain::product::ProductId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PosError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Catalog responded with status {0}")]
    Status(u16),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Invalid state: {0}")]
    InvalidState(&'static str),
}

pub type Result<T> = std::result::Result<T, PosError>;
