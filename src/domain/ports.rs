use super::draft::NewProductDraft;
use super::product::Product;
use crate::error::Result;
use async_trait::async_trait;

/// The external service that owns the product catalog.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Reads the full product list.
    async fn fetch_products(&self) -> Result<Vec<Product>>;
    /// Submits a new product. Success says nothing about when it becomes readable.
    async fn create_product(&self, draft: &NewProductDraft) -> Result<()>;
}

pub type CatalogGatewayBox = Box<dyn CatalogGateway>;
