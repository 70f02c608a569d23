use crate::config::RemotePattern;
use crate::domain::ports::{CatalogGateway, CatalogGatewayBox};
use crate::domain::product::{Category, Product, ProductId};
use crate::error::Result;
use tracing::{info, warn};

/// In-memory copy of the catalog behind the product grid.
///
/// `refresh` replaces the whole list when the gateway answers and leaves it
/// untouched otherwise. It does not care whether it runs for the first load or
/// after a product was created.
pub struct CatalogCache {
    gateway: CatalogGatewayBox,
    images: RemotePattern,
    products: Vec<Product>,
}

impl CatalogCache {
    pub fn new(gateway: CatalogGatewayBox, images: RemotePattern) -> Self {
        Self {
            gateway,
            images,
            products: Vec::new(),
        }
    }

    /// Fetches the full list and swaps it in. Returns the number of products now held.
    pub async fn refresh(&mut self) -> Result<usize> {
        let products = self.gateway.fetch_products().await?;

        for product in products.iter().filter(|p| !self.images.permits(&p.imagen)) {
            warn!(
                id = %product.id,
                imagen = %product.imagen,
                "image outside the allowed pattern, hiding it"
            );
        }

        self.products = products;
        info!(count = self.products.len(), "catalog refreshed");
        Ok(self.products.len())
    }

    pub fn gateway(&self) -> &dyn CatalogGateway {
        self.gateway.as_ref()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// One tab of the product grid, in catalog order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .filter(move |product| product.categoria == category)
    }

    /// The image URL to display, if it is on the allow-list.
    pub fn image_for<'a>(&self, product: &'a Product) -> Option<&'a str> {
        self.images
            .permits(&product.imagen)
            .then_some(product.imagen.as_str())
    }
}
