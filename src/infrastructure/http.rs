use crate::domain::draft::NewProductDraft;
use crate::domain::ports::CatalogGateway;
use crate::domain::product::Product;
use crate::error::{PosError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use serde_json::Value;
use tracing::{debug, warn};

const PRODUCTS_PATH: &str = "api/productos";

/// Catalog service reached over HTTP.
///
/// `GET /api/productos` returns the whole list as JSON and
/// `POST /api/productos` takes a multipart form. No timeout is configured and
/// nothing is retried.
#[derive(Clone)]
pub struct HttpCatalog {
    client: Client,
    endpoint: Url,
}

impl HttpCatalog {
    /// # Arguments
    ///
    /// * `base_url` - Scheme, host and port of the catalog service, e.g. `http://localhost:9000`.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let endpoint = format!("{}/{}", base_url.trim_end_matches('/'), PRODUCTS_PATH);
        let endpoint = Url::parse(&endpoint).map_err(|e| {
            PosError::ValidationError(format!("Invalid catalog URL {}: {}", base_url, e))
        })?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn ensure_success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(PosError::Status(status.as_u16()))
        }
    }

    fn form(draft: &NewProductDraft) -> Result<Form> {
        let mut form = Form::new()
            .text("nombre", draft.nombre.clone())
            .text("precio", draft.precio.clone())
            .text("categoria", draft.categoria.to_string());

        if let Some(image) = &draft.imagen {
            let part = Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone())
                .mime_str(image.content_type())?;
            form = form.part("imagen", part);
        }
        Ok(form)
    }
}

/// Decodes catalog entries one by one. An entry that is not a valid product
/// is logged and left out so the rest of the grid still shows.
fn decode_products(entries: Vec<Value>) -> Vec<Product> {
    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Product>(entry.clone()) {
            Ok(product) => Some(product),
            Err(e) => {
                warn!(error = %e, entry = %entry, "Skipping invalid catalog entry");
                None
            }
        })
        .collect()
}

#[async_trait]
impl CatalogGateway for HttpCatalog {
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        let response = self.client.get(self.endpoint.clone()).send().await?;
        let entries: Vec<Value> = Self::ensure_success(response)?.json().await?;
        let products = decode_products(entries);
        debug!(count = products.len(), "fetched catalog");
        Ok(products)
    }

    async fn create_product(&self, draft: &NewProductDraft) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(Self::form(draft)?)
            .send()
            .await?;
        let response = Self::ensure_success(response)?;
        debug!(status = %response.status(), nombre = %draft.nombre, "catalog accepted product");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_from_base_url() {
        let catalog = HttpCatalog::new("http://localhost:9000").unwrap();
        assert_eq!(
            catalog.endpoint().as_str(),
            "http://localhost:9000/api/productos"
        );

        let catalog = HttpCatalog::new("http://localhost:9000/").unwrap();
        assert_eq!(
            catalog.endpoint().as_str(),
            "http://localhost:9000/api/productos"
        );
    }

    #[test]
    fn test_invalid_entries_are_skipped() {
        let entries = vec![
            json!({"id": 1, "nombre": "Paleta Fresa", "precio": 2.5, "categoria": "paletas", "imagen": ""}),
            json!({"id": 2, "nombre": "Granizado", "precio": 3, "categoria": "granizados", "imagen": ""}),
            json!({"id": 3, "nombre": "Regalo", "precio": -1, "categoria": "crema", "imagen": ""}),
            json!("not a product"),
            json!({"id": 4, "nombre": "Helado Crema", "precio": 5, "categoria": "crema", "imagen": ""}),
        ];

        let products = decode_products(entries);

        let ids: Vec<u32> = products.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpCatalog::new("localhost"),
            Err(PosError::ValidationError(_))
        ));
    }
}
