use crate::domain::draft::NewProductDraft;
use crate::domain::ports::CatalogGateway;
use crate::domain::product::{Price, Product, ProductId};
use crate::error::{PosError, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct CatalogState {
    visible: Vec<Product>,
    pending: Vec<Product>,
    stale_reads: u32,
    write_lag: u32,
    fail_reads: bool,
    fail_writes: bool,
    reads: u32,
    writes: u32,
}

/// A catalog held in process memory.
///
/// Clones share the same state, so a test can keep a handle after giving one
/// to a session. Failures and delayed visibility of writes can be switched on
/// to exercise the degraded paths.
#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<CatalogState>>,
}

impl InMemoryCatalog {
    /// Creates a new, empty in-memory catalog.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            state: Arc::new(RwLock::new(CatalogState {
                visible: products,
                ..Default::default()
            })),
        }
    }

    pub async fn set_fail_reads(&self, fail: bool) {
        self.state.write().await.fail_reads = fail;
    }

    pub async fn set_fail_writes(&self, fail: bool) {
        self.state.write().await.fail_writes = fail;
    }

    /// Newly created products stay invisible for the next `reads` fetches.
    pub async fn set_write_lag(&self, reads: u32) {
        self.state.write().await.write_lag = reads;
    }

    pub async fn replace_products(&self, products: Vec<Product>) {
        self.state.write().await.visible = products;
    }

    pub async fn reads(&self) -> u32 {
        self.state.read().await.reads
    }

    pub async fn writes(&self) -> u32 {
        self.state.read().await.writes
    }
}

#[async_trait]
impl CatalogGateway for InMemoryCatalog {
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        let mut state = self.state.write().await;
        state.reads += 1;
        if state.fail_reads {
            return Err(PosError::Status(503));
        }

        if state.stale_reads > 0 {
            state.stale_reads -= 1;
        } else {
            let pending = std::mem::take(&mut state.pending);
            state.visible.extend(pending);
        }
        Ok(state.visible.clone())
    }

    async fn create_product(&self, draft: &NewProductDraft) -> Result<()> {
        let mut state = self.state.write().await;
        state.writes += 1;
        if state.fail_writes {
            return Err(PosError::Status(500));
        }

        let precio = Decimal::from_str(draft.precio.trim())
            .map_err(|e| PosError::ValidationError(format!("Invalid price: {}", e)))?;
        let next_id = state
            .visible
            .iter()
            .chain(state.pending.iter())
            .map(|product| product.id.0)
            .max()
            .unwrap_or(0)
            + 1;
        let imagen = draft
            .imagen
            .as_ref()
            .map(|image| {
                format!(
                    "https://storage.googleapis.com/tingoheladosbucket/{}",
                    image.file_name
                )
            })
            .unwrap_or_default();

        let product = Product {
            id: ProductId(next_id),
            nombre: draft.nombre.clone(),
            precio: Price::new(precio)?,
            categoria: draft.categoria,
            imagen,
        };
        state.pending.push(product);
        state.stale_reads = state.write_lag;
        Ok(())
    }
}
