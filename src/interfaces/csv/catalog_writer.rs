use crate::application::catalog::CatalogCache;
use crate::domain::cart::format_amount;
use crate::domain::product::{Category, ProductId};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct CatalogRow<'a> {
    id: ProductId,
    nombre: &'a str,
    precio: String,
    categoria: Category,
    imagen: &'a str,
}

/// Writes the product grid as CSV, tab by tab.
pub struct CatalogWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CatalogWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(sink),
        }
    }

    /// Writes every product of `category`, or all categories in tab order.
    /// Images outside the allow-list are left blank.
    pub fn write_catalog(&mut self, catalog: &CatalogCache, category: Option<Category>) -> Result<()> {
        self.writer
            .write_record(["id", "nombre", "precio", "categoria", "imagen"])?;

        let tabs: Vec<Category> = match category {
            Some(category) => vec![category],
            None => Category::ALL.to_vec(),
        };
        for tab in tabs {
            for product in catalog.by_category(tab) {
                self.writer.serialize(CatalogRow {
                    id: product.id,
                    nombre: &product.nombre,
                    precio: format_amount(product.precio.value()),
                    categoria: product.categoria,
                    imagen: catalog.image_for(product).unwrap_or(""),
                })?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}
