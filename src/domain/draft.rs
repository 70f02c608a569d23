use super::product::{Category, Product};
use crate::error::Result;
use std::path::Path;

/// An image file attached to a product submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Reads the whole file into memory, keeping its file name for the upload.
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "imagen".to_string());
        Ok(Self { file_name, bytes })
    }

    /// Content type guessed from the file extension.
    pub fn content_type(&self) -> &'static str {
        let extension = Path::new(&self.file_name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase());

        match extension.as_deref() {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            Some("gif") => "image/gif",
            _ => "application/octet-stream",
        }
    }
}

/// Form input for a new catalog product, not yet submitted.
///
/// The price stays as typed; the catalog service is the one that interprets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProductDraft {
    pub nombre: String,
    pub precio: String,
    pub categoria: Category,
    pub imagen: Option<ImageUpload>,
}

impl NewProductDraft {
    pub fn new(nombre: impl Into<String>, precio: impl Into<String>, categoria: Category) -> Self {
        Self {
            nombre: nombre.into(),
            precio: precio.into(),
            categoria,
            imagen: None,
        }
    }

    pub fn with_image(mut self, image: ImageUpload) -> Self {
        self.imagen = Some(image);
        self
    }

    /// Whether `product` looks like the catalog's copy of this draft.
    pub fn describes(&self, product: &Product) -> bool {
        product.nombre == self.nombre && product.categoria == self.categoria
    }

    /// Back to an empty form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
