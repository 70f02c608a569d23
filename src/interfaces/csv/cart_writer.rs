use crate::domain::cart::{Cart, format_amount};
use crate::domain::product::ProductId;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct CartRow<'a> {
    id: ProductId,
    nombre: &'a str,
    precio: String,
    quantity: u32,
    subtotal: String,
}

/// Writes the cart lines as CSV, in the order they were added.
pub struct CartWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CartWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(sink),
        }
    }

    pub fn write_cart(&mut self, cart: &Cart) -> Result<()> {
        self.writer
            .write_record(["id", "nombre", "precio", "quantity", "subtotal"])?;
        for line in cart.lines() {
            self.writer.serialize(CartRow {
                id: line.product.id,
                nombre: &line.product.nombre,
                precio: format_amount(line.product.precio.value()),
                quantity: line.quantity.get(),
                subtotal: format_amount(line.subtotal()),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::Quantity;
    use crate::domain::product::{Category, Price, Product};
    use rust_decimal_macros::dec;

    #[test]
    fn test_write_cart_lines() {
        let fresa = Product {
            id: ProductId(1),
            nombre: "Paleta Fresa".to_string(),
            precio: Price::new(dec!(2.5)).unwrap(),
            categoria: Category::Paletas,
            imagen: String::new(),
        };
        let cart = Cart::new().add(&fresa, Quantity::new(3).unwrap());

        let mut out = Vec::new();
        CartWriter::new(&mut out).write_cart(&cart).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "id,nombre,precio,quantity,subtotal\n1,Paleta Fresa,2.50,3,7.50\n"
        );
    }

    #[test]
    fn test_write_empty_cart() {
        let mut out = Vec::new();
        CartWriter::new(&mut out).write_cart(&Cart::new()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "id,nombre,precio,quantity,subtotal\n"
        );
    }
}
