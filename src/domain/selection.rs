use super::cart::Quantity;
use super::product::Product;

/// Pending quantity pick for a product that cannot be added in one tap.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantitySelector {
    product: Product,
    quantity: Quantity,
}

impl QuantitySelector {
    /// Opens the selector at one unit.
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: Quantity::ONE,
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn increment(&mut self) -> Quantity {
        self.quantity = self.quantity.saturating_add(Quantity::ONE);
        self.quantity
    }

    /// Never goes below one.
    pub fn decrement(&mut self) -> Quantity {
        self.quantity = Quantity::clamped(self.quantity.get().saturating_sub(1));
        self.quantity
    }

    pub fn set(&mut self, value: u32) -> Quantity {
        self.quantity = Quantity::clamped(value);
        self.quantity
    }

    pub fn into_parts(self) -> (Product, Quantity) {
        (self.product, self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::{Category, Price, ProductId};
    use rust_decimal_macros::dec;

    fn selector() -> QuantitySelector {
        QuantitySelector::new(Product {
            id: ProductId(2),
            nombre: "Helado Crema".to_string(),
            precio: Price::new(dec!(5.00)).unwrap(),
            categoria: Category::Crema,
            imagen: String::new(),
        })
    }

    #[test]
    fn test_starts_at_one() {
        assert_eq!(selector().quantity(), Quantity::ONE);
    }

    #[test]
    fn test_decrement_clamps_to_one() {
        let mut selector = selector();
        assert_eq!(selector.decrement(), Quantity::ONE);
        assert_eq!(selector.decrement(), Quantity::ONE);

        selector.increment();
        selector.increment();
        assert_eq!(selector.quantity().get(), 3);
        selector.decrement();
        selector.decrement();
        selector.decrement();
        assert_eq!(selector.quantity(), Quantity::ONE);
    }

    #[test]
    fn test_set_zero_clamps_to_one() {
        let mut selector = selector();
        assert_eq!(selector.set(0), Quantity::ONE);
        assert_eq!(selector.set(4).get(), 4);
    }
}
