//! Domain types for the point of sale: products, the cart, the quantity
//! selector, the checkout dialog and the catalog port.

pub mod cart;
pub mod checkout;
pub mod draft;
pub mod ports;
pub mod product;
pub mod selection;
