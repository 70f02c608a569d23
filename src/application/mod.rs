//! Application layer tying the catalog, the cart and checkout together.
//!
//! `CatalogCache` keeps the product list in sync with the catalog service and
//! `PosSession` drives one till's interactions on top of it.

pub mod catalog;
pub mod session;
