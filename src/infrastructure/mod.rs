//! Adapters for the catalog port.

pub mod http;
pub mod in_memory;
