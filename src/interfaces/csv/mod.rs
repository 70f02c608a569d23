pub mod cart_writer;
pub mod catalog_writer;
pub mod order_reader;
