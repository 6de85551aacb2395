//! Product catalog domain module.
//!
//! A catalog entry is the price and available quantity of a product as the
//! catalog knows it. Orders read entries, snapshot their price, and write
//! back decremented quantities.

pub mod catalog;

pub use catalog::{CatalogEntry, QuantityUpdate};
