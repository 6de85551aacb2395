//! Repository capabilities consumed by the order workflow.
//!
//! The workflow only sees these traits; backends (in-memory here, anything
//! else behind the same traits) are picked by the composition root.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::{InMemoryCustomerDirectory, InMemoryOrderStore, InMemoryProductCatalog};
pub use r#trait::{CustomerDirectory, OrderStore, ProductCatalog, RepositoryError};
