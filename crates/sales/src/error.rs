//! Order validation failures.

use thiserror::Error;

use orderdesk_core::{CustomerId, ProductId};

/// Why an order request was rejected.
///
/// Every variant is raised before anything is written. Only the first
/// offending item (in request order) is ever reported.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("customer {0} not found")]
    CustomerNotFound(CustomerId),

    /// None of the requested products exist (also raised for an empty request).
    #[error("no products found")]
    NoProductsFound,

    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// `available` is the quantity on hand, not the shortfall.
    #[error("product {product_id} does not have enough quantity ({available} available)")]
    InsufficientStock { product_id: ProductId, available: u32 },

    #[error("quantity for product {0} must be positive")]
    InvalidQuantity(ProductId),
}

impl OrderError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            OrderError::CustomerNotFound(_) => "customer_not_found",
            OrderError::NoProductsFound => "no_products_found",
            OrderError::ProductNotFound(_) => "product_not_found",
            OrderError::InsufficientStock { .. } => "insufficient_stock",
            OrderError::InvalidQuantity(_) => "invalid_quantity",
        }
    }
}
