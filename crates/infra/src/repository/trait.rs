use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use orderdesk_core::{CustomerId, OrderId, ProductId};
use orderdesk_parties::Customer;
use orderdesk_products::{CatalogEntry, QuantityUpdate};
use orderdesk_sales::{NewOrder, Order};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A write targeted a record that does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The backend could not serve the request (lock poisoned, connection lost).
    #[error("repository unavailable: {0}")]
    Unavailable(String),

    #[error("backend error: {0}")]
    Backend(String),
}

/// Resolves customers by id.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError>;
}

/// Reads catalog entries and writes back available quantities.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Entries for the ids that exist. Unknown ids are silently left out;
    /// an id listed twice yields one entry.
    async fn find_all_by_ids(&self, ids: &[ProductId]) -> Result<Vec<CatalogEntry>, RepositoryError>;

    /// Overwrite the available quantity of each listed entry.
    async fn update_quantities(&self, updates: Vec<QuantityUpdate>) -> Result<(), RepositoryError>;
}

/// Persists orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Store a new order, assigning its id and creation time.
    async fn create(&self, order: NewOrder) -> Result<Order, RepositoryError>;

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError>;

    async fn delete(&self, id: &OrderId) -> Result<(), RepositoryError>;
}

#[async_trait]
impl<S> CustomerDirectory for Arc<S>
where
    S: CustomerDirectory + ?Sized,
{
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        (**self).find_by_id(id).await
    }
}

#[async_trait]
impl<S> ProductCatalog for Arc<S>
where
    S: ProductCatalog + ?Sized,
{
    async fn find_all_by_ids(&self, ids: &[ProductId]) -> Result<Vec<CatalogEntry>, RepositoryError> {
        (**self).find_all_by_ids(ids).await
    }

    async fn update_quantities(&self, updates: Vec<QuantityUpdate>) -> Result<(), RepositoryError> {
        (**self).update_quantities(updates).await
    }
}

#[async_trait]
impl<S> OrderStore for Arc<S>
where
    S: OrderStore + ?Sized,
{
    async fn create(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        (**self).create(order).await
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        (**self).find_by_id(id).await
    }

    async fn delete(&self, id: &OrderId) -> Result<(), RepositoryError> {
        (**self).delete(id).await
    }
}
