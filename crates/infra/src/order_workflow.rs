//! Order creation pipeline (application-level orchestration).
//!
//! `CreateOrderWorkflow` drives the pure planning rules from
//! `orderdesk-sales` against the three repository capabilities:
//!
//! ```text
//! OrderRequest
//!   ↓
//! 0. Reject zero quantities              (no IO)
//!   ↓
//! 1. CustomerDirectory::find_by_id       → CustomerNotFound
//!   ↓
//! 2. ProductCatalog::find_all_by_ids     → NoProductsFound
//!   ↓
//! 3-5. plan_order (existence, stock, prices on the snapshot)
//!   ↓
//! 6. OrderStore::create                  (first write)
//!   ↓
//! 7-8. ProductCatalog::update_quantities (stock_updates from the snapshot)
//!   ↓
//! stored Order
//! ```
//!
//! Every validation failure happens before the first write. Calls are made
//! one at a time, in this order, at most once each. There is no locking: two
//! concurrent requests for the same product can both pass the stock check
//! against the same snapshot.
//!
//! If step 8 fails the order is already stored. What happens then is decided
//! by [`CompensationPolicy`].

use core::str::FromStr;

use thiserror::Error;
use tracing::{info, warn};

use orderdesk_core::{DomainError, OrderId};
use orderdesk_sales::{plan_order, stock_updates, validate_request, NewOrder, Order, OrderError, OrderRequest};

use crate::config::WorkflowConfig;
use crate::repository::{CustomerDirectory, OrderStore, ProductCatalog, RepositoryError};

/// What to do with a stored order when the stock write after it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompensationPolicy {
    /// Leave the order stored and return the stock error.
    #[default]
    None,
    /// Delete the stored order, then return the stock error.
    DeleteOrder,
}

impl FromStr for CompensationPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "delete-order" | "delete_order" => Ok(Self::DeleteOrder),
            other => Err(DomainError::validation(format!(
                "unknown compensation policy '{other}' (expected none or delete-order)"
            ))),
        }
    }
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The request was rejected; nothing was written.
    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The stock write failed and deleting the stored order failed too.
    #[error("stock update for order {order_id} failed ({stock_error}) and the order could not be removed: {source}")]
    CompensationFailed {
        order_id: OrderId,
        stock_error: RepositoryError,
        source: RepositoryError,
    },
}

impl WorkflowError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            WorkflowError::Order(e) => e.code(),
            WorkflowError::Repository(_) => "repository_error",
            WorkflowError::CompensationFailed { .. } => "compensation_failed",
        }
    }
}

/// Creates orders from requests against injected repositories.
///
/// ## Generic Parameters
///
/// - `C`: customer directory
/// - `P`: product catalog
/// - `O`: order store
///
/// `Arc<T>` of any implementation works too (blanket impls).
#[derive(Debug)]
pub struct CreateOrderWorkflow<C, P, O> {
    customers: C,
    catalog: P,
    orders: O,
    compensation: CompensationPolicy,
}

impl<C, P, O> CreateOrderWorkflow<C, P, O> {
    pub fn new(customers: C, catalog: P, orders: O) -> Self {
        Self {
            customers,
            catalog,
            orders,
            compensation: CompensationPolicy::default(),
        }
    }

    pub fn with_config(mut self, config: &WorkflowConfig) -> Self {
        self.compensation = config.compensation;
        self
    }

    pub fn with_compensation(mut self, compensation: CompensationPolicy) -> Self {
        self.compensation = compensation;
        self
    }

    pub fn compensation(&self) -> CompensationPolicy {
        self.compensation
    }
}

impl<C, P, O> CreateOrderWorkflow<C, P, O>
where
    C: CustomerDirectory,
    P: ProductCatalog,
    O: OrderStore,
{
    /// Validate the request, store the order, and take its lines from stock.
    ///
    /// Not idempotent: replaying a successful request stores a second order
    /// and decrements stock again.
    #[tracing::instrument(
        name = "create_order",
        skip_all,
        fields(customer_id = %request.customer_id, lines = request.products.len())
    )]
    pub async fn execute(&self, request: OrderRequest) -> Result<Order, WorkflowError> {
        validate_request(&request).inspect_err(rejected)?;

        let customer = self
            .customers
            .find_by_id(&request.customer_id)
            .await?
            .ok_or_else(|| OrderError::CustomerNotFound(request.customer_id.clone()))
            .inspect_err(rejected)?;

        let entries = self.catalog.find_all_by_ids(&request.product_ids()).await?;
        let line_items = plan_order(&request, &entries).inspect_err(rejected)?;

        let order = self.orders.create(NewOrder::new(customer, line_items)).await?;

        // New quantities come from the stored lines and the pre-order snapshot.
        let updates = stock_updates(order.line_items(), &entries);
        if let Err(stock_error) = self.catalog.update_quantities(updates).await {
            return Err(self.compensate(&order.id, stock_error).await);
        }

        info!(order_id = %order.id, total = %order.total(), "order created");
        Ok(order)
    }

    async fn compensate(&self, order_id: &OrderId, stock_error: RepositoryError) -> WorkflowError {
        match self.compensation {
            CompensationPolicy::None => {
                warn!(order_id = %order_id, error = %stock_error, "stock update failed; order kept");
                WorkflowError::Repository(stock_error)
            }
            CompensationPolicy::DeleteOrder => match self.orders.delete(order_id).await {
                Ok(()) => {
                    warn!(order_id = %order_id, error = %stock_error, "stock update failed; order removed");
                    WorkflowError::Repository(stock_error)
                }
                Err(source) => {
                    tracing::error!(
                        order_id = %order_id,
                        error = %stock_error,
                        delete_error = %source,
                        "stock update failed; order could not be removed"
                    );
                    WorkflowError::CompensationFailed {
                        order_id: order_id.clone(),
                        stock_error,
                        source,
                    }
                }
            },
        }
    }
}

fn rejected(error: &OrderError) {
    warn!(reason = error.code(), error = %error, "order rejected");
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use rust_decimal::Decimal;

    use orderdesk_core::{CustomerId, ProductId};
    use orderdesk_parties::Customer;
    use orderdesk_products::{CatalogEntry, QuantityUpdate};
    use orderdesk_sales::{LineItem, RequestedProduct};

    use super::*;
    use crate::repository::{InMemoryCustomerDirectory, InMemoryOrderStore, InMemoryProductCatalog};

    /// Catalog wrapper that counts calls and can refuse writes.
    #[derive(Default)]
    struct ScriptedCatalog {
        inner: InMemoryProductCatalog,
        fail_updates: bool,
        reads: AtomicUsize,
        writes: AtomicUsize,
    }

    #[async_trait]
    impl ProductCatalog for ScriptedCatalog {
        async fn find_all_by_ids(&self, ids: &[ProductId]) -> Result<Vec<CatalogEntry>, RepositoryError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.find_all_by_ids(ids).await
        }

        async fn update_quantities(&self, updates: Vec<QuantityUpdate>) -> Result<(), RepositoryError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.fail_updates {
                return Err(RepositoryError::Unavailable("catalog offline".to_string()));
            }
            self.inner.update_quantities(updates).await
        }
    }

    /// Order store whose deletes always fail.
    #[derive(Default)]
    struct UndeletableOrders {
        inner: InMemoryOrderStore,
    }

    #[async_trait]
    impl OrderStore for UndeletableOrders {
        async fn create(&self, order: NewOrder) -> Result<Order, RepositoryError> {
            self.inner.create(order).await
        }

        async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
            self.inner.find_by_id(id).await
        }

        async fn delete(&self, _id: &OrderId) -> Result<(), RepositoryError> {
            Err(RepositoryError::Backend("delete refused".to_string()))
        }
    }

    fn customers() -> Arc<InMemoryCustomerDirectory> {
        Arc::new(InMemoryCustomerDirectory::with_customers([Customer::new(
            "C1",
            "Ada",
            "ada@example.com",
        )]))
    }

    fn entries() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new("P1", Decimal::new(1000, 2), 5),
            CatalogEntry::new("P2", Decimal::new(2000, 2), 2),
        ]
    }

    fn scripted_catalog(fail_updates: bool) -> Arc<ScriptedCatalog> {
        Arc::new(ScriptedCatalog {
            inner: InMemoryProductCatalog::with_entries(entries()),
            fail_updates,
            ..Default::default()
        })
    }

    fn request(customer: &str, lines: &[(&str, u32)]) -> OrderRequest {
        OrderRequest::new(
            customer,
            lines.iter().map(|(id, q)| RequestedProduct::new(*id, *q)).collect(),
        )
    }

    fn quantity(catalog: &ScriptedCatalog, id: &str) -> u32 {
        catalog.inner.get(&ProductId::new(id)).unwrap().quantity
    }

    #[tokio::test]
    async fn creates_order_and_decrements_stock() {
        let catalog = scripted_catalog(false);
        let orders = Arc::new(InMemoryOrderStore::new());
        let workflow = CreateOrderWorkflow::new(customers(), catalog.clone(), orders.clone());

        let order = workflow
            .execute(request("C1", &[("P1", 2), ("P2", 1)]))
            .await
            .unwrap();

        assert_eq!(
            order.line_items(),
            &[
                LineItem::new("P1", 2, Decimal::new(1000, 2)),
                LineItem::new("P2", 1, Decimal::new(2000, 2)),
            ]
        );
        assert_eq!(order.customer.id, CustomerId::new("C1"));
        assert_eq!(order.total(), Decimal::new(4000, 2));
        assert_eq!(quantity(&catalog, "P1"), 3);
        assert_eq!(quantity(&catalog, "P2"), 1);
        assert_eq!(orders.len(), 1);
        assert_eq!(catalog.reads.load(Ordering::SeqCst), 1);
        assert_eq!(catalog.writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_customer_fails_before_catalog_is_read() {
        let catalog = scripted_catalog(false);
        let orders = Arc::new(InMemoryOrderStore::new());
        let workflow = CreateOrderWorkflow::new(customers(), catalog.clone(), orders.clone());

        let err = workflow.execute(request("C9", &[("P1", 1)])).await.unwrap_err();

        assert!(matches!(
            err,
            WorkflowError::Order(OrderError::CustomerNotFound(ref id)) if id.as_str() == "C9"
        ));
        assert_eq!(catalog.reads.load(Ordering::SeqCst), 0);
        assert_eq!(catalog.writes.load(Ordering::SeqCst), 0);
        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn zero_quantity_is_rejected_without_any_io() {
        let catalog = scripted_catalog(false);
        let orders = Arc::new(InMemoryOrderStore::new());
        let workflow = CreateOrderWorkflow::new(customers(), catalog.clone(), orders.clone());

        let err = workflow.execute(request("C9", &[("P1", 0)])).await.unwrap_err();

        assert_eq!(err.code(), "invalid_quantity");
        assert_eq!(catalog.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn validation_failures_write_nothing() {
        let cases: Vec<(Vec<(&str, u32)>, &str)> = vec![
            (vec![("X1", 1), ("X2", 1)], "no_products_found"),
            (vec![("P1", 1), ("X1", 1)], "product_not_found"),
            (vec![("P1", 1), ("P2", 3)], "insufficient_stock"),
        ];

        for (lines, code) in cases {
            let catalog = scripted_catalog(false);
            let orders = Arc::new(InMemoryOrderStore::new());
            let workflow = CreateOrderWorkflow::new(customers(), catalog.clone(), orders.clone());

            let err = workflow.execute(request("C1", &lines)).await.unwrap_err();

            assert_eq!(err.code(), code);
            assert!(orders.is_empty(), "{code}: order stored");
            assert_eq!(catalog.writes.load(Ordering::SeqCst), 0, "{code}: stock written");
            assert_eq!(quantity(&catalog, "P1"), 5);
        }
    }

    #[tokio::test]
    async fn insufficient_stock_reports_available_quantity() {
        let workflow = CreateOrderWorkflow::new(
            customers(),
            scripted_catalog(false),
            Arc::new(InMemoryOrderStore::new()),
        );

        let err = workflow.execute(request("C1", &[("P2", 3)])).await.unwrap_err();

        match err {
            WorkflowError::Order(OrderError::InsufficientStock { product_id, available }) => {
                assert_eq!(product_id, ProductId::new("P2"));
                assert_eq!(available, 2);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn stock_failure_keeps_order_by_default() {
        let catalog = scripted_catalog(true);
        let orders = Arc::new(InMemoryOrderStore::new());
        let workflow = CreateOrderWorkflow::new(customers(), catalog.clone(), orders.clone());

        let err = workflow.execute(request("C1", &[("P1", 2)])).await.unwrap_err();

        assert!(matches!(err, WorkflowError::Repository(RepositoryError::Unavailable(_))));
        assert_eq!(orders.len(), 1);
        assert_eq!(quantity(&catalog, "P1"), 5);
    }

    #[tokio::test]
    async fn stock_failure_removes_order_when_compensating() {
        let catalog = scripted_catalog(true);
        let orders = Arc::new(InMemoryOrderStore::new());
        let workflow = CreateOrderWorkflow::new(customers(), catalog.clone(), orders.clone())
            .with_compensation(CompensationPolicy::DeleteOrder);

        let err = workflow.execute(request("C1", &[("P1", 2)])).await.unwrap_err();

        assert!(matches!(err, WorkflowError::Repository(RepositoryError::Unavailable(_))));
        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn failed_compensation_is_reported_with_both_errors() {
        let orders = Arc::new(UndeletableOrders::default());
        let workflow = CreateOrderWorkflow::new(customers(), scripted_catalog(true), orders.clone())
            .with_compensation(CompensationPolicy::DeleteOrder);

        let err = workflow.execute(request("C1", &[("P1", 2)])).await.unwrap_err();

        match err {
            WorkflowError::CompensationFailed { order_id, stock_error, source } => {
                assert!(orders.inner.find_by_id(&order_id).await.unwrap().is_some());
                assert!(matches!(stock_error, RepositoryError::Unavailable(_)));
                assert!(matches!(source, RepositoryError::Backend(_)));
            }
            other => panic!("expected CompensationFailed, got {other:?}"),
        }
    }

    #[test]
    fn with_config_sets_compensation_policy() {
        let workflow = CreateOrderWorkflow::new(customers(), scripted_catalog(false), Arc::new(InMemoryOrderStore::new()));
        assert_eq!(workflow.compensation(), CompensationPolicy::None);

        let config = WorkflowConfig {
            compensation: CompensationPolicy::DeleteOrder,
        };
        assert_eq!(workflow.with_config(&config).compensation(), CompensationPolicy::DeleteOrder);
    }

    #[test]
    fn compensation_policy_parses_config_values() {
        assert_eq!("none".parse::<CompensationPolicy>().unwrap(), CompensationPolicy::None);
        assert_eq!(
            " Delete-Order ".parse::<CompensationPolicy>().unwrap(),
            CompensationPolicy::DeleteOrder
        );
        assert!("rollback".parse::<CompensationPolicy>().is_err());
    }
}
