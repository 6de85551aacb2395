use std::sync::Arc;

use orderdesk_infra::{
    CreateOrderWorkflow, InMemoryCustomerDirectory, InMemoryOrderStore, InMemoryProductCatalog,
    WorkflowConfig,
};

use crate::seed::SeedData;

pub type OrderWorkflow = CreateOrderWorkflow<
    Arc<InMemoryCustomerDirectory>,
    Arc<InMemoryProductCatalog>,
    Arc<InMemoryOrderStore>,
>;

/// Repositories and the workflow built on them, shared by all handlers.
#[derive(Debug)]
pub struct AppServices {
    pub customers: Arc<InMemoryCustomerDirectory>,
    pub catalog: Arc<InMemoryProductCatalog>,
    pub orders: Arc<InMemoryOrderStore>,
    pub workflow: OrderWorkflow,
}

impl AppServices {
    /// Wire in-memory repositories seeded from `seed`.
    pub fn in_memory(config: &WorkflowConfig, seed: SeedData) -> Self {
        let customers = Arc::new(InMemoryCustomerDirectory::with_customers(seed.customers));
        let catalog = Arc::new(InMemoryProductCatalog::with_entries(seed.products));
        let orders = Arc::new(InMemoryOrderStore::new());

        tracing::info!(
            customers = customers.len(),
            products = catalog.list().len(),
            "in-memory repositories ready"
        );

        let workflow = CreateOrderWorkflow::new(customers.clone(), catalog.clone(), orders.clone())
            .with_config(config);

        Self {
            customers,
            catalog,
            orders,
            workflow,
        }
    }
}
