//! Infrastructure layer: repositories, order workflow, config.

pub mod config;
pub mod order_workflow;
pub mod repository;


pub use config::WorkflowConfig;
pub use order_workflow::{CompensationPolicy, CreateOrderWorkflow, WorkflowError};
pub use repository::{
    CustomerDirectory, InMemoryCustomerDirectory, InMemoryOrderStore, InMemoryProductCatalog,
    OrderStore, ProductCatalog, RepositoryError,
};
