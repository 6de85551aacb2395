//! Sales orders domain module.
//!
//! This crate contains the business rules for turning an order request into
//! priced line items and stock adjustments, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage). The async
//! workflow that drives these rules against repositories lives in
//! `orderdesk-infra`.

pub mod error;
pub mod order;
pub mod planning;

pub use error::OrderError;
pub use order::{LineItem, NewOrder, Order, OrderRequest, RequestedProduct};
pub use planning::{plan_order, stock_updates, validate_request};
