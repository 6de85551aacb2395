//! Parties domain module (customers).
//!
//! Customers are resolved by id when an order is placed and embedded in the
//! stored order as its customer reference. Pure data, no IO.

pub mod customer;

pub use customer::Customer;
