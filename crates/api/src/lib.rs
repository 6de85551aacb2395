//! HTTP API: composition root, routing, and request/response mapping.
//!
//! No business rules live here; handlers translate JSON into an
//! `OrderRequest`, run the workflow, and map its errors to status codes.

pub mod app;
pub mod config;
pub mod seed;
