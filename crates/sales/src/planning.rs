//! Order planning: request + catalog snapshot → priced lines / stock updates.
//!
//! These functions are the decision half of order creation. They never
//! touch storage; the caller fetches the catalog entries once and passes the
//! snapshot in.
//!
//! ## Validation order
//!
//! ```text
//! request quantities > 0          (validate_request)
//!   ↓
//! snapshot not empty              → NoProductsFound
//!   ↓
//! every requested id in snapshot  → ProductNotFound(first missing)
//!   ↓
//! every quantity ≤ available      → InsufficientStock(first short)
//!   ↓
//! line items (price copied from snapshot)
//! ```
//!
//! Each check walks the request in input order, so the reported item is
//! always the first offender. Lookups go through a map built once per call.

use std::collections::HashMap;

use orderdesk_core::ProductId;
use orderdesk_products::{CatalogEntry, QuantityUpdate};

use crate::error::OrderError;
use crate::order::{LineItem, OrderRequest};

fn index_entries(entries: &[CatalogEntry]) -> HashMap<&ProductId, &CatalogEntry> {
    entries.iter().map(|e| (&e.id, e)).collect()
}

/// Reject request lines that could never be valid, before any read happens.
pub fn validate_request(request: &OrderRequest) -> Result<(), OrderError> {
    match request.products.iter().find(|p| p.quantity == 0) {
        Some(p) => Err(OrderError::InvalidQuantity(p.id.clone())),
        None => Ok(()),
    }
}

/// Validate `request` against the fetched catalog `entries` and price it.
///
/// Duplicate product ids are not merged: each request line is checked
/// against the full available quantity on its own.
pub fn plan_order(
    request: &OrderRequest,
    entries: &[CatalogEntry],
) -> Result<Vec<LineItem>, OrderError> {
    if entries.is_empty() {
        return Err(OrderError::NoProductsFound);
    }

    let index = index_entries(entries);

    if let Some(missing) = request.products.iter().find(|p| !index.contains_key(&p.id)) {
        return Err(OrderError::ProductNotFound(missing.id.clone()));
    }

    let mut lines = Vec::with_capacity(request.products.len());
    for requested in &request.products {
        let entry = index[&requested.id];
        if !entry.can_fulfil(requested.quantity) {
            return Err(OrderError::InsufficientStock {
                product_id: requested.id.clone(),
                available: entry.quantity,
            });
        }
        lines.push(LineItem::new(
            requested.id.clone(),
            requested.quantity,
            entry.price,
        ));
    }

    Ok(lines)
}

/// New absolute quantities after the stored `lines` are taken from stock.
///
/// Computed from the snapshot read before the order was stored, one update
/// per line. Lines whose product is not in the snapshot are skipped.
pub fn stock_updates(lines: &[LineItem], entries: &[CatalogEntry]) -> Vec<QuantityUpdate> {
    let index = index_entries(entries);

    lines
        .iter()
        .filter_map(|line| {
            index
                .get(&line.product_id)
                .map(|entry| QuantityUpdate::new(line.product_id.clone(), entry.remaining_after(line.quantity)))
        })
        .collect()
}
