use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orderdesk_core::{Entity, ProductId};

/// Catalog entry: price and on-hand quantity for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    /// Unit price in the catalog's currency.
    pub price: Decimal,
    /// Units available for sale.
    pub quantity: u32,
}

impl CatalogEntry {
    pub fn new(id: impl Into<ProductId>, price: Decimal, quantity: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            price,
            quantity,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether `requested` units can be taken from the available quantity.
    pub fn can_fulfil(&self, requested: u32) -> bool {
        self.quantity >= requested
    }

    /// Quantity left after taking `ordered` units. Never goes below zero.
    pub fn remaining_after(&self, ordered: u32) -> u32 {
        self.quantity.saturating_sub(ordered)
    }
}

impl Entity for CatalogEntry {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// New absolute quantity for a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityUpdate {
    pub id: ProductId,
    pub quantity: u32,
}

impl QuantityUpdate {
    pub fn new(id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            quantity,
        }
    }
}
