use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orderdesk_core::{CustomerId, Entity, OrderId, ProductId, ValueObject};
use orderdesk_parties::Customer;

/// One requested product in an order request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedProduct {
    pub id: ProductId,
    pub quantity: u32,
}

impl RequestedProduct {
    pub fn new(id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            quantity,
        }
    }
}

/// Input to order creation. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub customer_id: CustomerId,
    pub products: Vec<RequestedProduct>,
}

impl OrderRequest {
    pub fn new(customer_id: impl Into<CustomerId>, products: Vec<RequestedProduct>) -> Self {
        Self {
            customer_id: customer_id.into(),
            products,
        }
    }

    /// Requested product ids in request order, each listed once.
    pub fn product_ids(&self) -> Vec<ProductId> {
        let mut ids: Vec<ProductId> = Vec::with_capacity(self.products.len());
        for p in &self.products {
            if !ids.contains(&p.id) {
                ids.push(p.id.clone());
            }
        }
        ids
    }
}

/// Order line: product, quantity, and the unit price captured at order time.
///
/// The price is a snapshot; later catalog price changes do not touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Decimal,
}

impl LineItem {
    pub fn new(product_id: impl Into<ProductId>, quantity: u32, price: Decimal) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            price,
        }
    }

    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

impl ValueObject for LineItem {}

/// An order ready to be stored (no identity yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer: Customer,
    pub line_items: Vec<LineItem>,
}

impl NewOrder {
    pub fn new(customer: Customer, line_items: Vec<LineItem>) -> Self {
        Self {
            customer,
            line_items,
        }
    }

    /// Attach the identity and timestamp a store assigns on create.
    pub fn into_order(self, id: OrderId, created_at: DateTime<Utc>) -> Order {
        Order {
            id,
            customer: self.customer,
            line_items: self.line_items,
            created_at,
        }
    }
}

/// A stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: Customer,
    pub line_items: Vec<LineItem>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Sum of `price * quantity` over all line items.
    pub fn total(&self) -> Decimal {
        self.line_items.iter().map(LineItem::subtotal).sum()
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
