use serde::Deserialize;

use orderdesk_core::{CustomerId, DomainError, ProductId};
use orderdesk_sales::{OrderRequest, RequestedProduct};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateOrderLine {
    pub id: String,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: String,
    #[serde(default)]
    pub products: Vec<CreateOrderLine>,
}

impl TryFrom<CreateOrderRequest> for OrderRequest {
    type Error = DomainError;

    fn try_from(body: CreateOrderRequest) -> Result<Self, Self::Error> {
        let customer_id: CustomerId = body.customer_id.parse()?;
        let products = body
            .products
            .into_iter()
            .map(|line| Ok(RequestedProduct::new(line.id.parse::<ProductId>()?, line.quantity)))
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(OrderRequest::new(customer_id, products))
    }
}
