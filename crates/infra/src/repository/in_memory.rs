use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use orderdesk_core::{CustomerId, OrderId, ProductId};
use orderdesk_parties::Customer;
use orderdesk_products::{CatalogEntry, QuantityUpdate};
use orderdesk_sales::{NewOrder, Order};

use super::r#trait::{CustomerDirectory, OrderStore, ProductCatalog, RepositoryError};

fn poisoned() -> RepositoryError {
    RepositoryError::Unavailable("lock poisoned".to_string())
}

/// In-memory customer directory for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCustomerDirectory {
    customers: RwLock<HashMap<CustomerId, Customer>>,
}

impl InMemoryCustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customers(customers: impl IntoIterator<Item = Customer>) -> Self {
        let directory = Self::new();
        for c in customers {
            directory.insert(c);
        }
        directory
    }

    pub fn insert(&self, customer: Customer) {
        if let Ok(mut map) = self.customers.write() {
            map.insert(customer.id.clone(), customer);
        }
    }

    pub fn len(&self) -> usize {
        self.customers.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CustomerDirectory for InMemoryCustomerDirectory {
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let map = self.customers.read().map_err(|_| poisoned())?;
        Ok(map.get(id).cloned())
    }
}

/// In-memory product catalog for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProductCatalog {
    entries: RwLock<HashMap<ProductId, CatalogEntry>>,
}

impl InMemoryProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let catalog = Self::new();
        for e in entries {
            catalog.insert(e);
        }
        catalog
    }

    /// Insert or replace an entry.
    pub fn insert(&self, entry: CatalogEntry) {
        if let Ok(mut map) = self.entries.write() {
            map.insert(entry.id.clone(), entry);
        }
    }

    pub fn get(&self, id: &ProductId) -> Option<CatalogEntry> {
        self.entries.read().ok()?.get(id).cloned()
    }

    /// All entries, ordered by id.
    pub fn list(&self) -> Vec<CatalogEntry> {
        let map = match self.entries.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        let mut all: Vec<CatalogEntry> = map.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }
}

#[async_trait]
impl ProductCatalog for InMemoryProductCatalog {
    async fn find_all_by_ids(&self, ids: &[ProductId]) -> Result<Vec<CatalogEntry>, RepositoryError> {
        let map = self.entries.read().map_err(|_| poisoned())?;

        let mut found: Vec<CatalogEntry> = Vec::with_capacity(ids.len());
        for id in ids {
            if found.iter().any(|e| &e.id == id) {
                continue;
            }
            if let Some(entry) = map.get(id) {
                found.push(entry.clone());
            }
        }
        Ok(found)
    }

    async fn update_quantities(&self, updates: Vec<QuantityUpdate>) -> Result<(), RepositoryError> {
        let mut map = self.entries.write().map_err(|_| poisoned())?;

        // All-or-nothing within this store: check every id before writing.
        if let Some(missing) = updates.iter().find(|u| !map.contains_key(&u.id)) {
            return Err(RepositoryError::NotFound(format!("product {}", missing.id)));
        }

        for update in updates {
            if let Some(entry) = map.get_mut(&update.id) {
                entry.quantity = update.quantity;
            }
        }
        Ok(())
    }
}

/// In-memory order store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored orders, oldest first.
    pub fn list(&self) -> Vec<Order> {
        let map = match self.orders.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        let mut all: Vec<Order> = map.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        all
    }

    pub fn len(&self) -> usize {
        self.orders.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        let stored = order.into_order(OrderId::generate(), Utc::now());

        let mut map = self.orders.write().map_err(|_| poisoned())?;
        map.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        let map = self.orders.read().map_err(|_| poisoned())?;
        Ok(map.get(id).cloned())
    }

    async fn delete(&self, id: &OrderId) -> Result<(), RepositoryError> {
        let mut map = self.orders.write().map_err(|_| poisoned())?;
        match map.remove(id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound(format!("order {id}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderdesk_sales::LineItem;
    use rust_decimal::Decimal;

    fn catalog() -> InMemoryProductCatalog {
        InMemoryProductCatalog::with_entries([
            CatalogEntry::new("P1", Decimal::new(1000, 2), 5),
            CatalogEntry::new("P2", Decimal::new(2000, 2), 2),
        ])
    }

    #[tokio::test]
    async fn find_all_by_ids_skips_unknown_and_duplicate_ids() {
        let catalog = catalog();
        let ids = vec![
            ProductId::new("P2"),
            ProductId::new("NOPE"),
            ProductId::new("P1"),
            ProductId::new("P2"),
        ];

        let found = catalog.find_all_by_ids(&ids).await.unwrap();
        let found_ids: Vec<&str> = found.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(found_ids, vec!["P2", "P1"]);
    }

    #[tokio::test]
    async fn update_quantities_overwrites_listed_entries() {
        let catalog = catalog();
        catalog
            .update_quantities(vec![QuantityUpdate::new("P1", 3)])
            .await
            .unwrap();

        assert_eq!(catalog.get(&ProductId::new("P1")).unwrap().quantity, 3);
        assert_eq!(catalog.get(&ProductId::new("P2")).unwrap().quantity, 2);
    }

    #[tokio::test]
    async fn update_quantities_with_unknown_id_changes_nothing() {
        let catalog = catalog();
        let err = catalog
            .update_quantities(vec![QuantityUpdate::new("P1", 0), QuantityUpdate::new("X", 1)])
            .await
            .unwrap_err();

        assert_eq!(err, RepositoryError::NotFound("product X".to_string()));
        assert_eq!(catalog.get(&ProductId::new("P1")).unwrap().quantity, 5);
    }

    #[tokio::test]
    async fn customer_lookup_returns_none_for_unknown_id() {
        let directory = InMemoryCustomerDirectory::with_customers([Customer::new("C1", "Ada", "ada@example.com")]);
        assert!(directory.find_by_id(&CustomerId::new("C1")).await.unwrap().is_some());
        assert!(directory.find_by_id(&CustomerId::new("C9")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn order_store_assigns_ids_and_supports_delete() {
        let store = InMemoryOrderStore::new();
        let new_order = NewOrder::new(
            Customer::new("C1", "Ada", "ada@example.com"),
            vec![LineItem::new("P1", 1, Decimal::ONE)],
        );

        let a = store.create(new_order.clone()).await.unwrap();
        let b = store.create(new_order).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);

        assert_eq!(store.find_by_id(&a.id).await.unwrap(), Some(a.clone()));
        store.delete(&a.id).await.unwrap();
        assert!(store.find_by_id(&a.id).await.unwrap().is_none());
        assert!(matches!(store.delete(&a.id).await, Err(RepositoryError::NotFound(_))));
    }
}
