//! Order storage seam
//!
//! Status and payment updates overwrite the row unconditionally, so two
//! admins editing the same order concurrently resolve as last-write-wins.

use crate::db::repository::{RepoResult, order as order_repo};
use async_trait::async_trait;
use shared::models::{Order, OrderStatus};
use sqlx::SqlitePool;
use tokio::sync::RwLock;

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert(&self, order: &Order) -> RepoResult<()>;

    /// All orders, newest first
    async fn find_all(&self) -> RepoResult<Vec<Order>>;

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>>;

    /// Returns false when no order has this id
    async fn update_status(&self, id: &str, status: OrderStatus) -> RepoResult<bool>;

    /// Returns false when no order has this id
    async fn update_payment(
        &self,
        id: &str,
        status: OrderStatus,
        payment_confirmed: bool,
    ) -> RepoResult<bool>;

    /// Returns false when no order has this id
    async fn delete(&self, id: &str) -> RepoResult<bool>;

    async fn count(&self) -> RepoResult<i64>;
}

/// SQLite-backed store
#[derive(Clone)]
pub struct SqliteOrderStore {
    pool: SqlitePool,
}

impl SqliteOrderStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for SqliteOrderStore {
    async fn insert(&self, order: &Order) -> RepoResult<()> {
        order_repo::insert(&self.pool, order).await
    }

    async fn find_all(&self) -> RepoResult<Vec<Order>> {
        order_repo::find_all(&self.pool).await
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        order_repo::find_by_id(&self.pool, id).await
    }

    async fn update_status(&self, id: &str, status: OrderStatus) -> RepoResult<bool> {
        order_repo::update_status(&self.pool, id, status).await
    }

    async fn update_payment(
        &self,
        id: &str,
        status: OrderStatus,
        payment_confirmed: bool,
    ) -> RepoResult<bool> {
        order_repo::update_payment(&self.pool, id, status, payment_confirmed).await
    }

    async fn delete(&self, id: &str) -> RepoResult<bool> {
        order_repo::delete(&self.pool, id).await
    }

    async fn count(&self) -> RepoResult<i64> {
        order_repo::count(&self.pool).await
    }
}

/// In-process store, insertion order kept (tests and local runs)
#[derive(Default)]
pub struct MemoryOrderStore {
    orders: RwLock<Vec<Order>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn insert(&self, order: &Order) -> RepoResult<()> {
        self.orders.write().await.push(order.clone());
        Ok(())
    }

    async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut all: Vec<Order> = orders.iter().rev().cloned().collect();
        // stable sort keeps later inserts first on equal timestamps
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.iter().find(|o| o.id == id).cloned())
    }

    async fn update_status(&self, id: &str, status: OrderStatus) -> RepoResult<bool> {
        let mut orders = self.orders.write().await;
        match orders.iter_mut().find(|o| o.id == id) {
            Some(order) => {
                order.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_payment(
        &self,
        id: &str,
        status: OrderStatus,
        payment_confirmed: bool,
    ) -> RepoResult<bool> {
        let mut orders = self.orders.write().await;
        match orders.iter_mut().find(|o| o.id == id) {
            Some(order) => {
                order.status = status;
                order.payment_confirmed = payment_confirmed;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> RepoResult<bool> {
        let mut orders = self.orders.write().await;
        let before = orders.len();
        orders.retain(|o| o.id != id);
        Ok(orders.len() != before)
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.orders.read().await.len() as i64)
    }
}
