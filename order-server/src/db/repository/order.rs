//! Order Repository
//!
//! Items are stored as a JSON text column; they never change after insert.

use super::RepoResult;
use shared::models::{DeliveryMethod, Order, OrderStatus};
use sqlx::SqlitePool;

const SELECT_COLUMNS: &str = "SELECT id, customer_name, contact, delivery_date, delivery_method, \
     pickup_time, delivery_address, items, total_price, status, payment_confirmed, created_at \
     FROM orders";

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    customer_name: String,
    contact: String,
    delivery_date: String,
    delivery_method: DeliveryMethod,
    pickup_time: Option<String>,
    delivery_address: Option<String>,
    items: String,
    total_price: i64,
    status: OrderStatus,
    payment_confirmed: bool,
    created_at: i64,
}

impl TryFrom<OrderRow> for Order {
    type Error = super::RepoError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            items: serde_json::from_str(&row.items)?,
            id: row.id,
            customer_name: row.customer_name,
            contact: row.contact,
            delivery_date: row.delivery_date,
            delivery_method: row.delivery_method,
            pickup_time: row.pickup_time,
            delivery_address: row.delivery_address,
            total_price: row.total_price,
            status: row.status,
            payment_confirmed: row.payment_confirmed,
            created_at: row.created_at,
        })
    }
}

pub async fn insert(pool: &SqlitePool, order: &Order) -> RepoResult<()> {
    let items = serde_json::to_string(&order.items)?;
    sqlx::query(
        "INSERT INTO orders (id, customer_name, contact, delivery_date, delivery_method, \
         pickup_time, delivery_address, items, total_price, status, payment_confirmed, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&order.id)
    .bind(&order.customer_name)
    .bind(&order.contact)
    .bind(&order.delivery_date)
    .bind(order.delivery_method)
    .bind(&order.pickup_time)
    .bind(&order.delivery_address)
    .bind(items)
    .bind(order.total_price)
    .bind(order.status)
    .bind(order.payment_confirmed)
    .bind(order.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Newest first; rowid breaks ties between orders created in the same millisecond
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Order>> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!(
        "{SELECT_COLUMNS} ORDER BY created_at DESC, rowid DESC"
    ))
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(Order::try_from).collect()
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, OrderRow>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(Order::try_from).transpose()
}

/// Set the production status; returns false when the order does not exist
pub async fn update_status(pool: &SqlitePool, id: &str, status: OrderStatus) -> RepoResult<bool> {
    let result = sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Set the payment flag together with the status it implies
pub async fn update_payment(
    pool: &SqlitePool,
    id: &str,
    status: OrderStatus,
    payment_confirmed: bool,
) -> RepoResult<bool> {
    let result = sqlx::query("UPDATE orders SET status = ?, payment_confirmed = ? WHERE id = ?")
        .bind(status)
        .bind(payment_confirmed)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Hard delete; returns false when the order does not exist
pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM orders WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
