//! Order lifecycle
//!
//! Creation, listing, status and payment transitions, deletion.

use chrono::NaiveDate;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{NewOrder, Order, OrderConfiguration, OrderStatus, PriceBreakdown};
use shared::util::{new_order_id, now_millis};
use std::sync::Arc;

use super::normalizer::to_order_items;
use super::store::OrderStore;
use super::validation::{validate_configuration, validate_new_order};
use crate::pricing::compute_price;
use crate::utils::time::parse_date;

/// Status implied by a payment toggle
///
/// Confirming moves the order to `payment_confirmed`; revoking sends it
/// back to `pending`. A completed order keeps its status.
pub fn apply_payment(current: OrderStatus, confirmed: bool) -> OrderStatus {
    match (current, confirmed) {
        (OrderStatus::Completed, _) => OrderStatus::Completed,
        (_, true) => OrderStatus::PaymentConfirmed,
        (_, false) => OrderStatus::Pending,
    }
}

fn trimmed(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn OrderStore>,
    require_email_contact: bool,
}

impl OrderService {
    pub fn new(store: Arc<dyn OrderStore>, require_email_contact: bool) -> Self {
        Self {
            store,
            require_email_contact,
        }
    }

    /// Validate, price and normalize a configuration, then store it
    pub async fn submit(
        &self,
        config: &OrderConfiguration,
        today: NaiveDate,
    ) -> AppResult<(Order, PriceBreakdown)> {
        validate_configuration(config, today, self.require_email_contact)?;

        let breakdown = compute_price(config);
        let new_order = NewOrder {
            customer_name: config.customer_name.clone(),
            contact: config.contact.clone(),
            delivery_date: config.delivery_date.clone(),
            delivery_method: config.delivery_method,
            pickup_time: config.pickup_time.clone(),
            delivery_address: config.delivery_address.clone(),
            items: to_order_items(config),
            total_price: breakdown.total,
        };
        let order = self.persist(new_order).await?;
        Ok((order, breakdown))
    }

    /// Store an already normalized order
    pub async fn create(&self, new_order: NewOrder, today: NaiveDate) -> AppResult<Order> {
        validate_new_order(&new_order, today, self.require_email_contact)?;
        self.persist(new_order).await
    }

    /// Store a validated order with its text fields in canonical form
    async fn persist(&self, new_order: NewOrder) -> AppResult<Order> {
        let delivery_date = parse_date(&new_order.delivery_date, "deliveryDate")?;
        let order = Order {
            id: new_order_id(),
            customer_name: new_order.customer_name.trim().to_string(),
            contact: new_order.contact.trim().to_string(),
            delivery_date: delivery_date.format("%Y-%m-%d").to_string(),
            delivery_method: new_order.delivery_method,
            pickup_time: trimmed(new_order.pickup_time),
            delivery_address: trimmed(new_order.delivery_address),
            items: new_order.items,
            total_price: new_order.total_price,
            status: OrderStatus::Pending,
            payment_confirmed: false,
            created_at: now_millis(),
        };
        self.store.insert(&order).await?;
        tracing::info!(
            order_id = %order.id,
            total = order.total_price,
            items = order.items.len(),
            "Order created"
        );
        Ok(order)
    }

    /// All orders, newest first
    pub async fn get_all(&self) -> AppResult<Vec<Order>> {
        Ok(self.store.find_all().await?)
    }

    pub async fn get(&self, id: &str) -> AppResult<Order> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::order_not_found(id))
    }

    pub async fn update_status(&self, id: &str, status: OrderStatus) -> AppResult<Order> {
        let mut order = self.get(id).await?;
        if order.status.is_terminal() && status != order.status {
            return Err(AppError::with_message(
                ErrorCode::OrderAlreadyCompleted,
                format!("Order {id} is already completed"),
            )
            .with_detail("id", id));
        }
        if !self.store.update_status(id, status).await? {
            return Err(AppError::order_not_found(id));
        }
        tracing::info!(order_id = %id, from = %order.status, to = %status, "Order status updated");
        order.status = status;
        Ok(order)
    }

    pub async fn update_payment(&self, id: &str, confirmed: bool) -> AppResult<Order> {
        let mut order = self.get(id).await?;
        let status = apply_payment(order.status, confirmed);
        if !self.store.update_payment(id, status, confirmed).await? {
            return Err(AppError::order_not_found(id));
        }
        tracing::info!(order_id = %id, confirmed, status = %status, "Order payment updated");
        order.status = status;
        order.payment_confirmed = confirmed;
        Ok(order)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.store.delete(id).await? {
            return Err(AppError::order_not_found(id));
        }
        tracing::info!(order_id = %id, "Order deleted");
        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        Ok(self.store.count().await?)
    }
}
