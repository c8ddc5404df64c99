//! Order ledger
//!
//! Append-only spreadsheet of every order received, one row per order.

use async_trait::async_trait;
use chrono_tz::Tz;
use shared::models::Order;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use super::NotifyError;
use crate::utils::time::format_millis;

#[async_trait]
pub trait OrderLedger: Send + Sync {
    async fn append(&self, order: &Order) -> Result<(), NotifyError>;
}

const HEADER: [&str; 10] = [
    "주문번호",
    "접수시각",
    "고객명",
    "연락처",
    "수령일",
    "수령방법",
    "픽업시간",
    "주소",
    "품목",
    "합계",
];

pub struct CsvOrderLedger {
    path: PathBuf,
    timezone: Tz,
}

impl CsvOrderLedger {
    pub fn new(path: impl Into<PathBuf>, timezone: Tz) -> Self {
        Self {
            path: path.into(),
            timezone,
        }
    }

    fn row(&self, order: &Order) -> Vec<String> {
        let items = order
            .items
            .iter()
            .map(|item| format!("{} x{}", item.name, item.quantity))
            .collect::<Vec<_>>()
            .join("; ");
        vec![
            order.id.clone(),
            format_millis(order.created_at, self.timezone),
            order.customer_name.clone(),
            order.contact.clone(),
            order.delivery_date.clone(),
            order.delivery_method.label().to_string(),
            order.pickup_time.clone().unwrap_or_default(),
            order.delivery_address.clone().unwrap_or_default(),
            items,
            order.total_price.to_string(),
        ]
    }
}

fn append_row(path: &PathBuf, row: &[String]) -> Result<(), NotifyError> {
    let to_err = |e: std::io::Error| NotifyError::Ledger(format!("{}: {e}", path.display()));

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_err)?;
    }
    let is_new = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_err)?;

    let mut wtr = csv::Writer::from_writer(file);
    if is_new {
        wtr.write_record(HEADER)
            .map_err(|e| NotifyError::Ledger(e.to_string()))?;
    }
    wtr.write_record(row)
        .map_err(|e| NotifyError::Ledger(e.to_string()))?;
    wtr.flush().map_err(to_err)?;
    Ok(())
}

#[async_trait]
impl OrderLedger for CsvOrderLedger {
    async fn append(&self, order: &Order) -> Result<(), NotifyError> {
        let path = self.path.clone();
        let row = self.row(order);
        tokio::task::spawn_blocking(move || append_row(&path, &row))
            .await
            .map_err(|e| NotifyError::Ledger(format!("Ledger task failed: {e}")))??;
        tracing::debug!(order_id = %order.id, "Order appended to ledger");
        Ok(())
    }
}
