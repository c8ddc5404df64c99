//! Persisted order and its line items

use super::order_config::{BrownieShape, DeliveryMethod, Packaging, SconeFlavor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Production status of an order
///
/// `pending -> payment_confirmed -> in_production -> completed`.
/// Only payment confirmation moves the status automatically; every other
/// transition is an explicit admin action. `completed` is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum OrderStatus {
    #[default]
    Pending,
    PaymentConfirmed,
    InProduction,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::PaymentConfirmed => "payment_confirmed",
            Self::InProduction => "in_production",
            Self::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "입금 대기",
            Self::PaymentConfirmed => "입금 확인",
            Self::InProduction => "제작 중",
            Self::Completed => "완료",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "payment_confirmed" => Ok(Self::PaymentConfirmed),
            "in_production" => Ok(Self::InProduction),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

/// Type-specific payload of an order item, tagged by `type`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ItemDetails {
    /// All loose cookies in one line; per-type counts kept here
    RegularCookies {
        cookies: BTreeMap<String, i64>,
        #[serde(default)]
        packaging: Option<Packaging>,
    },
    TwoPackSet {
        selected_cookies: Vec<String>,
    },
    SingleWithDrink {
        selected_cookie: String,
        selected_drink: String,
    },
    Brownie {
        #[serde(default)]
        shape: Option<BrownieShape>,
        #[serde(default)]
        custom_sticker: bool,
        #[serde(default)]
        heart_message: Option<String>,
        #[serde(default)]
        custom_topper: bool,
    },
    Scone {
        flavor: SconeFlavor,
        #[serde(default)]
        strawberry_jam: bool,
    },
    FortuneCookie,
    AirplaneSandwich,
}

impl ItemDetails {
    /// The `type` tag as it appears on the wire
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::RegularCookies { .. } => "regularCookies",
            Self::TwoPackSet { .. } => "twoPackSet",
            Self::SingleWithDrink { .. } => "singleWithDrink",
            Self::Brownie { .. } => "brownie",
            Self::Scone { .. } => "scone",
            Self::FortuneCookie => "fortuneCookie",
            Self::AirplaneSandwich => "airplaneSandwich",
        }
    }
}

/// One billable line of an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub name: String,
    pub quantity: i64,
    /// Unit price
    pub price: i64,
    #[serde(flatten)]
    pub details: ItemDetails,
}

impl OrderItem {
    pub fn line_total(&self) -> i64 {
        self.price.saturating_mul(self.quantity)
    }
}

/// Persisted order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub contact: String,
    pub delivery_date: String,
    pub delivery_method: DeliveryMethod,
    pub pickup_time: Option<String>,
    pub delivery_address: Option<String>,
    pub items: Vec<OrderItem>,
    pub total_price: i64,
    pub status: OrderStatus,
    pub payment_confirmed: bool,
    /// Unix millis
    pub created_at: i64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub customer_name: String,
    pub contact: String,
    pub delivery_date: String,
    pub delivery_method: DeliveryMethod,
    #[serde(default)]
    pub pickup_time: Option<String>,
    #[serde(default)]
    pub delivery_address: Option<String>,
    pub items: Vec<OrderItem>,
    pub total_price: i64,
}

/// Update status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// Update payment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentUpdate {
    pub confirmed: bool,
}
