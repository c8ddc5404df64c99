//! Order configuration
//!
//! The shape a customer builds in the order form. It is priced for live
//! preview and re-priced, validated and normalized into line items on
//! submission. Every collection and count defaults when absent so partial
//! forms deserialize.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How the order leaves the bakery
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum DeliveryMethod {
    /// 매장 픽업
    #[default]
    Pickup,
    /// 퀵 배송
    Quick,
}

impl DeliveryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Quick => "quick",
        }
    }

    /// Korean display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pickup => "매장 픽업",
            Self::Quick => "퀵 배송",
        }
    }
}

/// Packaging for the loose regular cookies
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Packaging {
    /// Individual box per cookie
    SingleBox,
    /// Individual bag per cookie
    SingleBag,
    /// One gift box wrapping the whole order
    GiftBox,
}

impl Packaging {
    /// Whether the price scales with the regular cookie count
    pub fn is_per_item(&self) -> bool {
        matches!(self, Self::SingleBox | Self::SingleBag)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SingleBox => "개별 박스",
            Self::SingleBag => "개별 봉투",
            Self::GiftBox => "선물 박스",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BrownieShape {
    Bear,
    /// Carries a per-unit surcharge
    BirthdayBear,
}

impl BrownieShape {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bear => "곰돌이",
            Self::BirthdayBear => "생일 곰돌이",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SconeFlavor {
    #[default]
    Plain,
    EarlGrey,
    Chocolate,
}

impl SconeFlavor {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Plain => "플레인",
            Self::EarlGrey => "얼그레이",
            Self::Chocolate => "초코",
        }
    }
}

/// A set of brownie cookies sharing the same decoration options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BrownieSet {
    pub quantity: i64,
    pub shape: Option<BrownieShape>,
    /// Flat fee per set, not scaled by quantity
    pub custom_sticker: bool,
    /// `Some` means the option is enabled, even when the text is empty
    pub heart_message: Option<String>,
    pub custom_topper: bool,
}

/// Two cookies packed together; the selection affects display only
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TwoPackSet {
    pub selected_cookies: Vec<String>,
    /// Missing means one set
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SingleWithDrinkSet {
    pub selected_cookie: String,
    pub selected_drink: String,
    /// Missing means one set
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SconeSet {
    pub quantity: i64,
    pub flavor: SconeFlavor,
    pub strawberry_jam: bool,
}

/// Full order form as submitted by the customer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderConfiguration {
    pub customer_name: String,
    pub contact: String,
    /// YYYY-MM-DD
    pub delivery_date: String,
    pub delivery_method: DeliveryMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    /// Pickup slot, HH:MM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<String>,

    /// Cookie type name -> quantity
    pub regular_cookies: BTreeMap<String, i64>,
    pub packaging: Option<Packaging>,
    pub brownie_cookie_sets: Vec<BrownieSet>,
    pub two_pack_sets: Vec<TwoPackSet>,
    pub single_with_drink_sets: Vec<SingleWithDrinkSet>,
    pub scone_sets: Vec<SconeSet>,
    /// Box count
    pub fortune_cookie: i64,
    /// Box count
    pub airplane_sandwich: i64,
}

impl OrderConfiguration {
    /// Total loose regular cookies, negatives counted as zero
    pub fn regular_cookie_count(&self) -> i64 {
        self.regular_cookies
            .values()
            .fold(0i64, |acc, q| acc.saturating_add((*q).max(0)))
    }
}
