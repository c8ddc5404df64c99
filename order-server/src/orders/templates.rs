//! Customer message templates
//!
//! Plain text the staff copies into a chat with the customer. The order's
//! line items are turned back into a configuration so every option shows.

use serde::{Deserialize, Serialize};
use shared::models::{DeliveryMethod, Order, OrderConfiguration};
use std::fmt;
use std::str::FromStr;

use super::normalizer::reconstruct_configuration;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MessageKind {
    OrderReceived,
    PaymentRequest,
    PaymentConfirmed,
    InProduction,
    ReadyForPickup,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrderReceived => "orderReceived",
            Self::PaymentRequest => "paymentRequest",
            Self::PaymentConfirmed => "paymentConfirmed",
            Self::InProduction => "inProduction",
            Self::ReadyForPickup => "readyForPickup",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "orderReceived" => Ok(Self::OrderReceived),
            "paymentRequest" => Ok(Self::PaymentRequest),
            "paymentConfirmed" => Ok(Self::PaymentConfirmed),
            "inProduction" => Ok(Self::InProduction),
            "readyForPickup" => Ok(Self::ReadyForPickup),
            other => Err(format!("Unknown message kind: {other}")),
        }
    }
}

/// Shop details interpolated into messages
#[derive(Debug, Clone, Default)]
pub struct MessageSettings {
    pub shop_name: String,
    /// Shown in payment requests; omitted when empty
    pub bank_account: String,
}

/// Rendered message as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderedMessage {
    pub kind: MessageKind,
    pub text: String,
}

/// Format an amount as `12,300원`
pub fn format_won(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{grouped}원")
}

pub fn render_message(order: &Order, kind: MessageKind, settings: &MessageSettings) -> String {
    let mut lines: Vec<String> = Vec::new();
    let name = &order.customer_name;
    let shop = &settings.shop_name;

    match kind {
        MessageKind::OrderReceived => {
            lines.push(format!("안녕하세요 {name}님, {shop}입니다."));
            lines.push("주문이 정상적으로 접수되었습니다.".into());
        }
        MessageKind::PaymentRequest => {
            lines.push(format!("안녕하세요 {name}님, {shop}입니다."));
            lines.push("아래 주문 내역 확인 후 입금 부탁드립니다.".into());
        }
        MessageKind::PaymentConfirmed => {
            lines.push(format!("{name}님, 입금이 확인되었습니다."));
            lines.push("주문하신 상품은 날짜에 맞춰 준비하겠습니다.".into());
        }
        MessageKind::InProduction => {
            lines.push(format!("{name}님, 주문하신 상품 제작을 시작했습니다."));
        }
        MessageKind::ReadyForPickup => {
            lines.push(format!("{name}님, 주문하신 상품이 준비되었습니다."));
            match order.delivery_method {
                DeliveryMethod::Pickup => lines.push("편하신 시간에 매장으로 방문해 주세요.".into()),
                DeliveryMethod::Quick => lines.push("곧 퀵으로 출발합니다.".into()),
            }
        }
    }

    lines.push(String::new());
    lines.push("[주문 내역]".into());
    lines.extend(item_lines(&reconstruct_configuration(order)));
    lines.push(format!("합계: {}", format_won(order.total_price)));
    lines.push(String::new());
    lines.extend(delivery_lines(order));

    if kind == MessageKind::PaymentRequest && !settings.bank_account.is_empty() {
        lines.push(format!("입금 계좌: {}", settings.bank_account));
    }

    lines.push(String::new());
    lines.push("감사합니다.".into());
    lines.join("\n")
}

fn item_lines(config: &OrderConfiguration) -> Vec<String> {
    let mut lines = Vec::new();

    let regular: Vec<String> = config
        .regular_cookies
        .iter()
        .filter(|(_, qty)| **qty > 0)
        .map(|(name, qty)| format!("{name} {qty}개"))
        .collect();
    if !regular.is_empty() {
        lines.push(format!("- 일반 쿠키: {}", regular.join(", ")));
    }
    if let Some(packaging) = config.packaging {
        lines.push(format!("- 포장: {}", packaging.label()));
    }

    for set in &config.two_pack_sets {
        lines.push(format!(
            "- 2구 세트 ({}) x{}",
            set.selected_cookies.join(", "),
            set.quantity.unwrap_or(1)
        ));
    }
    for set in &config.single_with_drink_sets {
        lines.push(format!(
            "- 1구 + 음료 세트 ({} / {}) x{}",
            set.selected_cookie,
            set.selected_drink,
            set.quantity.unwrap_or(1)
        ));
    }
    for set in &config.brownie_cookie_sets {
        let mut options: Vec<String> = Vec::new();
        if let Some(shape) = set.shape {
            options.push(shape.label().into());
        }
        if set.custom_sticker {
            options.push("커스텀 스티커".into());
        }
        if let Some(message) = &set.heart_message {
            if message.is_empty() {
                options.push("하트 메시지".into());
            } else {
                options.push(format!("하트 메시지 \"{message}\""));
            }
        }
        if set.custom_topper {
            options.push("커스텀 토퍼".into());
        }
        let options = if options.is_empty() {
            String::new()
        } else {
            format!(" ({})", options.join(", "))
        };
        lines.push(format!("- 브라우니 쿠키{options} x{}", set.quantity));
    }
    for set in &config.scone_sets {
        let jam = if set.strawberry_jam { ", 딸기잼" } else { "" };
        lines.push(format!(
            "- 스콘 ({}{jam}) x{}",
            set.flavor.label(),
            set.quantity
        ));
    }
    if config.fortune_cookie > 0 {
        lines.push(format!("- 포춘쿠키 박스 x{}", config.fortune_cookie));
    }
    if config.airplane_sandwich > 0 {
        lines.push(format!("- 비행기 샌드위치 박스 x{}", config.airplane_sandwich));
    }
    lines
}

fn delivery_lines(order: &Order) -> Vec<String> {
    let mut lines = vec![format!(
        "수령: {} {}",
        order.delivery_date,
        order.delivery_method.label()
    )];
    if let Some(time) = order.pickup_time.as_deref().filter(|t| !t.is_empty()) {
        lines.push(format!("시간: {time}"));
    }
    if order.delivery_method == DeliveryMethod::Quick
        && let Some(address) = order.delivery_address.as_deref().filter(|a| !a.is_empty())
    {
        lines.push(format!("주소: {address}"));
    }
    lines
}
