//! Quote (견적서) rendering
//!
//! Produces a spreadsheet the customer can open directly. CSV with a UTF-8
//! BOM so spreadsheet apps pick up the Korean text.

use chrono_tz::Tz;
use shared::models::{ItemDetails, Order};

use super::NotifyError;
use crate::orders::normalizer::item_subtotal;
use crate::pricing::catalog::packaging_price;
use crate::utils::time::format_millis;

/// A rendered attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteDocument {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub trait QuoteRenderer: Send + Sync {
    fn render(&self, order: &Order) -> Result<QuoteDocument, NotifyError>;
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub struct CsvQuoteRenderer {
    shop_name: String,
    timezone: Tz,
}

impl CsvQuoteRenderer {
    pub fn new(shop_name: impl Into<String>, timezone: Tz) -> Self {
        Self {
            shop_name: shop_name.into(),
            timezone,
        }
    }
}

impl QuoteRenderer for CsvQuoteRenderer {
    fn render(&self, order: &Order) -> Result<QuoteDocument, NotifyError> {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(UTF8_BOM.to_vec());

        let created = format_millis(order.created_at, self.timezone);
        write(&mut wtr, &["견적서", &self.shop_name])?;
        write(&mut wtr, &["주문번호", &order.id])?;
        write(&mut wtr, &["주문일시", &created])?;
        write(&mut wtr, &["고객명", &order.customer_name])?;
        write(&mut wtr, &["연락처", &order.contact])?;
        write(
            &mut wtr,
            &["수령", &order.delivery_date, order.delivery_method.label()],
        )?;
        write(&mut wtr, &[""])?;
        write(&mut wtr, &["품목", "옵션", "수량", "단가", "금액"])?;

        let mut listed = 0i64;
        for item in &order.items {
            let quantity = item.quantity.to_string();
            let price = item.price.to_string();
            let line_total = item.line_total();
            let options = describe_details(&item.details);
            write(
                &mut wtr,
                &[&item.name, &options, &quantity, &price, &line_total.to_string()],
            )?;
            listed = listed.saturating_add(line_total);

            // Charges outside unit × qty: packaging, or the set fee left over
            // after truncating the unit price
            let extra = item_subtotal(item).saturating_sub(line_total);
            if extra <= 0 {
                continue;
            }
            match &item.details {
                ItemDetails::RegularCookies {
                    packaging: Some(packaging),
                    ..
                } => {
                    let count = if packaging.is_per_item() { item.quantity } else { 1 };
                    write(
                        &mut wtr,
                        &[
                            "포장",
                            packaging.label(),
                            &count.to_string(),
                            &packaging_price(*packaging).to_string(),
                            &extra.to_string(),
                        ],
                    )?;
                }
                _ => {
                    write(&mut wtr, &[&item.name, "세트 추가 금액", "", "", &extra.to_string()])?;
                }
            }
            listed = listed.saturating_add(extra);
        }

        let adjustment = order.total_price.saturating_sub(listed);
        if adjustment != 0 {
            write(&mut wtr, &["조정", "", "", "", &adjustment.to_string()])?;
        }

        let total = order.total_price.to_string();
        write(&mut wtr, &["합계", "", "", "", &total])?;

        let bytes = wtr
            .into_inner()
            .map_err(|e| NotifyError::Render(e.to_string()))?;

        Ok(QuoteDocument {
            file_name: format!("견적서_{}.csv", short_id(&order.id)),
            content_type: "text/csv; charset=utf-8".to_string(),
            bytes,
        })
    }
}

fn write(wtr: &mut csv::Writer<Vec<u8>>, record: &[&str]) -> Result<(), NotifyError> {
    wtr.write_record(record)
        .map_err(|e| NotifyError::Render(e.to_string()))
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// One-cell summary of an item's options
pub fn describe_details(details: &ItemDetails) -> String {
    match details {
        ItemDetails::RegularCookies { cookies, packaging } => {
            let mut parts: Vec<String> = cookies
                .iter()
                .map(|(name, qty)| format!("{name} {qty}"))
                .collect();
            if let Some(packaging) = packaging {
                parts.push(packaging.label().to_string());
            }
            parts.join(", ")
        }
        ItemDetails::TwoPackSet { selected_cookies } => selected_cookies.join(", "),
        ItemDetails::SingleWithDrink {
            selected_cookie,
            selected_drink,
        } => format!("{selected_cookie} / {selected_drink}"),
        ItemDetails::Brownie {
            shape,
            custom_sticker,
            heart_message,
            custom_topper,
        } => {
            let mut parts: Vec<String> = Vec::new();
            if let Some(shape) = shape {
                parts.push(shape.label().to_string());
            }
            if *custom_sticker {
                parts.push("커스텀 스티커".to_string());
            }
            if let Some(message) = heart_message {
                parts.push(format!("하트 메시지: {message}"));
            }
            if *custom_topper {
                parts.push("커스텀 토퍼".to_string());
            }
            parts.join(", ")
        }
        ItemDetails::Scone {
            flavor,
            strawberry_jam,
        } => {
            if *strawberry_jam {
                format!("{}, 딸기잼", flavor.label())
            } else {
                flavor.label().to_string()
            }
        }
        ItemDetails::FortuneCookie | ItemDetails::AirplaneSandwich => String::new(),
    }
}
