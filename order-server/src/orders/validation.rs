//! Order creation validation
//!
//! Runs before pricing and normalization. Every failure names the offending
//! input in the `field` detail, using the configuration's JSON paths
//! (e.g. `brownieCookieSets[1].quantity`).

use chrono::NaiveDate;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DeliveryMethod, NewOrder, OrderConfiguration, OrderItem};
use validator::ValidateEmail;

use super::normalizer::{configuration_from_items, renormalize_item};
use crate::pricing::{compute_price, set_count};
use crate::utils::time::{parse_date, parse_time_of_day, validate_after_today};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_QUANTITY,
    MAX_SHORT_TEXT_LEN, validate_optional_text, validate_quantity, validate_required_text,
};

/// Validate a submitted configuration
///
/// `require_email_contact` is set when the order will trigger quote
/// delivery, in which case the contact must be an e-mail address.
pub fn validate_configuration(
    config: &OrderConfiguration,
    today: NaiveDate,
    require_email_contact: bool,
) -> AppResult<()> {
    validate_customer(
        &config.customer_name,
        &config.contact,
        require_email_contact,
    )?;
    validate_delivery(
        &config.delivery_date,
        config.delivery_method,
        &config.pickup_time,
        &config.delivery_address,
        today,
    )?;
    validate_quantities(config)?;

    if !has_billable_quantity(config) {
        return Err(AppError::invalid_field(
            ErrorCode::OrderEmpty,
            "items",
            "Order must contain at least one item",
        ));
    }
    Ok(())
}

/// Validate a pre-normalized order before it is stored
pub fn validate_new_order(
    order: &NewOrder,
    today: NaiveDate,
    require_email_contact: bool,
) -> AppResult<()> {
    validate_customer(&order.customer_name, &order.contact, require_email_contact)?;
    validate_delivery(
        &order.delivery_date,
        order.delivery_method,
        &order.pickup_time,
        &order.delivery_address,
        today,
    )?;

    if !order.items.iter().any(|item| item.quantity > 0) {
        return Err(AppError::invalid_field(
            ErrorCode::OrderEmpty,
            "items",
            "Order must contain at least one item",
        ));
    }
    if let Some(i) = order
        .items
        .iter()
        .position(|item| item.quantity < 0 || item.price < 0)
    {
        return Err(AppError::invalid_field(
            ErrorCode::ValueOutOfRange,
            &format!("items[{i}]"),
            "Item quantity and price must not be negative",
        ));
    }
    if order.total_price < 0 {
        return Err(AppError::invalid_field(
            ErrorCode::ValueOutOfRange,
            "totalPrice",
            "Total price must not be negative",
        ));
    }
    validate_item_prices(&order.items)?;

    let expected = compute_price(&configuration_from_items(&order.items)).total;
    if order.total_price != expected {
        return Err(AppError::invalid_field(
            ErrorCode::ValueOutOfRange,
            "totalPrice",
            format!(
                "Total price {} does not match the items ({expected})",
                order.total_price
            ),
        ));
    }
    Ok(())
}

/// Every line must carry the menu price and the quantity its details imply
fn validate_item_prices(items: &[OrderItem]) -> AppResult<()> {
    for (i, item) in items.iter().enumerate() {
        let Some(expected) = renormalize_item(item) else {
            continue;
        };
        if expected.price != item.price {
            return Err(AppError::invalid_field(
                ErrorCode::ValueOutOfRange,
                &format!("items[{i}].price"),
                format!(
                    "Unit price {} does not match the menu ({})",
                    item.price, expected.price
                ),
            ));
        }
        if expected.quantity != item.quantity {
            return Err(AppError::invalid_field(
                ErrorCode::ValueOutOfRange,
                &format!("items[{i}].quantity"),
                format!(
                    "Quantity {} does not match the item details ({})",
                    item.quantity, expected.quantity
                ),
            ));
        }
    }
    Ok(())
}

fn validate_customer(name: &str, contact: &str, require_email_contact: bool) -> AppResult<()> {
    validate_required_text(name, "customerName", MAX_NAME_LEN)?;
    validate_required_text(contact, "contact", MAX_EMAIL_LEN)?;
    if require_email_contact && !contact.trim().validate_email() {
        return Err(AppError::invalid_field(
            ErrorCode::InvalidContact,
            "contact",
            format!("{} is not a valid e-mail address", contact.trim()),
        ));
    }
    Ok(())
}

fn validate_delivery(
    delivery_date: &str,
    method: DeliveryMethod,
    pickup_time: &Option<String>,
    delivery_address: &Option<String>,
    today: NaiveDate,
) -> AppResult<()> {
    validate_required_text(delivery_date, "deliveryDate", MAX_SHORT_TEXT_LEN)?;
    let date = parse_date(delivery_date, "deliveryDate")?;
    validate_after_today(date, today, "deliveryDate")?;

    if let Some(time) = pickup_time
        && !time.trim().is_empty()
    {
        parse_time_of_day(time, "pickupTime")?;
    }
    validate_optional_text(delivery_address, "deliveryAddress", MAX_ADDRESS_LEN)?;

    let has_address = delivery_address
        .as_deref()
        .is_some_and(|a| !a.trim().is_empty());
    if method == DeliveryMethod::Quick && !has_address {
        // Accepted; staff follow up for the address
        tracing::warn!(delivery_date, "Quick delivery order without a delivery address");
    }
    Ok(())
}

fn validate_quantities(config: &OrderConfiguration) -> AppResult<()> {
    for (name, qty) in &config.regular_cookies {
        let field = format!("regularCookies.{name}");
        validate_required_text(name, &field, MAX_NAME_LEN)?;
        validate_quantity(*qty, &field, 0, MAX_QUANTITY)?;
    }

    for (i, set) in config.two_pack_sets.iter().enumerate() {
        if let Some(qty) = set.quantity {
            validate_quantity(qty, &format!("twoPackSets[{i}].quantity"), 0, MAX_QUANTITY)?;
        }
        for (j, cookie) in set.selected_cookies.iter().enumerate() {
            validate_required_text(
                cookie,
                &format!("twoPackSets[{i}].selectedCookies[{j}]"),
                MAX_NAME_LEN,
            )?;
        }
    }

    for (i, set) in config.single_with_drink_sets.iter().enumerate() {
        if let Some(qty) = set.quantity {
            validate_quantity(
                qty,
                &format!("singleWithDrinkSets[{i}].quantity"),
                0,
                MAX_QUANTITY,
            )?;
        }
        validate_required_text(
            &set.selected_cookie,
            &format!("singleWithDrinkSets[{i}].selectedCookie"),
            MAX_NAME_LEN,
        )?;
        validate_required_text(
            &set.selected_drink,
            &format!("singleWithDrinkSets[{i}].selectedDrink"),
            MAX_NAME_LEN,
        )?;
    }

    for (i, set) in config.brownie_cookie_sets.iter().enumerate() {
        validate_quantity(
            set.quantity,
            &format!("brownieCookieSets[{i}].quantity"),
            1,
            MAX_QUANTITY,
        )?;
        validate_optional_text(
            &set.heart_message,
            &format!("brownieCookieSets[{i}].heartMessage"),
            MAX_NOTE_LEN,
        )?;
    }

    for (i, set) in config.scone_sets.iter().enumerate() {
        validate_quantity(
            set.quantity,
            &format!("sconeSets[{i}].quantity"),
            1,
            MAX_QUANTITY,
        )?;
    }

    validate_quantity(config.fortune_cookie, "fortuneCookie", 0, MAX_QUANTITY)?;
    validate_quantity(config.airplane_sandwich, "airplaneSandwich", 0, MAX_QUANTITY)?;
    Ok(())
}

/// Whether any category has a non-zero quantity (packaging alone does not count)
pub fn has_billable_quantity(config: &OrderConfiguration) -> bool {
    config.regular_cookie_count() > 0
        || config.two_pack_sets.iter().any(|s| set_count(s.quantity) > 0)
        || config
            .single_with_drink_sets
            .iter()
            .any(|s| set_count(s.quantity) > 0)
        || config.brownie_cookie_sets.iter().any(|s| s.quantity > 0)
        || config.scone_sets.iter().any(|s| s.quantity > 0)
        || config.fortune_cookie > 0
        || config.airplane_sandwich > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{BrownieSet, ItemDetails, Packaging, SconeSet, TwoPackSet};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    fn valid_config() -> OrderConfiguration {
        let mut config = OrderConfiguration {
            customer_name: "김민지".into(),
            contact: "minji@example.com".into(),
            delivery_date: "2025-03-02".into(),
            ..Default::default()
        };
        config.regular_cookies.insert("초코칩".into(), 2);
        config
    }

    fn field_of(result: AppResult<()>) -> (ErrorCode, String) {
        let err = result.unwrap_err();
        (err.code, err.field().unwrap_or_default().to_string())
    }

    // ==================== Customer Tests ====================

    #[test]
    fn test_valid_configuration() {
        assert!(validate_configuration(&valid_config(), today(), true).is_ok());
    }

    #[test]
    fn test_missing_name_and_contact() {
        let mut config = valid_config();
        config.customer_name = " ".into();
        assert_eq!(
            field_of(validate_configuration(&config, today(), false)),
            (ErrorCode::ValidationFailed, "customerName".into())
        );

        let mut config = valid_config();
        config.contact.clear();
        assert_eq!(
            field_of(validate_configuration(&config, today(), false)),
            (ErrorCode::ValidationFailed, "contact".into())
        );
    }

    #[test]
    fn test_contact_must_be_email_only_for_quote_delivery() {
        let mut config = valid_config();
        config.contact = "010-1234-5678".into();
        assert!(validate_configuration(&config, today(), false).is_ok());
        assert_eq!(
            field_of(validate_configuration(&config, today(), true)),
            (ErrorCode::InvalidContact, "contact".into())
        );
    }

    // ==================== Delivery Tests ====================

    #[test]
    fn test_delivery_date_today_rejected_tomorrow_accepted() {
        let mut config = valid_config();
        config.delivery_date = "2025-03-01".into();
        assert_eq!(
            field_of(validate_configuration(&config, today(), false)),
            (ErrorCode::DeliveryDateTooEarly, "deliveryDate".into())
        );

        config.delivery_date = "2025-03-02".into();
        assert!(validate_configuration(&config, today(), false).is_ok());
    }

    #[test]
    fn test_delivery_date_missing_or_malformed() {
        let mut config = valid_config();
        config.delivery_date.clear();
        assert_eq!(
            field_of(validate_configuration(&config, today(), false)),
            (ErrorCode::ValidationFailed, "deliveryDate".into())
        );

        config.delivery_date = "next friday".into();
        assert_eq!(
            field_of(validate_configuration(&config, today(), false)),
            (ErrorCode::InvalidFormat, "deliveryDate".into())
        );
    }

    #[test]
    fn test_pickup_time_format() {
        let mut config = valid_config();
        config.pickup_time = Some("14:00".into());
        assert!(validate_configuration(&config, today(), false).is_ok());

        config.pickup_time = Some("오후 2시".into());
        assert_eq!(
            field_of(validate_configuration(&config, today(), false)),
            (ErrorCode::InvalidFormat, "pickupTime".into())
        );
    }

    #[test]
    fn test_quick_delivery_without_address_is_accepted() {
        let mut config = valid_config();
        config.delivery_method = DeliveryMethod::Quick;
        config.delivery_address = None;
        assert!(validate_configuration(&config, today(), false).is_ok());
    }

    // ==================== Quantity Tests ====================

    #[test]
    fn test_quantity_limits() {
        let mut config = valid_config();
        config.regular_cookies.insert("말차".into(), -1);
        assert_eq!(
            field_of(validate_configuration(&config, today(), false)),
            (ErrorCode::ValueOutOfRange, "regularCookies.말차".into())
        );

        let mut config = valid_config();
        config.fortune_cookie = MAX_QUANTITY + 1;
        assert_eq!(
            field_of(validate_configuration(&config, today(), false)).1,
            "fortuneCookie"
        );

        let mut config = valid_config();
        config.two_pack_sets = vec![TwoPackSet {
            selected_cookies: vec!["초코칩".into()],
            quantity: Some(-1),
        }];
        assert_eq!(
            field_of(validate_configuration(&config, today(), false)).1,
            "twoPackSets[0].quantity"
        );
    }

    #[test]
    fn test_brownie_and_scone_sets_need_at_least_one() {
        let mut config = valid_config();
        config.brownie_cookie_sets = vec![
            BrownieSet {
                quantity: 2,
                ..Default::default()
            },
            BrownieSet::default(),
        ];
        assert_eq!(
            field_of(validate_configuration(&config, today(), false)),
            (ErrorCode::ValueOutOfRange, "brownieCookieSets[1].quantity".into())
        );

        let mut config = valid_config();
        config.scone_sets = vec![SconeSet::default()];
        assert_eq!(
            field_of(validate_configuration(&config, today(), false)).1,
            "sconeSets[0].quantity"
        );
    }

    #[test]
    fn test_all_zero_order_rejected() {
        let mut config = valid_config();
        config.regular_cookies.clear();
        config.regular_cookies.insert("초코칩".into(), 0);
        config.packaging = Some(Packaging::GiftBox);
        assert_eq!(
            field_of(validate_configuration(&config, today(), false)),
            (ErrorCode::OrderEmpty, "items".into())
        );
    }

    #[test]
    fn test_has_billable_quantity() {
        assert!(!has_billable_quantity(&OrderConfiguration::default()));
        let config = OrderConfiguration {
            two_pack_sets: vec![TwoPackSet::default()],
            ..Default::default()
        };
        assert!(has_billable_quantity(&config));
    }

    // ==================== NewOrder Tests ====================

    #[test]
    fn test_new_order_requires_items() {
        let order = NewOrder {
            customer_name: "김민지".into(),
            contact: "minji@example.com".into(),
            delivery_date: "2025-03-02".into(),
            delivery_method: DeliveryMethod::Pickup,
            pickup_time: None,
            delivery_address: None,
            items: vec![],
            total_price: 0,
        };
        assert_eq!(
            field_of(validate_new_order(&order, today(), false)),
            (ErrorCode::OrderEmpty, "items".into())
        );

        let with_item = NewOrder {
            items: vec![OrderItem {
                name: "포춘쿠키 박스".into(),
                quantity: 1,
                price: 17_000,
                details: ItemDetails::FortuneCookie,
            }],
            total_price: 17_000,
            ..order
        };
        assert!(validate_new_order(&with_item, today(), false).is_ok());
    }

    #[test]
    fn test_new_order_must_match_menu_prices() {
        let fortune = OrderItem {
            name: "포춘쿠키 박스".into(),
            quantity: 1,
            price: 17_000,
            details: ItemDetails::FortuneCookie,
        };
        let order = NewOrder {
            customer_name: "김민지".into(),
            contact: "minji@example.com".into(),
            delivery_date: "2025-03-02".into(),
            delivery_method: DeliveryMethod::Pickup,
            pickup_time: None,
            delivery_address: None,
            items: vec![fortune.clone()],
            total_price: 17_000,
        };

        let cheap_item = NewOrder {
            items: vec![OrderItem {
                price: 1,
                ..fortune.clone()
            }],
            total_price: 1,
            ..order.clone()
        };
        assert_eq!(
            field_of(validate_new_order(&cheap_item, today(), false)),
            (ErrorCode::ValueOutOfRange, "items[0].price".into())
        );

        let wrong_total = NewOrder {
            total_price: 5,
            ..order.clone()
        };
        assert_eq!(
            field_of(validate_new_order(&wrong_total, today(), false)),
            (ErrorCode::ValueOutOfRange, "totalPrice".into())
        );

        let mut cookies = std::collections::BTreeMap::new();
        cookies.insert("초코칩".to_string(), 3);
        let miscounted = NewOrder {
            items: vec![OrderItem {
                name: "일반 쿠키".into(),
                quantity: 5,
                price: 4_500,
                details: ItemDetails::RegularCookies {
                    cookies,
                    packaging: None,
                },
            }],
            total_price: 22_500,
            ..order.clone()
        };
        assert_eq!(
            field_of(validate_new_order(&miscounted, today(), false)),
            (ErrorCode::ValueOutOfRange, "items[0].quantity".into())
        );

        // packaging and the brownie sticker residue sit outside unit × qty
        let mut config = OrderConfiguration::default();
        config.regular_cookies.insert("초코칩".into(), 5);
        config.packaging = Some(Packaging::SingleBox);
        config.brownie_cookie_sets = vec![BrownieSet {
            quantity: 7,
            custom_sticker: true,
            ..Default::default()
        }];
        let normalized = NewOrder {
            items: crate::orders::normalizer::to_order_items(&config),
            total_price: compute_price(&config).total,
            ..order
        };
        assert!(validate_new_order(&normalized, today(), false).is_ok());
    }
}
