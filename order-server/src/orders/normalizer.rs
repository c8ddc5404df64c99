//! Order item normalization
//!
//! Expands a configuration into billable line items for persistence and
//! rendering, and rebuilds a configuration from stored items.
//!
//! Item order is fixed: regular cookies, two-pack sets, single-with-drink
//! sets, brownie sets, scone sets, fortune cookies, airplane sandwiches.
//! Unit prices come from [`crate::pricing::catalog`]; brownie and scone
//! sets record their set subtotal divided by quantity, truncated.

use crate::pricing::{
    brownie_set_subtotal, catalog::*, compute_price, scone_set_subtotal, set_count,
};
use shared::models::{
    BrownieSet, ItemDetails, Order, OrderConfiguration, OrderItem, SconeSet, SingleWithDrinkSet,
    TwoPackSet,
};

/// Expand a configuration into line items
pub fn to_order_items(config: &OrderConfiguration) -> Vec<OrderItem> {
    let mut items = Vec::new();

    // Regular cookies share one line; per-type counts stay in the details
    let regular_count = config.regular_cookie_count();
    if regular_count > 0 || config.packaging.is_some() {
        let cookies = config
            .regular_cookies
            .iter()
            .filter(|(_, qty)| **qty > 0)
            .map(|(name, qty)| (name.clone(), *qty))
            .collect();
        items.push(OrderItem {
            name: REGULAR_COOKIE_NAME.to_string(),
            quantity: regular_count,
            price: REGULAR_COOKIE_PRICE,
            details: ItemDetails::RegularCookies {
                cookies,
                packaging: config.packaging,
            },
        });
    }

    for set in &config.two_pack_sets {
        items.push(OrderItem {
            name: TWO_PACK_SET_NAME.to_string(),
            quantity: set_count(set.quantity),
            price: TWO_PACK_SET_PRICE,
            details: ItemDetails::TwoPackSet {
                selected_cookies: set.selected_cookies.clone(),
            },
        });
    }

    for set in &config.single_with_drink_sets {
        items.push(OrderItem {
            name: SINGLE_WITH_DRINK_SET_NAME.to_string(),
            quantity: set_count(set.quantity),
            price: SINGLE_WITH_DRINK_SET_PRICE,
            details: ItemDetails::SingleWithDrink {
                selected_cookie: set.selected_cookie.clone(),
                selected_drink: set.selected_drink.clone(),
            },
        });
    }

    for set in &config.brownie_cookie_sets {
        let quantity = set.quantity.max(0);
        items.push(OrderItem {
            name: BROWNIE_NAME.to_string(),
            quantity,
            price: unit_price(brownie_set_subtotal(set), quantity),
            details: ItemDetails::Brownie {
                shape: set.shape,
                custom_sticker: set.custom_sticker,
                heart_message: set.heart_message.clone(),
                custom_topper: set.custom_topper,
            },
        });
    }

    for set in &config.scone_sets {
        let quantity = set.quantity.max(0);
        items.push(OrderItem {
            name: SCONE_NAME.to_string(),
            quantity,
            price: unit_price(scone_set_subtotal(set), quantity),
            details: ItemDetails::Scone {
                flavor: set.flavor,
                strawberry_jam: set.strawberry_jam,
            },
        });
    }

    if config.fortune_cookie > 0 {
        items.push(OrderItem {
            name: FORTUNE_COOKIE_NAME.to_string(),
            quantity: config.fortune_cookie,
            price: FORTUNE_COOKIE_BOX_PRICE,
            details: ItemDetails::FortuneCookie,
        });
    }

    if config.airplane_sandwich > 0 {
        items.push(OrderItem {
            name: AIRPLANE_SANDWICH_NAME.to_string(),
            quantity: config.airplane_sandwich,
            price: AIRPLANE_SANDWICH_BOX_PRICE,
            details: ItemDetails::AirplaneSandwich,
        });
    }

    items
}

/// Set subtotal spread over its quantity, truncated; 0 for an empty set
fn unit_price(subtotal: i64, quantity: i64) -> i64 {
    if quantity > 0 { subtotal / quantity } else { 0 }
}

/// Rebuild the configuration an order was created from
///
/// Inverse of [`to_order_items`] for every item type: re-pricing the result
/// reproduces the stored total.
pub fn reconstruct_configuration(order: &Order) -> OrderConfiguration {
    OrderConfiguration {
        customer_name: order.customer_name.clone(),
        contact: order.contact.clone(),
        delivery_date: order.delivery_date.clone(),
        delivery_method: order.delivery_method,
        delivery_address: order.delivery_address.clone(),
        pickup_time: order.pickup_time.clone(),
        ..configuration_from_items(&order.items)
    }
}

/// The line [`to_order_items`] would emit for this item's own details
///
/// `None` when the item carries nothing billable (e.g. a zero-count box).
pub fn renormalize_item(item: &OrderItem) -> Option<OrderItem> {
    to_order_items(&configuration_from_items(std::slice::from_ref(item)))
        .into_iter()
        .next()
}

/// What one item contributes to the order total, flat fees included
pub fn item_subtotal(item: &OrderItem) -> i64 {
    compute_price(&configuration_from_items(std::slice::from_ref(item))).total
}

/// Rebuild only the product selections from line items
pub fn configuration_from_items(items: &[OrderItem]) -> OrderConfiguration {
    let mut config = OrderConfiguration::default();

    for item in items {
        match &item.details {
            ItemDetails::RegularCookies { cookies, packaging } => {
                for (name, qty) in cookies {
                    let entry = config.regular_cookies.entry(name.clone()).or_insert(0);
                    *entry = entry.saturating_add(*qty);
                }
                if packaging.is_some() {
                    config.packaging = *packaging;
                }
            }
            ItemDetails::TwoPackSet { selected_cookies } => {
                config.two_pack_sets.push(TwoPackSet {
                    selected_cookies: selected_cookies.clone(),
                    quantity: Some(item.quantity),
                });
            }
            ItemDetails::SingleWithDrink {
                selected_cookie,
                selected_drink,
            } => {
                config.single_with_drink_sets.push(SingleWithDrinkSet {
                    selected_cookie: selected_cookie.clone(),
                    selected_drink: selected_drink.clone(),
                    quantity: Some(item.quantity),
                });
            }
            ItemDetails::Brownie {
                shape,
                custom_sticker,
                heart_message,
                custom_topper,
            } => {
                config.brownie_cookie_sets.push(BrownieSet {
                    quantity: item.quantity,
                    shape: *shape,
                    custom_sticker: *custom_sticker,
                    heart_message: heart_message.clone(),
                    custom_topper: *custom_topper,
                });
            }
            ItemDetails::Scone {
                flavor,
                strawberry_jam,
            } => {
                config.scone_sets.push(SconeSet {
                    quantity: item.quantity,
                    flavor: *flavor,
                    strawberry_jam: *strawberry_jam,
                });
            }
            ItemDetails::FortuneCookie => {
                config.fortune_cookie = config.fortune_cookie.saturating_add(item.quantity);
            }
            ItemDetails::AirplaneSandwich => {
                config.airplane_sandwich = config.airplane_sandwich.saturating_add(item.quantity);
            }
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::packaging_subtotal;
    use shared::models::{BrownieShape, DeliveryMethod, OrderStatus, Packaging, SconeFlavor};

    // ==================== Helpers ====================

    fn sample_config() -> OrderConfiguration {
        let mut config = OrderConfiguration {
            customer_name: "김민지".into(),
            contact: "minji@example.com".into(),
            delivery_date: "2025-05-02".into(),
            delivery_method: DeliveryMethod::Quick,
            delivery_address: Some("서울시 마포구 1".into()),
            packaging: Some(Packaging::SingleBox),
            fortune_cookie: 1,
            airplane_sandwich: 2,
            ..Default::default()
        };
        config.regular_cookies.insert("초코칩".into(), 3);
        config.regular_cookies.insert("말차".into(), 2);
        config.regular_cookies.insert("레몬".into(), 0);
        config.two_pack_sets = vec![TwoPackSet {
            selected_cookies: vec!["초코칩".into(), "말차".into()],
            quantity: None,
        }];
        config.single_with_drink_sets = vec![SingleWithDrinkSet {
            selected_cookie: "초코칩".into(),
            selected_drink: "라떼".into(),
            quantity: Some(2),
        }];
        config.brownie_cookie_sets = vec![
            BrownieSet {
                quantity: 7,
                shape: Some(BrownieShape::BirthdayBear),
                custom_sticker: true,
                heart_message: Some("축하해".into()),
                custom_topper: false,
            },
            BrownieSet {
                quantity: 12,
                shape: Some(BrownieShape::BirthdayBear),
                ..Default::default()
            },
        ];
        config.scone_sets = vec![SconeSet {
            quantity: 3,
            flavor: SconeFlavor::EarlGrey,
            strawberry_jam: true,
        }];
        config
    }

    fn order_from(config: &OrderConfiguration) -> Order {
        Order {
            id: "order-1".into(),
            customer_name: config.customer_name.clone(),
            contact: config.contact.clone(),
            delivery_date: config.delivery_date.clone(),
            delivery_method: config.delivery_method,
            pickup_time: config.pickup_time.clone(),
            delivery_address: config.delivery_address.clone(),
            items: to_order_items(config),
            total_price: compute_price(config).total,
            status: OrderStatus::Pending,
            payment_confirmed: false,
            created_at: 0,
        }
    }

    /// Fees not represented by unit × quantity: packaging plus brownie truncation residue
    fn flat_fees(config: &OrderConfiguration) -> i64 {
        let residue: i64 = config
            .brownie_cookie_sets
            .iter()
            .filter(|s| s.quantity > 0)
            .map(|s| brownie_set_subtotal(s) % s.quantity)
            .sum();
        packaging_subtotal(config.packaging, config.regular_cookie_count()) + residue
    }

    // ==================== Ordering Tests ====================

    #[test]
    fn test_item_order_is_fixed() {
        let items = to_order_items(&sample_config());
        let tags: Vec<_> = items.iter().map(|i| i.details.type_tag()).collect();
        assert_eq!(
            tags,
            vec![
                "regularCookies",
                "twoPackSet",
                "singleWithDrink",
                "brownie",
                "brownie",
                "scone",
                "fortuneCookie",
                "airplaneSandwich",
            ]
        );
    }

    #[test]
    fn test_regular_cookies_aggregate_into_one_item() {
        let items = to_order_items(&sample_config());
        let regular = &items[0];
        assert_eq!(regular.quantity, 5);
        assert_eq!(regular.price, REGULAR_COOKIE_PRICE);
        match &regular.details {
            ItemDetails::RegularCookies { cookies, packaging } => {
                assert_eq!(cookies.len(), 2);
                assert_eq!(cookies["초코칩"], 3);
                assert!(!cookies.contains_key("레몬"));
                assert_eq!(*packaging, Some(Packaging::SingleBox));
            }
            other => panic!("unexpected details {other:?}"),
        }
    }

    #[test]
    fn test_packaging_only_keeps_regular_item() {
        let config = OrderConfiguration {
            packaging: Some(Packaging::GiftBox),
            fortune_cookie: 1,
            ..Default::default()
        };
        let items = to_order_items(&config);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].quantity, 0);
        assert_eq!(items[0].details.type_tag(), "regularCookies");
    }

    #[test]
    fn test_empty_configuration_has_no_items() {
        assert!(to_order_items(&OrderConfiguration::default()).is_empty());
    }

    // ==================== Unit Price Tests ====================

    #[test]
    fn test_brownie_unit_price_truncates() {
        let items = to_order_items(&sample_config());
        // (7 × 8800 + 15000) / 7 = 76600 / 7 = 10942.857...
        assert_eq!(items[3].price, 10_942);
        assert_eq!(items[3].quantity, 7);
        // 12 × 8300 / 12
        assert_eq!(items[4].price, 8_300);
        assert_eq!(items[5].price, 4_300);
    }

    #[test]
    fn test_zero_quantity_set_has_zero_unit_price() {
        let config = OrderConfiguration {
            brownie_cookie_sets: vec![BrownieSet {
                quantity: 0,
                custom_sticker: true,
                ..Default::default()
            }],
            ..Default::default()
        };
        let items = to_order_items(&config);
        assert_eq!(items[0].quantity, 0);
        assert_eq!(items[0].price, 0);
    }

    #[test]
    fn test_total_reconciles_with_items_plus_flat_fees() {
        let config = sample_config();
        let items = to_order_items(&config);
        let line_sum: i64 = items.iter().map(OrderItem::line_total).sum();
        assert_eq!(compute_price(&config).total, line_sum + flat_fees(&config));
    }

    #[test]
    fn test_idempotent_serialization() {
        let config = sample_config();
        let a = serde_json::to_vec(&to_order_items(&config)).unwrap();
        let b = serde_json::to_vec(&to_order_items(&config)).unwrap();
        assert_eq!(a, b);
    }

    // ==================== Reconstruction Tests ====================

    #[test]
    fn test_reconstruct_reprices_to_stored_total() {
        let config = sample_config();
        let order = order_from(&config);
        let rebuilt = reconstruct_configuration(&order);
        assert_eq!(compute_price(&rebuilt).total, order.total_price);
        assert_eq!(compute_price(&rebuilt), compute_price(&config));
    }

    #[test]
    fn test_reconstruct_is_inverse_of_normalize() {
        let config = sample_config();
        let order = order_from(&config);
        let rebuilt = reconstruct_configuration(&order);

        assert_eq!(to_order_items(&rebuilt), order.items);
        assert_eq!(rebuilt.customer_name, config.customer_name);
        assert_eq!(rebuilt.delivery_address, config.delivery_address);
        assert_eq!(rebuilt.brownie_cookie_sets, config.brownie_cookie_sets);
        assert_eq!(rebuilt.scone_sets, config.scone_sets);
        assert_eq!(rebuilt.two_pack_sets[0].quantity, Some(1));
    }

    #[test]
    fn test_item_subtotals_add_up_to_total() {
        let config = sample_config();
        let items = to_order_items(&config);
        let sum: i64 = items.iter().map(item_subtotal).sum();
        assert_eq!(sum, compute_price(&config).total);

        // regular line carries its packaging, brownie line its sticker residue
        assert_eq!(item_subtotal(&items[0]), 5 * 4_500 + 5 * 500);
        assert_eq!(item_subtotal(&items[3]), 76_600);
    }

    #[test]
    fn test_renormalize_item_restores_catalog_price() {
        let items = to_order_items(&sample_config());
        for item in &items {
            assert_eq!(renormalize_item(item).as_ref(), Some(item));
        }

        let tampered = OrderItem {
            price: 1,
            ..items[6].clone()
        };
        assert_eq!(
            renormalize_item(&tampered).map(|i| i.price),
            Some(FORTUNE_COOKIE_BOX_PRICE)
        );
        let empty = OrderItem {
            quantity: 0,
            ..items[6].clone()
        };
        assert_eq!(renormalize_item(&empty), None);
    }
}
