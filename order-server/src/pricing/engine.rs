//! Order price computation
//!
//! Pure functions from an [`OrderConfiguration`] to a [`PriceBreakdown`].
//! Malformed input is rejected by validation before it gets here; anything
//! that slips through is clamped (negative quantities count as zero) and all
//! arithmetic saturates, so this never panics.

use super::catalog::*;
use shared::models::{
    BrownieSet, BrownieShape, OrderConfiguration, Packaging, PriceBreakdown, SconeSet,
};

/// Compute the per-category breakdown and total of a configuration
pub fn compute_price(config: &OrderConfiguration) -> PriceBreakdown {
    let regular_count = config.regular_cookie_count();

    let two_pack_count = config
        .two_pack_sets
        .iter()
        .fold(0i64, |acc, s| acc.saturating_add(set_count(s.quantity)));
    let single_with_drink_count = config
        .single_with_drink_sets
        .iter()
        .fold(0i64, |acc, s| acc.saturating_add(set_count(s.quantity)));

    let brownie = config
        .brownie_cookie_sets
        .iter()
        .fold(0i64, |acc, s| acc.saturating_add(brownie_set_subtotal(s)));
    let scone = config
        .scone_sets
        .iter()
        .fold(0i64, |acc, s| acc.saturating_add(scone_set_subtotal(s)));

    let mut breakdown = PriceBreakdown {
        regular_cookies: regular_count.saturating_mul(REGULAR_COOKIE_PRICE),
        two_pack_set: two_pack_count.saturating_mul(TWO_PACK_SET_PRICE),
        single_with_drink: single_with_drink_count.saturating_mul(SINGLE_WITH_DRINK_SET_PRICE),
        packaging: packaging_subtotal(config.packaging, regular_count),
        brownie,
        scone,
        fortune: config
            .fortune_cookie
            .max(0)
            .saturating_mul(FORTUNE_COOKIE_BOX_PRICE),
        airplane: config
            .airplane_sandwich
            .max(0)
            .saturating_mul(AIRPLANE_SANDWICH_BOX_PRICE),
        total: 0,
    };
    breakdown.total = breakdown.category_sum();
    breakdown
}

/// Quantity of a two-pack or single-with-drink set; missing means one
pub fn set_count(quantity: Option<i64>) -> i64 {
    quantity.unwrap_or(1).max(0)
}

/// Packaging fee: per-item kinds scale with loose regular cookies, the
/// gift box is charged once.
pub fn packaging_subtotal(packaging: Option<Packaging>, regular_count: i64) -> i64 {
    match packaging {
        None => 0,
        Some(p) if p.is_per_item() => packaging_price(p).saturating_mul(regular_count.max(0)),
        Some(p) => packaging_price(p),
    }
}

/// Subtotal of one brownie set, including its flat sticker fee
///
/// A set with quantity 0 contributes nothing.
pub fn brownie_set_subtotal(set: &BrownieSet) -> i64 {
    let qty = set.quantity.max(0);
    if qty == 0 {
        return 0;
    }

    let mut per_unit = BROWNIE_PRICE;
    if set.shape == Some(BrownieShape::BirthdayBear) {
        per_unit += BIRTHDAY_BEAR_SURCHARGE;
    }
    if set.heart_message.is_some() {
        per_unit += HEART_MESSAGE_SURCHARGE;
    }

    let subtotal = qty.saturating_mul(per_unit);
    if set.custom_sticker {
        subtotal.saturating_add(CUSTOM_STICKER_FEE)
    } else {
        subtotal
    }
}

/// Subtotal of one scone set
pub fn scone_set_subtotal(set: &SconeSet) -> i64 {
    let qty = set.quantity.max(0);
    let per_unit = if set.strawberry_jam {
        SCONE_PRICE + STRAWBERRY_JAM_SURCHARGE
    } else {
        SCONE_PRICE
    };
    qty.saturating_mul(per_unit)
}
