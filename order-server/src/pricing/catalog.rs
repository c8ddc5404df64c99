//! Menu prices (KRW) and display names
//!
//! The single source of unit prices for both the live preview and the
//! authoritative price computed on submission.

use shared::models::Packaging;

pub const REGULAR_COOKIE_PRICE: i64 = 4_500;
pub const TWO_PACK_SET_PRICE: i64 = 10_500;
pub const SINGLE_WITH_DRINK_SET_PRICE: i64 = 11_000;

/// Per regular cookie
pub const SINGLE_BOX_PRICE: i64 = 500;
/// Per regular cookie
pub const SINGLE_BAG_PRICE: i64 = 300;
/// Charged once per order
pub const GIFT_BOX_PRICE: i64 = 3_000;

pub const BROWNIE_PRICE: i64 = 7_800;
/// Per unit, birthday bear shape only
pub const BIRTHDAY_BEAR_SURCHARGE: i64 = 500;
/// Per set, not scaled by quantity
pub const CUSTOM_STICKER_FEE: i64 = 15_000;
/// Per unit
pub const HEART_MESSAGE_SURCHARGE: i64 = 500;

pub const SCONE_PRICE: i64 = 3_800;
/// Per unit
pub const STRAWBERRY_JAM_SURCHARGE: i64 = 500;

/// Per box
pub const FORTUNE_COOKIE_BOX_PRICE: i64 = 17_000;
/// Per box
pub const AIRPLANE_SANDWICH_BOX_PRICE: i64 = 22_000;

pub const REGULAR_COOKIE_NAME: &str = "일반 쿠키";
pub const TWO_PACK_SET_NAME: &str = "2구 세트";
pub const SINGLE_WITH_DRINK_SET_NAME: &str = "1구 + 음료 세트";
pub const BROWNIE_NAME: &str = "브라우니 쿠키";
pub const SCONE_NAME: &str = "스콘";
pub const FORTUNE_COOKIE_NAME: &str = "포춘쿠키 박스";
pub const AIRPLANE_SANDWICH_NAME: &str = "비행기 샌드위치 박스";

/// Unit price of a packaging option
pub fn packaging_price(packaging: Packaging) -> i64 {
    match packaging {
        Packaging::SingleBox => SINGLE_BOX_PRICE,
        Packaging::SingleBag => SINGLE_BAG_PRICE,
        Packaging::GiftBox => GIFT_BOX_PRICE,
    }
}
