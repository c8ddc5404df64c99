//! Price breakdown

use serde::{Deserialize, Serialize};

/// Per-category subtotals of an order configuration
///
/// Every category is always present, zero when unused, so consumers can
/// render only the non-zero lines. `total` is the sum of all categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub regular_cookies: i64,
    pub two_pack_set: i64,
    pub single_with_drink: i64,
    pub packaging: i64,
    pub brownie: i64,
    pub scone: i64,
    pub fortune: i64,
    pub airplane: i64,
    pub total: i64,
}

impl PriceBreakdown {
    /// Category name and subtotal pairs in display order (total excluded)
    pub fn entries(&self) -> [(&'static str, i64); 8] {
        [
            ("regularCookies", self.regular_cookies),
            ("twoPackSet", self.two_pack_set),
            ("singleWithDrink", self.single_with_drink),
            ("packaging", self.packaging),
            ("brownie", self.brownie),
            ("scone", self.scone),
            ("fortune", self.fortune),
            ("airplane", self.airplane),
        ]
    }

    /// Sum of the category subtotals
    pub fn category_sum(&self) -> i64 {
        self.entries()
            .iter()
            .fold(0i64, |acc, (_, v)| acc.saturating_add(*v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_categories_serialized() {
        let json = serde_json::to_value(PriceBreakdown::default()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 9);
        assert_eq!(obj["singleWithDrink"], 0);
        assert_eq!(obj["total"], 0);
    }

    #[test]
    fn test_entries_order_and_sum() {
        let b = PriceBreakdown {
            regular_cookies: 22_500,
            packaging: 2_500,
            fortune: 17_000,
            total: 42_000,
            ..Default::default()
        };
        let names: Vec<_> = b.entries().iter().map(|(n, _)| *n).collect();
        assert_eq!(names[0], "regularCookies");
        assert_eq!(names[7], "airplane");
        assert_eq!(b.category_sum(), b.total);
    }
}
