use serde::{Deserialize, Serialize};

use super::fare::Variant;

/// A sellable ticket with a flat-column price table
///
/// Base prices default to 0; weekend, high-season and reseller prices are
/// optional overrides resolved by the pricing layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Ticket {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Unique URL-safe token used by cart selections
    pub slug: String,
    /// `personal`, `group` or `reseller`
    pub category: String,
    pub is_active: bool,

    pub price_adult: i64,
    pub price_child: i64,
    pub price_general: i64,

    pub price_weekend_adult: Option<i64>,
    pub price_weekend_child: Option<i64>,
    pub price_weekend_general: Option<i64>,

    pub price_highseason_adult: Option<i64>,
    pub price_highseason_child: Option<i64>,
    pub price_highseason_general: Option<i64>,

    pub price_reseller_adult: Option<i64>,
    pub price_reseller_child: Option<i64>,
    pub price_reseller_general: Option<i64>,
}

impl Ticket {
    /// Regular-class price for a variant
    pub fn base_price(&self, variant: Variant) -> i64 {
        match variant {
            Variant::Adult => self.price_adult,
            Variant::Child => self.price_child,
            Variant::General => self.price_general,
        }
    }

    pub fn weekend_price(&self, variant: Variant) -> Option<i64> {
        match variant {
            Variant::Adult => self.price_weekend_adult,
            Variant::Child => self.price_weekend_child,
            Variant::General => self.price_weekend_general,
        }
    }

    pub fn high_season_price(&self, variant: Variant) -> Option<i64> {
        match variant {
            Variant::Adult => self.price_highseason_adult,
            Variant::Child => self.price_highseason_child,
            Variant::General => self.price_highseason_general,
        }
    }

    pub fn reseller_price(&self, variant: Variant) -> Option<i64> {
        match variant {
            Variant::Adult => self.price_reseller_adult,
            Variant::Child => self.price_reseller_child,
            Variant::General => self.price_reseller_general,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Ticket {
        Ticket {
            id: 1,
            name: "Entrance".into(),
            description: None,
            slug: "entrance".into(),
            category: "personal".into(),
            is_active: true,
            price_adult: 100_000,
            price_child: 50_000,
            price_general: 0,
            price_weekend_adult: Some(120_000),
            price_weekend_child: None,
            price_weekend_general: None,
            price_highseason_adult: None,
            price_highseason_child: None,
            price_highseason_general: None,
            price_reseller_adult: Some(80_000),
            price_reseller_child: None,
            price_reseller_general: None,
        }
    }

    #[test]
    fn test_variant_accessors() {
        let t = sample();
        assert_eq!(t.base_price(Variant::Adult), 100_000);
        assert_eq!(t.base_price(Variant::Child), 50_000);
        assert_eq!(t.weekend_price(Variant::Adult), Some(120_000));
        assert_eq!(t.weekend_price(Variant::Child), None);
        assert_eq!(t.reseller_price(Variant::Adult), Some(80_000));
    }
}
