//! Unit price resolution

use shared::models::{Addon, FareClass, Role, Ticket, Variant};

/// Resolve a ticket's unit price
///
/// Resellers get their flat reseller price for the variant, falling back to
/// the regular base price; the fare class does not apply to them. Everyone
/// else follows the fallback chain: high season falls back to weekend, which
/// falls back to the regular base price.
pub fn ticket_price(ticket: &Ticket, fare_class: FareClass, variant: Variant, role: Role) -> i64 {
    if role.is_reseller() {
        return ticket
            .reseller_price(variant)
            .unwrap_or_else(|| ticket.base_price(variant));
    }

    let base = ticket.base_price(variant);
    let weekend = ticket.weekend_price(variant).unwrap_or(base);
    match fare_class {
        FareClass::Regular => base,
        FareClass::Weekend => weekend,
        FareClass::HighSeason => ticket.high_season_price(variant).unwrap_or(weekend),
    }
}

/// Resolve an addon's unit price: reseller price when set and applicable,
/// base price otherwise
pub fn addon_price(addon: &Addon, role: Role) -> i64 {
    if role.is_reseller() {
        if let Some(price) = addon.price_reseller {
            return price;
        }
    }
    addon.price
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket() -> Ticket {
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
            price_highseason_adult: Some(150_000),
            price_highseason_child: None,
            price_highseason_general: None,
            price_reseller_adult: Some(80_000),
            price_reseller_child: None,
            price_reseller_general: None,
        }
    }

    #[test]
    fn test_guest_fallback_chain() {
        let t = ticket();
        assert_eq!(ticket_price(&t, FareClass::Regular, Variant::Adult, Role::Guest), 100_000);
        assert_eq!(ticket_price(&t, FareClass::Weekend, Variant::Adult, Role::Guest), 120_000);
        assert_eq!(
            ticket_price(&t, FareClass::HighSeason, Variant::Adult, Role::Guest),
            150_000
        );

        // child has no overrides at all, every class resolves to base
        assert_eq!(ticket_price(&t, FareClass::Weekend, Variant::Child, Role::Guest), 50_000);
        assert_eq!(
            ticket_price(&t, FareClass::HighSeason, Variant::Child, Role::Guest),
            50_000
        );
    }

    #[test]
    fn test_high_season_falls_back_to_weekend() {
        let mut t = ticket();
        t.price_highseason_adult = None;
        assert_eq!(
            ticket_price(&t, FareClass::HighSeason, Variant::Adult, Role::Guest),
            120_000
        );
    }

    #[test]
    fn test_reseller_price_is_flat_across_fare_classes() {
        let t = ticket();
        for fc in [FareClass::Regular, FareClass::Weekend, FareClass::HighSeason] {
            assert_eq!(ticket_price(&t, fc, Variant::Adult, Role::Reseller), 80_000);
        }
    }

    #[test]
    fn test_reseller_falls_back_to_base_regardless_of_fare_class() {
        let t = ticket();
        // no reseller child price set; base regular applies even on high season
        assert_eq!(
            ticket_price(&t, FareClass::HighSeason, Variant::Child, Role::Reseller),
            50_000
        );
    }

    #[test]
    fn test_admin_prices_like_guest() {
        let t = ticket();
        assert_eq!(ticket_price(&t, FareClass::Weekend, Variant::Adult, Role::Admin), 120_000);
    }

    #[test]
    fn test_addon_price_role() {
        let addon = Addon {
            id: 1,
            name: "Gazebo".into(),
            description: None,
            slug: "gazebo".into(),
            category: "group".into(),
            is_active: true,
            price: 150_000,
            price_reseller: Some(100_000),
        };
        assert_eq!(addon_price(&addon, Role::Guest), 150_000);
        assert_eq!(addon_price(&addon, Role::Reseller), 100_000);

        let no_reseller = Addon {
            price_reseller: None,
            ..addon
        };
        assert_eq!(addon_price(&no_reseller, Role::Reseller), 150_000);
    }
}
