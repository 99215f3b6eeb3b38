//! Cart expansion

use shared::error::{AppError, AppResult};
use shared::models::{Addon, AddonLine, CartInput, DateClass, OrderDetails, Role, Ticket, TicketLine};

use super::resolver::{addon_price, ticket_price};

/// Catalog slice the cart pricer works over
pub struct Catalog {
    pub tickets: Vec<Ticket>,
    pub addons: Vec<Addon>,
}

impl Catalog {
    fn ticket(&self, slug: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.slug == slug)
    }

    fn addon(&self, slug: &str) -> Option<&Addon> {
        self.addons.iter().find(|a| a.slug == slug)
    }
}

/// A cart expanded into priced line items
#[derive(Debug, Clone)]
pub struct PricedCart {
    /// Line-item snapshot, persisted verbatim into the order; promo and
    /// partner slots are filled later by the discount engine
    pub details: OrderDetails,
    pub subtotal: i64,
}

impl PricedCart {
    /// Subtotal over group-category lines only, the partner fee base
    pub fn group_subtotal(&self) -> i64 {
        let items: i64 = self
            .details
            .items
            .iter()
            .filter(|l| l.category == "group")
            .map(|l| l.subtotal)
            .sum();
        let addons: i64 = self
            .details
            .addons
            .iter()
            .filter(|l| l.category == "group")
            .map(|l| l.price)
            .sum();
        items + addons
    }
}

/// Expand a cart into priced lines and a subtotal
///
/// Fails with `VenueClosed` on closed dates. Unknown slugs and non-positive
/// quantities are skipped rather than rejected, tolerating stale client
/// catalogs. Each addon occurrence counts as one selection.
pub fn price_cart(
    catalog: &Catalog,
    cart: &CartInput,
    visit_date: &str,
    date_class: DateClass,
    role: Role,
) -> AppResult<PricedCart> {
    let fare_class = date_class
        .fare_class()
        .ok_or_else(|| AppError::venue_closed(visit_date))?;

    let mut details = OrderDetails {
        group: cart.group.clone(),
        ..OrderDetails::default()
    };
    let mut subtotal = 0i64;

    for selection in &cart.tickets {
        if selection.qty <= 0 {
            continue;
        }
        let Some(ticket) = catalog.ticket(&selection.slug) else {
            tracing::debug!(slug = %selection.slug, "Skipping unknown ticket slug");
            continue;
        };
        let unit = ticket_price(ticket, fare_class, selection.variant, role);
        let line_subtotal = unit * selection.qty;
        details.items.push(TicketLine {
            name: ticket.name.clone(),
            qty: selection.qty,
            price: unit,
            subtotal: line_subtotal,
            category: ticket.category.clone(),
        });
        subtotal += line_subtotal;
    }

    for slug in &cart.addons {
        let Some(addon) = catalog.addon(slug) else {
            tracing::debug!(slug = %slug, "Skipping unknown addon slug");
            continue;
        };
        let price = addon_price(addon, role);
        details.addons.push(AddonLine {
            name: addon.name.clone(),
            price,
            category: addon.category.clone(),
        });
        subtotal += price;
    }

    Ok(PricedCart { details, subtotal })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;
    use shared::models::{TicketSelection, Variant};

    fn catalog() -> Catalog {
        let base = Ticket {
            id: 0,
            name: String::new(),
            description: None,
            slug: String::new(),
            category: "personal".into(),
            is_active: true,
            price_adult: 0,
            price_child: 0,
            price_general: 0,
            price_weekend_adult: None,
            price_weekend_child: None,
            price_weekend_general: None,
            price_highseason_adult: None,
            price_highseason_child: None,
            price_highseason_general: None,
            price_reseller_adult: None,
            price_reseller_child: None,
            price_reseller_general: None,
        };
        Catalog {
            tickets: vec![
                Ticket {
                    id: 1,
                    name: "Entrance".into(),
                    slug: "entrance".into(),
                    price_adult: 100_000,
                    price_child: 50_000,
                    ..base.clone()
                },
                Ticket {
                    id: 2,
                    name: "Group Package".into(),
                    slug: "group-package".into(),
                    category: "group".into(),
                    price_general: 50_000,
                    ..base
                },
            ],
            addons: vec![Addon {
                id: 1,
                name: "Gazebo".into(),
                description: None,
                slug: "gazebo".into(),
                category: "group".into(),
                is_active: true,
                price: 150_000,
                price_reseller: None,
            }],
        }
    }

    fn select(slug: &str, variant: Variant, qty: i64) -> TicketSelection {
        TicketSelection {
            slug: slug.into(),
            variant,
            qty,
        }
    }

    #[test]
    fn test_closed_date_fails() {
        let cart = CartInput {
            tickets: vec![select("entrance", Variant::Adult, 2)],
            ..CartInput::default()
        };
        let err = price_cart(&catalog(), &cart, "2024-12-25", DateClass::Closed, Role::Guest)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::VenueClosed);
    }

    #[test]
    fn test_basic_expansion() {
        let cart = CartInput {
            tickets: vec![
                select("entrance", Variant::Adult, 2),
                select("entrance", Variant::Child, 1),
            ],
            addons: vec!["gazebo".into()],
            group: None,
        };
        let priced =
            price_cart(&catalog(), &cart, "2024-05-01", DateClass::Regular, Role::Guest).unwrap();
        assert_eq!(priced.subtotal, 2 * 100_000 + 50_000 + 150_000);
        assert_eq!(priced.details.items.len(), 2);
        assert_eq!(priced.details.addons.len(), 1);
        assert_eq!(priced.details.items[0].subtotal, 200_000);
    }

    #[test]
    fn test_unknown_slugs_and_zero_qty_skipped() {
        let cart = CartInput {
            tickets: vec![
                select("entrance", Variant::Adult, 1),
                select("retired-ride", Variant::Adult, 3),
                select("entrance", Variant::Child, 0),
            ],
            addons: vec!["nonexistent".into()],
            group: None,
        };
        let priced =
            price_cart(&catalog(), &cart, "2024-05-01", DateClass::Regular, Role::Guest).unwrap();
        assert_eq!(priced.details.items.len(), 1);
        assert!(priced.details.addons.is_empty());
        assert_eq!(priced.subtotal, 100_000);
    }

    #[test]
    fn test_repeated_addon_slug_counts_twice() {
        let cart = CartInput {
            addons: vec!["gazebo".into(), "gazebo".into()],
            ..CartInput::default()
        };
        let priced =
            price_cart(&catalog(), &cart, "2024-05-01", DateClass::Regular, Role::Guest).unwrap();
        assert_eq!(priced.details.addons.len(), 2);
        assert_eq!(priced.subtotal, 300_000);
    }

    #[test]
    fn test_group_subtotal_only_counts_group_lines() {
        let cart = CartInput {
            tickets: vec![
                select("entrance", Variant::Adult, 1),
                select("group-package", Variant::General, 2),
            ],
            addons: vec!["gazebo".into()],
            group: Some(shared::models::GroupInfo {
                name: "SDN 3".into(),
                size: 40,
            }),
        };
        let priced =
            price_cart(&catalog(), &cart, "2024-05-01", DateClass::Regular, Role::Guest).unwrap();
        // group package 2×50_000 plus gazebo 150_000
        assert_eq!(priced.group_subtotal(), 250_000);
        assert_eq!(priced.subtotal, 350_000);
        assert_eq!(priced.details.group.as_ref().unwrap().size, 40);
    }
}
