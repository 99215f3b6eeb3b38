//! Discount composition

use shared::models::{PartnerSnapshot, PromoCode, PromoSnapshot};

/// Partner fee inputs: the partner record plus the group-category subtotal
/// the fee applies to
pub struct PartnerContext<'a> {
    pub name: &'a str,
    pub fee_percentage: i64,
    pub group_subtotal: i64,
}

/// Composed discount result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountOutcome {
    pub promo: Option<PromoSnapshot>,
    pub partner: Option<PartnerSnapshot>,
    /// Total discount, clamped to `0..=subtotal`
    pub discount_amount: i64,
    pub final_total: i64,
}

/// Compose promo and partner discounts over a cart subtotal
///
/// Promo and partner adjustments add together; the partner fee only applies
/// when the cart actually contains group-category lines (a non-zero group
/// subtotal). The combined discount is clamped so the final total never goes
/// negative.
pub fn apply_discounts(
    subtotal: i64,
    promo: Option<&PromoCode>,
    partner: Option<PartnerContext<'_>>,
) -> DiscountOutcome {
    let mut discount = 0i64;

    let promo_snapshot = promo.map(|p| {
        let amount = p.discount_for(subtotal).clamp(0, subtotal);
        discount += amount;
        PromoSnapshot {
            code: p.code.clone(),
            discount: amount,
        }
    });

    let partner_snapshot = partner.and_then(|ctx| {
        if ctx.group_subtotal <= 0 {
            return None;
        }
        let amount = (ctx.group_subtotal * ctx.fee_percentage / 100).max(0);
        discount += amount;
        Some(PartnerSnapshot {
            name: ctx.name.to_string(),
            discount: amount,
        })
    });

    let discount_amount = discount.clamp(0, subtotal);
    DiscountOutcome {
        promo: promo_snapshot,
        partner: partner_snapshot,
        discount_amount,
        final_total: subtotal - discount_amount,
    }
}
