use serde::{Deserialize, Serialize};

/// Payment lifecycle status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Expired,
}

impl PaymentStatus {
    /// Terminal states admit no further transitions from the lifecycle
    pub fn is_terminal(self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }
}

/// Payment channel selected at checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Qris,
    VaBca,
    VaMandiri,
    VaBni,
    Ovo,
    Shopeepay,
    Linkaja,
    Card,
    Cash,
    Deposit,
}

impl PaymentMethod {
    /// Whether this method needs a hosted gateway invoice
    pub fn is_gateway(self) -> bool {
        !matches!(self, PaymentMethod::Cash | PaymentMethod::Deposit)
    }

    /// Gateway payment-method hint for hosted invoices
    pub fn gateway_hint(self) -> Option<&'static str> {
        match self {
            PaymentMethod::Qris => Some("QRIS"),
            PaymentMethod::VaBca => Some("BCA"),
            PaymentMethod::VaMandiri => Some("MANDIRI"),
            PaymentMethod::VaBni => Some("BNI"),
            PaymentMethod::Ovo => Some("OVO"),
            PaymentMethod::Shopeepay => Some("SHOPEEPAY"),
            PaymentMethod::Linkaja => Some("LINKAJA"),
            PaymentMethod::Card => Some("CREDIT_CARD"),
            PaymentMethod::Cash | PaymentMethod::Deposit => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum VisitType {
    Personal,
    Group,
}

/// One priced ticket line in the order snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketLine {
    pub name: String,
    pub qty: i64,
    pub price: i64,
    pub subtotal: i64,
    pub category: String,
}

/// One priced addon line in the order snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonLine {
    pub name: String,
    pub price: i64,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoSnapshot {
    pub code: String,
    pub discount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerSnapshot {
    pub name: String,
    pub discount: i64,
}

/// Point-in-time copy of the priced cart, persisted verbatim with the order
///
/// This snapshot is the durable record used for invoicing and must round-trip
/// exactly; later catalog price changes never affect it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub items: Vec<TicketLine>,
    pub addons: Vec<AddonLine>,
    pub group: Option<super::cart::GroupInfo>,
    pub promo: Option<PromoSnapshot>,
    pub partner: Option<PartnerSnapshot>,
}

impl OrderDetails {
    /// Sum of ticket quantities across all lines
    pub fn total_pax(&self) -> i64 {
        self.items.iter().map(|l| l.qty).sum()
    }
}

/// A persisted order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    /// Public code, `TIX-YYYYMMDD-XXXXXX`
    pub ticket_code: String,
    /// Per-day sequential invoice number, `INV-YYYYMMDD-NNNN`
    pub invoice_number: String,
    /// Visit date as `YYYY-MM-DD`
    pub visit_date: String,
    pub visit_type: VisitType,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub details: OrderDetails,

    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,

    pub subtotal: i64,
    pub discount_amount: i64,
    pub total_price: i64,
    pub promo_code: Option<String>,

    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub gateway_invoice_id: Option<String>,
    pub gateway_invoice_url: Option<String>,

    pub reseller_id: Option<i64>,
    pub partner_id: Option<i64>,

    /// Millisecond timestamps
    pub created_at: i64,
    pub expires_at: i64,
    pub wristband_at: Option<i64>,
    pub checkin_at: Option<i64>,
    pub checkin_gate: Option<String>,
}

impl Order {
    /// Whether a still-pending order is past its payment deadline
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.payment_status == PaymentStatus::Pending && now > self.expires_at
    }
}
