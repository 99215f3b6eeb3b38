//! Unified error codes for the Wahana ticketing engine
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order and scan errors
//! - 5xxx: Payment, deposit and gateway errors
//! - 6xxx: Catalog errors (tickets, addons, promos, partners, resellers)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format (e.g. malformed date)
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Webhook callback token mismatch or missing
    WebhookTokenInvalid = 1003,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,

    // ==================== 4xxx: Order / Scan ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Venue is closed on the requested visit date
    VenueClosed = 4002,
    /// Cart has no priced line items
    OrderEmpty = 4003,
    /// Order payment window has expired
    OrderExpired = 4004,
    /// Ticket-code space exhausted (bounded retry gave up)
    CodeSpaceExhausted = 4005,
    /// Order is not paid (scan rejected)
    OrderNotPaid = 4101,
    /// Ticket already scanned for this scan type
    AlreadyScanned = 4102,
    /// Unknown scan type
    InvalidScanType = 4103,

    // ==================== 5xxx: Payment / Deposit ====================
    /// Payment processing failed
    PaymentFailed = 5001,
    /// Invalid payment method
    PaymentInvalidMethod = 5002,
    /// Reseller deposit balance insufficient for purchase
    InsufficientBalance = 5101,
    /// Top-up amount below configured minimum
    TopupBelowMinimum = 5102,
    /// Deposit transaction not found
    DepositTransactionNotFound = 5103,
    /// Reseller deposit validity period has ended
    DepositExpired = 5104,
    /// Payment gateway not configured / unreachable
    GatewayUnavailable = 5201,
    /// Payment gateway rejected the request
    GatewayRejected = 5202,
    /// Webhook external_id matches no order or deposit transaction
    WebhookTargetNotFound = 5203,

    // ==================== 6xxx: Catalog ====================
    /// Ticket not found
    TicketNotFound = 6001,
    /// Addon not found
    AddonNotFound = 6101,
    /// Promo code not found or inactive
    PromoNotFound = 6201,
    /// Promo code already exists
    PromoCodeExists = 6202,
    /// Partner not found
    PartnerNotFound = 6301,
    /// Reseller account not found
    ResellerNotFound = 6401,
    /// Reseller account is disabled
    ResellerInactive = 6402,
    /// A date override already exists for this date
    DateOverrideExists = 6501,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::WebhookTokenInvalid => "Invalid callback token",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Order / Scan
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::VenueClosed => "Venue is closed on the requested date",
            ErrorCode::OrderEmpty => "Cart contains no valid line items",
            ErrorCode::OrderExpired => "Order payment window has expired",
            ErrorCode::CodeSpaceExhausted => "Unable to generate a unique ticket code",
            ErrorCode::OrderNotPaid => "Order has not been paid",
            ErrorCode::AlreadyScanned => "Ticket has already been scanned",
            ErrorCode::InvalidScanType => "Unknown scan type",

            // Payment / Deposit
            ErrorCode::PaymentFailed => "Payment processing failed",
            ErrorCode::PaymentInvalidMethod => "Invalid payment method",
            ErrorCode::InsufficientBalance => "Deposit balance is insufficient",
            ErrorCode::TopupBelowMinimum => "Top-up amount is below the minimum",
            ErrorCode::DepositTransactionNotFound => "Deposit transaction not found",
            ErrorCode::DepositExpired => "Deposit validity period has ended",
            ErrorCode::GatewayUnavailable => "Payment gateway is not available",
            ErrorCode::GatewayRejected => "Payment gateway rejected the request",
            ErrorCode::WebhookTargetNotFound => "No matching order or deposit transaction",

            // Catalog
            ErrorCode::TicketNotFound => "Ticket not found",
            ErrorCode::AddonNotFound => "Addon not found",
            ErrorCode::PromoNotFound => "Promo code not found",
            ErrorCode::PromoCodeExists => "Promo code already exists",
            ErrorCode::PartnerNotFound => "Partner not found",
            ErrorCode::ResellerNotFound => "Reseller account not found",
            ErrorCode::ResellerInactive => "Reseller account is disabled",
            ErrorCode::DateOverrideExists => "Date override already exists",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::WebhookTokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::AdminRequired),

            // Order / Scan
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::VenueClosed),
            4003 => Ok(ErrorCode::OrderEmpty),
            4004 => Ok(ErrorCode::OrderExpired),
            4005 => Ok(ErrorCode::CodeSpaceExhausted),
            4101 => Ok(ErrorCode::OrderNotPaid),
            4102 => Ok(ErrorCode::AlreadyScanned),
            4103 => Ok(ErrorCode::InvalidScanType),

            // Payment / Deposit
            5001 => Ok(ErrorCode::PaymentFailed),
            5002 => Ok(ErrorCode::PaymentInvalidMethod),
            5101 => Ok(ErrorCode::InsufficientBalance),
            5102 => Ok(ErrorCode::TopupBelowMinimum),
            5103 => Ok(ErrorCode::DepositTransactionNotFound),
            5104 => Ok(ErrorCode::DepositExpired),
            5201 => Ok(ErrorCode::GatewayUnavailable),
            5202 => Ok(ErrorCode::GatewayRejected),
            5203 => Ok(ErrorCode::WebhookTargetNotFound),

            // Catalog
            6001 => Ok(ErrorCode::TicketNotFound),
            6101 => Ok(ErrorCode::AddonNotFound),
            6201 => Ok(ErrorCode::PromoNotFound),
            6202 => Ok(ErrorCode::PromoCodeExists),
            6301 => Ok(ErrorCode::PartnerNotFound),
            6401 => Ok(ErrorCode::ResellerNotFound),
            6402 => Ok(ErrorCode::ResellerInactive),
            6501 => Ok(ErrorCode::DateOverrideExists),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::WebhookTokenInvalid.code(), 1003);
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::VenueClosed.code(), 4002);
        assert_eq!(ErrorCode::CodeSpaceExhausted.code(), 4005);
        assert_eq!(ErrorCode::AlreadyScanned.code(), 4102);
        assert_eq!(ErrorCode::InsufficientBalance.code(), 5101);
        assert_eq!(ErrorCode::GatewayUnavailable.code(), 5201);
        assert_eq!(ErrorCode::TicketNotFound.code(), 6001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::VenueClosed.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(4002), Ok(ErrorCode::VenueClosed));
        assert_eq!(ErrorCode::try_from(5101), Ok(ErrorCode::InsufficientBalance));
        assert_eq!(ErrorCode::try_from(9002), Ok(ErrorCode::DatabaseError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::OrderNotFound).unwrap();
        assert_eq!(json, "4001");
        let parsed: ErrorCode = serde_json::from_str("5102").unwrap();
        assert_eq!(parsed, ErrorCode::TopupBelowMinimum);
    }

    #[test]
    fn test_roundtrip() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::WebhookTokenInvalid,
            ErrorCode::VenueClosed,
            ErrorCode::InsufficientBalance,
            ErrorCode::InternalError,
        ];
        for code in codes {
            let json = serde_json::to_string(&code).unwrap();
            let parsed: ErrorCode = serde_json::from_str(&json).unwrap();
            assert_eq!(code, parsed);
        }
    }

    #[test]
    fn test_message() {
        assert_eq!(
            ErrorCode::VenueClosed.message(),
            "Venue is closed on the requested date"
        );
        assert_eq!(
            ErrorCode::InsufficientBalance.message(),
            "Deposit balance is insufficient"
        );
    }
}
