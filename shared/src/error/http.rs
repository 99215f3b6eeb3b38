//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::OrderNotFound
            | Self::TicketNotFound
            | Self::AddonNotFound
            | Self::PromoNotFound
            | Self::PartnerNotFound
            | Self::ResellerNotFound
            | Self::DepositTransactionNotFound
            | Self::WebhookTargetNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists | Self::PromoCodeExists | Self::DateOverrideExists => {
                StatusCode::CONFLICT
            }

            // 401 Unauthorized
            Self::NotAuthenticated | Self::InvalidCredentials | Self::WebhookTokenInvalid => {
                StatusCode::UNAUTHORIZED
            }

            // 403 Forbidden
            Self::PermissionDenied | Self::AdminRequired | Self::ResellerInactive => {
                StatusCode::FORBIDDEN
            }

            // 402 Payment Required
            Self::InsufficientBalance => StatusCode::PAYMENT_REQUIRED,

            // 422 Unprocessable Entity (business rule violations)
            Self::VenueClosed | Self::TopupBelowMinimum | Self::DepositExpired => {
                StatusCode::UNPROCESSABLE_ENTITY
            }

            // 502 Bad Gateway (hosted payment provider failures)
            Self::GatewayUnavailable | Self::GatewayRejected => StatusCode::BAD_GATEWAY,

            // 503 Service Unavailable (transient, client can retry)
            Self::NetworkError => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError
            | Self::CodeSpaceExhausted => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
