//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::OrderNotFound | Self::AddressNotFound => StatusCode::NOT_FOUND,

            // 401 Unauthorized
            Self::NotAuthenticated | Self::TokenExpired | Self::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }

            // 500 Internal Server Error
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation and duplicate order numbers; the
            // caller resubmits with corrected input)
            Self::InvalidRequest
            | Self::RequiredField
            | Self::InvalidDate
            | Self::InvalidAmount
            | Self::InvalidOrderType
            | Self::OrderNumberExists => StatusCode::BAD_REQUEST,
        }
    }
}
