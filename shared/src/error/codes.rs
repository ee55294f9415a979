//! Unified error codes for the courier services
//!
//! Error codes are organized by category:
//! - 0xxx: General errors (request shape, field validation)
//! - 1xxx: Authentication errors
//! - 4xxx: Order and address errors
//! - 9xxx: System errors

use serde::Serialize;
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 on the wire so clients can switch on a stable number
/// while the message stays human-readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Request body could not be decoded
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Date or time-of-day could not be parsed
    InvalidDate = 9,
    /// Monetary amount or count could not be parsed
    InvalidAmount = 10,

    // ==================== 1xxx: Auth ====================
    /// Caller is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 4xxx: Order ====================
    /// Order not found in either collection
    OrderNotFound = 4001,
    /// Order number already used by a catering or on-demand order
    OrderNumberExists = 4008,
    /// order_type is neither catering nor on_demand
    InvalidOrderType = 4009,
    /// Address id supplied for update does not exist
    AddressNotFound = 4101,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default message for this code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Missing required field",
            ErrorCode::InvalidDate => "Invalid date",
            ErrorCode::InvalidAmount => "Invalid amount",

            ErrorCode::NotAuthenticated => "Unauthenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderNumberExists => "Order number already exists",
            ErrorCode::InvalidOrderType => "Invalid order type",
            ErrorCode::AddressNotFound => "Address not found",

            ErrorCode::InternalError => "Internal server error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
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
        assert_eq!(ErrorCode::InvalidRequest.code(), 5);
        assert_eq!(ErrorCode::RequiredField.code(), 7);
        assert_eq!(ErrorCode::InvalidDate.code(), 9);
        assert_eq!(ErrorCode::InvalidAmount.code(), 10);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::OrderNumberExists.code(), 4008);
        assert_eq!(ErrorCode::AddressNotFound.code(), 4101);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_error_code_serializes_as_number() {
        let json = serde_json::to_string(&ErrorCode::OrderNumberExists).unwrap();
        assert_eq!(json, "4008");
    }

    #[test]
    fn test_duplicate_order_number_message() {
        assert_eq!(
            ErrorCode::OrderNumberExists.message(),
            "Order number already exists"
        );
    }
}
