//! API Response types and error codes
//!
//! - `ApiResponse<T>`: Unified response wrapper
//! - `error_codes`: Standard error code constants
//! - Response DTOs for the JSON order API

use serde::Serialize;
use utoipa::ToSchema;

use crate::core_types::MealCode;
use crate::models::Rejection;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// All API responses follow this structure:
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or null (error)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create success response with a custom message
    pub fn success_with_msg(data: T, msg: impl Into<String>) -> Self {
        Self {
            code: 0,
            msg: msg.into(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Submission status as reported by the JSON API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    Accepted,
    Duplicate,
}

/// Order submission response data
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionData {
    pub status: SubmissionStatus,
    #[schema(example = "1-9")]
    pub passenger_id: String,
    #[schema(example = "LA800")]
    pub flight_number: String,
    /// Stored meal code (the original one for duplicates)
    pub meal_code: MealCode,
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_MEAL_CODE: i32 = 1001;
    pub const INVALID_DEPARTURE: i32 = 1002;
    pub const TOO_CLOSE_TO_DEPARTURE: i32 = 1003;
    pub const INVALID_PASSENGER_ID: i32 = 1004;

    // Resource errors (4xxx)
    pub const FLIGHT_NOT_FOUND: i32 = 4001;
    pub const ROUTE_NOT_ELIGIBLE: i32 = 4002;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
}

/// API error code for a rejection
pub fn rejection_code(rejection: &Rejection) -> i32 {
    match rejection {
        Rejection::InvalidMealCode => error_codes::INVALID_MEAL_CODE,
        Rejection::InvalidDeparture => error_codes::INVALID_DEPARTURE,
        Rejection::TooCloseToDeparture => error_codes::TOO_CLOSE_TO_DEPARTURE,
        Rejection::InvalidPassengerId(_) => error_codes::INVALID_PASSENGER_ID,
        Rejection::FlightNotFound => error_codes::FLIGHT_NOT_FOUND,
        Rejection::RouteNotEligible => error_codes::ROUTE_NOT_ELIGIBLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_omits_data() {
        let resp: ApiResponse<SubmissionData> =
            ApiResponse::error(error_codes::FLIGHT_NOT_FOUND, "no flight");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json, serde_json::json!({"code": 4001, "msg": "no flight"}));
    }

    #[test]
    fn test_success_response_shape() {
        let resp = ApiResponse::success(SubmissionData {
            status: SubmissionStatus::Duplicate,
            passenger_id: "1-9".to_string(),
            flight_number: "LA800".to_string(),
            meal_code: MealCode::Vgml,
        });
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], error_codes::SUCCESS);
        assert_eq!(json["data"]["status"], "DUPLICATE");
        assert_eq!(json["data"]["meal_code"], "VGML");
    }
}
